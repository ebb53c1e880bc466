//! # Sum of infeasibilities
//!
//! The default cost function manager.
use log::trace;

use crate::algorithm::cost_function::{basic_cost, CostFunctionManager, CostInputs, PivotCostUpdate};

/// Reduced costs of the phase-one objective.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InfeasibilityCostFunction {
    /// Cost of each basic variable at the time of the last computation or update.
    basic_costs: Vec<f64>,
    cost_function: Vec<f64>,
    invalid: bool,
}

impl InfeasibilityCostFunction {
    /// Create a manager without a cost function; it starts out invalid.
    pub fn new() -> Self {
        Self {
            invalid: true,
            ..Self::default()
        }
    }
}

impl CostFunctionManager for InfeasibilityCostFunction {
    fn compute_core_cost_function(&mut self, inputs: &CostInputs) {
        self.basic_costs = inputs.basic_status().iter().copied().map(basic_cost).collect();
        let multipliers = inputs.multipliers(&self.basic_costs);
        self.cost_function = inputs.reduced_costs(&multipliers);
        self.invalid = false;
    }

    fn update_cost_function_for_pivot(&mut self, update: &PivotCostUpdate) {
        if self.invalid {
            return;
        }
        debug_assert_eq!(self.cost_function.len(), update.pivot_row.len());
        debug_assert!(update.leaving_index < self.basic_costs.len());

        let ratio = self.cost_function[update.entering_index] / update.pivot_element;
        for (j, cost) in self.cost_function.iter_mut().enumerate() {
            if j != update.entering_index {
                // r_j - r_q alpha_pj / alpha_pq with alpha_pj the negated row coefficient
                *cost += update.pivot_row.coefficient(j) * ratio;
            }
        }
        self.cost_function[update.entering_index] = -ratio - self.basic_costs[update.leaving_index];
        self.basic_costs[update.leaving_index] = 0_f64;

        let stale = self.basic_costs.iter()
            .zip(update.basic_status)
            .any(|(&cost, &status)| cost != basic_cost(status));
        if stale {
            trace!("Basic cost changed during pivot, cost function invalidated");
            self.invalid = true;
        }
    }

    fn cost_function(&self) -> &[f64] {
        &self.cost_function
    }

    fn invalidate_cost_function(&mut self) {
        self.invalid = true;
    }

    fn cost_function_invalid(&self) -> bool {
        self.invalid
    }
}
