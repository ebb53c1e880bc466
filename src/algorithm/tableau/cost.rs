//! # Cost function and multipliers
//!
//! Operations on the tableau that read or maintain the phase-one cost function.
use log::trace;

use crate::algorithm::cost_function::{CostFunctionManager, CostInputs, PivotCostUpdate};
use crate::algorithm::strategy::pivot_rule::PivotRule;
use crate::algorithm::tableau::Tableau;

impl Tableau {
    /// Replace the cost function manager.
    ///
    /// The new manager starts out without a cost function, so it is marked invalid.
    pub fn register_cost_function_manager(&mut self, mut manager: Box<dyn CostFunctionManager>) {
        manager.invalidate_cost_function();
        self.cost_function_manager = manager;
    }

    /// Recompute the cost function from scratch.
    pub fn compute_cost_function(&mut self) {
        debug_assert!(self.initialized);

        let inputs = CostInputs::new(
            &self.basic_status,
            self.partition.non_basic_list(),
            &self.matrix,
            self.factorization.as_ref(),
        );
        self.cost_function_manager.compute_core_cost_function(&inputs);
    }

    /// Reduced cost per non-basic index.
    pub fn cost_function(&self) -> &[f64] {
        self.cost_function_manager.cost_function()
    }

    /// Whether the cost function needs to be recomputed before it is used.
    pub fn cost_function_invalid(&self) -> bool {
        self.cost_function_manager.cost_function_invalid()
    }

    /// Update the cost function for the pivot that was just performed.
    ///
    /// Requires the pivot row of the leaving variable from before the pivot. Without it, the cost
    /// function is marked invalid instead.
    pub(super) fn update_cost_function_for_pivot(
        &mut self,
        entering_index: usize,
        leaving_index: usize,
        pivot_element: f64,
    ) {
        match self.pivot.pivot_row.as_ref() {
            Some(pivot_row) if pivot_row.basic_index() == leaving_index => {
                let update = PivotCostUpdate {
                    entering_index,
                    leaving_index,
                    pivot_element,
                    pivot_row,
                    basic_status: &self.basic_status,
                };
                self.cost_function_manager.update_cost_function_for_pivot(&update);
            },
            _ => {
                trace!("No pivot row for basic index {leaving_index}, cost function invalidated");
                self.cost_function_manager.invalidate_cost_function();
            },
        }
    }

    /// Whether a non-basic variable can move up.
    pub fn non_basic_can_increase(&self, non_basic_index: usize) -> bool {
        let variable = self.partition.non_basic_index_to_variable(non_basic_index);
        let room = self.bounds.upper(variable) - self.non_basic_assignment[non_basic_index];
        room > self.configuration.bound_tolerance
    }

    /// Whether a non-basic variable can move down.
    pub fn non_basic_can_decrease(&self, non_basic_index: usize) -> bool {
        let variable = self.partition.non_basic_index_to_variable(non_basic_index);
        let room = self.non_basic_assignment[non_basic_index] - self.bounds.lower(variable);
        room > self.configuration.bound_tolerance
    }

    /// Whether moving a non-basic variable against the reduced cost `cost` is both profitable and
    /// possible.
    pub fn eligible_for_entry(&self, non_basic_index: usize, cost: f64) -> bool {
        if cost.abs() < self.configuration.entry_eligibility_tolerance {
            false
        } else if cost > 0_f64 {
            self.non_basic_can_decrease(non_basic_index)
        } else {
            self.non_basic_can_increase(non_basic_index)
        }
    }

    /// Non-basic indices of all variables eligible for entry, in increasing order.
    pub fn entry_candidates(&self) -> Vec<usize> {
        debug_assert!(!self.cost_function_invalid());
        debug_assert_eq!(self.cost_function().len(), self.n() - self.m());

        self.cost_function().iter()
            .enumerate()
            .filter(|&(j, &cost)| self.eligible_for_entry(j, cost))
            .map(|(j, _)| j)
            .collect()
    }

    /// Let a pivot rule choose the entering variable among the eligible ones.
    ///
    /// # Return value
    ///
    /// Whether a variable was selected. If not, no variable is eligible for entry.
    pub fn pick_entering_variable(&mut self, rule: &mut impl PivotRule) -> bool {
        let candidates = self.entry_candidates();
        match rule.select_entering(&candidates, self.cost_function()) {
            Some(non_basic_index) => {
                self.set_entering_variable_index(non_basic_index);
                true
            },
            None => false,
        }
    }

    /// Solve `y B = c` for a cost vector over the basic variables.
    pub fn compute_multipliers(&mut self, row_coefficients: &[f64]) {
        debug_assert_eq!(row_coefficients.len(), self.m());

        self.multipliers = self.factorization.forward_transform(row_coefficients);
    }

    /// Multipliers from the last call to `compute_multipliers`.
    pub fn multipliers(&self) -> &[f64] {
        &self.multipliers
    }
}
