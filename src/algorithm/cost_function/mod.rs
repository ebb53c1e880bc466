//! # Cost function maintenance
//!
//! Phase-one search minimizes the total amount by which basic variables violate their bounds. The
//! gradient of that objective with respect to the non-basic variables is the cost function, one
//! reduced cost per non-basic variable. A `CostFunctionManager` computes it from scratch and
//! updates it incrementally across pivots.
use std::fmt::Debug;

pub use infeasibility::InfeasibilityCostFunction;

use crate::algorithm::factorization::BasisFactorization;
use crate::algorithm::tableau::BasicStatus;
use crate::algorithm::tableau::row::TableauRow;
use crate::data::linear_algebra::matrix::ConstraintMatrix;

mod infeasibility;

/// Read-only view of the tableau needed to compute a cost function from scratch.
pub struct CostInputs<'a> {
    basic_status: &'a [BasicStatus],
    non_basic_index_to_variable: &'a [usize],
    matrix: &'a ConstraintMatrix,
    factorization: &'a dyn BasisFactorization,
}

impl<'a> CostInputs<'a> {
    pub(crate) fn new(
        basic_status: &'a [BasicStatus],
        non_basic_index_to_variable: &'a [usize],
        matrix: &'a ConstraintMatrix,
        factorization: &'a dyn BasisFactorization,
    ) -> Self {
        debug_assert_eq!(basic_status.len(), factorization.m());

        Self { basic_status, non_basic_index_to_variable, matrix, factorization }
    }

    /// Number of basic variables.
    pub fn m(&self) -> usize {
        self.basic_status.len()
    }

    /// Number of non-basic variables.
    pub fn nr_non_basic(&self) -> usize {
        self.non_basic_index_to_variable.len()
    }

    /// Status of every basic variable, by basic index.
    pub fn basic_status(&self) -> &[BasicStatus] {
        self.basic_status
    }

    /// Solve `y B = c_B`.
    pub fn multipliers(&self, basic_costs: &[f64]) -> Vec<f64> {
        debug_assert_eq!(basic_costs.len(), self.m());

        self.factorization.forward_transform(basic_costs)
    }

    /// Reduced cost `-y . A_j` for every non-basic variable, by non-basic index.
    pub fn reduced_costs(&self, multipliers: &[f64]) -> Vec<f64> {
        self.non_basic_index_to_variable.iter()
            .map(|&variable| -self.matrix.sparse_column(variable).inner_product(multipliers))
            .collect()
    }
}

/// What changed during a pivot, as needed for an incremental cost function update.
pub struct PivotCostUpdate<'a> {
    /// Non-basic index of the entering variable, now holding the leaving variable.
    pub entering_index: usize,
    /// Basic index of the leaving variable, now holding the entering variable.
    pub leaving_index: usize,
    /// Entry of the change column at the leaving index, `alpha_pq`.
    pub pivot_element: f64,
    /// Row of the leaving variable before the pivot, `x_lhs = scalar + sum_j coefficient_j x_j`.
    ///
    /// Note that the coefficients are `-alpha_pj`.
    pub pivot_row: &'a TableauRow,
    /// Status of every basic variable after the pivot.
    pub basic_status: &'a [BasicStatus],
}

/// Computes and maintains the cost function.
pub trait CostFunctionManager: Debug {
    /// Recompute the cost function from scratch and mark it valid.
    fn compute_core_cost_function(&mut self, inputs: &CostInputs);

    /// Update the cost function across a pivot, or mark it invalid if it can't be updated.
    fn update_cost_function_for_pivot(&mut self, update: &PivotCostUpdate);

    /// Reduced cost per non-basic index.
    fn cost_function(&self) -> &[f64];

    /// Mark the cost function as stale.
    fn invalidate_cost_function(&mut self);

    /// Whether the cost function is stale.
    fn cost_function_invalid(&self) -> bool;
}

/// Cost of a basic variable in the phase-one objective.
///
/// Minimizing `sum (lower - x) + sum (x - upper)` over the violated bounds gives `-1` below the lower
/// bound, `+1` above the upper bound and `0` otherwise.
pub fn basic_cost(status: BasicStatus) -> f64 {
    match status {
        BasicStatus::BelowLower => -1_f64,
        BasicStatus::AboveUpper => 1_f64,
        BasicStatus::AtLower | BasicStatus::Between | BasicStatus::AtUpper => 0_f64,
    }
}
