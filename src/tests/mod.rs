//! # Tests that require a look inside the crate.
//!
//! Each module provides a small system together with the values it is expected to produce.
//!
//! Convention for function names:
//!
//! * `fn tableau()`: The tableau after `initialize_basis`.
//! * `fn tableau_with(configuration)`: Idem, with a specific configuration.

use crate::algorithm::strategy::pivot_rule::SteepestDescentAlongVariable;
use crate::algorithm::tableau::Tableau;

/// How a phase-one search ended.
#[derive(Debug, Eq, PartialEq)]
pub enum Outcome {
    Feasible,
    Infeasible,
    IterationLimit,
}

/// Minimal phase-one driver, checking the invariants after every pivot.
pub fn drive(tableau: &mut Tableau, max_iterations: usize) -> Outcome {
    let mut rule = SteepestDescentAlongVariable;
    for _ in 0..max_iterations {
        if !tableau.exists_basic_out_of_bounds() {
            return Outcome::Feasible;
        }
        if tableau.cost_function_invalid() {
            tableau.compute_cost_function();
        }
        if !tableau.pick_entering_variable(&mut rule) {
            return Outcome::Infeasible;
        }
        tableau.compute_change_column();
        tableau.pick_leaving_variable();
        if !tableau.performing_fake_pivot() {
            tableau.compute_pivot_row();
        }
        tableau.perform_pivot();
        assert!(tableau.is_consistent(1e-7));
    }

    Outcome::IterationLimit
}
