//! # Bounds
//!
//! Lower and upper bound per variable, and the operations on the tableau that change them.
use std::collections::BTreeSet;

use log::trace;

use crate::algorithm::statistics::Counter;
use crate::algorithm::tableau::Tableau;

/// Bounds of all variables, together with the set of variables for which `lower > upper`.
///
/// Unset bounds are infinite.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundStore {
    lower: Vec<f64>,
    upper: Vec<f64>,
    invalid: BTreeSet<usize>,
}

impl BoundStore {
    /// Unbounded variables.
    pub fn new(n: usize) -> Self {
        Self {
            lower: vec![f64::NEG_INFINITY; n],
            upper: vec![f64::INFINITY; n],
            invalid: BTreeSet::new(),
        }
    }

    /// Add a variable with the given bounds.
    pub fn push(&mut self, lower: f64, upper: f64) {
        self.lower.push(lower);
        self.upper.push(upper);
        self.update_validity(self.lower.len() - 1);
    }

    /// Lower bound of a variable.
    pub fn lower(&self, variable: usize) -> f64 {
        self.lower[variable]
    }

    /// Upper bound of a variable.
    pub fn upper(&self, variable: usize) -> f64 {
        self.upper[variable]
    }

    /// All lower bounds.
    pub fn lowers(&self) -> &[f64] {
        &self.lower
    }

    /// All upper bounds.
    pub fn uppers(&self) -> &[f64] {
        &self.upper
    }

    pub(crate) fn set_lower(&mut self, variable: usize, value: f64) {
        self.lower[variable] = value;
    }

    pub(crate) fn set_upper(&mut self, variable: usize, value: f64) {
        self.upper[variable] = value;
    }

    /// Record whether `lower <= upper` holds for one variable.
    ///
    /// # Return value
    ///
    /// Whether the bounds of this variable are valid.
    pub fn update_validity(&mut self, variable: usize) -> bool {
        if self.lower[variable] > self.upper[variable] {
            self.invalid.insert(variable);
            false
        } else {
            self.invalid.remove(&variable);
            true
        }
    }

    /// Recompute validity for every variable.
    pub fn update_all_validity(&mut self) -> bool {
        for variable in 0..self.lower.len() {
            self.update_validity(variable);
        }
        self.invalid.is_empty()
    }

    /// Whether every variable has `lower <= upper`.
    pub fn all_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Variables for which `lower > upper`, in increasing order.
    pub fn invalid_variables(&self) -> impl Iterator<Item = usize> + '_ {
        self.invalid.iter().copied()
    }
}

impl Tableau {
    /// Lower bound of a variable.
    pub fn lower_bound(&self, variable: usize) -> f64 {
        debug_assert!(variable < self.n());

        self.bounds.lower(variable)
    }

    /// Upper bound of a variable.
    pub fn upper_bound(&self, variable: usize) -> f64 {
        debug_assert!(variable < self.n());

        self.bounds.upper(variable)
    }

    /// All lower bounds, by variable.
    pub fn lower_bounds(&self) -> &[f64] {
        self.bounds.lowers()
    }

    /// All upper bounds, by variable.
    pub fn upper_bounds(&self) -> &[f64] {
        self.bounds.uppers()
    }

    /// Set a lower bound without touching the assignment.
    ///
    /// Meant for setting up the tableau. Watchers are notified and validity is updated.
    pub fn set_lower_bound(&mut self, variable: usize, value: f64) {
        debug_assert!(variable < self.n());

        self.bounds.set_lower(variable, value);
        self.watchers.notify_lower_bound(variable, value);
        self.bounds.update_validity(variable);
    }

    /// Set an upper bound without touching the assignment.
    ///
    /// Meant for setting up the tableau. Watchers are notified and validity is updated.
    pub fn set_upper_bound(&mut self, variable: usize, value: f64) {
        debug_assert!(variable < self.n());

        self.bounds.set_upper(variable, value);
        self.watchers.notify_upper_bound(variable, value);
        self.bounds.update_validity(variable);
    }

    /// Raise the lower bound of a variable during search.
    ///
    /// A non-basic variable below its new bound is moved onto it, updating the basic assignment. A
    /// basic variable gets its status recomputed.
    pub fn tighten_lower_bound(&mut self, variable: usize, value: f64) {
        debug_assert!(variable < self.n());
        trace!("Tightening lower bound of x{variable} to {value}");

        self.set_lower_bound(variable, value);
        self.after_tightening(variable, value, |current| current < value);
    }

    /// Lower the upper bound of a variable during search.
    ///
    /// A non-basic variable above its new bound is moved onto it, updating the basic assignment. A
    /// basic variable gets its status recomputed.
    pub fn tighten_upper_bound(&mut self, variable: usize, value: f64) {
        debug_assert!(variable < self.n());
        trace!("Tightening upper bound of x{variable} to {value}");

        self.set_upper_bound(variable, value);
        self.after_tightening(variable, value, |current| current > value);
    }

    fn after_tightening(&mut self, variable: usize, bound: f64, violated: impl Fn(f64) -> bool) {
        self.count(Counter::BoundTightenings);
        if !self.initialized {
            return;
        }

        let index = self.partition.variable_to_index(variable);
        if self.partition.is_basic(variable) {
            let before = self.basic_status[index];
            self.compute_basic_status_by_index(index);
            if self.basic_status[index] != before {
                self.cost_function_manager.invalidate_cost_function();
            }
        } else if violated(self.non_basic_assignment[index]) {
            self.set_non_basic_assignment(variable, bound, true);
        }
    }

    /// Recompute validity of the bounds of all variables.
    ///
    /// # Return value
    ///
    /// Whether `lower <= upper` for every variable.
    pub fn check_bounds_valid(&mut self) -> bool {
        self.bounds.update_all_validity()
    }

    /// Recompute validity of the bounds of a single variable.
    pub fn check_bounds_valid_for(&mut self, variable: usize) -> bool {
        self.bounds.update_validity(variable)
    }

    /// Whether `lower <= upper` for every variable, as last recorded.
    pub fn all_bounds_valid(&self) -> bool {
        self.bounds.all_valid()
    }

    /// Variables for which `lower > upper`, as last recorded.
    pub fn invalid_bound_variables(&self) -> Vec<usize> {
        self.bounds.invalid_variables().collect()
    }
}
