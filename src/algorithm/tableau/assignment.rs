//! # Assignment
//!
//! Values of the basic and non-basic variables, and the status of each basic variable relative to
//! its bounds.
use enum_map::{Enum, EnumMap};
use log::trace;
use num_traits::Zero;

use crate::algorithm::statistics::Counter;
use crate::algorithm::tableau::Tableau;

/// Position of a basic variable's value relative to its bounds.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BasicStatus {
    /// Strictly below the lower bound.
    BelowLower,
    /// At the lower bound, within tolerance.
    AtLower,
    /// Strictly between the bounds.
    Between,
    /// At the upper bound, within tolerance.
    AtUpper,
    /// Strictly above the upper bound.
    AboveUpper,
}

impl BasicStatus {
    /// Classify a value.
    ///
    /// Violations are checked first, so that a value above the upper bound is reported as such even
    /// when it is also at the lower bound.
    pub fn classify(value: f64, lower: f64, upper: f64, tolerance: f64) -> Self {
        if value - upper > tolerance {
            Self::AboveUpper
        } else if lower - value > tolerance {
            Self::BelowLower
        } else if (upper - value).abs() <= tolerance {
            Self::AtUpper
        } else if (value - lower).abs() <= tolerance {
            Self::AtLower
        } else {
            Self::Between
        }
    }

    /// Whether a bound is violated.
    pub fn is_out_of_bounds(self) -> bool {
        matches!(self, Self::BelowLower | Self::AboveUpper)
    }
}

/// Whether the basic assignment is consistent with the non-basic assignment.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BasicAssignmentStatus {
    /// `x_B = B^-1 (b - A_N x_N)` holds.
    Valid,
    /// Non-basic values changed without updating the basic ones.
    Invalid,
}

impl Tableau {
    /// Value of a variable.
    ///
    /// Variables that were merged away report the value of the variable they were merged into.
    pub fn value(&self, variable: usize) -> f64 {
        debug_assert!(variable < self.n());

        self.raw_value(self.merged.resolve(variable))
    }

    /// Value of a variable, without following merges.
    pub(crate) fn raw_value(&self, variable: usize) -> f64 {
        let index = self.partition.variable_to_index(variable);
        if self.partition.is_basic(variable) {
            self.basic_assignment[index]
        } else {
            self.non_basic_assignment[index]
        }
    }

    /// Compute the value of all basic variables from the non-basic ones, `x_B = B^-1 (b - A_N x_N)`.
    ///
    /// Afterwards the basic statuses are recomputed and the cost function is stale.
    pub fn compute_assignment(&mut self) {
        debug_assert_eq!(self.factorization.m(), self.m());

        let mut right_hand_side = self.right_hand_side.clone();
        for (&variable, &value) in self.partition.non_basic_list().iter().zip(&self.non_basic_assignment) {
            if !value.is_zero() {
                self.matrix.sparse_column(variable).add_multiple_to(-value, &mut right_hand_side);
            }
        }
        self.basic_assignment = self.factorization.backward_transform(&right_hand_side);
        self.basic_assignment_status = BasicAssignmentStatus::Valid;
        self.count(Counter::AssignmentComputations);

        self.compute_basic_status();
        self.cost_function_manager.invalidate_cost_function();

        for (&variable, &value) in self.partition.basic_list().iter().zip(&self.basic_assignment) {
            self.watchers.notify_value(variable, value);
        }
    }

    /// Recompute the status of every basic variable.
    pub fn compute_basic_status(&mut self) {
        for index in 0..self.m() {
            self.compute_basic_status_by_index(index);
        }
    }

    /// Recompute the status of a basic variable.
    pub fn compute_basic_status_of(&mut self, variable: usize) {
        debug_assert!(self.partition.is_basic(variable));

        self.compute_basic_status_by_index(self.partition.variable_to_index(variable));
    }

    /// Recompute the status of the basic variable at a basic index.
    pub fn compute_basic_status_by_index(&mut self, basic_index: usize) {
        let variable = self.partition.basic_index_to_variable(basic_index);
        self.basic_status[basic_index] = BasicStatus::classify(
            self.basic_assignment[basic_index],
            self.bounds.lower(variable),
            self.bounds.upper(variable),
            self.configuration.bound_tolerance,
        );
    }

    /// Status of a basic variable.
    pub fn basic_status(&self, variable: usize) -> BasicStatus {
        debug_assert!(self.partition.is_basic(variable));

        self.basic_status[self.partition.variable_to_index(variable)]
    }

    /// Status of the basic variable at a basic index.
    pub fn basic_status_by_index(&self, basic_index: usize) -> BasicStatus {
        self.basic_status[basic_index]
    }

    /// Number of basic variables per status.
    pub fn basic_status_counts(&self) -> EnumMap<BasicStatus, usize> {
        let mut counts = EnumMap::default();
        for &status in &self.basic_status {
            counts[status] += 1;
        }
        counts
    }

    /// Whether any basic variable violates a bound.
    pub fn exists_basic_out_of_bounds(&self) -> bool {
        self.basic_status.iter().any(|status| status.is_out_of_bounds())
    }

    /// Whether a basic variable is below its lower bound.
    pub fn basic_too_low(&self, variable: usize) -> bool {
        self.basic_status(variable) == BasicStatus::BelowLower
    }

    /// Whether a basic variable is above its upper bound.
    pub fn basic_too_high(&self, variable: usize) -> bool {
        self.basic_status(variable) == BasicStatus::AboveUpper
    }

    /// Whether a basic variable violates a bound.
    pub fn basic_out_of_bounds(&self, variable: usize) -> bool {
        self.basic_status(variable).is_out_of_bounds()
    }

    /// Total violation `sum (lower - x) + sum (x - upper)` over basic variables out of bounds.
    pub fn sum_of_infeasibilities(&self) -> f64 {
        self.basic_status.iter()
            .zip(self.partition.basic_list())
            .zip(&self.basic_assignment)
            .map(|((status, &variable), &value)| match status {
                BasicStatus::BelowLower => self.bounds.lower(variable) - value,
                BasicStatus::AboveUpper => value - self.bounds.upper(variable),
                _ => 0_f64,
            })
            .sum()
    }

    /// Value of the basic variable at a basic index.
    pub fn basic_assignment(&self, basic_index: usize) -> f64 {
        self.basic_assignment[basic_index]
    }

    /// Whether the basic assignment agrees with the non-basic assignment.
    pub fn basic_assignment_status(&self) -> BasicAssignmentStatus {
        self.basic_assignment_status
    }

    /// Override the recorded consistency of the basic assignment.
    pub fn set_basic_assignment_status(&mut self, status: BasicAssignmentStatus) {
        self.basic_assignment_status = status;
    }

    /// Give a non-basic variable a new value.
    ///
    /// # Arguments
    ///
    /// * `variable`: A non-basic variable.
    /// * `value`: The new value.
    /// * `update_basics`: Whether to shift the basic variables along so that `A x = b` keeps
    /// holding. If not, the basic assignment is marked invalid.
    pub fn set_non_basic_assignment(&mut self, variable: usize, value: f64, update_basics: bool) {
        debug_assert!(!self.partition.is_basic(variable));
        trace!("Setting non-basic x{variable} to {value}");

        let index = self.partition.variable_to_index(variable);
        let delta = value - self.non_basic_assignment[index];
        self.non_basic_assignment[index] = value;
        self.watchers.notify_value(variable, value);

        if update_basics {
            if !delta.is_zero() {
                let column = self.factorization.backward_transform(self.matrix.column(variable));
                for (index, change) in column.into_iter().enumerate() {
                    if !change.is_zero() {
                        self.basic_assignment[index] -= change * delta;
                        let basic = self.partition.basic_index_to_variable(index);
                        self.watchers.notify_value(basic, self.basic_assignment[index]);
                    }
                }
                self.compute_basic_status();
            }
        } else {
            self.basic_assignment_status = BasicAssignmentStatus::Invalid;
        }
        self.cost_function_manager.invalidate_cost_function();
    }
}
