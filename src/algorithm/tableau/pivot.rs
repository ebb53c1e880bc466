//! # Pivoting
//!
//! Choosing the leaving variable for a given entering variable and performing the basis change.
//!
//! A pivot moves the entering (non-basic) variable in the direction that decreases the phase-one
//! objective. The basic variables move along with it through the change column `d = B^-1 a_q`: when
//! the entering variable changes by `delta`, basic variable `i` changes by `-d_i delta`. The ratio
//! test determines how far the entering variable can move before a basic variable hits a bound, or
//! the entering variable hits its own opposite bound. In the latter case no basis change happens:
//! this is called a fake pivot.
use log::{debug, trace, warn};
use num_traits::Zero;

use crate::algorithm::statistics::Counter;
use crate::algorithm::tableau::{BasicStatus, Tableau};
use crate::algorithm::tableau::row::TableauRow;

/// Outcome of the ratio test.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LeavingVariable {
    /// The basic variable at this basic index leaves the basis.
    Basic(usize),
    /// The entering variable reaches its other bound first; the basis doesn't change.
    Entering,
}

/// Selections made for the pivot in progress.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct PivotState {
    /// Non-basic index of the entering variable.
    pub(crate) entering: Option<usize>,
    pub(crate) leaving: Option<LeavingVariable>,
    /// Direction of the entering variable, set by the ratio test.
    pub(crate) entering_decreases: bool,
    /// Direction of the leaving basic variable, set by the ratio test.
    pub(crate) leaving_increases: bool,
    /// Distance that the entering variable moves, nonnegative.
    pub(crate) change_ratio: f64,
    pub(crate) change_column: Vec<f64>,
    pub(crate) pivot_row: Option<TableauRow>,
}

impl Tableau {
    /// Select the entering variable by its non-basic index.
    pub fn set_entering_variable_index(&mut self, non_basic_index: usize) {
        debug_assert!(non_basic_index < self.n() - self.m());

        self.pivot.entering = Some(non_basic_index);
    }

    /// Non-basic index of the entering variable, if one is selected.
    pub fn entering_variable_index(&self) -> Option<usize> {
        self.pivot.entering
    }

    /// The entering variable, if one is selected.
    pub fn entering_variable(&self) -> Option<usize> {
        self.pivot.entering.map(|index| self.partition.non_basic_index_to_variable(index))
    }

    /// Select the leaving variable by its basic index.
    pub fn set_leaving_variable_index(&mut self, basic_index: usize) {
        debug_assert!(basic_index < self.m());

        self.pivot.leaving = Some(LeavingVariable::Basic(basic_index));
    }

    /// Result of the last ratio test, or the leaving variable set explicitly.
    pub fn leaving_variable_index(&self) -> Option<LeavingVariable> {
        self.pivot.leaving
    }

    /// The leaving variable, which is the entering variable itself for a fake pivot.
    pub fn leaving_variable(&self) -> Option<usize> {
        match self.pivot.leaving? {
            LeavingVariable::Basic(index) => Some(self.partition.basic_index_to_variable(index)),
            LeavingVariable::Entering => self.entering_variable(),
        }
    }

    /// Whether the selected pivot leaves the basis unchanged.
    pub fn performing_fake_pivot(&self) -> bool {
        self.pivot.leaving == Some(LeavingVariable::Entering)
    }

    /// Distance that the entering variable moves during the pivot.
    pub fn change_ratio(&self) -> f64 {
        self.pivot.change_ratio
    }

    /// Override the distance that the entering variable moves during the pivot.
    pub fn set_change_ratio(&mut self, change_ratio: f64) {
        debug_assert!(change_ratio >= 0_f64);

        self.pivot.change_ratio = change_ratio;
    }

    fn entering_index(&self) -> usize {
        self.pivot.entering.expect("no entering variable selected")
    }

    /// Compute `d = B^-1 a_q` for the entering variable.
    pub fn compute_change_column(&mut self) {
        let variable = self.partition.non_basic_index_to_variable(self.entering_index());
        self.pivot.change_column = self.factorization.backward_transform(self.matrix.column(variable));
    }

    /// The change column of the entering variable.
    pub fn change_column(&self) -> &[f64] {
        &self.pivot.change_column
    }

    /// Provide the change column instead of computing it.
    pub fn set_change_column(&mut self, change_column: Vec<f64>) {
        debug_assert_eq!(change_column.len(), self.m());

        self.pivot.change_column = change_column;
    }

    /// Row of the tableau for a basic variable, `x_lhs = scalar + sum_j c_j x_j`.
    ///
    /// With `rho = e_i B^-1`, the scalar is `rho b` and the coefficient of non-basic `x_j` is
    /// `-rho A_j`.
    pub fn tableau_row(&self, basic_index: usize) -> TableauRow {
        debug_assert!(basic_index < self.m());

        let mut unit = vec![0_f64; self.m()];
        unit[basic_index] = 1_f64;
        let rho = self.factorization.forward_transform(&unit);

        let entries = self.partition.non_basic_list().iter()
            .map(|&variable| (variable, -self.matrix.sparse_column(variable).inner_product(&rho)))
            .collect();
        let scalar = rho.iter().zip(&self.right_hand_side).map(|(a, b)| a * b).sum();

        TableauRow::new(basic_index, self.partition.basic_index_to_variable(basic_index), scalar, entries)
    }

    /// Compute the row of the leaving variable, for the incremental cost function update.
    pub fn compute_pivot_row(&mut self) {
        match self.pivot.leaving {
            Some(LeavingVariable::Basic(index)) => self.pivot.pivot_row = Some(self.tableau_row(index)),
            _ => debug_assert!(false, "pivot row requires a basic leaving variable"),
        }
    }

    /// The row computed by `compute_pivot_row`.
    pub fn pivot_row(&self) -> Option<&TableauRow> {
        self.pivot.pivot_row.as_ref()
    }

    /// Distance the entering variable can move before reaching its other bound.
    fn entering_range(&self, decrease: bool) -> f64 {
        let index = self.entering_index();
        let variable = self.partition.non_basic_index_to_variable(index);
        let value = self.non_basic_assignment[index];

        let range = if decrease {
            value - self.bounds.lower(variable)
        } else {
            self.bounds.upper(variable) - value
        };
        range.max(0_f64)
    }

    /// How far a basic variable can move in one direction before it needs to stop.
    ///
    /// A variable that violates a bound may move up to that bound when moving towards it, and
    /// without limit when moving away from it.
    fn max_basic_change(&self, basic_index: usize, increases: bool) -> f64 {
        let variable = self.partition.basic_index_to_variable(basic_index);
        let value = self.basic_assignment[basic_index];
        let lower = self.bounds.lower(variable);
        let upper = self.bounds.upper(variable);

        let change = match (increases, self.basic_status[basic_index]) {
            (true, BasicStatus::BelowLower) => lower - value,
            (true, BasicStatus::AboveUpper) | (false, BasicStatus::BelowLower) => f64::INFINITY,
            (true, _) => upper - value,
            (false, BasicStatus::AboveUpper) => value - upper,
            (false, _) => value - lower,
        };
        change.max(0_f64)
    }

    /// How far the entering variable can move before the basic variable at this index stops it.
    ///
    /// # Arguments
    ///
    /// * `basic_index`: Basic variable to check.
    /// * `coefficient`: Entry of the change column at that index, nonzero.
    /// * `decrease`: Whether the entering variable decreases.
    ///
    /// # Return value
    ///
    /// A nonnegative ratio, possibly infinite.
    pub fn ratio_constraint_per_basic(&self, basic_index: usize, coefficient: f64, decrease: bool) -> f64 {
        debug_assert!(!coefficient.is_zero());

        let increases = (coefficient > 0_f64) == decrease;
        self.max_basic_change(basic_index, increases) / coefficient.abs()
    }

    /// Determine the leaving variable and the change ratio from the change column.
    ///
    /// Uses the Harris ratio test or the standard one, depending on the configuration.
    pub fn pick_leaving_variable(&mut self) {
        debug_assert_eq!(self.pivot.change_column.len(), self.m());

        if self.configuration.use_harris_ratio_test {
            self.harris_ratio_test();
        } else {
            self.standard_ratio_test();
        }
        trace!(
            "Ratio test: {:?} with ratio {} for entering x{}",
            self.pivot.leaving,
            self.pivot.change_ratio,
            self.partition.non_basic_index_to_variable(self.entering_index()),
        );
    }

    /// Set the change column and determine the leaving variable.
    pub fn pick_leaving_variable_with(&mut self, change_column: Vec<f64>) {
        self.set_change_column(change_column);
        self.pick_leaving_variable();
    }

    /// Textbook ratio test: the smallest ratio wins, the first in basic index order on ties.
    ///
    /// The entering variable's own range is the initial candidate, so it wins all ties.
    pub fn standard_ratio_test(&mut self) {
        let decrease = self.cost_function()[self.entering_index()] > 0_f64;

        let mut leaving = LeavingVariable::Entering;
        let mut smallest = self.entering_range(decrease);
        for (index, &coefficient) in self.pivot.change_column.iter().enumerate() {
            if coefficient.abs() < self.configuration.pivot_change_column_tolerance {
                continue;
            }
            let ratio = self.ratio_constraint_per_basic(index, coefficient, decrease);
            if ratio < smallest {
                smallest = ratio;
                leaving = LeavingVariable::Basic(index);
            }
        }

        self.set_ratio_test_result(leaving, smallest, decrease);
    }

    /// Two-pass Harris ratio test.
    ///
    /// The first pass computes the largest step for which no basic variable crosses a bound by
    /// more than the Harris tolerance. The second pass picks, among the basic variables whose exact
    /// ratio lies within that step, the one with the largest change column entry in magnitude. This
    /// trades a bounded bound violation for a numerically stable pivot.
    pub fn harris_ratio_test(&mut self) {
        let decrease = self.cost_function()[self.entering_index()] > 0_f64;
        let tolerance = self.configuration.pivot_change_column_tolerance;
        let range = self.entering_range(decrease);

        let relaxed_bound = self.pivot.change_column.iter()
            .enumerate()
            .filter(|(_, coefficient)| coefficient.abs() >= tolerance)
            .map(|(index, &coefficient)| {
                let increases = (coefficient > 0_f64) == decrease;
                (self.max_basic_change(index, increases) + self.configuration.harris_tolerance) / coefficient.abs()
            })
            .fold(range, f64::min);

        if range <= relaxed_bound {
            self.set_ratio_test_result(LeavingVariable::Entering, range, decrease);
            return;
        }

        let mut chosen: Option<(usize, f64, f64)> = None;
        let mut exact_minimum = f64::INFINITY;
        for (index, &coefficient) in self.pivot.change_column.iter().enumerate() {
            if coefficient.abs() < tolerance {
                continue;
            }
            let ratio = self.ratio_constraint_per_basic(index, coefficient, decrease);
            exact_minimum = exact_minimum.min(ratio);
            let larger = chosen.is_none_or(|(_, magnitude, _)| coefficient.abs() > magnitude);
            if ratio <= relaxed_bound && larger {
                chosen = Some((index, coefficient.abs(), ratio));
            }
        }

        match chosen {
            Some((index, _, ratio)) => {
                if ratio > exact_minimum {
                    debug!("Harris ratio test accepts ratio {ratio} over the exact minimum {exact_minimum}");
                }
                self.set_ratio_test_result(LeavingVariable::Basic(index), ratio.max(0_f64), decrease);
            },
            None => {
                warn!("Harris ratio test found no candidate below its bound {relaxed_bound}");
                self.set_ratio_test_result(LeavingVariable::Entering, range, decrease);
            },
        }
    }

    fn set_ratio_test_result(&mut self, leaving: LeavingVariable, change_ratio: f64, decrease: bool) {
        self.pivot.entering_decreases = decrease;
        self.pivot.leaving_increases = match leaving {
            LeavingVariable::Basic(index) => (self.pivot.change_column[index] > 0_f64) == decrease,
            LeavingVariable::Entering => !decrease,
        };
        self.pivot.leaving = Some(leaving);
        self.pivot.change_ratio = change_ratio;
    }

    /// Perform the selected pivot.
    ///
    /// For a fake pivot, the entering variable jumps to its opposite bound and the basic variables
    /// follow. Otherwise, the entering variable moves by the change ratio, becomes basic, and the
    /// leaving variable becomes non-basic exactly at the bound it was heading for.
    ///
    /// If enough basis updates accumulated, the factorization is refreshed. A failure to do so is
    /// logged and the updated factorization stays in use.
    pub fn perform_pivot(&mut self) {
        debug_assert!(self.initialized);
        let entering_index = self.entering_index();

        match self.pivot.leaving {
            Some(LeavingVariable::Entering) => self.perform_fake_pivot(entering_index),
            Some(LeavingVariable::Basic(leaving_index)) => {
                self.perform_basis_change(entering_index, leaving_index)
            },
            None => debug_assert!(false, "no leaving variable selected"),
        }

        self.pivot = Default::default();
        self.refresh_if_needed();
    }

    fn signed_change(&self) -> f64 {
        if self.pivot.entering_decreases {
            -self.pivot.change_ratio
        } else {
            self.pivot.change_ratio
        }
    }

    /// Shift all basic variables along with an entering variable change of `delta`.
    fn update_basic_assignment(&mut self, delta: f64) {
        for (value, &change) in self.basic_assignment.iter_mut().zip(&self.pivot.change_column) {
            if !change.is_zero() {
                *value -= change * delta;
            }
        }
    }

    fn notify_changed_basics(&self) {
        for (index, &change) in self.pivot.change_column.iter().enumerate() {
            if !change.is_zero() {
                self.watchers.notify_value(
                    self.partition.basic_index_to_variable(index),
                    self.basic_assignment[index],
                );
            }
        }
    }

    fn perform_fake_pivot(&mut self, entering_index: usize) {
        if !self.pivot.change_ratio.is_finite() {
            warn!("Fake pivot without a bound to move to, ignored");
            return;
        }
        let variable = self.partition.non_basic_index_to_variable(entering_index);
        trace!("Fake pivot: x{variable} moves by {}", self.signed_change());

        let target = if self.pivot.entering_decreases {
            self.bounds.lower(variable)
        } else {
            self.bounds.upper(variable)
        };
        let delta = target - self.non_basic_assignment[entering_index];

        self.update_basic_assignment(delta);
        self.non_basic_assignment[entering_index] = target;

        self.compute_basic_status();
        self.cost_function_manager.invalidate_cost_function();

        self.watchers.notify_value(variable, target);
        self.notify_changed_basics();
        self.count(Counter::FakePivots);
    }

    fn perform_basis_change(&mut self, entering_index: usize, leaving_index: usize) {
        debug_assert_eq!(self.pivot.change_column.len(), self.m());
        let pivot_element = self.pivot.change_column[leaving_index];
        debug_assert!(!pivot_element.is_zero());

        let leaving_variable = self.partition.basic_index_to_variable(leaving_index);
        let landing = match (self.pivot.leaving_increases, self.basic_status[leaving_index]) {
            (true, BasicStatus::BelowLower)
            | (false, BasicStatus::AtLower | BasicStatus::Between | BasicStatus::AtUpper) => {
                self.bounds.lower(leaving_variable)
            },
            (true, _) => self.bounds.upper(leaving_variable),
            (false, BasicStatus::AboveUpper) => self.bounds.upper(leaving_variable),
            // Moving away from a violated lower bound has an infinite ratio and is never selected
            (false, BasicStatus::BelowLower) => self.bounds.lower(leaving_variable),
        };

        let delta = self.signed_change();
        let entering_value = self.non_basic_assignment[entering_index] + delta;
        self.update_basic_assignment(delta);

        let (entering_variable, _) = self.partition.swap(entering_index, leaving_index);
        trace!(
            "Pivot: x{entering_variable} enters at {entering_value}, x{leaving_variable} leaves at {landing}",
        );
        self.basic_assignment[leaving_index] = entering_value;
        self.non_basic_assignment[entering_index] = landing;

        self.factorization.update_to_adjacent_basis(leaving_index, &self.pivot.change_column);
        self.compute_basic_status();
        self.update_cost_function_for_pivot(entering_index, leaving_index, pivot_element);

        self.notify_changed_basics();
        self.watchers.notify_value(leaving_variable, landing);
        self.count(Counter::Pivots);
        if delta.is_zero() {
            self.count(Counter::DegeneratePivots);
        }
    }

    /// Exchange the entering and the leaving variable without changing any value.
    ///
    /// The leaving variable has to be within its bounds, as it keeps its value when it becomes
    /// non-basic. The change column of the entering variable needs to be computed.
    pub fn perform_degenerate_pivot(&mut self) {
        debug_assert!(self.initialized);
        let entering_index = self.entering_index();
        let Some(LeavingVariable::Basic(leaving_index)) = self.pivot.leaving else {
            debug_assert!(false, "degenerate pivot requires a basic leaving variable");
            return;
        };
        debug_assert!(!self.basic_status[leaving_index].is_out_of_bounds());
        debug_assert_eq!(self.pivot.change_column.len(), self.m());
        let pivot_element = self.pivot.change_column[leaving_index];
        debug_assert!(!pivot_element.is_zero());

        let entering_value = self.non_basic_assignment[entering_index];
        let leaving_value = self.basic_assignment[leaving_index];
        let (entering_variable, leaving_variable) = self.partition.swap(entering_index, leaving_index);
        trace!("Degenerate pivot: x{entering_variable} enters, x{leaving_variable} leaves");
        self.basic_assignment[leaving_index] = entering_value;
        self.non_basic_assignment[entering_index] = leaving_value;

        self.factorization.update_to_adjacent_basis(leaving_index, &self.pivot.change_column);
        self.compute_basic_status_by_index(leaving_index);
        self.update_cost_function_for_pivot(entering_index, leaving_index, pivot_element);

        self.count(Counter::Pivots);
        self.count(Counter::DegeneratePivots);
        self.pivot = Default::default();
        self.refresh_if_needed();
    }

    fn refresh_if_needed(&mut self) {
        if self.factorization.should_refresh() {
            if let Err(error) = self.refresh_basis_factorization() {
                warn!("Refreshing the basis factorization failed, keeping the updated one: {error}");
            }
        }
    }
}
