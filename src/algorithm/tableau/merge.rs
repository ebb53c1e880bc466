//! # Merged variables
//!
//! When two variables are known to be equal, the column of one is folded into the other. The
//! folded variable keeps its name but reads its value through the variable it was merged into.
use std::collections::BTreeMap;

use log::debug;

use crate::algorithm::error::TableauError;
use crate::algorithm::statistics::Counter;
use crate::algorithm::tableau::Tableau;

/// Records which variable was merged into which.
///
/// Chains are allowed: after merging `a` into `b` and `b` into `c`, `a` resolves to `c`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeMap {
    merged_into: BTreeMap<usize, usize>,
}

impl MergeMap {
    /// No merges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `source` was merged into `target`.
    pub fn record(&mut self, source: usize, target: usize) {
        debug_assert_ne!(self.resolve(target), source, "merging would create a cycle");
        debug_assert!(!self.merged_into.contains_key(&source));

        self.merged_into.insert(source, target);
    }

    /// Follow merges until reaching a variable that was not merged away.
    pub fn resolve(&self, mut variable: usize) -> usize {
        while let Some(&target) = self.merged_into.get(&variable) {
            variable = target;
        }
        variable
    }

    /// Whether a variable was merged into another one.
    pub fn is_merged(&self, variable: usize) -> bool {
        self.merged_into.contains_key(&variable)
    }

    /// Number of merged variables.
    pub fn len(&self) -> usize {
        self.merged_into.len()
    }

    /// Whether no variable was merged.
    pub fn is_empty(&self) -> bool {
        self.merged_into.is_empty()
    }
}

impl Tableau {
    /// Merge non-basic variable `x1` into non-basic variable `x2`.
    ///
    /// Column `x1` is added to column `x2` and then cleared. `x2` gets the intersection of both
    /// bound intervals and `x1` is fixed at its current value. Reading the value of `x1` afterwards
    /// yields the value of `x2`. The variable index space keeps its size, so `n()` does not shrink
    /// and `x1` stays addressable.
    ///
    /// # Errors
    ///
    /// When either variable is basic or doesn't exist, or when the basis can't be refactorized.
    pub fn merge_columns(&mut self, x1: usize, x2: usize) -> Result<(), TableauError> {
        debug_assert!(self.initialized);
        debug_assert_ne!(x1, x2);

        for variable in [x1, x2] {
            if variable >= self.n() {
                return Err(TableauError::UnknownVariable { variable, n: self.n() });
            }
            if self.partition.is_basic(variable) {
                return Err(TableauError::MergeBasic { variable });
            }
        }
        debug!("Merging x{x1} into x{x2}");

        if self.lower_bound(x1) > self.lower_bound(x2) {
            self.tighten_lower_bound(x2, self.lower_bound(x1));
        }
        if self.upper_bound(x1) < self.upper_bound(x2) {
            self.tighten_upper_bound(x2, self.upper_bound(x1));
        }

        self.matrix.merge_columns(x1, x2);
        self.merged.record(x1, x2);

        // The column is gone, so the value of x1 no longer matters to the equations
        let frozen = self.non_basic_assignment[self.partition.variable_to_index(x1)];
        self.set_lower_bound(x1, frozen);
        self.set_upper_bound(x1, frozen);

        self.count(Counter::MergedColumns);
        self.refresh_basis_factorization()?;
        self.compute_assignment();

        Ok(())
    }

    /// The variable that a variable was (transitively) merged into, or the variable itself.
    pub fn variable_after_merging(&self, variable: usize) -> usize {
        self.merged.resolve(variable)
    }

    /// Whether a variable was merged into another one.
    pub fn is_merged(&self, variable: usize) -> bool {
        self.merged.is_merged(variable)
    }
}
