//! # Tableau rows
//!
//! A row of the tableau expresses one basic variable in terms of the non-basic ones.
use std::fmt;

use itertools::Itertools;

use crate::data::linear_algebra::SparseTuple;

/// The equation `x_lhs = scalar + sum_j coefficient_j x_(variable_j)`.
///
/// Entries are ordered by non-basic index.
#[derive(Clone, Debug, PartialEq)]
pub struct TableauRow {
    basic_index: usize,
    lhs: usize,
    scalar: f64,
    /// Variable and coefficient per non-basic index.
    entries: Vec<(usize, f64)>,
}

impl TableauRow {
    pub(crate) fn new(basic_index: usize, lhs: usize, scalar: f64, entries: Vec<(usize, f64)>) -> Self {
        Self { basic_index, lhs, scalar, entries }
    }

    /// Basic index of the left-hand side variable at the time the row was computed.
    pub fn basic_index(&self) -> usize {
        self.basic_index
    }

    /// The basic variable expressed by this row.
    pub fn lhs(&self) -> usize {
        self.lhs
    }

    /// Constant term.
    pub fn scalar(&self) -> f64 {
        self.scalar
    }

    /// Number of entries, equal to the number of non-basic variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no non-basic variables.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Coefficient at a non-basic index.
    pub fn coefficient(&self, non_basic_index: usize) -> f64 {
        self.entries[non_basic_index].1
    }

    /// Variable at a non-basic index.
    pub fn variable(&self, non_basic_index: usize) -> usize {
        self.entries[non_basic_index].0
    }

    /// `(variable, coefficient)` pairs by non-basic index.
    pub fn iter(&self) -> impl Iterator<Item = &(usize, f64)> {
        self.entries.iter()
    }

    /// Entries with a coefficient at least `tolerance` in magnitude, as `(variable, coefficient)`.
    pub fn nonzeros(&self, tolerance: f64) -> Vec<SparseTuple<f64>> {
        self.entries.iter()
            .filter(|(_, coefficient)| coefficient.abs() >= tolerance)
            .copied()
            .collect()
    }

    /// Value of the right-hand side under an assignment of the non-basic variables.
    pub fn evaluate(&self, value: impl Fn(usize) -> f64) -> f64 {
        self.scalar + self.entries.iter()
            .map(|&(variable, coefficient)| coefficient * value(variable))
            .sum::<f64>()
    }
}

impl fmt::Display for TableauRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{} = {}", self.lhs, self.scalar)?;
        let terms = self.entries.iter()
            .filter(|(_, coefficient)| *coefficient != 0_f64)
            .map(|(variable, coefficient)| {
                let sign = if *coefficient < 0_f64 { '-' } else { '+' };
                format!(" {sign} {} x{variable}", coefficient.abs())
            })
            .join("");
        write!(f, "{terms}")
    }
}
