//! # Eta matrices
//!
//! After a basis change at position `p`, the new basis equals `B E` where `E` is the identity with
//! column `p` replaced by the change column `d = B^-1 a_q`. Storing these `E` ("eta files") avoids
//! recomputing the factorization after every pivot.
use num_traits::Zero;

use crate::data::linear_algebra::{EPSILON, SparseTuple};

/// Product-form update: the identity with one column replaced.
#[derive(PartialEq, Clone, Debug)]
pub struct EtaFile {
    /// Off-pivot values of the replaced column.
    values: Vec<SparseTuple<f64>>,
    pivot: usize,
    pivot_value: f64,
    len: usize,
}

impl EtaFile {
    /// Create a new instance.
    ///
    /// # Arguments
    ///
    /// * `pivot`: Index of the replaced column.
    /// * `column`: The column `d`, dense. The value at the pivot should be nonzero.
    pub fn new(pivot: usize, column: &[f64]) -> Self {
        debug_assert!(pivot < column.len());
        debug_assert!(!column[pivot].is_zero());

        Self {
            values: column.iter()
                .enumerate()
                .filter(|&(i, value)| i != pivot && value.abs() > EPSILON)
                .map(|(i, &value)| (i, value))
                .collect(),
            pivot,
            pivot_value: column[pivot],
            len: column.len(),
        }
    }

    /// Solve `x E = y` in place, i.e. row-multiply with the inverse of this matrix.
    ///
    /// Only the pivot entry changes.
    pub fn apply_left(&self, vector: &mut [f64]) {
        debug_assert_eq!(vector.len(), self.len);

        let total = self.values.iter()
            .fold(vector[self.pivot], |total, &(i, value)| total - vector[i] * value);
        vector[self.pivot] = total / self.pivot_value;
    }

    /// Solve `E x = y` in place, i.e. column-multiply with the inverse of this matrix.
    pub fn apply_right(&self, vector: &mut [f64]) {
        debug_assert_eq!(vector.len(), self.len);

        let pivot_value = vector[self.pivot] / self.pivot_value;
        vector[self.pivot] = pivot_value;
        if !pivot_value.is_zero() {
            for &(i, value) in &self.values {
                vector[i] -= value * pivot_value;
            }
        }
    }
}
