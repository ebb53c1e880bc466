//! # Basis inverse rows
//!
//! Explicit row-major representation of the basis inverse `B^-1`. The inverse of a sparse matrix is
//! not generally sparse, so this does not scale. It is however useful for debugging and for
//! cross-checking the LU factorization to have an explicit representation of the inverse at hand.
use std::cmp::Ordering;

use num_traits::Zero;

use crate::algorithm::factorization::{BasisColumnOracle, BasisFactorization, FactorizationError, LuFactorization};

/// Explicit row-major dense representation of the basis inverse.
#[derive(PartialEq, Clone, Debug)]
pub struct ExplicitBasisInverse {
    rows: Vec<Vec<f64>>,
    nr_updates: usize,

    refactorization_threshold: usize,
}

impl ExplicitBasisInverse {
    /// Inverse of the identity matrix.
    pub fn identity(m: usize, refactorization_threshold: usize) -> Self {
        Self {
            rows: (0..m)
                .map(|i| {
                    let mut row = vec![0_f64; m];
                    row[i] = 1_f64;
                    row
                })
                .collect(),
            nr_updates: 0,

            refactorization_threshold,
        }
    }

    /// Normalize the pivot row and row reduce the other basis inverse rows.
    ///
    /// # Arguments
    ///
    /// * `pivot_row_index`: Index of the pivot row.
    /// * `column`: Column relative to the current basis to be entered into that basis.
    fn row_reduce(&mut self, pivot_row_index: usize, column: &[f64]) {
        let pivot_value = column[pivot_row_index];
        debug_assert!(!pivot_value.is_zero());

        for value in &mut self.rows[pivot_row_index] {
            *value /= pivot_value;
        }

        let (rows_left, rows_right) = self.rows.split_at_mut(pivot_row_index);
        let Some((pivot_row, rows_right)) = rows_right.split_first_mut() else {
            return;
        };

        for (edit_row_index, &column_value) in column.iter().enumerate() {
            if column_value.is_zero() {
                continue;
            }

            let edit_row = match edit_row_index.cmp(&pivot_row_index) {
                Ordering::Less => &mut rows_left[edit_row_index],
                Ordering::Equal => continue,
                Ordering::Greater => &mut rows_right[edit_row_index - (pivot_row_index + 1)],
            };
            for (value, pivot) in edit_row.iter_mut().zip(pivot_row.iter()) {
                *value -= column_value * pivot;
            }
        }
    }
}

impl BasisFactorization for ExplicitBasisInverse {
    fn m(&self) -> usize {
        self.rows.len()
    }

    fn backward_transform(&self, y: &[f64]) -> Vec<f64> {
        debug_assert_eq!(y.len(), self.m());

        self.rows.iter()
            .map(|row| row.iter().zip(y).map(|(a, b)| a * b).sum())
            .collect()
    }

    fn forward_transform(&self, y: &[f64]) -> Vec<f64> {
        debug_assert_eq!(y.len(), self.m());

        let mut x = vec![0_f64; self.m()];
        for (row, &factor) in self.rows.iter().zip(y) {
            if !factor.is_zero() {
                for (total, value) in x.iter_mut().zip(row) {
                    *total += factor * value;
                }
            }
        }
        x
    }

    fn update_to_adjacent_basis(&mut self, basic_index: usize, change_column: &[f64]) {
        debug_assert!(basic_index < self.m());
        debug_assert_eq!(change_column.len(), self.m());

        self.row_reduce(basic_index, change_column);
        self.nr_updates += 1;
    }

    fn refresh(&mut self, oracle: &dyn BasisColumnOracle) -> Result<(), FactorizationError> {
        let mut lower_upper = LuFactorization::new(self.refactorization_threshold);
        lower_upper.refresh(oracle)?;

        self.rows = lower_upper.inverse_basis_matrix()
            .chunks(oracle.m().max(1))
            .take(oracle.m())
            .map(<[f64]>::to_vec)
            .collect();
        self.nr_updates = 0;

        Ok(())
    }

    fn should_refresh(&self) -> bool {
        // Updates are exact row operations, but rounding errors still accumulate
        self.nr_updates >= self.refactorization_threshold
    }

    fn nr_updates(&self) -> usize {
        self.nr_updates
    }

    fn inverse_basis_matrix(&self) -> Vec<f64> {
        self.rows.concat()
    }
}
