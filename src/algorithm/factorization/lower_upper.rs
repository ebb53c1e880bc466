//! # LU decomposition
//!
//! Dense LU decomposition with partial pivoting, followed by a growing list of eta files for the
//! basis changes since the decomposition was computed.
use std::cmp::Ordering;
use std::fmt;

use itertools::Itertools;
use num_traits::Zero;

use crate::algorithm::factorization::{BasisColumnOracle, BasisFactorization, EtaFile, FactorizationError, read_basis, SINGULARITY_TOLERANCE};

/// Decompose the basis matrix `B_0` into `P B_0 = L U` where
///
/// * `P` is a row permutation
/// * `L` is lower triangular with `1`'s on the diagonal
/// * `U` is upper triangular
///
/// The current basis is `B = B_0 E_1 E_2 ... E_k` with the `E_i` stored in `updates`.
#[derive(PartialEq, Clone, Debug)]
pub struct LuFactorization {
    m: usize,
    /// `L` strictly below the diagonal and `U` on and above it, row major.
    lower_upper: Vec<f64>,
    /// Row `i` of `P B_0` is row `row_permutation[i]` of `B_0`.
    row_permutation: Vec<usize>,
    updates: Vec<EtaFile>,

    refactorization_threshold: usize,
}

impl LuFactorization {
    /// Factorization of a basis of dimension zero.
    ///
    /// # Arguments
    ///
    /// * `refactorization_threshold`: Number of updates after which `should_refresh` is true.
    pub fn new(refactorization_threshold: usize) -> Self {
        Self::identity(0, refactorization_threshold)
    }

    /// Factorization of the identity matrix.
    pub fn identity(m: usize, refactorization_threshold: usize) -> Self {
        let mut lower_upper = vec![0_f64; m * m];
        for i in 0..m {
            lower_upper[i * m + i] = 1_f64;
        }

        Self {
            m,
            lower_upper,
            row_permutation: (0..m).collect(),
            updates: Vec::new(),

            refactorization_threshold,
        }
    }

    /// Gaussian elimination with partial pivoting on a dense row-major matrix.
    fn decompose(mut values: Vec<f64>, m: usize) -> Result<(Vec<f64>, Vec<usize>), FactorizationError> {
        let mut row_permutation = (0..m).collect::<Vec<_>>();

        for k in 0..m {
            let (pivot_row, pivot_magnitude) = (k..m)
                .map(|i| (i, values[i * m + k].abs()))
                .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
                .unwrap_or((k, 0_f64));
            if pivot_magnitude.is_nan() || pivot_magnitude < SINGULARITY_TOLERANCE {
                return Err(FactorizationError::SingularBasis { column: k });
            }

            if pivot_row != k {
                for j in 0..m {
                    values.swap(k * m + j, pivot_row * m + j);
                }
                row_permutation.swap(k, pivot_row);
            }

            let pivot_value = values[k * m + k];
            for i in (k + 1)..m {
                let factor = values[i * m + k] / pivot_value;
                values[i * m + k] = factor;
                if !factor.is_zero() {
                    for j in (k + 1)..m {
                        values[i * m + j] -= factor * values[k * m + j];
                    }
                }
            }
        }

        Ok((values, row_permutation))
    }

    /// Solve `B_0 x = y`.
    fn solve_decomposition(&self, y: &[f64]) -> Vec<f64> {
        let m = self.m;

        // L w = P y
        let mut x = self.row_permutation.iter().map(|&i| y[i]).collect::<Vec<_>>();
        for i in 0..m {
            let total = (0..i).map(|j| self.lower_upper[i * m + j] * x[j]).sum::<f64>();
            x[i] -= total;
        }
        // U x = w
        for i in (0..m).rev() {
            let total = ((i + 1)..m).map(|j| self.lower_upper[i * m + j] * x[j]).sum::<f64>();
            x[i] = (x[i] - total) / self.lower_upper[i * m + i];
        }

        x
    }

    /// Solve `x B_0 = y`, i.e. `U^T L^T P x = y`.
    fn solve_decomposition_transposed(&self, y: &[f64]) -> Vec<f64> {
        let m = self.m;

        // U^T s = y
        let mut s = y.to_vec();
        for j in 0..m {
            let total = (0..j).map(|i| self.lower_upper[i * m + j] * s[i]).sum::<f64>();
            s[j] = (s[j] - total) / self.lower_upper[j * m + j];
        }
        // L^T t = s
        for j in (0..m).rev() {
            let total = ((j + 1)..m).map(|i| self.lower_upper[i * m + j] * s[i]).sum::<f64>();
            s[j] -= total;
        }
        // P x = t
        let mut x = vec![0_f64; m];
        for (i, &original) in self.row_permutation.iter().enumerate() {
            x[original] = s[i];
        }

        x
    }
}

impl BasisFactorization for LuFactorization {
    fn m(&self) -> usize {
        self.m
    }

    fn backward_transform(&self, y: &[f64]) -> Vec<f64> {
        debug_assert_eq!(y.len(), self.m);

        let mut x = self.solve_decomposition(y);
        for update in &self.updates {
            update.apply_right(&mut x);
        }
        x
    }

    fn forward_transform(&self, y: &[f64]) -> Vec<f64> {
        debug_assert_eq!(y.len(), self.m);

        let mut w = y.to_vec();
        for update in self.updates.iter().rev() {
            update.apply_left(&mut w);
        }
        self.solve_decomposition_transposed(&w)
    }

    fn update_to_adjacent_basis(&mut self, basic_index: usize, change_column: &[f64]) {
        debug_assert!(basic_index < self.m);
        debug_assert_eq!(change_column.len(), self.m);

        self.updates.push(EtaFile::new(basic_index, change_column));
    }

    fn refresh(&mut self, oracle: &dyn BasisColumnOracle) -> Result<(), FactorizationError> {
        let m = oracle.m();
        let (lower_upper, row_permutation) = Self::decompose(read_basis(oracle)?, m)?;

        self.m = m;
        self.lower_upper = lower_upper;
        self.row_permutation = row_permutation;
        self.updates.clear();

        Ok(())
    }

    fn should_refresh(&self) -> bool {
        self.updates.len() >= self.refactorization_threshold
    }

    fn nr_updates(&self) -> usize {
        self.updates.len()
    }
}

impl fmt::Display for LuFactorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LU ({} x {}), {} updates", self.m, self.m, self.updates.len())?;
        writeln!(f, "P: {:?}", self.row_permutation)?;
        for i in 0..self.m {
            writeln!(
                f,
                "{}",
                (0..self.m).map(|j| format!("{:>10.4}", self.lower_upper[i * self.m + j])).join(" "),
            )?;
        }
        Ok(())
    }
}
