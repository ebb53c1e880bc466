//! # Basis factorization
//!
//! The tableau never forms the inverse of the basis matrix `B` explicitly. Instead, it asks a
//! factorization to solve linear systems with `B`, tells it when a single column of `B` changed and
//! occasionally asks it to start over from the current basis columns.
//!
//! Note that the naming of the two transformations follows the tableau's conventions:
//!
//! * `backward_transform(y)` solves `B x = y`, which yields `B^-1 a_q` for a column `a_q` of `A`.
//! * `forward_transform(y)` solves `x B = y`, which yields the simplex multipliers and the rows of
//! `B^-1`.
use std::fmt::Debug;

use thiserror::Error;

pub use eta_file::EtaFile;
pub use explicit_inverse::ExplicitBasisInverse;
pub use lower_upper::LuFactorization;

mod eta_file;
mod explicit_inverse;
mod lower_upper;

/// Pivots with a smaller magnitude make a basis numerically singular.
pub const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Reasons for which a factorization can't be (re)computed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FactorizationError {
    /// No acceptable pivot could be found while eliminating this basis column.
    #[error("basis is singular: no usable pivot for basis column {column}")]
    SingularBasis {
        /// Index of the basis column.
        column: usize,
    },
    /// A basis column has the wrong number of entries.
    #[error("basis column has length {actual}, expected {expected}")]
    DimensionMismatch {
        /// Number of rows of the basis.
        expected: usize,
        /// Length of the column received.
        actual: usize,
    },
}

/// Provides the columns of the current basis matrix.
pub trait BasisColumnOracle {
    /// Number of rows, equal to the number of basis columns.
    fn m(&self) -> usize;
    /// Column of `A` belonging to the basic variable with this basic index, dense.
    fn column_of_basis(&self, basic_index: usize) -> Vec<f64>;
}

/// Maintains a representation of the basis inverse.
pub trait BasisFactorization: Debug {
    /// Dimension of the basis.
    fn m(&self) -> usize;

    /// Solve `B x = y`.
    fn backward_transform(&self, y: &[f64]) -> Vec<f64>;

    /// Solve `x B = y`.
    fn forward_transform(&self, y: &[f64]) -> Vec<f64>;

    /// Replace one basis column.
    ///
    /// # Arguments
    ///
    /// * `basic_index`: Position in the basis of the column that is replaced.
    /// * `change_column`: `B^-1 a_q` for the entering column `a_q`, computed before the update.
    fn update_to_adjacent_basis(&mut self, basic_index: usize, change_column: &[f64]);

    /// Recompute the factorization from the columns provided by the oracle.
    ///
    /// When an error is returned, the previous factorization is left unchanged.
    fn refresh(&mut self, oracle: &dyn BasisColumnOracle) -> Result<(), FactorizationError>;

    /// Whether enough updates accumulated that a refresh is recommended.
    fn should_refresh(&self) -> bool;

    /// Number of updates since the last refresh.
    fn nr_updates(&self) -> usize;

    /// The inverse of the basis, as row-major dense data.
    fn inverse_basis_matrix(&self) -> Vec<f64> {
        let m = self.m();
        let mut inverse = vec![0_f64; m * m];
        for i in 0..m {
            let mut unit = vec![0_f64; m];
            unit[i] = 1_f64;
            // Row i of B^-1 solves x B = e_i
            let row = self.forward_transform(&unit);
            inverse[i * m..(i + 1) * m].copy_from_slice(&row);
        }
        inverse
    }
}

/// Read the columns of a basis into a dense row-major matrix, checking their lengths.
fn read_basis(oracle: &dyn BasisColumnOracle) -> Result<Vec<f64>, FactorizationError> {
    let m = oracle.m();
    let mut values = vec![0_f64; m * m];
    for j in 0..m {
        let column = oracle.column_of_basis(j);
        if column.len() != m {
            return Err(FactorizationError::DimensionMismatch { expected: m, actual: column.len() });
        }
        for (i, value) in column.into_iter().enumerate() {
            values[i * m + j] = value;
        }
    }
    Ok(values)
}
