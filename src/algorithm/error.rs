//! # Errors
//!
//! Failures that can be reported to the caller. Contract violations, such as pivoting on a basic
//! variable that is not in the basis, are checked with debug assertions instead.
use thiserror::Error;

use crate::algorithm::factorization::FactorizationError;

/// Errors raised by tableau operations that (re)build the basis factorization.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableauError {
    /// The basis could not be factorized.
    #[error("basis factorization failed: {0}")]
    Factorization(#[from] FactorizationError),
    /// The number of basic variables provided does not match the number of rows.
    #[error("expected {expected} basic variables, got {actual}")]
    BasisSize {
        /// Number of rows of the tableau.
        expected: usize,
        /// Number of variables provided.
        actual: usize,
    },
    /// A variable index is outside of `0..n`.
    #[error("variable {variable} does not exist, there are {n} variables")]
    UnknownVariable {
        /// Offending index.
        variable: usize,
        /// Number of variables.
        n: usize,
    },
    /// Only non-basic variables can be merged.
    #[error("cannot merge variable {variable}: it is basic")]
    MergeBasic {
        /// The basic variable.
        variable: usize,
    },
}
