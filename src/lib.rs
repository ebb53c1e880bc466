//! # A bounded-variable simplex tableau
//!
//! The incremental core of a simplex-based decision procedure for linear real arithmetic. The
//! tableau stores `A x = b` together with lower and upper bounds on every variable, maintains an
//! assignment that satisfies the equations at all times, and moves between adjacent bases while a
//! driver searches for an assignment that also respects all bounds.
//!
//! Bounds may be tightened at any moment, equations can be appended, pairs of variables can be
//! merged and the full logical state can be saved and restored for backtracking.
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;

#[cfg(test)]
mod tests;
