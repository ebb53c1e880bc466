//! # Linear algebra primitives
//!
//! Linear algebra primitives used to represent data in either a dense or a sparse format.
pub mod matrix;
pub mod vector;

/// A single nonzero of a sparse vector: the index and the value.
pub type SparseTuple<F> = (usize, F);

/// Magnitudes below this value are not stored in sparse structures.
pub const EPSILON: f64 = 1e-10;
