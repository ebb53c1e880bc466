//! # Vectors
//!
//! Sparse vectors stored as lists of `(index, value)` tuples. Dense vectors are plain `Vec<f64>`s.
pub use sparse::SparseUnsortedList;

mod sparse;
