//! # Data structures
//!
//! Linear algebra primitives backing the tableau and the equations that are fed to it.
pub mod linear_algebra;
pub mod linear_program;
