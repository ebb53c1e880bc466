//! # Linear constraints
//!
//! Equations in the user's variables, as they are appended to an existing tableau.
pub mod equation;
