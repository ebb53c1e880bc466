//! # Strategies
//!
//! Decisions that the tableau leaves to its driver.
pub mod pivot_rule;
