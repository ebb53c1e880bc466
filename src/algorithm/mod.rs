//! # Algorithms
//!
//! The tableau together with the pieces it is assembled from: basis factorizations, cost function
//! maintenance and pivot rules.
pub mod configuration;
pub mod cost_function;
pub mod error;
pub mod factorization;
pub mod statistics;
pub mod strategy;
pub mod tableau;
