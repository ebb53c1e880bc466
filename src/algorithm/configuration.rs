//! # Configuration
//!
//! Numeric tolerances and switches for a tableau. Every field has a default that works for
//! well-scaled problems.

/// Tolerances and switches read by the tableau.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TableauConfiguration {
    /// Values within this distance of a bound are considered to be at the bound.
    pub bound_tolerance: f64,
    /// Reduced costs with a smaller magnitude don't make a variable eligible for entry.
    pub entry_eligibility_tolerance: f64,
    /// Change column entries with a smaller magnitude are ignored by the ratio test.
    pub pivot_change_column_tolerance: f64,
    /// Amount by which a basic variable may cross a bound during the Harris ratio test.
    pub harris_tolerance: f64,
    /// Use the two-pass Harris ratio test instead of the textbook one.
    pub use_harris_ratio_test: bool,
    /// Number of basis updates after which the factorization is recomputed from scratch.
    pub refactorization_threshold: usize,
}

impl Default for TableauConfiguration {
    fn default() -> Self {
        Self {
            bound_tolerance: 1e-9,
            entry_eligibility_tolerance: 1e-9,
            pivot_change_column_tolerance: 1e-9,
            harris_tolerance: 1e-7,
            use_harris_ratio_test: true,
            refactorization_threshold: 100,
        }
    }
}
