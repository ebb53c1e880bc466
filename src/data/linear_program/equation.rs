//! # Equations
//!
//! A linear equation `sum_i c_i x_i = scalar`.
use std::fmt;

use itertools::Itertools;

/// A single term `coefficient * x_variable` of an equation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Addend {
    /// Coefficient of the variable.
    pub coefficient: f64,
    /// Index of the variable.
    pub variable: usize,
}

/// Linear equation with a constant right-hand side.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Equation {
    /// Terms of the left-hand side.
    pub addends: Vec<Addend>,
    /// Constant right-hand side.
    pub scalar: f64,
}

impl Equation {
    /// Create an equation without terms and with a zero right-hand side.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term to the left-hand side.
    pub fn add_addend(&mut self, coefficient: f64, variable: usize) -> &mut Self {
        self.addends.push(Addend { coefficient, variable });
        self
    }

    /// Set the right-hand side.
    pub fn set_scalar(&mut self, scalar: f64) -> &mut Self {
        self.scalar = scalar;
        self
    }

    /// Value of the left-hand side minus the right-hand side.
    ///
    /// # Arguments
    ///
    /// * `value`: Current value of a variable.
    pub fn residual(&self, value: impl Fn(usize) -> f64) -> f64 {
        self.addends.iter()
            .map(|addend| addend.coefficient * value(addend.variable))
            .sum::<f64>() - self.scalar
    }

    /// Interval of the left-hand side minus the right-hand side, given bounds per variable.
    ///
    /// Terms with a zero coefficient are skipped so that infinite bounds never produce `NaN`.
    pub fn residual_bounds(
        &self,
        lower: impl Fn(usize) -> f64,
        upper: impl Fn(usize) -> f64,
    ) -> (f64, f64) {
        self.addends.iter()
            .filter(|addend| addend.coefficient != 0_f64)
            .fold((-self.scalar, -self.scalar), |(low, high), addend| {
                let (to_low, to_high) = if addend.coefficient > 0_f64 {
                    (lower(addend.variable), upper(addend.variable))
                } else {
                    (upper(addend.variable), lower(addend.variable))
                };
                (low + addend.coefficient * to_low, high + addend.coefficient * to_high)
            })
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {}",
            self.addends.iter()
                .map(|addend| format!("{} x{}", addend.coefficient, addend.variable))
                .join(" + "),
            self.scalar,
        )
    }
}
