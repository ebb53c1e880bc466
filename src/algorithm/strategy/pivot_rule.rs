//! # Pivot rules
//!
//! Strategies for choosing the entering variable among the candidates that the tableau reports as
//! eligible. The leaving variable is chosen by the ratio test, independent of the strategy.

/// Deciding which variable enters the basis.
///
/// All rules are deterministic: given the same candidates and costs, they select the same variable.
pub trait PivotRule {
    /// Select the entering variable.
    ///
    /// # Arguments
    ///
    /// * `candidates`: Non-basic indices eligible for entry, in increasing order.
    /// * `cost_function`: Reduced cost per non-basic index.
    ///
    /// # Return value
    ///
    /// A non-basic index from `candidates`, or `None` if there are no candidates.
    fn select_entering(&mut self, candidates: &[usize], cost_function: &[f64]) -> Option<usize>;
}

/// Simply pivot on the first eligible column.
pub struct FirstProfitable;

impl PivotRule for FirstProfitable {
    fn select_entering(&mut self, candidates: &[usize], _cost_function: &[f64]) -> Option<usize> {
        candidates.first().copied()
    }
}

/// Small modification w.r.t. the `FirstProfitable` rule; it starts the search from the last
/// column selected.
#[derive(Default)]
pub struct FirstProfitableWithMemory {
    last_selected: Option<usize>,
}

impl PivotRule for FirstProfitableWithMemory {
    fn select_entering(&mut self, candidates: &[usize], _cost_function: &[f64]) -> Option<usize> {
        let potential = self.last_selected
            .and_then(|last| candidates.iter().find(|&&j| j > last))
            .or_else(|| candidates.first())
            .copied();

        self.last_selected = potential;
        potential
    }
}

/// Pivot on the column with the largest reduced cost in absolute value (Dantzig's rule).
///
/// Ties go to the lowest index.
pub struct SteepestDescentAlongVariable;

impl PivotRule for SteepestDescentAlongVariable {
    fn select_entering(&mut self, candidates: &[usize], cost_function: &[f64]) -> Option<usize> {
        let mut largest: Option<(usize, f64)> = None;
        for &j in candidates {
            let magnitude = cost_function[j].abs();
            match largest {
                Some((_, existing)) if magnitude <= existing => {},
                _ => largest = Some((j, magnitude)),
            }
        }

        largest.map(|(j, _)| j)
    }
}
