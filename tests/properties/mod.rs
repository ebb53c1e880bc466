//! # Randomized systems
//!
//! Systems `[R | I] x = b` with a random integer block `R` and one slack column per row, so that
//! the slack basis is always available to start from. The invariants of the tableau are checked
//! along random sequences of operations.
use proptest::prelude::*;

use simplex_tableau::algorithm::configuration::TableauConfiguration;
use simplex_tableau::algorithm::strategy::pivot_rule::FirstProfitable;
use simplex_tableau::algorithm::tableau::Tableau;

#[allow(missing_docs)]
mod test;

const TOLERANCE: f64 = 1e-7;

/// Random system with `m` rows and `k` structural variables.
#[derive(Clone, Debug)]
struct System {
    m: usize,
    k: usize,
    /// Row-major, `m * k`.
    structural: Vec<f64>,
    right_hand_side: Vec<f64>,
    /// Per variable, structural ones first.
    bounds: Vec<(f64, f64)>,
}

impl System {
    fn n(&self) -> usize {
        self.k + self.m
    }

    fn tableau(&self, configuration: TableauConfiguration) -> Tableau {
        let (m, n) = (self.m, self.n());
        let mut values = vec![0_f64; m * n];
        for i in 0..m {
            values[i * n..i * n + self.k].copy_from_slice(&self.structural[i * self.k..(i + 1) * self.k]);
            values[i * n + self.k + i] = 1_f64;
        }

        let mut tableau = Tableau::with_configuration(configuration);
        tableau.set_dimensions(m, n);
        tableau.set_constraint_matrix(&values);
        tableau.set_right_hand_side(&self.right_hand_side);
        for (variable, &(lower, upper)) in self.bounds.iter().enumerate() {
            tableau.set_lower_bound(variable, lower);
            tableau.set_upper_bound(variable, upper);
        }
        let basis = (self.k..n).collect::<Vec<_>>();
        assert!(tableau.initialize_basis(&basis).is_ok());

        tableau
    }
}

fn bound() -> impl Strategy<Value = (f64, f64)> {
    (-5_i32..5, 0_i32..6).prop_map(|(lower, width)| (f64::from(lower), f64::from(lower + width)))
}

fn system() -> impl Strategy<Value = System> {
    (1_usize..4, 1_usize..5).prop_flat_map(|(m, k)| {
        (
            prop::collection::vec(-3_i32..=3, m * k),
            prop::collection::vec(-10_i32..=10, m),
            prop::collection::vec(bound(), k + m),
        )
            .prop_map(move |(structural, right_hand_side, bounds)| System {
                m,
                k,
                structural: structural.into_iter().map(f64::from).collect(),
                right_hand_side: right_hand_side.into_iter().map(f64::from).collect(),
                bounds,
            })
    })
}

/// One phase-one iteration, if any variable is eligible.
fn step(tableau: &mut Tableau) -> bool {
    if tableau.cost_function_invalid() {
        tableau.compute_cost_function();
    }
    if !tableau.exists_basic_out_of_bounds() || !tableau.pick_entering_variable(&mut FirstProfitable) {
        return false;
    }

    tableau.compute_change_column();
    tableau.pick_leaving_variable();
    if !tableau.performing_fake_pivot() {
        tableau.compute_pivot_row();
    }
    tableau.perform_pivot();

    true
}

fn values(tableau: &Tableau) -> Vec<f64> {
    (0..tableau.n()).map(|variable| tableau.value(variable)).collect()
}

/// A basic index at which a degenerate pivot with the selected entering variable is safe.
fn degenerate_candidate(tableau: &Tableau) -> Option<usize> {
    tableau.change_column().iter()
        .enumerate()
        .filter(|&(_, coefficient)| coefficient.abs() > 1e-3)
        .map(|(index, _)| index)
        .find(|&index| !tableau.basic_status_by_index(index).is_out_of_bounds())
}
