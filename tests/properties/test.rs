use approx::assert_abs_diff_eq;
use proptest::prelude::*;

use simplex_tableau::algorithm::configuration::TableauConfiguration;

use super::{degenerate_candidate, step, system, values, TOLERANCE};

fn standard() -> TableauConfiguration {
    TableauConfiguration {
        use_harris_ratio_test: false,
        ..TableauConfiguration::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig { max_global_rejects: 8192, ..ProptestConfig::default() })]

    #[test]
    fn phase_one_keeps_equations(system in system(), harris in any::<bool>()) {
        let configuration = TableauConfiguration { use_harris_ratio_test: harris, ..standard() };
        let mut tableau = system.tableau(configuration);
        prop_assert!(tableau.is_consistent(TOLERANCE));

        let mut infeasibility = tableau.sum_of_infeasibilities();
        for _ in 0..50 {
            if !step(&mut tableau) {
                break;
            }
            prop_assert!(tableau.is_consistent(TOLERANCE));
            for variable in (0..tableau.n()).filter(|&variable| !tableau.is_basic(variable)) {
                prop_assert!(tableau.value(variable) >= tableau.lower_bound(variable) - TOLERANCE);
                prop_assert!(tableau.value(variable) <= tableau.upper_bound(variable) + TOLERANCE);
            }

            let next = tableau.sum_of_infeasibilities();
            if !harris {
                prop_assert!(next <= infeasibility + 1e-6);
            }
            infeasibility = next;
        }
    }

    #[test]
    fn degenerate_pivot_keeps_values(system in system(), choice in 0_usize..8) {
        let mut tableau = system.tableau(TableauConfiguration::default());
        let before = values(&tableau);

        tableau.set_entering_variable_index(choice % (tableau.n() - tableau.m()));
        tableau.compute_change_column();
        let leaving = degenerate_candidate(&tableau);
        prop_assume!(leaving.is_some());
        if let Some(leaving) = leaving {
            tableau.set_leaving_variable_index(leaving);
        }
        tableau.perform_degenerate_pivot();

        for (computed, expected) in values(&tableau).into_iter().zip(before) {
            assert_abs_diff_eq!(computed, expected, epsilon = 1e-9);
        }
        prop_assert!(tableau.is_consistent(TOLERANCE));
        prop_assert!(tableau.cost_function_invalid());
    }

    #[test]
    fn merged_variables_agree(system in system()) {
        prop_assume!(system.k >= 2);
        let mut tableau = system.tableau(TableauConfiguration::default());
        let (lower_0, upper_0) = system.bounds[0];
        let (lower_1, upper_1) = system.bounds[1];

        prop_assert!(tableau.merge_columns(0, 1).is_ok());

        prop_assert_eq!(tableau.variable_after_merging(0), 1);
        prop_assert_eq!(tableau.value(0), tableau.value(1));
        prop_assert_eq!(tableau.lower_bound(1), lower_0.max(lower_1));
        prop_assert_eq!(tableau.upper_bound(1), upper_0.min(upper_1));
        prop_assert_eq!(tableau.all_bounds_valid(), lower_0.max(lower_1) <= upper_0.min(upper_1));
        prop_assert!(tableau.a_column(0).iter().all(|&value| value == 0_f64));
        prop_assert!(tableau.is_consistent(TOLERANCE));
    }

    #[test]
    fn tightening_moves_non_basics(system in system(), variable in 0_usize..4, raise in 1_i32..4) {
        let mut tableau = system.tableau(TableauConfiguration::default());
        let variable = variable % system.k;
        let lower = tableau.lower_bound(variable) + f64::from(raise);

        tableau.tighten_lower_bound(variable, lower);

        prop_assert_eq!(tableau.value(variable), lower);
        prop_assert!(tableau.is_consistent(TOLERANCE));
        if lower > tableau.upper_bound(variable) {
            prop_assert_eq!(tableau.invalid_bound_variables(), vec![variable]);
        }
    }

    #[test]
    fn restore_undoes_everything(system in system(), steps in 0_usize..6) {
        let mut tableau = system.tableau(TableauConfiguration::default());
        let state = tableau.store_state();
        let before = values(&tableau);

        for _ in 0..steps {
            if !step(&mut tableau) {
                break;
            }
        }
        let upper = tableau.upper_bound(0) - 1_f64;
        tableau.tighten_upper_bound(0, upper);

        prop_assert!(tableau.restore_state(&state).is_ok());
        prop_assert_eq!(tableau.store_state(), state);
        prop_assert_eq!(values(&tableau), before);
        prop_assert!(tableau.is_consistent(TOLERANCE));
    }
}
