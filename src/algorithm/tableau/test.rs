use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;

use crate::algorithm::configuration::TableauConfiguration;
use crate::algorithm::error::TableauError;
use crate::algorithm::factorization::{ExplicitBasisInverse, FactorizationError};
use crate::algorithm::statistics::{Counter, Statistics};
use crate::algorithm::strategy::pivot_rule::SteepestDescentAlongVariable;
use crate::algorithm::tableau::{
    BasicAssignmentStatus, BasicStatus, LeavingVariable, ResizeWatcher, SharedResizeWatcher, SharedVariableWatcher,
    Tableau, VariableWatcher,
};
use crate::data::linear_program::equation::Equation;
use crate::tests::{drive, Outcome};
use crate::tests::problem_1;

fn standard() -> TableauConfiguration {
    TableauConfiguration {
        use_harris_ratio_test: false,
        ..TableauConfiguration::default()
    }
}

fn assert_values(tableau: &Tableau, expected: &[f64]) {
    for (variable, &value) in expected.iter().enumerate() {
        assert_abs_diff_eq!(tableau.value(variable), value, epsilon = 1e-9);
    }
}

fn assert_costs(tableau: &Tableau, expected: &[f64]) {
    assert_eq!(tableau.cost_function().len(), expected.len());
    for (&computed, &value) in tableau.cost_function().iter().zip(expected) {
        assert_abs_diff_eq!(computed, value, epsilon = 1e-9);
    }
}

/// Problem 1 with more room for `x1`, so that moving it up makes `x5` leave the basis.
fn wide_x1(configuration: TableauConfiguration) -> Tableau {
    let mut tableau = problem_1::uninitialized(configuration);
    tableau.set_upper_bound(1, 5_f64);
    assert!(tableau.initialize_basis(&problem_1::BASIS).is_ok());
    tableau
}

fn pivot_x1_for_x5(tableau: &mut Tableau) {
    tableau.set_entering_variable_index(1);
    assert_eq!(tableau.entering_variable(), Some(1));
    tableau.compute_change_column();
    assert_eq!(tableau.change_column(), &[2_f64, 1_f64, 3_f64]);

    tableau.pick_leaving_variable();
    assert_eq!(tableau.leaving_variable_index(), Some(LeavingVariable::Basic(1)));
    assert_eq!(tableau.leaving_variable(), Some(5));
    assert!(!tableau.performing_fake_pivot());
    assert_abs_diff_eq!(tableau.change_ratio(), 1_f64);

    tableau.compute_pivot_row();
    tableau.perform_pivot();
}

#[test]
fn fake_pivot() {
    for configuration in [standard(), TableauConfiguration::default()] {
        let mut tableau = problem_1::tableau_with(configuration);

        tableau.set_entering_variable_index(2);
        tableau.compute_change_column();
        tableau.pick_leaving_variable();
        assert!(tableau.performing_fake_pivot());
        assert_eq!(tableau.leaving_variable(), Some(2));
        assert_abs_diff_eq!(tableau.change_ratio(), 1_f64);

        tableau.perform_pivot();
        assert!(!tableau.is_basic(2));
        assert_values(&tableau, &[1_f64, 1_f64, 2_f64, 1_f64, 216_f64, 112_f64, 403_f64]);
        assert_eq!(tableau.basic_status(5), BasicStatus::AtLower);
        assert_abs_diff_eq!(tableau.sum_of_infeasibilities(), 3_f64, epsilon = 1e-9);
        assert!(tableau.cost_function_invalid());
        assert!(tableau.is_consistent(1e-9));
    }
}

#[test]
fn pivot() {
    for configuration in [standard(), TableauConfiguration::default()] {
        let mut tableau = wide_x1(configuration);
        pivot_x1_for_x5(&mut tableau);

        assert!(tableau.is_basic(1));
        assert!(!tableau.is_basic(5));
        assert_eq!(tableau.variable_to_index(1), 1);
        assert_eq!(tableau.non_basic_index_to_variable(1), 5);
        assert_values(&tableau, &[1_f64, 2_f64, 1_f64, 1_f64, 215_f64, 112_f64, 403_f64]);
        assert_abs_diff_eq!(tableau.sum_of_infeasibilities(), 4_f64, epsilon = 1e-9);
        assert_eq!(tableau.nr_basis_updates(), 1);
        assert!(tableau.is_consistent(1e-9));
    }
}

#[test]
fn pivot_updates_cost_function() {
    let mut tableau = wide_x1(standard());
    pivot_x1_for_x5(&mut tableau);

    assert!(!tableau.cost_function_invalid());
    let expected = [0_f64, 1_f64, -1_f64, -1_f64];
    assert_costs(&tableau, &expected);

    tableau.compute_cost_function();
    assert_costs(&tableau, &expected);
}

#[test]
fn pivot_without_row_invalidates_cost_function() {
    let mut tableau = wide_x1(standard());
    tableau.set_entering_variable_index(1);
    tableau.compute_change_column();
    tableau.pick_leaving_variable();
    tableau.perform_pivot();

    assert!(tableau.cost_function_invalid());
    tableau.compute_cost_function();
    assert_costs(&tableau, &[0_f64, 1_f64, -1_f64, -1_f64]);
}

#[test]
fn explicit_inverse() {
    let mut tableau = Tableau::with_factorization(
        standard(),
        Box::new(ExplicitBasisInverse::identity(0, 100)),
    );
    problem_1::set_up(&mut tableau);
    tableau.set_upper_bound(1, 5_f64);
    assert!(tableau.initialize_basis(&problem_1::BASIS).is_ok());

    pivot_x1_for_x5(&mut tableau);
    assert_values(&tableau, &[1_f64, 2_f64, 1_f64, 1_f64, 215_f64, 112_f64, 403_f64]);
    assert_costs(&tableau, &[0_f64, 1_f64, -1_f64, -1_f64]);
}

#[test]
fn refresh_after_threshold() {
    let mut tableau = wide_x1(TableauConfiguration {
        refactorization_threshold: 1,
        ..standard()
    });
    let statistics = Rc::new(RefCell::new(Statistics::new()));
    tableau.set_statistics(Rc::clone(&statistics));

    pivot_x1_for_x5(&mut tableau);
    assert_eq!(tableau.nr_basis_updates(), 0);
    assert_eq!(statistics.borrow().get(Counter::Refactorizations), 1);
    assert_eq!(statistics.borrow().get(Counter::Pivots), 1);
    assert!(tableau.is_consistent(1e-9));
}

#[test]
fn degenerate_pivot() {
    let mut tableau = problem_1::tableau();
    let before = (0..problem_1::N).map(|variable| tableau.value(variable)).collect::<Vec<_>>();

    tableau.set_entering_variable_index(0);
    tableau.set_leaving_variable_index(1);
    tableau.compute_change_column();
    tableau.perform_degenerate_pivot();

    assert!(tableau.is_basic(0));
    assert!(!tableau.is_basic(5));
    assert_eq!(tableau.basic_index_to_variable(1), 0);
    assert_eq!(tableau.basic_status(0), BasicStatus::AtLower);
    assert_values(&tableau, &before);
    assert!(tableau.is_consistent(1e-9));
}

#[test]
fn harris_prefers_large_pivot() {
    fn tableau(configuration: TableauConfiguration) -> Tableau {
        // 2 x0 + x1 = 5 and x0 + x2 = 2.49999995, basis x1 and x2
        let mut tableau = Tableau::with_configuration(configuration);
        tableau.set_dimensions(2, 3);
        tableau.set_constraint_matrix(&[
            2_f64, 1_f64, 0_f64,
            1_f64, 0_f64, 1_f64,
        ]);
        tableau.set_right_hand_side(&[5_f64, 2.49999995_f64]);
        tableau.set_lower_bound(0, 0_f64);
        tableau.set_upper_bound(0, 100_f64);
        for variable in [1, 2] {
            tableau.set_lower_bound(variable, 0_f64);
            tableau.set_upper_bound(variable, 10_f64);
        }
        assert!(tableau.initialize_basis(&[1, 2]).is_ok());
        tableau.set_entering_variable_index(0);
        tableau.compute_change_column();
        tableau
    }

    let mut textbook = tableau(standard());
    textbook.pick_leaving_variable();
    assert_eq!(textbook.leaving_variable_index(), Some(LeavingVariable::Basic(1)));

    let mut harris = tableau(TableauConfiguration::default());
    harris.pick_leaving_variable();
    assert_eq!(harris.leaving_variable_index(), Some(LeavingVariable::Basic(0)));
    assert_abs_diff_eq!(harris.change_ratio(), 2.5_f64);

    harris.compute_pivot_row();
    harris.perform_pivot();
    assert_abs_diff_eq!(harris.value(0), 2.5_f64);
    assert_abs_diff_eq!(harris.value(1), 0_f64);
    // Bounded violation
    assert!(harris.value(2) < 0_f64);
    assert!(harris.value(2) >= -harris.configuration().harris_tolerance);
    assert!(harris.is_consistent(1e-9));
}

#[test]
fn ratio_constraint_per_basic() {
    let tableau = problem_1::tableau();

    // x4 is below its lower bound: unlimited when decreasing, 1 until its bound when increasing
    assert_eq!(tableau.ratio_constraint_per_basic(0, 1_f64, false), f64::INFINITY);
    assert_abs_diff_eq!(tableau.ratio_constraint_per_basic(0, -2_f64, false), 0.5_f64);
    // x5 is between its bounds
    assert_abs_diff_eq!(tableau.ratio_constraint_per_basic(1, 1_f64, false), 1_f64);
    assert_abs_diff_eq!(tableau.ratio_constraint_per_basic(1, 1_f64, true), 1_f64);
    // x6 is above its upper bound
    assert_abs_diff_eq!(tableau.ratio_constraint_per_basic(2, 2_f64, false), 2_f64);
    assert_eq!(tableau.ratio_constraint_per_basic(2, 2_f64, true), f64::INFINITY);
}

#[test]
fn entering_selection() {
    let mut tableau = problem_1::tableau();
    assert!(tableau.pick_entering_variable(&mut SteepestDescentAlongVariable));
    assert_eq!(tableau.entering_variable_index(), Some(2));

    tableau.set_lower_bound(2, 2_f64);
    tableau.set_non_basic_assignment(2, 2_f64, true);
    tableau.set_upper_bound(2, 2_f64);
    tableau.compute_cost_function();
    assert!(!tableau.entry_candidates().contains(&2));
}

#[test]
fn eligibility_for_given_cost() {
    let tableau = problem_1::tableau();

    // Non-basic x0 sits at its lower bound 1 with upper bound 2
    assert!(tableau.eligible_for_entry(0, -1_f64));
    assert!(!tableau.eligible_for_entry(0, 1_f64));
    assert!(!tableau.eligible_for_entry(0, 0_f64));
}

#[test]
fn tableau_row() {
    let tableau = problem_1::tableau();
    let row = tableau.tableau_row(1);

    assert_eq!(row.lhs(), 5);
    assert_abs_diff_eq!(row.scalar(), 117_f64);
    for j in 0..4 {
        assert_eq!(row.variable(j), j);
        assert_abs_diff_eq!(row.coefficient(j), -1_f64);
    }
    assert_abs_diff_eq!(row.evaluate(|variable| tableau.value(variable)), tableau.value(5));
}

#[test]
fn multipliers_and_inverse() {
    let mut tableau = problem_1::tableau();
    tableau.compute_multipliers(&[1_f64, 0_f64, 0_f64]);
    assert_eq!(tableau.multipliers(), &[1_f64, 0_f64, 0_f64]);

    let inverse = tableau.inverse_basis_matrix();
    for i in 0..3 {
        for j in 0..3 {
            assert_abs_diff_eq!(inverse[i * 3 + j], if i == j { 1_f64 } else { 0_f64 });
        }
    }
    assert_eq!(tableau.column_of_basis(2), &[0_f64, 0_f64, 1_f64]);
    assert_eq!(tableau.sparse_basis()[0].to_dense(), vec![1_f64, 0_f64, 0_f64]);
    assert_eq!(tableau.forward_transformation(&[1_f64, 2_f64, 3_f64]), vec![1_f64, 2_f64, 3_f64]);
}

#[test]
fn tighten_bounds() {
    let mut tableau = problem_1::tableau();

    tableau.tighten_lower_bound(0, 1.5_f64);
    assert_values(&tableau, &[1.5_f64, 1_f64, 1_f64, 1_f64, 215.5_f64, 112.5_f64, 404_f64]);
    assert!(tableau.is_consistent(1e-9));

    tableau.tighten_upper_bound(5, 112.5_f64);
    assert_eq!(tableau.basic_status(5), BasicStatus::AtUpper);

    tableau.tighten_upper_bound(5, 112_f64);
    assert_eq!(tableau.basic_status(5), BasicStatus::AboveUpper);

    // Setting a bound leaves the status alone until it is recomputed
    tableau.set_upper_bound(5, 114_f64);
    assert_eq!(tableau.basic_status(5), BasicStatus::AboveUpper);
    tableau.compute_basic_status_of(5);
    assert_eq!(tableau.basic_status(5), BasicStatus::Between);
    tableau.set_upper_bound(5, 112_f64);
    tableau.compute_basic_status_of(5);
    assert!(tableau.basic_too_high(5));
    assert!(tableau.basic_out_of_bounds(5));
    assert!(tableau.basic_too_low(4));

    tableau.tighten_lower_bound(1, 3_f64);
    assert!(!tableau.all_bounds_valid());
    assert_eq!(tableau.invalid_bound_variables(), vec![1]);
    assert_abs_diff_eq!(tableau.value(1), 3_f64);

    tableau.tighten_upper_bound(1, 4_f64);
    assert!(tableau.all_bounds_valid());
    assert_abs_diff_eq!(tableau.value(1), 3_f64);
    assert!(tableau.check_bounds_valid());
    assert!(tableau.is_consistent(1e-9));
}

#[test]
fn assignment_status() {
    let mut tableau = problem_1::tableau();
    assert_eq!(tableau.basic_assignment_status(), BasicAssignmentStatus::Valid);

    tableau.set_non_basic_assignment(3, 2_f64, false);
    assert_eq!(tableau.basic_assignment_status(), BasicAssignmentStatus::Invalid);
    assert_abs_diff_eq!(tableau.value(4), 217_f64);

    tableau.compute_assignment();
    assert_eq!(tableau.basic_assignment_status(), BasicAssignmentStatus::Valid);
    assert_abs_diff_eq!(tableau.value(4), 215_f64);
    assert_abs_diff_eq!(tableau.basic_assignment(0), 215_f64);
    assert_abs_diff_eq!(tableau.non_basic_assignment(3), 2_f64);
    assert!(tableau.is_consistent(1e-9));
}

#[test]
fn add_equation() {
    let mut tableau = problem_1::tableau();
    let resizes = Rc::new(RefCell::new(Recorder::default()));
    tableau.register_resize_watcher(resizes.clone());

    let mut equation = Equation::new();
    equation.add_addend(1_f64, 0).add_addend(1_f64, 1).set_scalar(3_f64);
    let auxiliary = tableau.add_equation(&equation);
    assert_eq!(auxiliary, Ok(7));

    assert_eq!((tableau.m(), tableau.n()), (4, 8));
    assert_eq!(resizes.borrow().resizes, vec![(4, 8)]);
    assert_eq!(tableau.sparse_a_row(3).to_dense(), vec![1_f64, 1_f64, 0_f64, 0_f64, 0_f64, 0_f64, 0_f64, -1_f64]);
    assert_eq!(tableau.right_hand_side()[3], 3_f64);
    assert_eq!(tableau.basic_index_to_variable(3), 7);
    assert_eq!((tableau.lower_bound(7), tableau.upper_bound(7)), (-1_f64, 1_f64));
    assert_abs_diff_eq!(tableau.value(7), -1_f64);
    assert_eq!(tableau.basic_status(7), BasicStatus::AtLower);
    assert!(tableau.is_consistent(1e-9));

    assert!(tableau.cost_function_invalid());
    tableau.compute_cost_function();
    assert_costs(&tableau, &[-1_f64, -1_f64, -2_f64, -2_f64]);

    let mut unknown = Equation::new();
    unknown.add_addend(1_f64, 8);
    assert_eq!(tableau.add_equation(&unknown), Err(TableauError::UnknownVariable { variable: 8, n: 8 }));
}

#[test]
fn merge_columns() {
    let mut tableau = problem_1::tableau();
    let statistics = Rc::new(RefCell::new(Statistics::new()));
    tableau.set_statistics(Rc::clone(&statistics));

    assert_eq!(tableau.merge_columns(0, 4), Err(TableauError::MergeBasic { variable: 4 }));
    assert!(tableau.merge_columns(0, 1).is_ok());

    assert!(tableau.is_merged(0));
    assert_eq!(tableau.variable_after_merging(0), 1);
    assert_eq!((tableau.m(), tableau.n()), (3, 7));
    assert_eq!(tableau.a_column(0), &[0_f64, 0_f64, 0_f64]);
    assert_eq!(tableau.a_column(1), &[5_f64, 2_f64, 7_f64]);
    assert_eq!((tableau.lower_bound(0), tableau.upper_bound(0)), (1_f64, 1_f64));
    assert_values(&tableau, &[1_f64, 1_f64, 1_f64, 1_f64, 217_f64, 113_f64, 406_f64]);
    assert_eq!(statistics.borrow().get(Counter::MergedColumns), 1);

    tableau.set_non_basic_assignment(1, 2_f64, true);
    assert_abs_diff_eq!(tableau.value(0), 2_f64);
    assert_abs_diff_eq!(tableau.value(4), 212_f64);
    assert!(tableau.is_consistent(1e-9));

    // Merging is transitive
    assert!(tableau.merge_columns(1, 2).is_ok());
    assert_eq!(tableau.variable_after_merging(0), 2);
    assert_abs_diff_eq!(tableau.value(0), tableau.value(2));
}

#[test]
fn merge_intersects_bounds() {
    let mut tableau = problem_1::uninitialized(TableauConfiguration::default());
    tableau.set_lower_bound(3, 1.5_f64);
    assert!(tableau.initialize_basis(&problem_1::BASIS).is_ok());

    assert!(tableau.merge_columns(3, 2).is_ok());
    assert_eq!((tableau.lower_bound(2), tableau.upper_bound(2)), (1.5_f64, 2_f64));
    assert_abs_diff_eq!(tableau.value(2), 1.5_f64);
    assert_abs_diff_eq!(tableau.value(3), 1.5_f64);
    assert!(tableau.is_consistent(1e-9));
}

#[test]
fn store_and_restore() {
    let mut tableau = wide_x1(standard());
    let state = tableau.store_state();
    assert_eq!((state.m(), state.n()), (3, 7));

    pivot_x1_for_x5(&mut tableau);
    tableau.tighten_lower_bound(3, 1.5_f64);
    let mut equation = Equation::new();
    equation.add_addend(1_f64, 2);
    assert!(tableau.add_equation(&equation).is_ok());
    assert_ne!(tableau.store_state(), state);
    assert_eq!(tableau.multipliers().len(), 4);

    let resizes = Rc::new(RefCell::new(Recorder::default()));
    tableau.register_resize_watcher(resizes.clone());
    assert!(tableau.restore_state(&state).is_ok());

    assert_eq!(tableau.store_state(), state);
    assert_eq!(tableau.multipliers().len(), 3);
    assert_eq!(resizes.borrow().resizes, vec![(3, 7)]);
    assert!(tableau.cost_function_invalid());
    assert_values(&tableau, &[1_f64, 1_f64, 1_f64, 1_f64, 217_f64, 113_f64, 406_f64]);
    assert!(tableau.is_consistent(1e-9));

    tableau.compute_cost_function();
    assert_costs(&tableau, &[-1_f64, -1_f64, -2_f64, -2_f64]);
    pivot_x1_for_x5(&mut tableau);
    assert_abs_diff_eq!(tableau.value(1), 2_f64);
}

#[derive(Default)]
struct Recorder {
    values: Vec<(usize, f64)>,
    upper_bounds: Vec<(usize, f64)>,
    resizes: Vec<(usize, usize)>,
}

impl VariableWatcher for Recorder {
    fn notify_variable_value(&mut self, variable: usize, value: f64) {
        self.values.push((variable, value));
    }

    fn notify_upper_bound(&mut self, variable: usize, bound: f64) {
        self.upper_bounds.push((variable, bound));
    }
}

impl ResizeWatcher for Recorder {
    fn notify_dimension_change(&mut self, m: usize, n: usize) {
        self.resizes.push((m, n));
    }
}

#[test]
fn watchers() {
    let mut tableau = problem_1::tableau();
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let shared: SharedVariableWatcher = recorder.clone();
    tableau.register_to_watch_variable(Rc::clone(&shared), 4);

    tableau.tighten_lower_bound(0, 1.5_f64);
    assert_eq!(recorder.borrow().values, vec![(4, 215.5_f64)]);

    tableau.unregister_to_watch_variable(&shared, 4);
    tableau.tighten_lower_bound(0, 2_f64);
    assert_eq!(recorder.borrow().values.len(), 1);

    let everything = Rc::new(RefCell::new(Recorder::default()));
    tableau.register_to_watch_all_variables(everything.clone());
    tableau.tighten_upper_bound(2, 1.5_f64);
    assert_eq!(everything.borrow().upper_bounds, vec![(2, 1.5_f64)]);
    assert!(everything.borrow().values.is_empty());

    let resize: SharedResizeWatcher = everything.clone();
    tableau.register_resize_watcher(resize);
    tableau.set_dimensions(1, 2);
    assert_eq!(everything.borrow().resizes, vec![(1, 2)]);
}

#[test]
fn statistics() {
    let mut tableau = problem_1::tableau();
    let statistics = Rc::new(RefCell::new(Statistics::new()));
    tableau.set_statistics(Rc::clone(&statistics));

    tableau.tighten_upper_bound(3, 1.5_f64);
    tableau.set_entering_variable_index(2);
    tableau.compute_change_column();
    tableau.pick_leaving_variable();
    tableau.perform_pivot();

    let statistics = statistics.borrow();
    assert_eq!(statistics.get(Counter::BoundTightenings), 1);
    assert_eq!(statistics.get(Counter::FakePivots), 1);
    assert_eq!(statistics.get(Counter::Pivots), 0);
}

#[test]
fn initialization_errors() {
    let mut tableau = problem_1::uninitialized(TableauConfiguration::default());
    assert_eq!(
        tableau.initialize_basis(&[4, 5]),
        Err(TableauError::BasisSize { expected: 3, actual: 2 }),
    );
    assert_eq!(
        tableau.initialize_basis(&[4, 4, 5]),
        Err(TableauError::BasisSize { expected: 3, actual: 2 }),
    );
    assert_eq!(
        tableau.initialize_basis(&[4, 5, 9]),
        Err(TableauError::UnknownVariable { variable: 9, n: 7 }),
    );

    let mut singular = Tableau::new();
    singular.set_dimensions(2, 3);
    singular.set_constraint_matrix(&[
        1_f64, 1_f64, 0_f64,
        1_f64, 1_f64, 1_f64,
    ]);
    assert!(matches!(
        singular.initialize_basis(&[0, 1]),
        Err(TableauError::Factorization(FactorizationError::SingularBasis { .. })),
    ));
}

#[test]
fn marked_basis() {
    let mut tableau = problem_1::uninitialized(TableauConfiguration::default());
    for (index, variable) in [6, 4, 5].into_iter().enumerate() {
        tableau.mark_as_basic(variable);
        tableau.assign_index_to_basic_variable(variable, index);
    }
    assert!(tableau.initialize_tableau().is_ok());

    assert_eq!(tableau.basic_index_to_variable(0), 6);
    assert_values(&tableau, &[1_f64, 1_f64, 1_f64, 1_f64, 217_f64, 113_f64, 406_f64]);
    let counts = tableau.basic_status_counts();
    assert_eq!(counts[BasicStatus::BelowLower], 1);
    assert_eq!(counts[BasicStatus::Between], 1);
    assert_eq!(counts[BasicStatus::AboveUpper], 1);
}

#[test]
fn phase_one() {
    let mut infeasible = problem_1::tableau();
    assert_eq!(drive(&mut infeasible, 100), Outcome::Infeasible);
    assert!(infeasible.sum_of_infeasibilities() > 0_f64);

    for configuration in [standard(), TableauConfiguration::default()] {
        let mut feasible = problem_1::uninitialized(configuration);
        feasible.set_lower_bound(4, 210_f64);
        assert!(feasible.initialize_basis(&problem_1::BASIS).is_ok());

        assert_eq!(drive(&mut feasible, 100), Outcome::Feasible);
        for variable in 0..problem_1::N {
            let value = feasible.value(variable);
            assert!(value >= feasible.lower_bound(variable) - 1e-7);
            assert!(value <= feasible.upper_bound(variable) + 1e-7);
        }
    }
}

#[test]
fn display() {
    let tableau = problem_1::tableau();
    let text = tableau.to_string();
    assert!(text.starts_with("=== Tableau (3 x 7) ===\n3 x0 + 2 x1 + 1 x2 + 2 x3 + 1 x4 = 225\n"));
    assert!(text.contains("x4 = 217 in [218, 228] basic, BelowLower"));
    assert!(text.contains("=== Cost function ===\n-1 -1 -2 -2"));
}
