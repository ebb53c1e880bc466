//! # The tableau
//!
//! Contains the simplex tableau and logic for elementary operations which can be performed upon it.
//!
//! The tableau holds the system `A x = b` with `m` rows and `n` variables, lower and upper bounds
//! for every variable, a partition of the variables into `m` basic and `n - m` non-basic ones and
//! an assignment. The assignment satisfies the equations at all times; bounds may be violated by
//! basic variables. Non-basic variables are not required to sit at a bound.
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use itertools::Itertools;
use log::{debug, log_enabled, Level, warn};

pub use assignment::{BasicAssignmentStatus, BasicStatus};
pub use pivot::LeavingVariable;
pub use row::TableauRow;
pub use state::TableauState;
pub use watcher::{ResizeWatcher, SharedResizeWatcher, SharedVariableWatcher, VariableWatcher};

use crate::algorithm::configuration::TableauConfiguration;
use crate::algorithm::cost_function::{CostFunctionManager, InfeasibilityCostFunction};
use crate::algorithm::error::TableauError;
use crate::algorithm::factorization::{BasisColumnOracle, BasisFactorization, LuFactorization};
use crate::algorithm::statistics::{Counter, Statistics};
use crate::algorithm::tableau::bounds::BoundStore;
use crate::algorithm::tableau::merge::MergeMap;
use crate::algorithm::tableau::partition::BasisPartition;
use crate::algorithm::tableau::pivot::PivotState;
use crate::algorithm::tableau::watcher::WatcherRegistry;
use crate::data::linear_algebra::matrix::ConstraintMatrix;
use crate::data::linear_algebra::vector::SparseUnsortedList;
use crate::data::linear_program::equation::Equation;

pub mod bounds;
pub mod merge;
pub mod partition;
pub mod row;
pub mod state;
pub mod watcher;
mod assignment;
mod cost;
mod pivot;

#[cfg(test)]
mod test;

/// The most high-level data structure of the simplex method: the tableau.
///
/// Set up with `set_dimensions`, the setters for the matrix, right-hand side and bounds, and then
/// `initialize_basis`. After that, a driver repeatedly computes the cost function, selects an
/// entering variable, runs the ratio test and pivots.
#[derive(Debug)]
pub struct Tableau {
    configuration: TableauConfiguration,

    matrix: ConstraintMatrix,
    right_hand_side: Vec<f64>,
    bounds: BoundStore,

    partition: BasisPartition,
    /// Represents `B^-1`, changes with every basis change.
    factorization: Box<dyn BasisFactorization>,

    basic_assignment: Vec<f64>,
    non_basic_assignment: Vec<f64>,
    basic_status: Vec<BasicStatus>,
    basic_assignment_status: BasicAssignmentStatus,

    cost_function_manager: Box<dyn CostFunctionManager>,
    multipliers: Vec<f64>,
    pivot: PivotState,

    merged: MergeMap,
    watchers: WatcherRegistry,
    statistics: Option<Rc<RefCell<Statistics>>>,

    /// Whether a basis was set up, after which the partition and the factorization are usable.
    initialized: bool,
}

/// The columns of `A` that belong to the basic variables.
pub(crate) struct BasisColumns<'a> {
    pub(crate) matrix: &'a ConstraintMatrix,
    pub(crate) basic_index_to_variable: &'a [usize],
}

impl BasisColumnOracle for BasisColumns<'_> {
    fn m(&self) -> usize {
        self.basic_index_to_variable.len()
    }

    fn column_of_basis(&self, basic_index: usize) -> Vec<f64> {
        self.matrix.column(self.basic_index_to_variable[basic_index]).to_vec()
    }
}

impl Default for Tableau {
    fn default() -> Self {
        Self::new()
    }
}

impl Tableau {
    /// Create an empty tableau with the default configuration.
    pub fn new() -> Self {
        Self::with_configuration(TableauConfiguration::default())
    }

    /// Create an empty tableau that maintains its basis with an LU factorization.
    pub fn with_configuration(configuration: TableauConfiguration) -> Self {
        let factorization = Box::new(LuFactorization::new(configuration.refactorization_threshold));
        Self::with_factorization(configuration, factorization)
    }

    /// Create an empty tableau with a specific basis factorization.
    pub fn with_factorization(
        configuration: TableauConfiguration,
        factorization: Box<dyn BasisFactorization>,
    ) -> Self {
        Self {
            configuration,

            matrix: ConstraintMatrix::zeros(0, 0),
            right_hand_side: Vec::new(),
            bounds: BoundStore::new(0),

            partition: BasisPartition::default(),
            factorization,

            basic_assignment: Vec::new(),
            non_basic_assignment: Vec::new(),
            basic_status: Vec::new(),
            basic_assignment_status: BasicAssignmentStatus::Invalid,

            cost_function_manager: Box::new(InfeasibilityCostFunction::new()),
            multipliers: Vec::new(),
            pivot: PivotState::default(),

            merged: MergeMap::new(),
            watchers: WatcherRegistry::default(),
            statistics: None,

            initialized: false,
        }
    }

    /// Allocate a tableau of `m` rows and `n` variables.
    ///
    /// The matrix and right-hand side are zero and all variables are unbounded. Any previous basis
    /// is discarded, registered watchers are kept and told about the new dimensions.
    pub fn set_dimensions(&mut self, m: usize, n: usize) {
        debug_assert!(m <= n);
        debug!("Setting tableau dimensions to {m} x {n}");

        self.matrix = ConstraintMatrix::zeros(m, n);
        self.right_hand_side = vec![0_f64; m];
        self.bounds = BoundStore::new(n);

        self.partition = BasisPartition::new(m, n);
        self.basic_assignment = vec![0_f64; m];
        self.non_basic_assignment = vec![0_f64; n - m];
        self.basic_status = vec![BasicStatus::Between; m];
        self.basic_assignment_status = BasicAssignmentStatus::Invalid;

        self.cost_function_manager.invalidate_cost_function();
        self.multipliers = vec![0_f64; m];
        self.pivot = PivotState::default();
        self.merged = MergeMap::new();
        self.initialized = false;

        self.watchers.notify_resize(m, n);
    }

    /// Number of rows.
    pub fn m(&self) -> usize {
        self.matrix.nr_rows()
    }

    /// Number of variables.
    pub fn n(&self) -> usize {
        self.matrix.nr_columns()
    }

    /// Tolerances and switches in use.
    pub fn configuration(&self) -> &TableauConfiguration {
        &self.configuration
    }

    /// Overwrite the whole constraint matrix.
    ///
    /// # Arguments
    ///
    /// * `values`: `m * n` values in row-major order.
    pub fn set_constraint_matrix(&mut self, values: &[f64]) {
        debug_assert_eq!(values.len(), self.m() * self.n());

        self.matrix = ConstraintMatrix::from_row_major(values, self.m(), self.n());
    }

    /// Overwrite a single entry of the constraint matrix.
    pub fn set_entry_value(&mut self, row: usize, column: usize, value: f64) {
        self.matrix.set(row, column, value);
    }

    /// Overwrite the right-hand side.
    pub fn set_right_hand_side(&mut self, values: &[f64]) {
        debug_assert_eq!(values.len(), self.m());

        self.right_hand_side = values.to_vec();
    }

    /// Overwrite a single entry of the right-hand side.
    pub fn set_right_hand_side_entry(&mut self, row: usize, value: f64) {
        self.right_hand_side[row] = value;
    }

    /// The right-hand side `b`.
    pub fn right_hand_side(&self) -> &[f64] {
        &self.right_hand_side
    }

    /// Mark a variable as basic without giving it a position; see `initialize_tableau`.
    pub fn mark_as_basic(&mut self, variable: usize) {
        debug_assert!(!self.initialized);

        self.partition.mark_as_basic(variable);
    }

    /// Give a variable marked as basic its position in the basis; see `initialize_tableau`.
    pub fn assign_index_to_basic_variable(&mut self, variable: usize, index: usize) {
        debug_assert!(!self.initialized);

        self.partition.assign_index_to_basic_variable(variable, index);
    }

    /// Start from a basis.
    ///
    /// The variable at position `i` of `basic_variables` gets basic index `i`. All other variables
    /// are non-basic, placed as described at [`Tableau::initialize_tableau`].
    ///
    /// # Errors
    ///
    /// When there are not exactly `m` distinct basic variables or when their columns are linearly
    /// dependent.
    pub fn initialize_basis(&mut self, basic_variables: &[usize]) -> Result<(), TableauError> {
        if let Some(&variable) = basic_variables.iter().find(|&&variable| variable >= self.n()) {
            return Err(TableauError::UnknownVariable { variable, n: self.n() });
        }
        let distinct = basic_variables.iter().unique().count();
        if basic_variables.len() != self.m() || distinct != self.m() {
            return Err(TableauError::BasisSize { expected: self.m(), actual: distinct });
        }

        self.initialized = false;
        self.partition = BasisPartition::new(self.m(), self.n());
        for (index, &variable) in basic_variables.iter().enumerate() {
            self.mark_as_basic(variable);
            self.assign_index_to_basic_variable(variable, index);
        }

        self.initialize_tableau()
    }

    /// Complete the setup after variables were marked as basic and given their basic indices.
    ///
    /// Each non-basic variable starts at its lower bound when that is finite, otherwise at its upper
    /// bound when that is finite, and at zero when it is unbounded on both sides. Then the
    /// factorization is computed and the assignment and cost function are derived.
    ///
    /// # Errors
    ///
    /// When the number of basic variables is not `m`, or the basis is singular.
    pub fn initialize_tableau(&mut self) -> Result<(), TableauError> {
        let nr_basic = self.partition.basic_variables().len();
        if nr_basic != self.m() {
            return Err(TableauError::BasisSize { expected: self.m(), actual: nr_basic });
        }
        self.partition.assign_non_basic_indices();
        debug_assert!(self.partition.is_consistent());

        self.non_basic_assignment = self.partition.non_basic_list().iter()
            .map(|&variable| self.initial_non_basic_value(variable))
            .collect();
        self.basic_assignment = vec![0_f64; self.m()];
        self.basic_status = vec![BasicStatus::Between; self.m()];

        self.refresh_basis_factorization()?;
        self.initialized = true;
        self.pivot = PivotState::default();

        self.compute_assignment();
        self.compute_cost_function();
        self.debug_assert_consistent();

        Ok(())
    }

    fn initial_non_basic_value(&self, variable: usize) -> f64 {
        let (lower, upper) = (self.bounds.lower(variable), self.bounds.upper(variable));
        if lower.is_finite() {
            lower
        } else if upper.is_finite() {
            upper
        } else {
            0_f64
        }
    }

    /// Recompute the basis factorization from the columns of the basic variables.
    ///
    /// # Errors
    ///
    /// When the basis is singular. The previous factorization stays in place.
    pub fn refresh_basis_factorization(&mut self) -> Result<(), TableauError> {
        let oracle = BasisColumns {
            matrix: &self.matrix,
            basic_index_to_variable: self.partition.basic_list(),
        };

        let nr_updates = self.factorization.nr_updates();
        match self.factorization.refresh(&oracle) {
            Ok(()) => {
                debug!("Refreshed basis factorization of dimension {} after {nr_updates} updates", self.m());
                self.count(Counter::Refactorizations);
                Ok(())
            },
            Err(error) => {
                warn!("Could not refresh basis factorization: {error}");
                Err(error.into())
            },
        }
    }

    /// Solve `x B = y`.
    pub fn forward_transformation(&self, y: &[f64]) -> Vec<f64> {
        self.factorization.forward_transform(y)
    }

    /// Solve `B x = y`.
    pub fn backward_transformation(&self, y: &[f64]) -> Vec<f64> {
        self.factorization.backward_transform(y)
    }

    /// Append the equation `sum c_i x_i = scalar` to an initialized tableau.
    ///
    /// A fresh auxiliary variable `aux` with index `n` is introduced, and the row
    /// `sum c_i x_i - aux = scalar` is appended. The auxiliary variable becomes basic in the new row,
    /// with bounds derived from the bounds of the variables in the equation and a value derived from
    /// their current values. Variables that were merged away are replaced by the variable they
    /// were merged into.
    ///
    /// # Return value
    ///
    /// The index of the auxiliary variable.
    ///
    /// # Errors
    ///
    /// When the equation refers to a variable that doesn't exist, or when the extended basis can't
    /// be factorized. In the latter case the row has been added.
    pub fn add_equation(&mut self, equation: &Equation) -> Result<usize, TableauError> {
        debug_assert!(self.initialized);

        if let Some(addend) = equation.addends.iter().find(|addend| addend.variable >= self.n()) {
            return Err(TableauError::UnknownVariable { variable: addend.variable, n: self.n() });
        }
        let mut equation = equation.clone();
        for addend in &mut equation.addends {
            addend.variable = self.merged.resolve(addend.variable);
        }
        debug!("Adding equation {equation}");

        let (lower, upper) = equation.residual_bounds(|v| self.bounds.lower(v), |v| self.bounds.upper(v));
        let value = equation.residual(|v| self.raw_value(v));

        let row = self.m();
        self.matrix.add_row();
        self.matrix.add_column();
        let auxiliary = self.partition.push_basic_variable();
        debug_assert_eq!(auxiliary, self.n() - 1);

        for addend in &equation.addends {
            let total = self.matrix.get(row, addend.variable) + addend.coefficient;
            self.matrix.set(row, addend.variable, total);
        }
        self.matrix.set(row, auxiliary, -1_f64);
        self.right_hand_side.push(equation.scalar);
        self.bounds.push(lower, upper);

        self.basic_assignment.push(value);
        self.basic_status.push(BasicStatus::Between);
        self.compute_basic_status_by_index(row);
        self.multipliers.push(0_f64);
        self.pivot = PivotState::default();
        self.cost_function_manager.invalidate_cost_function();
        self.count(Counter::AddedRows);

        self.watchers.notify_resize(self.m(), self.n());
        self.watchers.notify_lower_bound(auxiliary, lower);
        self.watchers.notify_upper_bound(auxiliary, upper);
        self.watchers.notify_value(auxiliary, value);

        self.refresh_basis_factorization()?;

        Ok(auxiliary)
    }

    /// Whether a variable is basic.
    pub fn is_basic(&self, variable: usize) -> bool {
        self.partition.is_basic(variable)
    }

    /// The set of basic variables.
    pub fn basic_variables(&self) -> &HashSet<usize> {
        self.partition.basic_variables()
    }

    /// Variable at a basic index.
    pub fn basic_index_to_variable(&self, index: usize) -> usize {
        self.partition.basic_index_to_variable(index)
    }

    /// Variable at a non-basic index.
    pub fn non_basic_index_to_variable(&self, index: usize) -> usize {
        self.partition.non_basic_index_to_variable(index)
    }

    /// Basic index of a basic variable, non-basic index of a non-basic one.
    pub fn variable_to_index(&self, variable: usize) -> usize {
        self.partition.variable_to_index(variable)
    }

    /// Value of the non-basic variable at a non-basic index.
    pub fn non_basic_assignment(&self, non_basic_index: usize) -> f64 {
        self.non_basic_assignment[non_basic_index]
    }

    /// The constraint matrix.
    pub fn sparse_a(&self) -> &ConstraintMatrix {
        &self.matrix
    }

    /// Column of a variable in `A`, dense.
    pub fn a_column(&self, variable: usize) -> &[f64] {
        self.matrix.column(variable)
    }

    /// Column of a variable in `A`, sparse.
    pub fn sparse_a_column(&self, variable: usize) -> &SparseUnsortedList {
        self.matrix.sparse_column(variable)
    }

    /// Row of `A`, sparse.
    pub fn sparse_a_row(&self, row: usize) -> &SparseUnsortedList {
        self.matrix.sparse_row(row)
    }

    /// Column of `A` of the basic variable at a basic index.
    pub fn column_of_basis(&self, basic_index: usize) -> &[f64] {
        self.matrix.column(self.partition.basic_index_to_variable(basic_index))
    }

    /// The basis matrix `B` as sparse columns, by basic index.
    pub fn sparse_basis(&self) -> Vec<SparseUnsortedList> {
        self.partition.basic_list().iter()
            .map(|&variable| self.matrix.sparse_column(variable).clone())
            .collect()
    }

    /// `B^-1`, dense and row-major.
    pub fn inverse_basis_matrix(&self) -> Vec<f64> {
        self.factorization.inverse_basis_matrix()
    }

    /// Number of basis updates since the factorization was last refreshed.
    pub fn nr_basis_updates(&self) -> usize {
        self.factorization.nr_updates()
    }

    /// Share a statistics object that this tableau increments.
    pub fn set_statistics(&mut self, statistics: Rc<RefCell<Statistics>>) {
        self.statistics = Some(statistics);
    }

    pub(crate) fn count(&self, counter: Counter) {
        if let Some(statistics) = &self.statistics {
            statistics.borrow_mut().increment(counter);
        }
    }

    /// Check all invariants that can be checked cheaply.
    ///
    /// * The basis partition is consistent.
    /// * `A x = b` holds within `tolerance`.
    /// * Each basic status matches the basic variable's value.
    pub fn is_consistent(&self, tolerance: f64) -> bool {
        if !self.initialized {
            return true;
        }
        if !self.partition.is_consistent() {
            return false;
        }

        let assignment = (0..self.n()).map(|variable| self.raw_value(variable)).collect::<Vec<_>>();
        let equations_hold = self.matrix.multiply(&assignment).iter()
            .zip(&self.right_hand_side)
            .all(|(lhs, rhs)| (lhs - rhs).abs() <= tolerance * (1_f64 + rhs.abs()));

        let statuses_match = (0..self.m()).all(|index| {
            let variable = self.partition.basic_index_to_variable(index);
            self.basic_status[index] == BasicStatus::classify(
                self.basic_assignment[index],
                self.bounds.lower(variable),
                self.bounds.upper(variable),
                self.configuration.bound_tolerance,
            )
        });

        equations_hold && statuses_match
    }

    /// Panic in debug builds when `is_consistent` fails with a loose tolerance.
    ///
    /// Skipped while the basic assignment is marked invalid.
    pub fn debug_assert_consistent(&self) {
        if self.basic_assignment_status == BasicAssignmentStatus::Valid {
            debug_assert!(self.is_consistent(1e-6), "inconsistent tableau:\n{self}");
        }
    }

    /// Write the tableau to the log at debug level.
    pub fn dump(&self) {
        if log_enabled!(Level::Debug) {
            debug!("{self}");
        }
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Tableau ({} x {}) ===", self.m(), self.n())?;
        for row in 0..self.m() {
            let terms = self.matrix.sparse_row(row).iter()
                .sorted_by_key(|&&(j, _)| j)
                .map(|&(j, value)| format!("{value} x{j}"))
                .join(" + ");
            writeln!(f, "{terms} = {}", self.right_hand_side[row])?;
        }

        if !self.initialized {
            return writeln!(f, "(no basis)");
        }

        writeln!(f, "=== Assignment ===")?;
        for variable in 0..self.n() {
            write!(
                f,
                "x{variable} = {} in [{}, {}]",
                self.raw_value(variable), self.bounds.lower(variable), self.bounds.upper(variable),
            )?;
            if self.partition.is_basic(variable) {
                write!(f, " basic, {:?}", self.basic_status(variable))?;
            }
            if self.merged.is_merged(variable) {
                write!(f, " merged into x{}", self.merged.resolve(variable))?;
            }
            writeln!(f)?;
        }

        writeln!(f, "=== Basis ===")?;
        writeln!(f, "{:?}", self.partition.basic_list())?;
        if !self.cost_function_invalid() {
            writeln!(f, "=== Cost function ===")?;
            writeln!(f, "{}", self.cost_function().iter().map(f64::to_string).join(" "))?;
        }

        Ok(())
    }
}
