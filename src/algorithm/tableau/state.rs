//! # Saving and restoring
//!
//! Search procedures backtrack: they save the tableau before a decision and return to it when the
//! decision turns out to be wrong.
use log::debug;

use crate::algorithm::error::TableauError;
use crate::algorithm::tableau::{BasicAssignmentStatus, BasicStatus, BasisColumns, Tableau};
use crate::algorithm::tableau::bounds::BoundStore;
use crate::algorithm::tableau::merge::MergeMap;
use crate::algorithm::tableau::partition::BasisPartition;
use crate::data::linear_algebra::matrix::ConstraintMatrix;

/// Copy of the logical state of a tableau.
///
/// The basis factorization is not part of the state, it is recomputed from the basis on restore.
#[derive(Clone, Debug, PartialEq)]
pub struct TableauState {
    pub(crate) matrix: ConstraintMatrix,
    pub(crate) right_hand_side: Vec<f64>,
    pub(crate) bounds: BoundStore,
    pub(crate) partition: BasisPartition,
    pub(crate) basic_assignment: Vec<f64>,
    pub(crate) non_basic_assignment: Vec<f64>,
    pub(crate) basic_status: Vec<BasicStatus>,
    pub(crate) basic_assignment_status: BasicAssignmentStatus,
    pub(crate) merged: MergeMap,
}

impl TableauState {
    /// Number of rows of the saved tableau.
    pub fn m(&self) -> usize {
        self.matrix.nr_rows()
    }

    /// Number of variables of the saved tableau.
    pub fn n(&self) -> usize {
        self.matrix.nr_columns()
    }
}

impl Tableau {
    /// Save the logical state.
    pub fn store_state(&self) -> TableauState {
        debug_assert!(self.initialized);
        debug!("Storing tableau state ({} x {})", self.m(), self.n());

        TableauState {
            matrix: self.matrix.clone(),
            right_hand_side: self.right_hand_side.clone(),
            bounds: self.bounds.clone(),
            partition: self.partition.clone(),
            basic_assignment: self.basic_assignment.clone(),
            non_basic_assignment: self.non_basic_assignment.clone(),
            basic_status: self.basic_status.clone(),
            basic_assignment_status: self.basic_assignment_status,
            merged: self.merged.clone(),
        }
    }

    /// Return to a saved state.
    ///
    /// The assignment is copied as it was saved, not recomputed. The basis factorization is
    /// recomputed, the cost function becomes invalid and resize watchers are told about the
    /// (possibly unchanged) dimensions.
    ///
    /// # Errors
    ///
    /// When the saved basis can't be factorized. The tableau is unchanged in that case.
    pub fn restore_state(&mut self, state: &TableauState) -> Result<(), TableauError> {
        debug!("Restoring tableau state ({} x {})", state.m(), state.n());

        let oracle = BasisColumns {
            matrix: &state.matrix,
            basic_index_to_variable: state.partition.basic_list(),
        };
        self.factorization.refresh(&oracle)?;

        self.matrix = state.matrix.clone();
        self.right_hand_side = state.right_hand_side.clone();
        self.bounds = state.bounds.clone();
        self.partition = state.partition.clone();
        self.basic_assignment = state.basic_assignment.clone();
        self.non_basic_assignment = state.non_basic_assignment.clone();
        self.basic_status = state.basic_status.clone();
        self.basic_assignment_status = state.basic_assignment_status;
        self.merged = state.merged.clone();
        self.multipliers = vec![0_f64; self.m()];
        self.initialized = true;

        self.pivot = Default::default();
        self.cost_function_manager.invalidate_cost_function();
        self.watchers.notify_resize(self.m(), self.n());
        self.debug_assert_consistent();

        Ok(())
    }
}
