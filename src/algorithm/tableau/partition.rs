//! # Basis partition
//!
//! Which variables are basic, and the two index maps between variables and their position in the
//! basic or non-basic list.
use std::collections::HashSet;

/// Split of the `n` variables into `m` basic and `n - m` non-basic ones.
///
/// A basic variable with basic index `i` belongs to row `i` of `B^-1 A`. A non-basic variable with
/// non-basic index `j` belongs to entry `j` of the cost function and of the non-basic assignment.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct BasisPartition {
    basic_variables: HashSet<usize>,
    basic_index_to_variable: Vec<usize>,
    non_basic_index_to_variable: Vec<usize>,
    /// Basic index for basic variables, non-basic index for the others.
    variable_to_index: Vec<usize>,
}

impl BasisPartition {
    /// Empty partition for `n` variables and `m` rows.
    ///
    /// Variables still need to be marked as basic, after which `assign_non_basic_indices` completes
    /// the partition.
    pub fn new(m: usize, n: usize) -> Self {
        debug_assert!(m <= n);

        Self {
            basic_variables: HashSet::with_capacity(m),
            basic_index_to_variable: vec![usize::MAX; m],
            non_basic_index_to_variable: Vec::with_capacity(n - m),
            variable_to_index: vec![usize::MAX; n],
        }
    }

    /// Mark a variable as basic, without giving it an index.
    pub fn mark_as_basic(&mut self, variable: usize) {
        debug_assert!(variable < self.variable_to_index.len());

        self.basic_variables.insert(variable);
    }

    /// Give a basic variable its position in the basis.
    pub fn assign_index_to_basic_variable(&mut self, variable: usize, index: usize) {
        debug_assert!(self.basic_variables.contains(&variable));
        debug_assert!(index < self.basic_index_to_variable.len());

        self.basic_index_to_variable[index] = variable;
        self.variable_to_index[variable] = index;
    }

    /// Give all variables that are not basic a non-basic index, in increasing variable order.
    pub fn assign_non_basic_indices(&mut self) {
        self.non_basic_index_to_variable.clear();
        for variable in 0..self.variable_to_index.len() {
            if !self.basic_variables.contains(&variable) {
                self.variable_to_index[variable] = self.non_basic_index_to_variable.len();
                self.non_basic_index_to_variable.push(variable);
            }
        }

        debug_assert_eq!(
            self.non_basic_index_to_variable.len() + self.basic_index_to_variable.len(),
            self.variable_to_index.len(),
        );
    }

    /// Add a new variable that is basic in a new last row.
    pub fn push_basic_variable(&mut self) -> usize {
        let variable = self.variable_to_index.len();
        self.variable_to_index.push(self.basic_index_to_variable.len());
        self.basic_index_to_variable.push(variable);
        self.basic_variables.insert(variable);

        variable
    }

    /// Exchange a non-basic and a basic variable.
    ///
    /// # Return value
    ///
    /// The entering and leaving variable.
    pub fn swap(&mut self, non_basic_index: usize, basic_index: usize) -> (usize, usize) {
        let entering = self.non_basic_index_to_variable[non_basic_index];
        let leaving = self.basic_index_to_variable[basic_index];

        self.basic_variables.remove(&leaving);
        self.basic_variables.insert(entering);
        self.basic_index_to_variable[basic_index] = entering;
        self.non_basic_index_to_variable[non_basic_index] = leaving;
        self.variable_to_index[entering] = basic_index;
        self.variable_to_index[leaving] = non_basic_index;

        (entering, leaving)
    }

    /// Whether a variable is basic.
    pub fn is_basic(&self, variable: usize) -> bool {
        self.basic_variables.contains(&variable)
    }

    /// The set of basic variables.
    pub fn basic_variables(&self) -> &HashSet<usize> {
        &self.basic_variables
    }

    /// Variable at a basic index.
    pub fn basic_index_to_variable(&self, index: usize) -> usize {
        self.basic_index_to_variable[index]
    }

    /// Variable at a non-basic index.
    pub fn non_basic_index_to_variable(&self, index: usize) -> usize {
        self.non_basic_index_to_variable[index]
    }

    /// Basic or non-basic index of a variable, depending on whether it is basic.
    pub fn variable_to_index(&self, variable: usize) -> usize {
        self.variable_to_index[variable]
    }

    /// Basic variables by basic index.
    pub fn basic_list(&self) -> &[usize] {
        &self.basic_index_to_variable
    }

    /// Non-basic variables by non-basic index.
    pub fn non_basic_list(&self) -> &[usize] {
        &self.non_basic_index_to_variable
    }

    /// Check that the maps are mutually inverse.
    pub fn is_consistent(&self) -> bool {
        self.basic_variables.len() == self.basic_index_to_variable.len()
            && self.basic_index_to_variable.iter().enumerate()
                .all(|(i, &variable)| {
                    self.basic_variables.contains(&variable) && self.variable_to_index[variable] == i
                })
            && self.non_basic_index_to_variable.iter().enumerate()
                .all(|(j, &variable)| {
                    !self.basic_variables.contains(&variable) && self.variable_to_index[variable] == j
                })
    }
}
