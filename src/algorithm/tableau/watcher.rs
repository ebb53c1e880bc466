//! # Watchers
//!
//! Observers that are told about changes to variable values and bounds, and about the tableau
//! growing. Watchers are shared with the caller, who keeps a handle to unregister them later.
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use index_utils::remove_indices;
use itertools::Itertools;

use crate::algorithm::tableau::Tableau;

/// Observes values and bounds of variables.
///
/// All methods have an empty default implementation, so an implementation only overrides the
/// notifications it cares about.
pub trait VariableWatcher {
    /// The value of a variable changed.
    fn notify_variable_value(&mut self, _variable: usize, _value: f64) {}
    /// The lower bound of a variable was set.
    fn notify_lower_bound(&mut self, _variable: usize, _bound: f64) {}
    /// The upper bound of a variable was set.
    fn notify_upper_bound(&mut self, _variable: usize, _bound: f64) {}
}

/// Observes the dimensions of the tableau.
pub trait ResizeWatcher {
    /// The number of rows or variables changed.
    fn notify_dimension_change(&mut self, m: usize, n: usize);
}

/// A variable watcher as it is held by the tableau.
pub type SharedVariableWatcher = Rc<RefCell<dyn VariableWatcher>>;
/// A resize watcher as it is held by the tableau.
pub type SharedResizeWatcher = Rc<RefCell<dyn ResizeWatcher>>;

#[derive(Default)]
pub(crate) struct WatcherRegistry {
    all_variables: Vec<SharedVariableWatcher>,
    per_variable: HashMap<usize, Vec<SharedVariableWatcher>>,
    resize: Vec<SharedResizeWatcher>,
}

impl WatcherRegistry {
    fn watchers_of(&self, variable: usize) -> impl Iterator<Item = &SharedVariableWatcher> {
        self.all_variables.iter()
            .chain(self.per_variable.get(&variable).into_iter().flatten())
    }

    pub(crate) fn notify_value(&self, variable: usize, value: f64) {
        for watcher in self.watchers_of(variable) {
            watcher.borrow_mut().notify_variable_value(variable, value);
        }
    }

    pub(crate) fn notify_lower_bound(&self, variable: usize, bound: f64) {
        for watcher in self.watchers_of(variable) {
            watcher.borrow_mut().notify_lower_bound(variable, bound);
        }
    }

    pub(crate) fn notify_upper_bound(&self, variable: usize, bound: f64) {
        for watcher in self.watchers_of(variable) {
            watcher.borrow_mut().notify_upper_bound(variable, bound);
        }
    }

    pub(crate) fn notify_resize(&self, m: usize, n: usize) {
        for watcher in &self.resize {
            watcher.borrow_mut().notify_dimension_change(m, n);
        }
    }
}

impl fmt::Debug for WatcherRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatcherRegistry")
            .field("all_variables", &self.all_variables.len())
            .field("per_variable", &self.per_variable.values().map(Vec::len).sum::<usize>())
            .field("resize", &self.resize.len())
            .finish()
    }
}

impl Tableau {
    /// Watch the values and bounds of every variable.
    pub fn register_to_watch_all_variables(&mut self, watcher: SharedVariableWatcher) {
        self.watchers.all_variables.push(watcher);
    }

    /// Watch the value and bounds of a single variable.
    pub fn register_to_watch_variable(&mut self, watcher: SharedVariableWatcher, variable: usize) {
        self.watchers.per_variable.entry(variable).or_default().push(watcher);
    }

    /// Stop watching a single variable.
    ///
    /// Watchers are compared by identity. Registrations for other variables, or for all variables,
    /// are unaffected.
    pub fn unregister_to_watch_variable(&mut self, watcher: &SharedVariableWatcher, variable: usize) {
        if let Some(watchers) = self.watchers.per_variable.get_mut(&variable) {
            let positions = watchers.iter()
                .positions(|registered| Rc::ptr_eq(registered, watcher))
                .collect::<Vec<_>>();
            remove_indices(watchers, &positions);
            if watchers.is_empty() {
                self.watchers.per_variable.remove(&variable);
            }
        }
    }

    /// Be told when the dimensions of the tableau change.
    pub fn register_resize_watcher(&mut self, watcher: SharedResizeWatcher) {
        self.watchers.resize.push(watcher);
    }
}
