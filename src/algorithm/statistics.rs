//! # Statistics
//!
//! Counters that a tableau increments as it works. A single `Statistics` instance can be shared
//! with the search procedure that drives the tableau.
use std::fmt;

use enum_map::{Enum, EnumMap};
use itertools::Itertools;

/// Events that are counted.
#[allow(missing_docs)]
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Counter {
    Pivots,
    DegeneratePivots,
    FakePivots,
    Refactorizations,
    BoundTightenings,
    MergedColumns,
    AddedRows,
    AssignmentComputations,
}

/// One count per `Counter`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statistics {
    counters: EnumMap<Counter, u64>,
}

impl Statistics {
    /// All counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence.
    pub fn increment(&mut self, counter: Counter) {
        self.counters[counter] += 1;
    }

    /// Current count.
    pub fn get(&self, counter: Counter) -> u64 {
        self.counters[counter]
    }

    /// Set all counters back to zero.
    pub fn reset(&mut self) {
        self.counters.clear();
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.counters.iter()
                .map(|(counter, count)| format!("{counter:?}: {count}"))
                .join(", "),
        )
    }
}
