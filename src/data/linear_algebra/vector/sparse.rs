//! # Sparse vector without ordering
//!
//! Nonzero values are stored in the order in which they were inserted. Lookups are linear, which is
//! fine for the short columns and rows of a constraint matrix.
use std::fmt;
use std::slice::Iter;

use itertools::Itertools;
use num_traits::Zero;

use crate::data::linear_algebra::SparseTuple;

/// Sparse vector of which the nonzero entries are not sorted by index.
///
/// No two tuples share the same index and no tuple holds an exact zero.
#[derive(PartialEq, Clone, Debug, Default)]
pub struct SparseUnsortedList {
    entries: Vec<SparseTuple<f64>>,
    len: usize,
}

impl SparseUnsortedList {
    /// Create a vector of logical length `len` containing only zeros.
    pub fn new(len: usize) -> Self {
        Self {
            entries: Vec::new(),
            len,
        }
    }

    /// Collect the nonzero values of a dense vector.
    pub fn from_dense(values: &[f64]) -> Self {
        Self {
            entries: values.iter()
                .enumerate()
                .filter(|(_, value)| !value.is_zero())
                .map(|(i, &value)| (i, value))
                .collect(),
            len: values.len(),
        }
    }

    /// Logical length of the vector, including zeros.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the logical length is zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of explicitly stored values.
    pub fn nr_nonzeros(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over the stored `(index, value)` tuples in insertion order.
    pub fn iter(&self) -> Iter<'_, SparseTuple<f64>> {
        self.entries.iter()
    }

    /// Value at an index, zero if nothing is stored there.
    pub fn get(&self, index: usize) -> f64 {
        debug_assert!(index < self.len);

        self.entries.iter()
            .find(|&&(i, _)| i == index)
            .map_or(0_f64, |&(_, value)| value)
    }

    /// Overwrite the value at an index.
    ///
    /// Writing an exact zero removes the entry.
    pub fn set(&mut self, index: usize, value: f64) {
        debug_assert!(index < self.len);

        match self.entries.iter().position(|&(i, _)| i == index) {
            Some(position) if value.is_zero() => {
                self.entries.swap_remove(position);
            },
            Some(position) => self.entries[position].1 = value,
            None if value.is_zero() => {},
            None => self.entries.push((index, value)),
        }
    }

    /// Grow the logical length, the new entries are zero.
    pub fn extend_len(&mut self, extra: usize) {
        self.len += extra;
    }

    /// Inner product with a dense vector of the same length.
    pub fn inner_product(&self, dense: &[f64]) -> f64 {
        debug_assert_eq!(dense.len(), self.len);

        self.entries.iter()
            .map(|&(i, value)| value * dense[i])
            .sum()
    }

    /// Add a multiple of this vector to a dense vector of the same length.
    pub fn add_multiple_to(&self, factor: f64, target: &mut [f64]) {
        debug_assert_eq!(target.len(), self.len);

        for &(i, value) in &self.entries {
            target[i] += factor * value;
        }
    }

    /// Expand into a dense vector.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0_f64; self.len];
        for &(i, value) in &self.entries {
            dense[i] = value;
        }
        dense
    }
}

impl fmt::Display for SparseUnsortedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]",
            self.entries.iter()
                .sorted_by_key(|&&(i, _)| i)
                .map(|&(i, value)| format!("{i}: {value}"))
                .join(", "),
        )
    }
}
