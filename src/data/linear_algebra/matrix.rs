//! # Constraint matrix
//!
//! The matrix `A` of the system `A x = b` is read in three ways: column by column while solving
//! with the basis, row by row while printing and deriving bounds, and entry by entry while the
//! system is being set up. All three views are stored and kept in sync on every write.
use std::fmt;

use itertools::Itertools;
use num_traits::Zero;

use crate::data::linear_algebra::EPSILON;
use crate::data::linear_algebra::vector::SparseUnsortedList;

/// Matrix of `m` rows and `n` columns stored densely (column major) as well as sparsely, per
/// column and per row.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintMatrix {
    /// Column-major values, entry `(i, j)` is at `j * nr_rows + i`.
    dense: Vec<f64>,
    columns: Vec<SparseUnsortedList>,
    rows: Vec<SparseUnsortedList>,

    nr_rows: usize,
    nr_columns: usize,
}

impl ConstraintMatrix {
    /// Create a matrix of zeros.
    pub fn zeros(nr_rows: usize, nr_columns: usize) -> Self {
        Self {
            dense: vec![0_f64; nr_rows * nr_columns],
            columns: vec![SparseUnsortedList::new(nr_rows); nr_columns],
            rows: vec![SparseUnsortedList::new(nr_columns); nr_rows],

            nr_rows,
            nr_columns,
        }
    }

    /// Create a matrix from row-major data.
    ///
    /// # Arguments
    ///
    /// * `values`: Exactly `nr_rows * nr_columns` values, row after row.
    pub fn from_row_major(values: &[f64], nr_rows: usize, nr_columns: usize) -> Self {
        debug_assert_eq!(values.len(), nr_rows * nr_columns);

        let mut matrix = Self::zeros(nr_rows, nr_columns);
        for (i, row) in values.chunks(nr_columns.max(1)).enumerate().take(nr_rows) {
            for (j, &value) in row.iter().enumerate() {
                matrix.set(i, j, value);
            }
        }

        matrix
    }

    /// Number of rows, `m`.
    pub fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    /// Number of columns, `n`.
    pub fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    /// Value at row `i` and column `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.nr_rows);
        debug_assert!(j < self.nr_columns);

        self.dense[j * self.nr_rows + i]
    }

    /// Write a value at row `i` and column `j`, updating all representations.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        debug_assert!(i < self.nr_rows);
        debug_assert!(j < self.nr_columns);

        self.dense[j * self.nr_rows + i] = value;
        self.columns[j].set(i, value);
        self.rows[i].set(j, value);
    }

    /// Column `j` as a dense slice of length `m`.
    pub fn column(&self, j: usize) -> &[f64] {
        debug_assert!(j < self.nr_columns);

        &self.dense[j * self.nr_rows..(j + 1) * self.nr_rows]
    }

    /// Nonzeros of column `j`.
    pub fn sparse_column(&self, j: usize) -> &SparseUnsortedList {
        &self.columns[j]
    }

    /// Nonzeros of row `i`.
    pub fn sparse_row(&self, i: usize) -> &SparseUnsortedList {
        &self.rows[i]
    }

    /// Append a row of zeros.
    pub fn add_row(&mut self) {
        let old_nr_rows = self.nr_rows;
        let new_nr_rows = old_nr_rows + 1;

        let mut dense = vec![0_f64; new_nr_rows * self.nr_columns];
        for j in 0..self.nr_columns {
            dense[j * new_nr_rows..j * new_nr_rows + old_nr_rows]
                .copy_from_slice(&self.dense[j * old_nr_rows..(j + 1) * old_nr_rows]);
        }
        self.dense = dense;

        for column in &mut self.columns {
            column.extend_len(1);
        }
        self.rows.push(SparseUnsortedList::new(self.nr_columns));
        self.nr_rows = new_nr_rows;
    }

    /// Append a column of zeros.
    pub fn add_column(&mut self) {
        self.dense.extend(std::iter::repeat_n(0_f64, self.nr_rows));
        self.columns.push(SparseUnsortedList::new(self.nr_rows));
        for row in &mut self.rows {
            row.extend_len(1);
        }
        self.nr_columns += 1;
    }

    /// Add column `source` into column `target` and clear column `source`.
    ///
    /// Sums that cancel to within `EPSILON` of zero are stored as exact zeros.
    pub fn merge_columns(&mut self, source: usize, target: usize) {
        debug_assert_ne!(source, target);

        let source_entries = self.columns[source].iter().copied().collect::<Vec<_>>();
        for (i, value) in source_entries {
            let sum = self.get(i, target) + value;
            let sum = if sum.abs() < EPSILON { 0_f64 } else { sum };
            self.set(i, target, sum);
            self.set(i, source, 0_f64);
        }

        debug_assert!(self.column(source).iter().all(|v| v.is_zero()));
    }

    /// Compute `A x` for a dense `x` of length `n`.
    pub fn multiply(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.nr_columns);

        self.rows.iter()
            .map(|row| row.inner_product(x))
            .collect()
    }

    /// Number of explicitly stored nonzeros.
    pub fn nr_nonzeros(&self) -> usize {
        self.columns.iter().map(SparseUnsortedList::nr_nonzeros).sum()
    }
}

impl fmt::Display for ConstraintMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.nr_rows {
            writeln!(
                f,
                "{}",
                (0..self.nr_columns).map(|j| format!("{:>10.4}", self.get(i, j))).join(" "),
            )?;
        }
        Ok(())
    }
}
