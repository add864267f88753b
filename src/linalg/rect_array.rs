//! Dense rectangular arrays.
//!
//! `RectArray<T>` stores its elements row-major in a single `Vec<T>` and is
//! indexed from zero. Every accessor that takes an index has a checked form
//! returning [`LinalgError`]; the `Index` impls panic on out-of-range access
//! the same way slices do.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by out-of-range or mismatched-shape array operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinalgError {
    /// A row or column index is outside the array.
    #[error("index ({row}, {col}) out of range for {rows}x{cols} array")]
    Index {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Number of rows in the array.
        rows: usize,
        /// Number of columns in the array.
        cols: usize,
    },
    /// A vector or array has the wrong length for the operation.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    Dimension {
        /// Required length.
        expected: usize,
        /// Supplied length.
        found: usize,
    },
    /// The operation needs a square array.
    #[error("array is {rows}x{cols}, not square")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },
}

/// A rectangular array of `rows x cols` elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectArray<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Default + Clone> RectArray<T> {
    /// Create an array filled with `T::default()`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::default())
    }
}

impl<T: Clone> RectArray<T> {
    /// Create an array with every element set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Build an array from a list of rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, LinalgError> {
        let cols = rows.first().map_or(0, Vec::len);
        let num_rows = rows.len();
        let mut data = Vec::with_capacity(num_rows * cols);
        for row in rows {
            if row.len() != cols {
                return Err(LinalgError::Dimension {
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: num_rows,
            cols,
            data,
        })
    }

    /// Get a copy of column `col`.
    pub fn column(&self, col: usize) -> Result<Vec<T>, LinalgError> {
        self.check_column(col)?;
        Ok((0..self.rows)
            .map(|r| self.data[r * self.cols + col].clone())
            .collect())
    }

    /// Overwrite column `col` with `values`.
    pub fn set_column(&mut self, col: usize, values: &[T]) -> Result<(), LinalgError> {
        self.check_column(col)?;
        self.check_column_len(values.len())?;
        for (r, v) in values.iter().enumerate() {
            self.data[r * self.cols + col] = v.clone();
        }
        Ok(())
    }

    /// Overwrite row `row` with `values`.
    pub fn set_row(&mut self, row: usize, values: &[T]) -> Result<(), LinalgError> {
        self.check_row(row)?;
        self.check_row_len(values.len())?;
        let start = row * self.cols;
        self.data[start..start + self.cols].clone_from_slice(values);
        Ok(())
    }

    /// Return the transposed array.
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.data[r * self.cols + c].clone());
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }
}

impl<T> RectArray<T> {
    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.cols
    }

    /// Checked element access.
    pub fn get(&self, row: usize, col: usize) -> Result<&T, LinalgError> {
        self.check(row, col)?;
        Ok(&self.data[row * self.cols + col])
    }

    /// Checked mutable element access.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut T, LinalgError> {
        self.check(row, col)?;
        Ok(&mut self.data[row * self.cols + col])
    }

    /// Borrow row `row` as a slice.
    pub fn row(&self, row: usize) -> Result<&[T], LinalgError> {
        self.check_row(row)?;
        let start = row * self.cols;
        Ok(&self.data[start..start + self.cols])
    }

    /// Mutably borrow row `row`.
    pub fn row_mut(&mut self, row: usize) -> Result<&mut [T], LinalgError> {
        self.check_row(row)?;
        let start = row * self.cols;
        Ok(&mut self.data[start..start + self.cols])
    }

    /// Mutably iterate over the rows in order. An array with no columns
    /// yields no rows.
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, T> {
        self.data.chunks_exact_mut(self.cols.max(1))
    }

    /// Swap the contents of row `row` with `buffer`.
    pub fn switch_row(&mut self, row: usize, buffer: &mut [T]) -> Result<(), LinalgError> {
        self.check_row(row)?;
        self.check_row_len(buffer.len())?;
        let start = row * self.cols;
        self.data[start..start + self.cols].swap_with_slice(buffer);
        Ok(())
    }

    /// Swap two rows.
    pub fn switch_rows(&mut self, a: usize, b: usize) -> Result<(), LinalgError> {
        self.check_row(a)?;
        self.check_row(b)?;
        if a != b {
            for c in 0..self.cols {
                self.data.swap(a * self.cols + c, b * self.cols + c);
            }
        }
        Ok(())
    }

    /// Swap the contents of column `col` with `buffer`.
    pub fn switch_column(&mut self, col: usize, buffer: &mut [T]) -> Result<(), LinalgError> {
        self.check_column(col)?;
        self.check_column_len(buffer.len())?;
        for (r, slot) in buffer.iter_mut().enumerate() {
            std::mem::swap(&mut self.data[r * self.cols + col], slot);
        }
        Ok(())
    }

    /// Swap two columns.
    pub fn switch_columns(&mut self, a: usize, b: usize) -> Result<(), LinalgError> {
        self.check_column(a)?;
        self.check_column(b)?;
        if a != b {
            for r in 0..self.rows {
                self.data.swap(r * self.cols + a, r * self.cols + b);
            }
        }
        Ok(())
    }

    /// Cyclically move rows `lo..=hi` up by one; row `lo` ends up at `hi`.
    pub fn rotate_up(&mut self, lo: usize, hi: usize) -> Result<(), LinalgError> {
        self.check_row_range(lo, hi)?;
        self.data[lo * self.cols..(hi + 1) * self.cols].rotate_left(self.cols);
        Ok(())
    }

    /// Cyclically move rows `lo..=hi` down by one; row `hi` ends up at `lo`.
    pub fn rotate_down(&mut self, lo: usize, hi: usize) -> Result<(), LinalgError> {
        self.check_row_range(lo, hi)?;
        self.data[lo * self.cols..(hi + 1) * self.cols].rotate_right(self.cols);
        Ok(())
    }

    /// Cyclically move columns `lo..=hi` left by one in every row.
    pub fn rotate_left(&mut self, lo: usize, hi: usize) -> Result<(), LinalgError> {
        self.check_column_range(lo, hi)?;
        for r in 0..self.rows {
            let start = r * self.cols;
            self.data[start + lo..=start + hi].rotate_left(1);
        }
        Ok(())
    }

    /// Cyclically move columns `lo..=hi` right by one in every row.
    pub fn rotate_right(&mut self, lo: usize, hi: usize) -> Result<(), LinalgError> {
        self.check_column_range(lo, hi)?;
        for r in 0..self.rows {
            let start = r * self.cols;
            self.data[start + lo..=start + hi].rotate_right(1);
        }
        Ok(())
    }

    /// Whether both arrays have the same shape.
    pub fn same_shape<U>(&self, other: &RectArray<U>) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    fn check(&self, row: usize, col: usize) -> Result<(), LinalgError> {
        if row < self.rows && col < self.cols {
            Ok(())
        } else {
            Err(self.index_error(row, col))
        }
    }

    fn check_row(&self, row: usize) -> Result<(), LinalgError> {
        if row < self.rows {
            Ok(())
        } else {
            Err(self.index_error(row, 0))
        }
    }

    fn check_column(&self, col: usize) -> Result<(), LinalgError> {
        if col < self.cols {
            Ok(())
        } else {
            Err(self.index_error(0, col))
        }
    }

    fn check_row_range(&self, lo: usize, hi: usize) -> Result<(), LinalgError> {
        if lo <= hi && hi < self.rows {
            Ok(())
        } else {
            Err(self.index_error(hi, 0))
        }
    }

    fn check_column_range(&self, lo: usize, hi: usize) -> Result<(), LinalgError> {
        if lo <= hi && hi < self.cols {
            Ok(())
        } else {
            Err(self.index_error(0, hi))
        }
    }

    fn check_row_len(&self, len: usize) -> Result<(), LinalgError> {
        if len == self.cols {
            Ok(())
        } else {
            Err(LinalgError::Dimension {
                expected: self.cols,
                found: len,
            })
        }
    }

    fn check_column_len(&self, len: usize) -> Result<(), LinalgError> {
        if len == self.rows {
            Ok(())
        } else {
            Err(LinalgError::Dimension {
                expected: self.rows,
                found: len,
            })
        }
    }

    fn index_error(&self, row: usize, col: usize) -> LinalgError {
        LinalgError::Index {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl RectArray<f64> {
    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Overwrite a square array with the identity.
    pub fn make_identity(&mut self) -> Result<(), LinalgError> {
        if self.rows != self.cols {
            return Err(LinalgError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        for r in 0..self.rows {
            for c in 0..self.cols {
                self.data[r * self.cols + c] = if r == c { 1.0 } else { 0.0 };
            }
        }
        Ok(())
    }
}

impl<T> Index<(usize, usize)> for RectArray<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}x{} array",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for RectArray<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}x{} array",
            row,
            col,
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}
