// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only tabular data access for mark generators.

/// A column identifier within a [`TableData`] source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColId(pub u32);

/// Row-oriented access to numeric and text columns.
///
/// Mark generators read their encodings through this trait so that any owned dataset can be
/// plotted without copying it into an intermediate frame.
pub trait TableData {
    /// Returns the number of rows.
    fn row_count(&self) -> usize;

    /// Returns a numeric value for `row`/`col`, or `None` if the column is not numeric.
    ///
    /// Present-but-unparseable values are reported as `Some(f64::NAN)`.
    fn f64(&self, row: usize, col: ColId) -> Option<f64>;

    /// Returns a text value for `row`/`col`, or `None` if the column is not textual.
    fn text(&self, row: usize, col: ColId) -> Option<&str> {
        let _ = (row, col);
        None
    }
}
