//! Missingness analysis.
//!
//! A cell is missing when it is null or a floating NaN; at this layer NaN
//! is never treated as a valid numeric value. Column and row views are
//! computed from the same cell predicate, so their totals always agree.

use crate::values::ColumnData;

/// Missing count and ratio for one column or one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MissingStats {
    pub(crate) count: usize,
    pub(crate) ratio: f64,
}

/// Per-column missingness, in schema order. `ratio = count / row_count`.
pub(crate) fn column_missing(columns: &[ColumnData], row_count: usize) -> Vec<MissingStats> {
    columns
        .iter()
        .map(|column| {
            let count = column.cells.iter().filter(|c| c.is_missing()).count();
            MissingStats {
                count,
                ratio: ratio(count, row_count),
            }
        })
        .collect()
}

/// Per-row missingness, in row order. `ratio = count / width`.
pub(crate) fn row_missing(columns: &[ColumnData], row_count: usize) -> Vec<MissingStats> {
    let width = columns.len();
    (0..row_count)
        .map(|row| {
            let count = columns
                .iter()
                .filter(|column| column.cells[row].is_missing())
                .count();
            MissingStats {
                count,
                ratio: ratio(count, width),
            }
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
