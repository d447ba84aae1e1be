//! Numeric descriptive statistics and IQR outlier detection.
//!
//! Runs only on columns classified [`ColumnClass::Numeric`]. Statistics
//! are computed over finite values: null, NaN, and +/-Inf are excluded
//! from the statistic base, but NaN/Inf presence is still flagged.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    profile::{
        classify::{ColumnClass, ColumnType},
        config::ProfileConfig,
    },
    values::ColumnData,
};

/// Descriptive statistics for one numeric column.
///
/// All statistic fields are `None` when the column has no finite values;
/// that is a degenerate column, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumnStats {
    /// Count of finite values (excludes null, NaN, and +/-Inf).
    pub finite_count: usize,
    /// Mean over finite values.
    pub mean: Option<f64>,
    /// Population standard deviation over finite values.
    pub std_dev: Option<f64>,
    /// Minimum finite value.
    pub min: Option<f64>,
    /// Maximum finite value.
    pub max: Option<f64>,
    /// Proportion of finite values equal to zero.
    pub sparsity: Option<f64>,
    /// True if the column contains any NaN.
    pub has_nan: bool,
    /// True if the column contains +Inf or -Inf.
    pub has_inf: bool,
}

/// IQR outlier statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierColumnStats {
    /// Number of finite values outside the outlier bounds.
    pub outlier_count: usize,
    /// True if `outlier_count > 0`.
    pub flagged: bool,
    /// Lower bound `Q1 - k * IQR`; `None` when the column has no finite
    /// values.
    pub lower_bound: Option<f64>,
    /// Upper bound `Q3 + k * IQR`; `None` when the column has no finite
    /// values.
    pub upper_bound: Option<f64>,
}

/// Per-row outlier statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOutlierStats {
    /// Number of numeric columns whose value in this row is an outlier
    /// in its column.
    pub outlier_count: usize,
    /// True if `outlier_count > 0`.
    pub flagged: bool,
}

/// Computes descriptive statistics for every numeric-class column,
/// keyed by column name.
pub(crate) fn numeric_stats(
    columns: &[ColumnData],
    types: &[ColumnType],
) -> HashMap<String, NumericColumnStats> {
    numeric_columns(columns, types)
        .map(|column| (column.name.clone(), column_stats(column)))
        .collect()
}

/// Computes outlier statistics for every numeric-class column plus the
/// per-row view, in one pass over the cells.
pub(crate) fn outlier_stats(
    columns: &[ColumnData],
    types: &[ColumnType],
    config: &ProfileConfig,
    row_count: usize,
) -> (HashMap<String, OutlierColumnStats>, Vec<RowOutlierStats>) {
    let mut by_column = HashMap::new();
    let mut row_counts = vec![0_usize; row_count];

    for column in numeric_columns(columns, types) {
        let finite = finite_values(column);
        let bounds = outlier_bounds(&finite, config.iqr_multiplier);

        let mut outlier_count = 0;
        if let Some((lower, upper)) = bounds {
            for (row, cell) in column.cells.iter().enumerate() {
                if let Some(v) = cell.as_f64() {
                    if v.is_finite() && (v < lower || v > upper) {
                        outlier_count += 1;
                        row_counts[row] += 1;
                    }
                }
            }
        }

        by_column.insert(
            column.name.clone(),
            OutlierColumnStats {
                outlier_count,
                flagged: outlier_count > 0,
                lower_bound: bounds.map(|(lower, _)| lower),
                upper_bound: bounds.map(|(_, upper)| upper),
            },
        );
    }

    let rows = row_counts
        .into_iter()
        .map(|outlier_count| RowOutlierStats {
            outlier_count,
            flagged: outlier_count > 0,
        })
        .collect();

    (by_column, rows)
}

fn numeric_columns<'a>(
    columns: &'a [ColumnData],
    types: &'a [ColumnType],
) -> impl Iterator<Item = &'a ColumnData> {
    columns
        .iter()
        .zip(types)
        .filter(|(_, t)| t.class == ColumnClass::Numeric)
        .map(|(column, _)| column)
}

fn finite_values(column: &ColumnData) -> Vec<f64> {
    column
        .cells
        .iter()
        .filter_map(|cell| cell.as_f64())
        .filter(|v| v.is_finite())
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn column_stats(column: &ColumnData) -> NumericColumnStats {
    let mut has_nan = false;
    let mut has_inf = false;
    let mut finite = Vec::with_capacity(column.cells.len());

    for cell in &column.cells {
        if let Some(v) = cell.as_f64() {
            if v.is_nan() {
                has_nan = true;
            } else if v.is_infinite() {
                has_inf = true;
            } else {
                finite.push(v);
            }
        }
    }

    let n = finite.len();
    if n == 0 {
        return NumericColumnStats {
            finite_count: 0,
            mean: None,
            std_dev: None,
            min: None,
            max: None,
            sparsity: None,
            has_nan,
            has_inf,
        };
    }

    let mean = finite.iter().sum::<f64>() / n as f64;
    let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let zeros = finite.iter().filter(|&&v| v == 0.0).count();

    NumericColumnStats {
        finite_count: n,
        mean: Some(mean),
        std_dev: Some(variance.sqrt()),
        min: Some(min),
        max: Some(max),
        sparsity: Some(zeros as f64 / n as f64),
        has_nan,
        has_inf,
    }
}

/// Outlier bounds `[Q1 - k*IQR, Q3 + k*IQR]` over finite values, or
/// `None` when there are none. With zero IQR the bounds collapse to
/// `[Q1, Q1]`, so any value other than Q1 counts as an outlier; that is
/// intentional for near-constant columns.
fn outlier_bounds(finite: &[f64], multiplier: f64) -> Option<(f64, f64)> {
    if finite.is_empty() {
        return None;
    }

    let mut sorted = finite.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = quantile(&sorted, 0.25);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;

    Some((q1 - multiplier * iqr, q3 + multiplier * iqr))
}

/// Linear-interpolated quantile (type 7) over an already-sorted slice.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let pos = (n - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}
