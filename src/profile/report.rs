//! Assembled profiling reports.
//!
//! Three coherent tables: one [`DatasetSummary`], one [`ColumnSummary`]
//! per input column (schema order), one [`RowSummary`] per record
//! (original row order). Engine-contributed sections are `Option`s that
//! stay `None` when the engine was disabled or the section does not
//! apply to the column's class - a disabled engine contributes nothing,
//! not null-filled fields.

use serde::{Deserialize, Serialize};

use crate::profile::{
    categorical::{CategoricalColumnStats, RowRareStats},
    classify::ColumnClass,
    numeric::{NumericColumnStats, OutlierColumnStats, RowOutlierStats},
};

/// Dataset-wide aggregates rolled up from the column and row summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Number of rows (N).
    pub row_count: usize,
    /// Number of columns (W).
    pub column_count: usize,
    /// Total missing cells across the dataset.
    pub missing_cell_count: usize,
    /// `missing_cell_count / (N * W)`.
    pub missing_cell_ratio: f64,
    /// Columns classified numeric.
    pub numeric_column_count: usize,
    /// Columns classified categorical.
    pub categorical_column_count: usize,
    /// Columns classified zero-variance.
    pub zero_variance_column_count: usize,
    /// Columns classified temporal.
    pub temporal_column_count: usize,
    /// Columns classified other.
    pub other_column_count: usize,
    /// Duplicate columns; `None` when duplicate stats were disabled.
    pub duplicate_column_count: Option<usize>,
    /// Duplicate rows; `None` when duplicate stats were disabled.
    pub duplicate_row_count: Option<usize>,
    /// Total outliers across numeric columns; `None` when outlier stats
    /// were disabled.
    pub outlier_count: Option<usize>,
    /// Rows containing at least one outlier; `None` when outlier stats
    /// were disabled.
    pub rows_with_outliers: Option<usize>,
    /// Categorical columns with at least one rare level; `None` when
    /// categorical stats were disabled.
    pub columns_with_rare_levels: Option<usize>,
    /// Rows carrying at least one rare level; `None` when categorical
    /// stats were disabled.
    pub rows_with_rare_levels: Option<usize>,
}

/// Profiling summary for one input column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Column name.
    pub name: String,
    /// Arrow storage type, rendered.
    pub data_type: String,
    /// Inferred semantic class.
    pub class: ColumnClass,
    /// Distinct non-null value count.
    pub distinct_count: usize,
    /// The effective unique-count threshold the classifier applied.
    pub threshold_used: usize,
    /// Missing (null or NaN) cell count.
    pub missing_count: usize,
    /// `missing_count / N`.
    pub missing_ratio: f64,
    /// True if this column repeats an earlier column's values; `None`
    /// when duplicate stats were disabled.
    pub duplicate: Option<bool>,
    /// Descriptive statistics; `None` unless the column is numeric-class
    /// and numeric stats were enabled.
    pub numeric: Option<NumericColumnStats>,
    /// Outlier statistics; `None` unless the column is numeric-class and
    /// outlier stats were enabled.
    pub outliers: Option<OutlierColumnStats>,
    /// Level statistics; `None` unless the column is categorical-class
    /// and categorical stats were enabled.
    pub categorical: Option<CategoricalColumnStats>,
}

/// Profiling summary for one input record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSummary {
    /// Zero-based index of the record, in original order.
    pub row_index: usize,
    /// Missing (null or NaN) cell count across the row.
    pub missing_count: usize,
    /// `missing_count / W`.
    pub missing_ratio: f64,
    /// True if this row repeats an earlier row's tuple; `None` when
    /// duplicate stats were disabled.
    pub duplicate: Option<bool>,
    /// Per-row outlier statistics; `None` when outlier stats were
    /// disabled.
    pub outliers: Option<RowOutlierStats>,
    /// Per-row rare-level statistics; `None` when categorical stats were
    /// disabled.
    pub rare_levels: Option<RowRareStats>,
}

/// The full result of one profiling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Dataset-wide aggregates.
    pub dataset: DatasetSummary,
    /// One entry per input column, in schema order.
    pub columns: Vec<ColumnSummary>,
    /// One entry per input record, in original order.
    pub rows: Vec<RowSummary>,
}

impl ProfileReport {
    /// Looks up a column summary by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of columns with the given class.
    pub fn columns_with_class(&self, class: ColumnClass) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.class == class)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Names of columns flagged as duplicates of an earlier column.
    pub fn duplicate_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.duplicate == Some(true))
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Indices of rows flagged as duplicates of an earlier row.
    pub fn duplicate_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .filter(|r| r.duplicate == Some(true))
            .map(|r| r.row_index)
            .collect()
    }

    /// True if any column or row carries a quality flag: missing cells,
    /// duplicates, outliers, or rare levels.
    pub fn has_issues(&self) -> bool {
        self.dataset.missing_cell_count > 0
            || self.dataset.duplicate_column_count.unwrap_or(0) > 0
            || self.dataset.duplicate_row_count.unwrap_or(0) > 0
            || self.dataset.outlier_count.unwrap_or(0) > 0
            || self.dataset.columns_with_rare_levels.unwrap_or(0) > 0
    }
}
