//! Column type classification.
//!
//! Infers a semantic class for every column from its Arrow storage type
//! and distinct-value cardinality. The classifier always runs first: its
//! output gates which columns the numeric and categorical engines see.

use std::collections::HashSet;

use arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};

use crate::{profile::config::ProfileConfig, values::ColumnData};

/// Semantic class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnClass {
    /// Continuous numeric column.
    Numeric,
    /// Low-cardinality column treated as discrete levels.
    Categorical,
    /// Column with exactly one distinct non-null value.
    ZeroVariance,
    /// Date, datetime, or timestamp column.
    Temporal,
    /// Free text or other high-cardinality, non-numeric column.
    Other,
}

impl ColumnClass {
    /// Short human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::ZeroVariance => "zero_variance",
            Self::Temporal => "temporal",
            Self::Other => "other",
        }
    }
}

/// Classification record for one column.
///
/// Created once per profiling run and consumed by every downstream
/// engine; immutable after creation.
#[derive(Debug, Clone)]
pub struct ColumnType {
    /// Column name.
    pub name: String,
    /// Arrow storage type.
    pub data_type: DataType,
    /// Distinct non-null value count (NaN counts as a value).
    pub distinct_count: usize,
    /// Inferred class.
    pub class: ColumnClass,
    /// The effective unique-count threshold actually applied, recorded
    /// for auditability.
    pub threshold_used: usize,
}

/// The smaller of the absolute threshold and the proportion-of-N derived
/// threshold (never below 1).
pub(crate) fn effective_threshold(config: &ProfileConfig, row_count: usize) -> usize {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let prop_threshold = ((row_count as f64) * config.unique_prop_threshold).floor() as usize;
    config.unique_n_threshold.min(prop_threshold.max(1))
}

/// Classifies every column. Priority order: zero variance, temporal
/// storage, boolean or low-cardinality numeric/string, numeric storage,
/// then other.
pub(crate) fn classify_columns(
    columns: &[ColumnData],
    config: &ProfileConfig,
    row_count: usize,
) -> Vec<ColumnType> {
    let threshold = effective_threshold(config, row_count);

    columns
        .iter()
        .map(|column| {
            let distinct_count = distinct_non_null(column);
            let class = classify(column, distinct_count, threshold, row_count);
            ColumnType {
                name: column.name.clone(),
                data_type: column.data_type.clone(),
                distinct_count,
                class,
                threshold_used: threshold,
            }
        })
        .collect()
}

fn classify(
    column: &ColumnData,
    distinct_count: usize,
    threshold: usize,
    row_count: usize,
) -> ColumnClass {
    let data_type = &column.data_type;

    if distinct_count == 1 && row_count > 0 {
        ColumnClass::ZeroVariance
    } else if is_temporal(data_type) {
        ColumnClass::Temporal
    } else if *data_type == DataType::Boolean
        || ((data_type.is_numeric() || is_string(data_type)) && distinct_count <= threshold)
    {
        ColumnClass::Categorical
    } else if data_type.is_numeric() {
        ColumnClass::Numeric
    } else {
        ColumnClass::Other
    }
}

fn is_temporal(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _)
    )
}

fn is_string(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Utf8 | DataType::LargeUtf8)
}

/// Exact distinct count over the canonical text of non-null cells.
fn distinct_non_null(column: &ColumnData) -> usize {
    let mut seen: HashSet<String> = HashSet::new();
    for cell in &column.cells {
        if let Some(text) = cell.text() {
            seen.insert(text);
        }
    }
    seen.len()
}
