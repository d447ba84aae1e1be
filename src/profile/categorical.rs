//! Categorical level statistics and rare-level detection.
//!
//! Runs only on columns classified [`ColumnClass::Categorical`]. Levels
//! are the canonical text of the cells; null is either dropped from the
//! level set (`exclude_null_level`) or materialized as the sentinel
//! level `"NULL"`. Level ordering is frequency descending, ties broken
//! lexicographically ascending - a deterministic rule rather than the
//! sort stability of some underlying engine.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    profile::{
        classify::{ColumnClass, ColumnType},
        config::ProfileConfig,
    },
    values::{Cell, ColumnData},
};

/// Sentinel level for null when nulls are kept in the level set.
pub const NULL_LEVEL: &str = "NULL";

/// Level statistics for one categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumnStats {
    /// Distinct level count after null handling.
    pub level_count: usize,
    /// Levels ordered by frequency descending, ties lexicographic.
    pub levels: Vec<String>,
    /// The first level of that ordering; `None` when the level set is
    /// empty (all-null column with nulls excluded).
    pub most_common_level: Option<String>,
    /// Number of rare levels (frequency at or below the threshold).
    pub rare_level_count: usize,
    /// True if any level is rare.
    pub flagged: bool,
    /// The rare levels, in the same ordering as `levels`.
    pub rare_levels: Vec<String>,
}

/// Per-row rare-level statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRareStats {
    /// Number of categorical columns whose value in this row is a rare
    /// level in its column.
    pub rare_count: usize,
    /// True if `rare_count > 0`.
    pub flagged: bool,
}

/// Computes level statistics for every categorical-class column (keyed
/// by column name) plus the per-row rare-level view.
pub(crate) fn categorical_stats(
    columns: &[ColumnData],
    types: &[ColumnType],
    config: &ProfileConfig,
    row_count: usize,
) -> (HashMap<String, CategoricalColumnStats>, Vec<RowRareStats>) {
    let mut by_column = HashMap::new();
    let mut row_counts = vec![0_usize; row_count];

    for column in categorical_columns(columns, types) {
        let frequencies = level_frequencies(column, config.exclude_null_level);
        let ordered = ordered_levels(&frequencies);

        let rare_levels: Vec<String> = ordered
            .iter()
            .filter(|level| frequencies[*level] <= config.rare_level_threshold)
            .cloned()
            .collect();
        let rare_set: HashSet<&String> = rare_levels.iter().collect();

        if !rare_set.is_empty() {
            for (row, cell) in column.cells.iter().enumerate() {
                if let Some(level) = cell_level(cell, config.exclude_null_level) {
                    if rare_set.contains(&level) {
                        row_counts[row] += 1;
                    }
                }
            }
        }

        by_column.insert(
            column.name.clone(),
            CategoricalColumnStats {
                level_count: ordered.len(),
                most_common_level: ordered.first().cloned(),
                rare_level_count: rare_levels.len(),
                flagged: !rare_levels.is_empty(),
                rare_levels,
                levels: ordered,
            },
        );
    }

    let rows = row_counts
        .into_iter()
        .map(|rare_count| RowRareStats {
            rare_count,
            flagged: rare_count > 0,
        })
        .collect();

    (by_column, rows)
}

fn categorical_columns<'a>(
    columns: &'a [ColumnData],
    types: &'a [ColumnType],
) -> impl Iterator<Item = &'a ColumnData> {
    columns
        .iter()
        .zip(types)
        .filter(|(_, t)| t.class == ColumnClass::Categorical)
        .map(|(column, _)| column)
}

/// The level a cell contributes, or `None` when it contributes nothing
/// (null with nulls excluded).
fn cell_level(cell: &Cell, exclude_null: bool) -> Option<String> {
    if cell.is_null() {
        if exclude_null {
            None
        } else {
            Some(NULL_LEVEL.to_string())
        }
    } else {
        cell.text()
    }
}

fn level_frequencies(column: &ColumnData, exclude_null: bool) -> HashMap<String, usize> {
    let mut frequencies: HashMap<String, usize> = HashMap::new();
    for cell in &column.cells {
        if let Some(level) = cell_level(cell, exclude_null) {
            *frequencies.entry(level).or_insert(0) += 1;
        }
    }
    frequencies
}

/// Frequency-descending, then lexicographic-ascending level order.
fn ordered_levels(frequencies: &HashMap<String, usize>) -> Vec<String> {
    let mut levels: Vec<&String> = frequencies.keys().collect();
    levels.sort_by(|a, b| {
        frequencies[*b]
            .cmp(&frequencies[*a])
            .then_with(|| a.cmp(b))
    });
    levels.into_iter().cloned().collect()
}
