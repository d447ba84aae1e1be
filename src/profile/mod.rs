//! Dataset profiling engine.
//!
//! Produces three summary tables over an [`ArrowDataset`]: a dataset-level
//! summary, a per-column summary, and a per-row summary, covering
//! missingness, duplication, type classification, numeric distribution
//! anomalies (NaN/Inf/IQR outliers), and categorical rarity.
//!
//! The dataset is scanned once into per-column cell vectors; the type
//! classifier always runs first and gates which columns the numeric and
//! categorical engines see. Every engine is a pure function of
//! (cells, column types, config) - nothing here mutates the input.
//!
//! # Example
//!
//! ```ignore
//! use perfilar::Profiler;
//!
//! let report = Profiler::new()
//!     .unique_n_threshold(10)
//!     .rare_level_threshold(5)
//!     .profile(&dataset)?;
//!
//! for col in &report.columns {
//!     if col.missing_ratio > 0.5 {
//!         println!("{} is mostly missing", col.name);
//!     }
//! }
//! ```

// Statistical computation and internal methods
#![allow(clippy::cast_precision_loss)]

mod categorical;
mod classify;
mod config;
mod duplicates;
mod missing;
mod numeric;
mod report;

#[cfg(test)]
mod tests;

pub use categorical::{CategoricalColumnStats, RowRareStats, NULL_LEVEL};
pub use classify::{ColumnClass, ColumnType};
pub use config::ProfileConfig;
pub use numeric::{NumericColumnStats, OutlierColumnStats, RowOutlierStats};
pub use report::{ColumnSummary, DatasetSummary, ProfileReport, RowSummary};

use crate::{
    dataset::{ArrowDataset, Dataset},
    error::{Error, Result},
    values::collect_columns,
};

/// Dataset profiler.
///
/// Builder-style configuration over [`ProfileConfig`]; call
/// [`profile`](Profiler::profile) to run. Each toggle independently
/// removes that engine's sections from the report entirely.
#[derive(Debug, Clone, Default)]
pub struct Profiler {
    config: ProfileConfig,
}

impl Profiler {
    /// Creates a profiler with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a profiler from an explicit configuration.
    pub fn with_config(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Set the absolute distinct-count threshold for categorical
    /// classification.
    #[must_use]
    pub fn unique_n_threshold(mut self, threshold: usize) -> Self {
        self.config.unique_n_threshold = threshold;
        self
    }

    /// Set the proportion-of-N distinct-count threshold, in (0, 1].
    #[must_use]
    pub fn unique_prop_threshold(mut self, threshold: f64) -> Self {
        self.config.unique_prop_threshold = threshold;
        self
    }

    /// Enable/disable duplicate column and row detection.
    #[must_use]
    pub fn with_duplicate_stats(mut self, enabled: bool) -> Self {
        self.config.duplicate_stats = enabled;
        self
    }

    /// Enable/disable numeric descriptive statistics.
    #[must_use]
    pub fn with_numeric_stats(mut self, enabled: bool) -> Self {
        self.config.numeric_stats = enabled;
        self
    }

    /// Enable/disable IQR outlier statistics.
    #[must_use]
    pub fn with_outlier_stats(mut self, enabled: bool) -> Self {
        self.config.outlier_stats = enabled;
        self
    }

    /// Enable/disable categorical level statistics.
    #[must_use]
    pub fn with_categorical_stats(mut self, enabled: bool) -> Self {
        self.config.categorical_stats = enabled;
        self
    }

    /// Set the IQR multiplier for outlier bounds.
    #[must_use]
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.config.iqr_multiplier = multiplier;
        self
    }

    /// Set the rare-level frequency threshold.
    #[must_use]
    pub fn rare_level_threshold(mut self, threshold: usize) -> Self {
        self.config.rare_level_threshold = threshold;
        self
    }

    /// Drop null from categorical level sets instead of materializing it
    /// as the sentinel level.
    #[must_use]
    pub fn exclude_null_level(mut self, exclude: bool) -> Self {
        self.config.exclude_null_level = exclude;
        self
    }

    /// Profiles the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for out-of-range parameters and
    /// [`Error::EmptyDataset`] when the dataset has zero rows or zero
    /// columns; both are rejected before any computation runs.
    pub fn profile(&self, dataset: &ArrowDataset) -> Result<ProfileReport> {
        self.config.validate()?;

        let row_count = dataset.len();
        let width = dataset.width();
        if row_count == 0 || width == 0 {
            return Err(Error::EmptyDataset);
        }

        let config = &self.config;
        let columns = collect_columns(dataset)?;

        // Classification always runs; it gates the numeric and
        // categorical engines.
        let types = classify::classify_columns(&columns, config, row_count);

        let column_missing = missing::column_missing(&columns, row_count);
        let row_missing = missing::row_missing(&columns, row_count);

        let column_dups = config
            .duplicate_stats
            .then(|| duplicates::duplicate_columns(&columns));
        let row_dups = config
            .duplicate_stats
            .then(|| duplicates::duplicate_rows(&columns, row_count));

        let numeric = config
            .numeric_stats
            .then(|| numeric::numeric_stats(&columns, &types));
        let outliers = config
            .outlier_stats
            .then(|| numeric::outlier_stats(&columns, &types, config, row_count));
        let categorical = config
            .categorical_stats
            .then(|| categorical::categorical_stats(&columns, &types, config, row_count));

        let (outlier_columns, outlier_rows) = match outliers {
            Some((by_column, rows)) => (Some(by_column), Some(rows)),
            None => (None, None),
        };
        let (categorical_columns, rare_rows) = match categorical {
            Some((by_column, rows)) => (Some(by_column), Some(rows)),
            None => (None, None),
        };

        let column_summaries: Vec<ColumnSummary> = types
            .iter()
            .enumerate()
            .map(|(i, column_type)| {
                let mut numeric_stats = None;
                let mut outlier_stats = None;
                let mut categorical_stats = None;

                if let Some(stats) = numeric.as_ref() {
                    numeric_stats = stats.get(&column_type.name).cloned();
                }
                if let Some(stats) = outlier_columns.as_ref() {
                    outlier_stats = stats.get(&column_type.name).cloned();
                }
                if let Some(stats) = categorical_columns.as_ref() {
                    categorical_stats = stats.get(&column_type.name).cloned();
                }

                ColumnSummary {
                    name: column_type.name.clone(),
                    data_type: column_type.data_type.to_string(),
                    class: column_type.class,
                    distinct_count: column_type.distinct_count,
                    threshold_used: column_type.threshold_used,
                    missing_count: column_missing[i].count,
                    missing_ratio: column_missing[i].ratio,
                    duplicate: column_dups.as_ref().map(|dups| dups[i]),
                    numeric: numeric_stats,
                    outliers: outlier_stats,
                    categorical: categorical_stats,
                }
            })
            .collect();

        let row_summaries: Vec<RowSummary> = (0..row_count)
            .map(|row| RowSummary {
                row_index: row,
                missing_count: row_missing[row].count,
                missing_ratio: row_missing[row].ratio,
                duplicate: row_dups.as_ref().map(|dups| dups[row]),
                outliers: outlier_rows.as_ref().map(|rows| rows[row]),
                rare_levels: rare_rows.as_ref().map(|rows| rows[row]),
            })
            .collect();

        let dataset_summary =
            assemble_dataset_summary(row_count, width, &types, &column_summaries, &row_summaries);

        Ok(ProfileReport {
            dataset: dataset_summary,
            columns: column_summaries,
            rows: row_summaries,
        })
    }
}

fn assemble_dataset_summary(
    row_count: usize,
    width: usize,
    types: &[ColumnType],
    columns: &[ColumnSummary],
    rows: &[RowSummary],
) -> DatasetSummary {
    let class_count =
        |class: ColumnClass| types.iter().filter(|t| t.class == class).count();

    let missing_cell_count: usize = columns.iter().map(|c| c.missing_count).sum();

    let duplicate_column_count = columns
        .iter()
        .map(|c| c.duplicate)
        .collect::<Option<Vec<bool>>>()
        .map(|dups| dups.iter().filter(|&&d| d).count());
    let duplicate_row_count = rows
        .iter()
        .map(|r| r.duplicate)
        .collect::<Option<Vec<bool>>>()
        .map(|dups| dups.iter().filter(|&&d| d).count());

    // Outlier and rare-level totals exist only when their engines ran.
    // Numeric-class columns all carry a section then, so summing over
    // present sections is the full total.
    let outliers_ran = columns.iter().any(|c| c.outliers.is_some())
        || rows.first().is_some_and(|r| r.outliers.is_some());
    let outlier_count = outliers_ran.then(|| {
        columns
            .iter()
            .filter_map(|c| c.outliers.as_ref())
            .map(|o| o.outlier_count)
            .sum()
    });
    let rows_with_outliers = outliers_ran.then(|| {
        rows.iter()
            .filter(|r| r.outliers.is_some_and(|o| o.flagged))
            .count()
    });

    let categorical_ran = columns.iter().any(|c| c.categorical.is_some())
        || rows.first().is_some_and(|r| r.rare_levels.is_some());
    let columns_with_rare_levels = categorical_ran.then(|| {
        columns
            .iter()
            .filter_map(|c| c.categorical.as_ref())
            .filter(|c| c.flagged)
            .count()
    });
    let rows_with_rare_levels = categorical_ran.then(|| {
        rows.iter()
            .filter(|r| r.rare_levels.is_some_and(|s| s.flagged))
            .count()
    });

    DatasetSummary {
        row_count,
        column_count: width,
        missing_cell_count,
        missing_cell_ratio: missing_cell_count as f64 / (row_count * width) as f64,
        numeric_column_count: class_count(ColumnClass::Numeric),
        categorical_column_count: class_count(ColumnClass::Categorical),
        zero_variance_column_count: class_count(ColumnClass::ZeroVariance),
        temporal_column_count: class_count(ColumnClass::Temporal),
        other_column_count: class_count(ColumnClass::Other),
        duplicate_column_count,
        duplicate_row_count,
        outlier_count,
        rows_with_outliers,
        columns_with_rare_levels,
        rows_with_rare_levels,
    }
}
