//! perfilar - Tabular Data Profiling for Arrow Datasets
//!
//! Profiles an in-memory Arrow dataset and reports data quality issues:
//! missingness, duplicate columns and rows, numeric distribution anomalies
//! (NaN/Inf/IQR outliers), and categorical rarity. Detection only - the
//! input dataset is never mutated.
//!
//! # Design Principles
//!
//! 1. **Detect, never repair** - the profiler reports issues; cleaning and
//!    imputation belong to the caller
//! 2. **Pure Rust** - no Python, no FFI
//! 3. **Ecosystem aligned** - Arrow 53 `RecordBatch` throughout
//! 4. **Explicit configuration** - one immutable config struct, no ambient
//!    defaults
//!
//! # Quick Start
//!
//! ```no_run
//! use perfilar::{ArrowDataset, Profiler};
//!
//! # fn run(batch: arrow::array::RecordBatch) -> perfilar::Result<()> {
//! let dataset = ArrowDataset::from_batch(batch)?;
//!
//! let report = Profiler::new()
//!     .rare_level_threshold(5)
//!     .iqr_multiplier(1.5)
//!     .profile(&dataset)?;
//!
//! println!(
//!     "{} rows, {} columns, {} missing cells",
//!     report.dataset.row_count, report.dataset.column_count, report.dataset.missing_cell_count
//! );
//! for col in &report.columns {
//!     println!("{}: {:?}", col.name, col.class);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_precision_loss,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::unreadable_literal
    )
)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::map_unwrap_or)]

pub mod dataset;
pub mod error;
pub mod profile;
pub(crate) mod values;

// Re-exports for convenience
// Re-export arrow types commonly needed
pub use arrow::{
    array::RecordBatch,
    datatypes::{Schema, SchemaRef},
};
pub use dataset::{ArrowDataset, Dataset};
pub use error::{Error, Result};
pub use profile::{
    CategoricalColumnStats, ColumnClass, ColumnSummary, ColumnType, DatasetSummary,
    NumericColumnStats, OutlierColumnStats, ProfileConfig, ProfileReport, Profiler,
    RowOutlierStats, RowRareStats, RowSummary,
};
