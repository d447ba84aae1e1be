//! Profiling configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for a profiling run.
///
/// One immutable struct threaded into every engine; there are no ambient
/// defaults. Construct via [`Default`] or through the builder methods on
/// [`Profiler`](crate::Profiler).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Absolute distinct-count threshold for numeric/string columns to be
    /// classified categorical (default: 10).
    pub unique_n_threshold: usize,
    /// Proportion-of-N distinct-count threshold in (0, 1] (default: 0.1).
    /// The effective threshold is the smaller of the two.
    pub unique_prop_threshold: f64,
    /// Compute duplicate column/row indicators (default: true).
    pub duplicate_stats: bool,
    /// Compute numeric descriptive statistics (default: true).
    pub numeric_stats: bool,
    /// Compute IQR outlier statistics (default: true).
    pub outlier_stats: bool,
    /// Compute categorical level statistics (default: true).
    pub categorical_stats: bool,
    /// IQR multiplier for outlier bounds, must be positive (default: 1.5).
    pub iqr_multiplier: f64,
    /// A level with frequency at or below this count is rare (default: 5).
    pub rare_level_threshold: usize,
    /// Drop null from the level set instead of materializing it as the
    /// sentinel level `"NULL"` (default: false).
    pub exclude_null_level: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            unique_n_threshold: 10,
            unique_prop_threshold: 0.1,
            duplicate_stats: true,
            numeric_stats: true,
            outlier_stats: true,
            categorical_stats: true,
            iqr_multiplier: 1.5,
            rare_level_threshold: 5,
            exclude_null_level: false,
        }
    }
}

impl ProfileConfig {
    /// Validates the configuration before any computation starts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `unique_n_threshold` is zero,
    /// `unique_prop_threshold` is outside (0, 1], or `iqr_multiplier` is
    /// not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if self.unique_n_threshold == 0 {
            return Err(Error::invalid_config("unique_n_threshold must be at least 1"));
        }
        if !(self.unique_prop_threshold > 0.0 && self.unique_prop_threshold <= 1.0) {
            return Err(Error::invalid_config(format!(
                "unique_prop_threshold must be in (0, 1], got {}",
                self.unique_prop_threshold
            )));
        }
        if !(self.iqr_multiplier.is_finite() && self.iqr_multiplier > 0.0) {
            return Err(Error::invalid_config(format!(
                "iqr_multiplier must be positive, got {}",
                self.iqr_multiplier
            )));
        }
        Ok(())
    }
}
