//! Configuration for dataset profiling and model analysis.
//!
//! Every heuristic threshold used by the profiler and the analyzer lives
//! here as a named constant with a matching [`AnalysisConfig`] field, so
//! the thresholds can be tested and tuned without touching the algorithms.

use serde::{Deserialize, Serialize};

/// A column is numeric when at least this fraction of its defined values
/// are numbers.
pub const NUMERIC_TYPE_THRESHOLD: f64 = 0.9;

/// A numeric target with more distinct values than this is treated as
/// a regression target.
pub const REGRESSION_UNIQUE_THRESHOLD: usize = 10;

/// Fewer clean rows than this yields the insufficient-data result.
pub const MIN_CLEAN_ROWS: usize = 10;

/// Fraction of the shuffled clean rows used for training.
pub const TRAIN_FRACTION: f64 = 0.7;

/// Neighbors averaged by the KNN regressor.
pub const KNN_NEIGHBORS: usize = 5;

/// Default number of histogram buckets.
pub const HISTOGRAM_BINS: usize = 10;

/// Upper bound on histogram buckets a caller may request.
pub const MAX_HISTOGRAM_BINS: usize = 1000;

/// Raw sample values kept per column profile.
pub const SAMPLE_SIZE: usize = 5;

/// How feature bounds are computed for distance-based models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NormalizationMode {
    /// Train and test sets are each scaled with their own min/max.
    #[default]
    PerSplit,
    /// Both sets are scaled with the bounds fitted on the training set.
    FitOnTrain,
}

/// Configuration for the analysis engine.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use tabula_insight::config::{AnalysisConfig, NormalizationMode};
///
/// let config = AnalysisConfig::builder()
///     .knn_neighbors(7)
///     .normalization(NormalizationMode::FitOnTrain)
///     .seed(42)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Numeric-fraction threshold for column type inference (0.0 - 1.0).
    /// Default: 0.9
    pub numeric_type_threshold: f64,

    /// Distinct-value count above which a numeric target means regression.
    /// Default: 10
    pub regression_unique_threshold: usize,

    /// Minimum number of clean rows needed to train anything.
    /// Default: 10
    pub min_clean_rows: usize,

    /// Fraction of rows used for training (exclusive 0.0 - 1.0).
    /// Default: 0.7
    pub train_fraction: f64,

    /// Number of neighbors for KNN regression.
    /// Default: 5
    pub knn_neighbors: usize,

    /// Number of histogram buckets.
    /// Default: 10
    pub histogram_bins: usize,

    /// Number of raw sample values kept per column.
    /// Default: 5
    pub sample_size: usize,

    /// Feature scaling strategy for KNN.
    /// Default: PerSplit
    pub normalization: NormalizationMode,

    /// Seed for the train/test shuffle. `None` draws fresh entropy on
    /// every run.
    /// Default: None
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            numeric_type_threshold: NUMERIC_TYPE_THRESHOLD,
            regression_unique_threshold: REGRESSION_UNIQUE_THRESHOLD,
            min_clean_rows: MIN_CLEAN_ROWS,
            train_fraction: TRAIN_FRACTION,
            knn_neighbors: KNN_NEIGHBORS,
            histogram_bins: HISTOGRAM_BINS,
            sample_size: SAMPLE_SIZE,
            normalization: NormalizationMode::default(),
            seed: None,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.numeric_type_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "numeric_type_threshold".to_string(),
                value: self.numeric_type_threshold,
            });
        }

        if !(self.train_fraction > 0.0 && self.train_fraction < 1.0) {
            return Err(ConfigValidationError::InvalidTrainFraction(
                self.train_fraction,
            ));
        }

        if self.knn_neighbors == 0 {
            return Err(ConfigValidationError::InvalidKnnNeighbors(
                self.knn_neighbors,
            ));
        }

        if self.histogram_bins == 0 || self.histogram_bins > MAX_HISTOGRAM_BINS {
            return Err(ConfigValidationError::InvalidHistogramBins(
                self.histogram_bins,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid train fraction: {0} (must be strictly between 0.0 and 1.0)")]
    InvalidTrainFraction(f64),

    #[error("Invalid KNN neighbors: {0} (must be at least 1)")]
    InvalidKnnNeighbors(usize),

    #[error("Invalid histogram bins: {0} (must be between 1 and 1000)")]
    InvalidHistogramBins(usize),
}

impl From<ConfigValidationError> for crate::error::InsightError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::InsightError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    numeric_type_threshold: Option<f64>,
    regression_unique_threshold: Option<usize>,
    min_clean_rows: Option<usize>,
    train_fraction: Option<f64>,
    knn_neighbors: Option<usize>,
    histogram_bins: Option<usize>,
    sample_size: Option<usize>,
    normalization: Option<NormalizationMode>,
    seed: Option<u64>,
}

impl AnalysisConfigBuilder {
    /// Set the numeric-fraction threshold used by type inference.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.9 = 90%)
    pub fn numeric_type_threshold(mut self, threshold: f64) -> Self {
        self.numeric_type_threshold = Some(threshold);
        self
    }

    /// Set the distinct-value count above which numeric targets are regressed.
    pub fn regression_unique_threshold(mut self, threshold: usize) -> Self {
        self.regression_unique_threshold = Some(threshold);
        self
    }

    /// Set the minimum number of clean rows.
    pub fn min_clean_rows(mut self, rows: usize) -> Self {
        self.min_clean_rows = Some(rows);
        self
    }

    /// Set the training fraction of the split.
    pub fn train_fraction(mut self, fraction: f64) -> Self {
        self.train_fraction = Some(fraction);
        self
    }

    /// Set the number of neighbors for KNN regression.
    pub fn knn_neighbors(mut self, k: usize) -> Self {
        self.knn_neighbors = Some(k);
        self
    }

    /// Set the number of histogram buckets.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set how many raw sample values each column profile keeps.
    pub fn sample_size(mut self, size: usize) -> Self {
        self.sample_size = Some(size);
        self
    }

    /// Set the feature scaling strategy.
    pub fn normalization(mut self, mode: NormalizationMode) -> Self {
        self.normalization = Some(mode);
        self
    }

    /// Pin the train/test shuffle to a seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let config = AnalysisConfig {
            numeric_type_threshold: self
                .numeric_type_threshold
                .unwrap_or(NUMERIC_TYPE_THRESHOLD),
            regression_unique_threshold: self
                .regression_unique_threshold
                .unwrap_or(REGRESSION_UNIQUE_THRESHOLD),
            min_clean_rows: self.min_clean_rows.unwrap_or(MIN_CLEAN_ROWS),
            train_fraction: self.train_fraction.unwrap_or(TRAIN_FRACTION),
            knn_neighbors: self.knn_neighbors.unwrap_or(KNN_NEIGHBORS),
            histogram_bins: self.histogram_bins.unwrap_or(HISTOGRAM_BINS),
            sample_size: self.sample_size.unwrap_or(SAMPLE_SIZE),
            normalization: self.normalization.unwrap_or_default(),
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}
