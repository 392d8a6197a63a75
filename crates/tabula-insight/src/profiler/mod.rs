//! Data profiling module for dataset analysis.
//!
//! This module provides functionality for profiling datasets, including:
//! - Type inference for columns (numeric vs categorical)
//! - Missing and distinct value counts
//! - Mean/min/max for numeric columns

mod statistics;
mod type_inference;

use crate::config::AnalysisConfig;
use crate::types::{CellValue, ColumnStats, DatasetMeta, Row};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

pub(crate) use statistics::{NumericSummary, mean, min_max, population_variance};
pub(crate) use type_inference::infer_column_type;

/// Data profiler for analyzing dataset structure and characteristics.
#[derive(Debug, Clone)]
pub struct DataProfiler {
    numeric_type_threshold: f64,
    sample_size: usize,
}

impl Default for DataProfiler {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl DataProfiler {
    /// Create a profiler using the thresholds of `config`.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            numeric_type_threshold: config.numeric_type_threshold,
            sample_size: config.sample_size,
        }
    }

    /// Profile an entire dataset.
    ///
    /// Columns are taken from the key order of the first row. An empty row
    /// sequence yields an empty profile.
    pub fn analyze_dataset(&self, rows: &[Row], file_name: &str) -> DatasetMeta {
        let Some(first) = rows.first() else {
            debug!("No rows to profile for '{}'", file_name);
            return DatasetMeta::empty(file_name);
        };

        let columns: Vec<String> = first.columns().map(str::to_string).collect();
        let stats: HashMap<String, ColumnStats> = columns
            .iter()
            .map(|col| (col.clone(), self.profile_column(rows, col)))
            .collect();

        info!(
            "Profiled '{}': {} rows, {} columns",
            file_name,
            rows.len(),
            columns.len()
        );

        DatasetMeta {
            file_name: file_name.to_string(),
            row_count: rows.len(),
            columns,
            stats,
        }
    }

    fn profile_column(&self, rows: &[Row], col_name: &str) -> ColumnStats {
        let values: Vec<&CellValue> = rows.iter().map(|row| row.value(col_name)).collect();
        let defined: Vec<&CellValue> = values.iter().copied().filter(|v| v.is_defined()).collect();

        let column_type = infer_column_type(&defined, self.numeric_type_threshold);

        let unique_count = defined
            .iter()
            .map(|v| v.to_string())
            .collect::<HashSet<_>>()
            .len();

        let samples = values
            .iter()
            .take(self.sample_size)
            .map(|v| (*v).clone())
            .collect();

        let summary = if column_type.is_numeric() {
            let numbers: Vec<f64> = defined.iter().filter_map(|v| v.as_number()).collect();
            NumericSummary::from_values(&numbers)
        } else {
            None
        };

        debug!(
            "Column '{}': {} ({} missing, {} unique)",
            col_name,
            column_type,
            values.len() - defined.len(),
            unique_count
        );

        ColumnStats {
            name: col_name.to_string(),
            column_type,
            missing_count: values.len() - defined.len(),
            unique_count,
            samples,
            mean: summary.map(|s| s.mean),
            min: summary.map(|s| s.min),
            max: summary.map(|s| s.max),
        }
    }
}

/// Profile rows with the default thresholds.
pub fn analyze_dataset(rows: &[Row], file_name: &str) -> DatasetMeta {
    DataProfiler::default().analyze_dataset(rows, file_name)
}
