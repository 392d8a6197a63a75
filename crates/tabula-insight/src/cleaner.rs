//! Complete-case filtering ahead of model training.
//!
//! A row survives when its target is present and every selected feature
//! can be read as a finite number. Nothing is imputed: rows that fail the
//! check are dropped.

use crate::types::Row;
use tracing::{debug, info};

/// Row filter used before model analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataCleaner;

impl DataCleaner {
    /// Keep only rows usable for training on `target` from `features`.
    ///
    /// Surviving rows are cloned unchanged, in their original order.
    pub fn clean_rows(&self, rows: &[Row], target: &str, features: &[String]) -> Vec<Row> {
        let cleaned: Vec<Row> = rows
            .iter()
            .filter(|row| Self::is_complete(row, target, features))
            .cloned()
            .collect();

        let dropped = rows.len() - cleaned.len();
        if dropped > 0 {
            debug!(
                "Dropped {} incomplete row(s) for target '{}' and {} feature(s)",
                dropped,
                target,
                features.len()
            );
        }
        info!("Kept {} of {} rows after cleaning", cleaned.len(), rows.len());

        cleaned
    }

    fn is_complete(row: &Row, target: &str, features: &[String]) -> bool {
        row.value(target).is_defined()
            && features
                .iter()
                .all(|f| row.value(f).coerce_number().is_some())
    }
}

/// Filter rows with a default [`DataCleaner`].
pub fn clean_rows(rows: &[Row], target: &str, features: &[String]) -> Vec<Row> {
    DataCleaner.clean_rows(rows, target, features)
}
