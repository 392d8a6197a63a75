//! Target-versus-feature point sampling for scatter/strip charts.

use crate::types::{CellValue, ColumnType, Row};
use serde::{Deserialize, Serialize};

/// Maximum number of points handed to a chart.
pub const MAX_RELATIONSHIP_POINTS: usize = 300;

/// One chart point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipPoint {
    pub x: CellValue,
    pub y: CellValue,
}

/// Pair target and feature values for the first `limit` rows.
///
/// A categorical target is placed on the x axis (one strip per class);
/// for a numeric target the feature goes on x and the target on y.
pub fn relationship_points(
    rows: &[Row],
    target: &str,
    feature: &str,
    target_type: ColumnType,
    limit: usize,
) -> Vec<RelationshipPoint> {
    rows.iter()
        .take(limit)
        .map(|row| {
            let target_value = row.value(target).clone();
            let feature_value = row.value(feature).clone();
            match target_type {
                ColumnType::Categorical => RelationshipPoint {
                    x: target_value,
                    y: feature_value,
                },
                ColumnType::Numeric => RelationshipPoint {
                    x: feature_value,
                    y: target_value,
                },
            }
        })
        .collect()
}
