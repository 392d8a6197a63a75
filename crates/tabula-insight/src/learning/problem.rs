//! Classification vs regression detection.

use crate::types::{ProblemType, Row};
use std::collections::HashSet;

/// Decide how the target column should be modeled.
///
/// Regression is chosen only when every target value is a number and
/// there are more than `unique_threshold` distinct values. Anything else,
/// including an empty row set, is classification.
pub fn detect_problem_type(rows: &[Row], target: &str, unique_threshold: usize) -> ProblemType {
    let all_numeric = rows.iter().all(|row| row.value(target).is_number());
    if !all_numeric {
        return ProblemType::Classification;
    }

    let distinct = rows
        .iter()
        .map(|row| row.value(target).to_string())
        .collect::<HashSet<_>>()
        .len();

    if distinct > unique_threshold {
        ProblemType::Regression
    } else {
        ProblemType::Classification
    }
}
