//! Target and feature selection.
//!
//! [`VariableSelection`] is the validated pair handed to the analyzer.
//! The free helpers edit a feature list the way an interactive selector
//! does, without ever letting the target slip into the features.

use crate::error::{InsightError, Result};
use crate::types::DatasetMeta;
use serde::Serialize;
use std::collections::HashSet;

/// A validated target plus one or more distinct feature columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableSelection {
    target: String,
    features: Vec<String>,
}

impl VariableSelection {
    /// Validate a selection against a dataset profile.
    ///
    /// The target and every feature must be columns of `meta`, there must
    /// be at least one feature, features must be distinct and the target
    /// cannot be one of them.
    pub fn new(meta: &DatasetMeta, target: impl Into<String>, features: Vec<String>) -> Result<Self> {
        let target = target.into();

        if !meta.has_column(&target) {
            return Err(InsightError::ColumnNotFound(target));
        }
        if features.is_empty() {
            return Err(InsightError::InvalidSelection(
                "at least one feature is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for feature in &features {
            if !meta.has_column(feature) {
                return Err(InsightError::ColumnNotFound(feature.clone()));
            }
            if feature == &target {
                return Err(InsightError::InvalidSelection(format!(
                    "'{}' is the target and cannot also be a feature",
                    feature
                )));
            }
            if !seen.insert(feature.as_str()) {
                return Err(InsightError::InvalidSelection(format!(
                    "feature '{}' is selected twice",
                    feature
                )));
            }
        }

        Ok(Self { target, features })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }
}

/// Columns that may serve as features for `target`.
pub fn candidate_features(meta: &DatasetMeta, target: &str) -> Vec<String> {
    meta.columns
        .iter()
        .filter(|c| c.as_str() != target)
        .cloned()
        .collect()
}

/// Drop `column` from a feature list, e.g. after it became the target.
pub fn without(features: &[String], column: &str) -> Vec<String> {
    features.iter().filter(|f| f.as_str() != column).cloned().collect()
}

/// Add `feature` if absent, remove it if present.
///
/// Toggling the current target is ignored.
pub fn toggle_feature(features: &[String], feature: &str, target: Option<&str>) -> Vec<String> {
    if target == Some(feature) {
        return features.to_vec();
    }
    if features.iter().any(|f| f == feature) {
        without(features, feature)
    } else {
        let mut next = features.to_vec();
        next.push(feature.to_string());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv;
    use crate::profiler::analyze_dataset;

    fn meta() -> DatasetMeta {
        analyze_dataset(&parse_csv("a,b,c\n1,2,x\n3,4,y"), "sel.csv")
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_selection() {
        let selection = VariableSelection::new(&meta(), "c", names(&["a", "b"])).unwrap();
        assert_eq!(selection.target(), "c");
        assert_eq!(selection.features(), names(&["a", "b"]).as_slice());
    }

    #[test]
    fn test_unknown_target() {
        let err = VariableSelection::new(&meta(), "zzz", names(&["a"])).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_requires_a_feature() {
        let err = VariableSelection::new(&meta(), "c", vec![]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SELECTION");
    }

    #[test]
    fn test_target_cannot_be_feature() {
        let err = VariableSelection::new(&meta(), "c", names(&["a", "c"])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SELECTION");
    }

    #[test]
    fn test_duplicate_feature_rejected() {
        let err = VariableSelection::new(&meta(), "c", names(&["a", "a"])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SELECTION");
    }

    #[test]
    fn test_unknown_feature() {
        let err = VariableSelection::new(&meta(), "c", names(&["q"])).unwrap_err();
        assert!(matches!(err, InsightError::ColumnNotFound(ref c) if c == "q"));
    }

    #[test]
    fn test_candidate_features_exclude_target() {
        assert_eq!(candidate_features(&meta(), "b"), names(&["a", "c"]));
    }

    #[test]
    fn test_toggle_feature() {
        let features = names(&["a"]);
        let added = toggle_feature(&features, "b", Some("c"));
        assert_eq!(added, names(&["a", "b"]));
        let removed = toggle_feature(&added, "a", Some("c"));
        assert_eq!(removed, names(&["b"]));
        let ignored = toggle_feature(&removed, "c", Some("c"));
        assert_eq!(ignored, names(&["b"]));
    }

    #[test]
    fn test_without_removes_new_target() {
        assert_eq!(without(&names(&["a", "b"]), "a"), names(&["b"]));
    }
}
