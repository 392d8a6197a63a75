use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Cell values and rows
// ============================================================================

/// A single scalar field of a row.
///
/// Serialized untagged: numbers as JSON numbers, text as strings and
/// missing values as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

static MISSING: CellValue = CellValue::Missing;

impl CellValue {
    /// A value is defined when it is present and not an empty string.
    pub fn is_defined(&self) -> bool {
        match self {
            CellValue::Missing => false,
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Number(_) => true,
        }
    }

    /// Whether the value was parsed as a number.
    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }

    /// The numeric payload, only for values that are already numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Coerce to a finite number, accepting numeric text.
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) if v.is_finite() => Some(*v),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Missing => f.write_str("null"),
        }
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Missing)
    }
}

/// One record of the dataset: column name to value, in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: Vec<(String, CellValue)>,
}

impl Row {
    /// Value of a column, or `None` if the row has no such column.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Value of a column, treating an unknown column as missing.
    pub fn value(&self, column: &str) -> &CellValue {
        self.get(column).unwrap_or(&MISSING)
    }

    /// Column names in their original order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ============================================================================
// Dataset profile types
// ============================================================================

/// Semantic type inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Categorical,
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Numeric)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive statistics for one column.
///
/// `missing_count` plus the number of defined values always equals the
/// dataset row count. `mean`, `min` and `max` are only present for numeric
/// columns that contain at least one number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    pub column_type: ColumnType,
    pub missing_count: usize,
    /// Distinct defined values, compared by their string form.
    pub unique_count: usize,
    /// The first few raw values of the column, missing ones included.
    pub samples: Vec<CellValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Profile of a whole dataset, produced once per upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMeta {
    pub file_name: String,
    pub row_count: usize,
    /// Column names in the key order of the first row.
    pub columns: Vec<String>,
    pub stats: HashMap<String, ColumnStats>,
}

impl DatasetMeta {
    /// Profile of a dataset with no rows.
    pub fn empty(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            row_count: 0,
            columns: Vec::new(),
            stats: HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column_stats(&self, column: &str) -> Option<&ColumnStats> {
        self.stats.get(column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.stats.contains_key(column)
    }

    /// Share of missing values in a column, as a percentage (0 - 100).
    pub fn missing_percentage(&self, column: &str) -> Option<f64> {
        let stats = self.stats.get(column)?;
        if self.row_count == 0 {
            return Some(0.0);
        }
        Some(stats.missing_count as f64 / self.row_count as f64 * 100.0)
    }
}

/// One histogram bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinData {
    /// `"lo - hi"` range, or the single value of a constant column.
    pub bin: String,
    pub count: usize,
}

// ============================================================================
// Model analysis types
// ============================================================================

/// Whether the target is predicted as a class or as a continuous value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemType {
    Classification,
    Regression,
}

impl ProblemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemType::Classification => "classification",
            ProblemType::Regression => "regression",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model name reported when there is not enough clean data.
pub const INSUFFICIENT_DATA_MODEL: &str = "Insufficient data";

/// Model name reported by the Naive Bayes classifier.
pub const NAIVE_BAYES_MODEL: &str = "Gaussian Naive Bayes";

/// Model name reported by the KNN regressor.
pub const KNN_REGRESSION_MODEL: &str = "KNN Regression (R²)";

/// Performance summary of one analysis run.
///
/// Created fresh for every (target, features) change and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Primary score: accuracy for classification, R² (clamped to
    /// `[0, 1]`) for regression.
    pub accuracy: f64,
    /// Heuristic AUC estimate, `min(0.99, accuracy + 0.05)`.
    ///
    /// This is NOT computed from an ROC curve; consumers must present it
    /// as an estimate. Always 0 for regression.
    pub auc: f64,
    pub model_name: String,
    pub problem_type: ProblemType,
}

impl PredictionResult {
    /// The sentinel returned when too few clean rows are available.
    pub fn insufficient_data() -> Self {
        Self {
            accuracy: 0.0,
            auc: 0.0,
            model_name: INSUFFICIENT_DATA_MODEL.to_string(),
            problem_type: ProblemType::Classification,
        }
    }

    pub fn is_insufficient_data(&self) -> bool {
        self.model_name == INSUFFICIENT_DATA_MODEL
    }

    /// Always true: the `auc` field is a proxy derived from accuracy.
    pub fn auc_is_estimate(&self) -> bool {
        true
    }

    /// Name of the primary score for display.
    pub fn score_label(&self) -> &'static str {
        match self.problem_type {
            ProblemType::Classification => "accuracy",
            ProblemType::Regression => "r2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_is_defined() {
        assert!(CellValue::Number(0.0).is_defined());
        assert!(CellValue::Text("x".to_string()).is_defined());
        assert!(!CellValue::Text(String::new()).is_defined());
        assert!(!CellValue::Missing.is_defined());
    }

    #[test]
    fn test_cell_value_coerce_number() {
        assert_eq!(CellValue::Number(2.5).coerce_number(), Some(2.5));
        assert_eq!(CellValue::Text(" 12 ".to_string()).coerce_number(), Some(12.0));
        assert_eq!(CellValue::Text("abc".to_string()).coerce_number(), None);
        assert_eq!(CellValue::Text("inf".to_string()).coerce_number(), None);
        assert_eq!(CellValue::Missing.coerce_number(), None);
    }

    #[test]
    fn test_cell_value_display_matches_string_form() {
        assert_eq!(CellValue::Number(1.0).to_string(), "1");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Text("a".to_string()).to_string(), "a");
    }

    #[test]
    fn test_cell_value_serialization() {
        let values = vec![
            CellValue::Number(1.5),
            CellValue::Text("x".to_string()),
            CellValue::Missing,
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[1.5,"x",null]"#);
    }

    #[test]
    fn test_row_lookup_and_order() {
        let row: Row = vec![("b", CellValue::Number(1.0)), ("a", CellValue::from("x"))]
            .into_iter()
            .collect();

        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(row.get("b"), Some(&CellValue::Number(1.0)));
        assert_eq!(row.get("zzz"), None);
        assert_eq!(row.value("zzz"), &CellValue::Missing);
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_row_serializes_as_map() {
        let row: Row = vec![("a", CellValue::Number(1.0)), ("b", CellValue::Missing)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"a":1.0,"b":null}"#);
    }

    #[test]
    fn test_missing_percentage() {
        let mut meta = DatasetMeta::empty("a.csv");
        meta.row_count = 4;
        meta.columns.push("x".to_string());
        meta.stats.insert(
            "x".to_string(),
            ColumnStats {
                name: "x".to_string(),
                column_type: ColumnType::Numeric,
                missing_count: 1,
                unique_count: 3,
                samples: vec![],
                mean: None,
                min: None,
                max: None,
            },
        );

        assert_eq!(meta.missing_percentage("x"), Some(25.0));
        assert_eq!(meta.missing_percentage("y"), None);
    }

    #[test]
    fn test_insufficient_data_sentinel() {
        let result = PredictionResult::insufficient_data();
        assert_eq!(result.accuracy, 0.0);
        assert_eq!(result.auc, 0.0);
        assert_eq!(result.problem_type, ProblemType::Classification);
        assert!(result.is_insufficient_data());
    }

    #[test]
    fn test_problem_type_serialization() {
        let json = serde_json::to_string(&ProblemType::Regression).unwrap();
        assert_eq!(json, r#""regression""#);
        let json = serde_json::to_string(&ColumnType::Categorical).unwrap();
        assert_eq!(json, r#""categorical""#);
    }
}
