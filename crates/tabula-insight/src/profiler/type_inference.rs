//! Type inference logic for column analysis.

use crate::types::{CellValue, ColumnType};

/// Infer a column's type from its defined values.
///
/// A column is numeric when the share of defined values that were parsed as
/// numbers reaches `threshold`. The tolerance lets a few placeholder
/// entries ("n/a", "?") live in an otherwise numeric column. A column
/// without defined values is categorical.
pub(crate) fn infer_column_type(defined: &[&CellValue], threshold: f64) -> ColumnType {
    let numeric_count = defined.iter().filter(|v| v.is_number()).count();
    classify_numeric_share(numeric_count, defined.len(), threshold)
}

pub(crate) fn classify_numeric_share(
    numeric_count: usize,
    defined_count: usize,
    threshold: f64,
) -> ColumnType {
    if defined_count > 0 && numeric_count as f64 >= defined_count as f64 * threshold {
        ColumnType::Numeric
    } else {
        ColumnType::Categorical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NUMERIC_TYPE_THRESHOLD;

    fn cells(values: &[&str]) -> Vec<CellValue> {
        values
            .iter()
            .map(|v| match crate::utils::parse_number_literal(v) {
                Some(n) => CellValue::Number(n),
                None => CellValue::Text(v.to_string()),
            })
            .collect()
    }

    fn infer(values: &[CellValue]) -> ColumnType {
        let refs: Vec<&CellValue> = values.iter().collect();
        infer_column_type(&refs, NUMERIC_TYPE_THRESHOLD)
    }

    #[test]
    fn test_all_numbers_is_numeric() {
        assert_eq!(infer(&cells(&["1", "2", "3.5"])), ColumnType::Numeric);
    }

    #[test]
    fn test_three_quarters_numeric_is_categorical() {
        assert_eq!(infer(&cells(&["1", "2", "x", "3"])), ColumnType::Categorical);
    }

    #[test]
    fn test_ninety_percent_numeric_is_numeric() {
        let values = cells(&["1", "2", "3", "4", "5", "6", "7", "8", "9", "x"]);
        assert_eq!(infer(&values), ColumnType::Numeric);
    }

    #[test]
    fn test_eighty_percent_numeric_is_categorical() {
        let values = cells(&["1", "2", "3", "4", "5", "6", "7", "8", "x", "y"]);
        assert_eq!(infer(&values), ColumnType::Categorical);
    }

    #[test]
    fn test_no_defined_values_is_categorical() {
        assert_eq!(infer(&[]), ColumnType::Categorical);
    }

    #[test]
    fn test_text_column_is_categorical() {
        assert_eq!(infer(&cells(&["red", "blue", "red"])), ColumnType::Categorical);
    }

    #[test]
    fn test_custom_threshold() {
        assert_eq!(classify_numeric_share(3, 4, 0.7), ColumnType::Numeric);
        assert_eq!(classify_numeric_share(3, 4, 0.8), ColumnType::Categorical);
    }
}
