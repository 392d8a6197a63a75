//! Normalization of polars frames into rows.

use crate::error::{Result, ResultExt};
use crate::types::{CellValue, Row};
use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use tracing::debug;

/// Convert a frame produced by a spreadsheet/columnar reader into rows.
///
/// Nulls become missing values, numeric dtypes become numbers and every
/// other value keeps its display form as text.
pub fn rows_from_dataframe(df: &DataFrame) -> Result<Vec<Row>> {
    let columns = df.get_columns();
    let height = df.height();
    let mut rows = Vec::with_capacity(height);

    for row_idx in 0..height {
        let mut fields = Vec::with_capacity(columns.len());
        for column in columns {
            let value = column
                .get(row_idx)
                .context(format!("Reading row {} of column '{}'", row_idx, column.name()))?;
            fields.push((column.name().to_string(), cell_from_any_value(value, column.dtype())));
        }
        rows.push(fields.into_iter().collect::<Row>());
    }

    debug!(
        "Normalized frame of shape {:?} into {} rows",
        df.shape(),
        rows.len()
    );
    Ok(rows)
}

fn cell_from_any_value(value: AnyValue<'_>, dtype: &DataType) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::String(s) => CellValue::Text(s.to_string()),
        AnyValue::StringOwned(s) => CellValue::Text(s.to_string()),
        AnyValue::Boolean(b) => CellValue::Text(b.to_string()),
        other if is_numeric_dtype(dtype) => other
            .try_extract::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(CellValue::Number)
            .unwrap_or(CellValue::Missing),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_from_dataframe_mixed_types() {
        let df = df![
            "age" => [Some(30i64), None, Some(45)],
            "city" => [Some("Oslo"), Some("Rome"), None],
            "score" => [1.5f64, 2.5, 3.5],
        ]
        .unwrap();

        let rows = rows_from_dataframe(&df).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get("age"), Some(&CellValue::Number(30.0)));
        assert_eq!(rows[1].get("age"), Some(&CellValue::Missing));
        assert_eq!(rows[0].get("city"), Some(&CellValue::Text("Oslo".to_string())));
        assert_eq!(rows[2].get("city"), Some(&CellValue::Missing));
        assert_eq!(rows[2].get("score"), Some(&CellValue::Number(3.5)));
        assert_eq!(
            rows[0].columns().collect::<Vec<_>>(),
            vec!["age", "city", "score"]
        );
    }

    #[test]
    fn test_rows_from_dataframe_booleans_become_text() {
        let df = df!["flag" => [true, false]].unwrap();
        let rows = rows_from_dataframe(&df).unwrap();
        assert_eq!(rows[0].get("flag"), Some(&CellValue::Text("true".to_string())));
        assert_eq!(rows[1].get("flag"), Some(&CellValue::Text("false".to_string())));
    }

    #[test]
    fn test_rows_from_empty_dataframe() {
        let df = DataFrame::empty();
        assert!(rows_from_dataframe(&df).unwrap().is_empty());
    }
}
