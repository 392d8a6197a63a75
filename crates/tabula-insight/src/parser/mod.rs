//! Row parsing for uploaded datasets.
//!
//! Delimited text is parsed here directly. Spreadsheet and columnar files
//! are read into a polars [`DataFrame`] by a format reader and normalized
//! into the same [`Row`] shape by [`rows_from_dataframe`].
//!
//! Parsing never fails on malformed content: lines whose field count does
//! not match the header are dropped, and an unusable blob yields an empty
//! row sequence which callers must treat as "unparsable".

mod frame;

pub use frame::rows_from_dataframe;

use crate::error::{InsightError, Result, ResultExt};
use crate::types::{CellValue, Row};
use crate::utils::{parse_number_literal, unquote};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// Extensions read through the columnar/spreadsheet path.
const FRAME_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "parquet"];

/// Raw content of an uploaded file.
pub enum FileContent {
    /// Delimited text (CSV, TSV, plain text exports).
    Text(String),
    /// Output of a spreadsheet or columnar reader.
    Frame(DataFrame),
}

/// Parse comma-separated text into rows.
pub fn parse_csv(content: &str) -> Vec<Row> {
    parse_delimited(content, DEFAULT_DELIMITER)
}

/// Parse delimited text into rows.
///
/// The first line is the header. Each later line with exactly as many
/// fields as the header becomes a row; fields that are clean decimal
/// literals become numbers, everything else stays text.
pub fn parse_delimited(content: &str, delimiter: char) -> Vec<Row> {
    let lines: Vec<&str> = content.trim().split('\n').collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    let headers: Vec<String> = lines[0]
        .split(delimiter)
        .map(|h| unquote(h).to_string())
        .collect();

    let mut rows = Vec::with_capacity(lines.len() - 1);
    let mut dropped = 0usize;

    for line in &lines[1..] {
        let fields: Vec<&str> = line.split(delimiter).collect();
        if fields.len() != headers.len() {
            dropped += 1;
            continue;
        }

        let row: Row = headers
            .iter()
            .zip(fields)
            .map(|(header, field)| (header.clone(), parse_field(field)))
            .collect();
        rows.push(row);
    }

    if dropped > 0 {
        debug!(
            "Dropped {} line(s) whose field count did not match the {} header columns",
            dropped,
            headers.len()
        );
    }

    rows
}

fn parse_field(field: &str) -> CellValue {
    let value = unquote(field);
    match parse_number_literal(value) {
        Some(number) => CellValue::Number(number),
        None => CellValue::Text(value.to_string()),
    }
}

/// Whether a file name is handled by the frame path.
pub fn is_frame_file(file_name: &str) -> bool {
    extension_of(file_name)
        .map(|ext| FRAME_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Turn uploaded content into rows, dispatching on the file name.
///
/// Text content is always parsed as CSV. Frame content is only accepted
/// for spreadsheet/columnar file names; a frame paired with any other
/// name yields no rows.
pub fn process_file_content(content: FileContent, file_name: &str) -> Result<Vec<Row>> {
    match content {
        FileContent::Frame(df) if is_frame_file(file_name) => rows_from_dataframe(&df),
        FileContent::Frame(_) => {
            debug!("Frame content does not match file name '{}'", file_name);
            Ok(Vec::new())
        }
        FileContent::Text(text) => Ok(parse_csv(&text)),
    }
}

/// Read a file from disk into [`FileContent`].
///
/// Parquet is read with polars. Excel workbooks need an external reader
/// and are rejected here; every other extension is read as text.
pub fn read_file(path: &Path) -> Result<FileContent> {
    let ext = extension_of(&path.to_string_lossy()).unwrap_or_default();

    match ext.as_str() {
        "parquet" => {
            let file = std::fs::File::open(path)
                .context(format!("Opening {}", path.display()))?;
            let df = ParquetReader::new(file)
                .finish()
                .context(format!("Reading parquet file {}", path.display()))?;
            info!("Loaded parquet frame with shape {:?}", df.shape());
            Ok(FileContent::Frame(df))
        }
        "xlsx" | "xls" => Err(InsightError::UnsupportedFormat(format!(
            "{} (export the sheet to CSV or parquet)",
            path.display()
        ))),
        _ => {
            let text = std::fs::read_to_string(path)
                .context(format!("Reading {}", path.display()))?;
            Ok(FileContent::Text(text))
        }
    }
}

/// Read and parse a dataset file, failing when it yields no rows.
pub fn load_rows(path: &Path) -> Result<Vec<Row>> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let rows = process_file_content(read_file(path)?, &file_name)?;
    if rows.is_empty() {
        return Err(InsightError::EmptyDataset(file_name));
    }
    info!("Parsed {} rows from {}", rows.len(), file_name);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ==================== parse_csv tests ====================

    #[test]
    fn test_parse_csv_numbers_and_text() {
        let rows = parse_csv("a,b,name\n1,2.5,x\n3,4,y");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("a"), Some(&CellValue::Number(1.0)));
        assert_eq!(rows[0].get("b"), Some(&CellValue::Number(2.5)));
        assert_eq!(rows[0].get("name"), Some(&CellValue::Text("x".to_string())));
        assert_eq!(rows[1].columns().collect::<Vec<_>>(), vec!["a", "b", "name"]);
    }

    #[test]
    fn test_parse_csv_trims_and_unquotes_headers_and_fields() {
        let rows = parse_csv("\"id\" , \"label\"\n 1 ,\"cat\"\r\n2,\"7\"");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("id"), Some(&CellValue::Number(1.0)));
        assert_eq!(rows[0].get("label"), Some(&CellValue::Text("cat".to_string())));
        assert_eq!(rows[1].get("label"), Some(&CellValue::Number(7.0)));
    }

    #[test]
    fn test_parse_csv_drops_mismatched_lines() {
        let rows = parse_csv("a,b\n1,2\n3\n4,5,6\n7,8");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("a"), Some(&CellValue::Number(7.0)));
    }

    #[test]
    fn test_parse_csv_header_only_is_empty() {
        assert!(parse_csv("a,b,c").is_empty());
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("   \n  ").is_empty());
    }

    #[test]
    fn test_parse_csv_empty_field_stays_text() {
        let rows = parse_csv("a,b\n1,\n2,3");
        assert_eq!(rows[0].get("b"), Some(&CellValue::Text(String::new())));
        assert!(!rows[0].value("b").is_defined());
    }

    #[test]
    fn test_parse_delimited_semicolon() {
        let rows = parse_delimited("x;y\n1;a\n2;b", ';');
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("y"), Some(&CellValue::Text("b".to_string())));
    }

    // ==================== process_file_content tests ====================

    #[test]
    fn test_is_frame_file() {
        assert!(is_frame_file("report.xlsx"));
        assert!(is_frame_file("REPORT.XLS"));
        assert!(is_frame_file("data.parquet"));
        assert!(!is_frame_file("data.csv"));
        assert!(!is_frame_file("noext"));
    }

    #[test]
    fn test_process_text_content() {
        let rows =
            process_file_content(FileContent::Text("a\n1\n2".to_string()), "data.txt").unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_process_frame_content_requires_frame_extension() {
        let df = df!["a" => [1.0, 2.0]].unwrap();
        let rows = process_file_content(FileContent::Frame(df.clone()), "data.csv").unwrap();
        assert!(rows.is_empty());

        let rows = process_file_content(FileContent::Frame(df), "data.xlsx").unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_read_file_rejects_excel() {
        let err = read_file(Path::new("book.xlsx")).err().unwrap();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
    }

    #[test]
    fn test_load_rows_missing_file_is_io_error() {
        let err = load_rows(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
