//! Shared utilities for parsing and profiling.

use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

// Plain decimal literal with optional sign, fraction and exponent.
static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("Invalid regex: numeric literal")
});

/// Parse a field that is entirely a decimal number.
///
/// Words such as `inf` or `NaN`, which `f64::from_str` would accept, stay
/// text. Leading/trailing whitespace is ignored.
///
/// # Example
///
/// ```rust,ignore
/// use tabula_insight::utils::parse_number_literal;
///
/// assert_eq!(parse_number_literal("3.5"), Some(3.5));
/// assert_eq!(parse_number_literal("1e3"), Some(1000.0));
/// assert_eq!(parse_number_literal("12abc"), None);
/// ```
pub fn parse_number_literal(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if !NUMERIC_LITERAL.is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Trim whitespace and one pair of surrounding double quotes.
pub fn unquote(field: &str) -> &str {
    let trimmed = field.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    trimmed.strip_suffix('"').unwrap_or(trimmed)
}

/// Format a float with one decimal place, as used in bucket labels.
pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_literal_accepts_plain_numbers() {
        assert_eq!(parse_number_literal("42"), Some(42.0));
        assert_eq!(parse_number_literal("-3.25"), Some(-3.25));
        assert_eq!(parse_number_literal("+.5"), Some(0.5));
        assert_eq!(parse_number_literal("7."), Some(7.0));
        assert_eq!(parse_number_literal("1.5e2"), Some(150.0));
        assert_eq!(parse_number_literal("  8 "), Some(8.0));
    }

    #[test]
    fn test_parse_number_literal_rejects_non_numbers() {
        assert_eq!(parse_number_literal(""), None);
        assert_eq!(parse_number_literal("abc"), None);
        assert_eq!(parse_number_literal("12abc"), None);
        assert_eq!(parse_number_literal("NaN"), None);
        assert_eq!(parse_number_literal("inf"), None);
        assert_eq!(parse_number_literal("1,000"), None);
        assert_eq!(parse_number_literal("."), None);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("  \"name\" "), "name");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("\"half"), "half");
        assert_eq!(unquote("\"\""), "");
    }

    #[test]
    fn test_format_one_decimal() {
        assert_eq!(format_one_decimal(1.0), "1.0");
        assert_eq!(format_one_decimal(2.26), "2.3");
        assert_eq!(format_one_decimal(-0.06), "-0.1");
    }

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(is_numeric_dtype(&DataType::Int32));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }
}
