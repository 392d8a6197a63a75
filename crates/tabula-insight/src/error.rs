//! Custom error types for dataset profiling and model analysis.
//!
//! The analysis core itself never fails: insufficient data and numerical
//! degeneracy are reported through the returned values. Errors only come
//! from the edges (reading files, converting frames, validating user
//! selections and configuration, calling the explanation service).
//!
//! Errors are serializable so they can be handed to a frontend for display.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the insight library.
#[derive(Error, Debug)]
pub enum InsightError {
    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Target/feature selection is not usable.
    #[error("Invalid variable selection: {0}")]
    InvalidSelection(String),

    /// The uploaded content produced no rows.
    #[error("Dataset '{0}' could not be parsed or contains no data rows")]
    EmptyDataset(String),

    /// File extension is not one we know how to read.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Explanation service error.
    #[error("AI client error: {0}")]
    AiClientError(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error (only with the "ai" feature).
    #[cfg(feature = "ai")]
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<InsightError>,
    },
}

impl InsightError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        InsightError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::InvalidSelection(_) => "INVALID_SELECTION",
            Self::EmptyDataset(_) => "EMPTY_DATASET",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::AiClientError(_) => "AI_CLIENT_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            #[cfg(feature = "ai")]
            Self::HttpRequest(_) => "HTTP_REQUEST_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether the user can fix this by choosing another file or selection.
    ///
    /// An empty dataset is fatal to the upload step only; the frontend is
    /// expected to ask for a different file.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::EmptyDataset(_)
            | Self::UnsupportedFormat(_)
            | Self::InvalidSelection(_)
            | Self::ColumnNotFound(_)
            | Self::InvalidConfig(_) => true,
            Self::WithContext { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for InsightError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("InsightError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for insight operations.
pub type Result<T> = std::result::Result<T, InsightError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| InsightError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| InsightError::Io(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            InsightError::EmptyDataset("a.csv".to_string()).error_code(),
            "EMPTY_DATASET"
        );
        assert_eq!(
            InsightError::ColumnNotFound("test".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
    }

    #[test]
    fn test_is_recoverable() {
        assert!(InsightError::EmptyDataset("a.csv".to_string()).is_recoverable());
        assert!(InsightError::InvalidSelection("no features".to_string()).is_recoverable());
        assert!(!InsightError::AiClientError("timeout".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_serialization() {
        let error = InsightError::ColumnNotFound("Age".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("Age"));
    }

    #[test]
    fn test_with_context() {
        let error =
            InsightError::ColumnNotFound("test".to_string()).with_context("During selection");
        assert!(error.to_string().contains("During selection"));
        assert_eq!(error.error_code(), "COLUMN_NOT_FOUND");
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_io_context() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let error = io.context("Reading data.csv").unwrap_err();
        assert_eq!(error.error_code(), "IO_ERROR");
        assert!(error.to_string().starts_with("Reading data.csv"));
    }
}
