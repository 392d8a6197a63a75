//! Tabular Dataset Insight Library
//!
//! Upload a delimited text file (or a parquet frame), get a per-column
//! profile, histogram buckets for charts, and a quick estimate of how well
//! a chosen set of features predicts a chosen target.
//!
//! # Overview
//!
//! - **Parsing**: CSV text into rows of numbers/text; frames from polars readers
//! - **Profiling**: numeric vs categorical inference, missing/distinct counts,
//!   mean/min/max
//! - **Charts**: equal-width histograms and target/feature point pairs
//! - **Model analysis**: complete-case cleaning, classification with Gaussian
//!   Naive Bayes or regression with KNN, scored on a 70/30 split
//! - **Explanations**: optional text explanations through an
//!   [`ai::ExplanationProvider`], with a fixed fallback
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tabula_insight::{
//!     analyze_dataset, create_histogram, parse_csv, AnalysisConfig, ModelAnalyzer,
//!     VariableSelection,
//! };
//!
//! let rows = parse_csv(&std::fs::read_to_string("iris.csv")?);
//! let meta = analyze_dataset(&rows, "iris.csv");
//!
//! let bins = create_histogram(&rows, "petal_length", 10);
//!
//! let selection = VariableSelection::new(
//!     &meta,
//!     "species",
//!     vec!["petal_length".to_string(), "petal_width".to_string()],
//! )?;
//! let analyzer = ModelAnalyzer::new(AnalysisConfig::builder().seed(7).build()?);
//! let result = analyzer.run_selection(&rows, &selection);
//!
//! println!("{}: {} = {:.2}", result.model_name, result.score_label(), result.accuracy);
//! ```
//!
//! # Insufficient Data
//!
//! Analysis never fails. With fewer than ten complete rows (or an empty
//! split) it returns [`PredictionResult::insufficient_data`], which callers
//! should show instead of a score.
//!
//! # Feature Flags
//!
//! - `ai` (default): enables the Gemini explanation provider (`reqwest`)

pub mod ai;
pub mod charts;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod learning;
pub mod parser;
pub mod profiler;
pub mod reporting;
pub mod selection;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use charts::{MAX_RELATIONSHIP_POINTS, RelationshipPoint, create_histogram, relationship_points};
pub use cleaner::{DataCleaner, clean_rows};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError, NormalizationMode};
pub use error::{InsightError, Result as InsightResult, ResultExt};
pub use learning::{
    KnnRegressor, MinMaxNormalizer, ModelAnalyzer, NaiveBayesModel, SplitStrategy,
    detect_problem_type, run_model_analysis, train_test_split,
};
pub use parser::{FileContent, load_rows, parse_csv, process_file_content, read_file};
pub use profiler::{DataProfiler, analyze_dataset};
pub use reporting::AnalysisReport;
pub use selection::VariableSelection;
pub use types::{
    BinData, CellValue, ColumnStats, ColumnType, DatasetMeta, PredictionResult, ProblemType, Row,
};
