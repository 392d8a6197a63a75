//! Report generation module.
//!
//! [`AnalysisReport`] collects a dataset profile and whatever a run
//! computed on top of it (histogram, model analysis, explanation), for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--report-dir` CLI flag)
//! - Programmatic access in library mode
//!
//! # Example
//!
//! ```rust,ignore
//! use tabula_insight::reporting::AnalysisReport;
//!
//! let report = AnalysisReport::new("data/train.csv", meta)
//!     .with_prediction(&selection, result);
//!
//! println!("{}", report.to_json_pretty()?);
//! report.write_to_file(Path::new("output"), "train")?;
//! ```

mod generator;

pub use generator::{AnalysisReport, HistogramSection, PredictionSection};
