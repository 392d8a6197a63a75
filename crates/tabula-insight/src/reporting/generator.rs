use crate::error::{Result, ResultExt};
use crate::selection::VariableSelection;
use crate::types::{BinData, DatasetMeta, PredictionResult};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

// ============================================================================
// Report Types
// ============================================================================

/// Histogram of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSection {
    pub column: String,
    pub bins: Vec<BinData>,
}

/// Model analysis of one target/feature selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSection {
    pub target: String,
    pub features: Vec<String>,
    pub result: PredictionResult,
    /// Whether `result.auc` is a heuristic estimate rather than an ROC area.
    pub auc_is_estimate: bool,
}

/// Everything one CLI run produced, for `--json` output and report files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    pub dataset: DatasetMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<HistogramSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<PredictionSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl AnalysisReport {
    /// Start a report for a profiled dataset.
    pub fn new(input_file: impl Into<String>, dataset: DatasetMeta) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.into(),
            dataset,
            histogram: None,
            prediction: None,
            explanation: None,
        }
    }

    pub fn with_histogram(mut self, column: impl Into<String>, bins: Vec<BinData>) -> Self {
        self.histogram = Some(HistogramSection {
            column: column.into(),
            bins,
        });
        self
    }

    pub fn with_prediction(mut self, selection: &VariableSelection, result: PredictionResult) -> Self {
        self.prediction = Some(PredictionSection {
            target: selection.target().to_string(),
            features: selection.features().to_vec(),
            auc_is_estimate: result.auc_is_estimate(),
            result,
        });
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as `<base_name>_report.json` inside `output_dir`.
    pub fn write_to_file(&self, output_dir: &Path, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)
            .context(format!("Creating {}", output_dir.display()))?;

        let report_path = output_dir.join(format!("{}_report.json", base_name));
        let mut file = File::create(&report_path)
            .context(format!("Creating {}", report_path.display()))?;
        file.write_all(self.to_json_pretty()?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::create_histogram;
    use crate::parser::parse_csv;
    use crate::profiler::analyze_dataset;

    fn sample() -> (Vec<crate::types::Row>, DatasetMeta) {
        let rows = parse_csv("x,label\n1,a\n2,b\n3,a");
        let meta = analyze_dataset(&rows, "r.csv");
        (rows, meta)
    }

    #[test]
    fn test_report_sections_and_json() {
        let (rows, meta) = sample();
        let selection = VariableSelection::new(&meta, "label", vec!["x".to_string()]).unwrap();
        let report = AnalysisReport::new("data/r.csv", meta)
            .with_histogram("x", create_histogram(&rows, "x", 2))
            .with_prediction(&selection, PredictionResult::insufficient_data())
            .with_explanation("n/a");

        let json: serde_json::Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["input_file"], "data/r.csv");
        assert_eq!(json["dataset"]["row_count"], 3);
        assert_eq!(json["histogram"]["bins"].as_array().unwrap().len(), 2);
        assert_eq!(json["prediction"]["target"], "label");
        assert_eq!(json["prediction"]["auc_is_estimate"], true);
        assert_eq!(json["prediction"]["result"]["problem_type"], "classification");
        assert_eq!(json["explanation"], "n/a");
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let (_, meta) = sample();
        let json = AnalysisReport::new("r.csv", meta).to_json_pretty().unwrap();
        assert!(!json.contains("\"histogram\""));
        assert!(!json.contains("\"prediction\""));
        assert!(!json.contains("\"explanation\""));
    }

    #[test]
    fn test_write_to_file() {
        let (_, meta) = sample();
        let dir = std::env::temp_dir().join(format!("tabula_report_{}", std::process::id()));
        let path = AnalysisReport::new("r.csv", meta)
            .write_to_file(&dir, "r")
            .unwrap();

        assert!(path.ends_with("r_report.json"));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"generated_at\""));
        fs::remove_dir_all(&dir).ok();
    }
}
