//! End-to-end model analysis for one target/feature selection.

use super::knn::run_knn_regression;
use super::naive_bayes::run_naive_bayes;
use super::problem::detect_problem_type;
use super::split::SplitStrategy;
use crate::cleaner::DataCleaner;
use crate::config::AnalysisConfig;
use crate::selection::VariableSelection;
use crate::types::{PredictionResult, ProblemType, Row};
use tracing::{debug, info, warn};

/// Runs clean → detect → split → train → score.
///
/// The analyzer holds no per-run state; every call to [`run`](Self::run)
/// returns a fresh [`PredictionResult`].
///
/// # Example
///
/// ```rust,ignore
/// use tabula_insight::{AnalysisConfig, ModelAnalyzer};
///
/// let analyzer = ModelAnalyzer::new(AnalysisConfig::builder().seed(42).build()?);
/// let result = analyzer.run(&rows, "species", &["petal_length".to_string()]);
/// println!("{} = {:.2}", result.score_label(), result.accuracy);
/// ```
#[derive(Debug, Clone)]
pub struct ModelAnalyzer {
    config: AnalysisConfig,
    split: SplitStrategy,
}

static_assertions::assert_impl_all!(ModelAnalyzer: Send, Sync);

impl Default for ModelAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl ModelAnalyzer {
    /// Create an analyzer; the split is seeded when `config.seed` is set.
    pub fn new(config: AnalysisConfig) -> Self {
        let split = SplitStrategy::from_seed(config.seed);
        Self { config, split }
    }

    /// Override how rows are ordered before the train/test split.
    pub fn with_split_strategy(mut self, split: SplitStrategy) -> Self {
        self.split = split;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a validated selection.
    pub fn run_selection(&self, rows: &[Row], selection: &VariableSelection) -> PredictionResult {
        self.run(rows, selection.target(), selection.features())
    }

    /// Estimate how well `features` predict `target`.
    ///
    /// Returns the insufficient-data result when fewer than
    /// `min_clean_rows` complete rows remain or either side of the split
    /// is empty. Problem type is decided on the whole cleaned set, before
    /// splitting.
    pub fn run(&self, rows: &[Row], target: &str, features: &[String]) -> PredictionResult {
        info!(
            "Analyzing target '{}' with {} feature(s) over {} rows",
            target,
            features.len(),
            rows.len()
        );

        let clean = DataCleaner.clean_rows(rows, target, features);
        if clean.len() < self.config.min_clean_rows {
            warn!(
                "Only {} clean rows (need {}), skipping model training",
                clean.len(),
                self.config.min_clean_rows
            );
            return PredictionResult::insufficient_data();
        }

        let problem_type =
            detect_problem_type(&clean, target, self.config.regression_unique_threshold);
        debug!("Detected {} problem for '{}'", problem_type, target);

        let (train, test) = self.split.split(&clean, self.config.train_fraction);
        if train.is_empty() || test.is_empty() {
            warn!(
                "Empty split (train={}, test={}), skipping model training",
                train.len(),
                test.len()
            );
            return PredictionResult::insufficient_data();
        }

        let result = match problem_type {
            ProblemType::Regression => run_knn_regression(
                &train,
                &test,
                target,
                features,
                self.config.knn_neighbors,
                self.config.normalization,
            ),
            ProblemType::Classification => run_naive_bayes(&train, &test, target, features),
        };

        info!(
            "{}: {} = {:.4} (train={}, test={})",
            result.model_name,
            result.score_label(),
            result.accuracy,
            train.len(),
            test.len()
        );
        result
    }
}

/// Analyze with the default configuration and a fresh random split.
pub fn run_model_analysis(rows: &[Row], target: &str, features: &[String]) -> PredictionResult {
    ModelAnalyzer::default().run(rows, target, features)
}
