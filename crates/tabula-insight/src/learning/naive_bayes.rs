//! Gaussian/categorical Naive Bayes classifier.
//!
//! Features whose training values are all numbers for a class are modeled
//! as a normal distribution, every other feature as a Laplace-smoothed
//! frequency table. Prediction is the class with the highest log posterior.

use crate::profiler::{mean, population_variance};
use crate::types::{CellValue, NAIVE_BAYES_MODEL, PredictionResult, ProblemType, Row};
use serde::Serialize;
use std::collections::HashMap;
use std::f64::consts::PI;
use tracing::debug;

/// Lower bound on a class standard deviation, `sqrt(0.0001)`.
pub const MIN_STD_DEV: f64 = 0.01;

/// Lower bound on a Gaussian density before taking its log.
pub const MIN_DENSITY: f64 = 1e-5;

/// Ceiling of the accuracy-derived AUC estimate.
pub const AUC_ESTIMATE_CAP: f64 = 0.99;

/// Offset added to accuracy for the AUC estimate.
pub const AUC_ESTIMATE_BONUS: f64 = 0.05;

/// Per-class model of one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeatureDistribution {
    Gaussian {
        mean: f64,
        std: f64,
    },
    Categorical {
        counts: HashMap<String, usize>,
        total: usize,
    },
}

impl FeatureDistribution {
    fn fit(values: &[&CellValue]) -> Self {
        let numbers: Option<Vec<f64>> = values.iter().map(|v| v.as_number()).collect();

        match numbers {
            Some(nums) if !nums.is_empty() => {
                let mean = mean(&nums).unwrap_or_default();
                let variance = population_variance(&nums).unwrap_or_default();
                FeatureDistribution::Gaussian {
                    mean,
                    std: variance.sqrt().max(MIN_STD_DEV),
                }
            }
            _ => {
                let mut counts = HashMap::new();
                for value in values {
                    *counts.entry(value.to_string()).or_insert(0) += 1;
                }
                FeatureDistribution::Categorical {
                    counts,
                    total: values.len(),
                }
            }
        }
    }

    /// Log-likelihood of `value` under this distribution.
    pub fn log_likelihood(&self, value: &CellValue) -> f64 {
        match self {
            FeatureDistribution::Gaussian { mean, std } => {
                let density = value
                    .coerce_number()
                    .map(|v| gaussian_density(v, *mean, *std))
                    .unwrap_or(MIN_DENSITY);
                density.max(MIN_DENSITY).ln()
            }
            FeatureDistribution::Categorical { counts, total } => {
                let count = counts.get(&value.to_string()).copied().unwrap_or(0);
                ((count + 1) as f64 / (total + counts.len()) as f64).ln()
            }
        }
    }
}

fn gaussian_density(x: f64, mean: f64, std: f64) -> f64 {
    let z = (x - mean) / std;
    (-0.5 * z * z).exp() / (std * (2.0 * PI).sqrt())
}

/// Prior and feature distributions for one target class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassModel {
    pub label: String,
    pub prior: f64,
    /// One distribution per feature, in feature order.
    pub distributions: Vec<FeatureDistribution>,
}

impl ClassModel {
    fn log_posterior(&self, row: &Row, features: &[String]) -> f64 {
        features
            .iter()
            .zip(&self.distributions)
            .fold(self.prior.ln(), |acc, (feature, dist)| {
                acc + dist.log_likelihood(row.value(feature))
            })
    }
}

/// A trained classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NaiveBayesModel {
    target: String,
    features: Vec<String>,
    /// Classes in the order they first appear in the training rows.
    classes: Vec<ClassModel>,
}

impl NaiveBayesModel {
    /// Fit per-class priors and feature distributions.
    ///
    /// Class labels are the string forms of the target values.
    pub fn train(rows: &[Row], target: &str, features: &[String]) -> Self {
        let mut order: Vec<String> = Vec::new();
        let mut members: HashMap<String, Vec<&Row>> = HashMap::new();

        for row in rows {
            let label = row.value(target).to_string();
            if !members.contains_key(&label) {
                order.push(label.clone());
            }
            members.entry(label).or_default().push(row);
        }

        let total = rows.len() as f64;
        let classes: Vec<ClassModel> = order
            .into_iter()
            .map(|label| {
                let subset = members.remove(&label).unwrap_or_default();
                let distributions = features
                    .iter()
                    .map(|feature| {
                        let values: Vec<&CellValue> =
                            subset.iter().map(|row| row.value(feature)).collect();
                        FeatureDistribution::fit(&values)
                    })
                    .collect();
                ClassModel {
                    prior: subset.len() as f64 / total,
                    label,
                    distributions,
                }
            })
            .collect();

        debug!(
            "Trained Naive Bayes on {} rows: {} classes, {} features",
            rows.len(),
            classes.len(),
            features.len()
        );

        Self {
            target: target.to_string(),
            features: features.to_vec(),
            classes,
        }
    }

    pub fn classes(&self) -> &[ClassModel] {
        &self.classes
    }

    /// Most probable class label. Ties go to the class seen first.
    pub fn predict(&self, row: &Row) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for class in &self.classes {
            let score = class.log_posterior(row, &self.features);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ if score.is_nan() => {}
                _ => best = Some((class.label.as_str(), score)),
            }
        }
        best.map(|(label, _)| label)
    }

    /// Share of `rows` whose target matches the prediction.
    pub fn accuracy(&self, rows: &[Row]) -> f64 {
        if rows.is_empty() {
            return 0.0;
        }
        let correct = rows
            .iter()
            .filter(|row| self.predict(row) == Some(row.value(&self.target).to_string().as_str()))
            .count();
        correct as f64 / rows.len() as f64
    }
}

/// Heuristic AUC stand-in derived from accuracy.
///
/// This is not an ROC area; it only exists so the UI can show a second
/// number and must be labeled as an estimate.
pub fn auc_estimate(accuracy: f64) -> f64 {
    (accuracy + AUC_ESTIMATE_BONUS).min(AUC_ESTIMATE_CAP)
}

/// Train on `train`, score on `test` and wrap the outcome.
pub fn run_naive_bayes(train: &[Row], test: &[Row], target: &str, features: &[String]) -> PredictionResult {
    let model = NaiveBayesModel::train(train, target, features);
    let accuracy = model.accuracy(test);
    PredictionResult {
        accuracy,
        auc: auc_estimate(accuracy),
        model_name: NAIVE_BAYES_MODEL.to_string(),
        problem_type: ProblemType::Classification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv;

    fn features(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_priors_and_class_order() {
        let rows = parse_csv("x,t\n1,b\n2,a\n3,b\n4,b");
        let model = NaiveBayesModel::train(&rows, "t", &features(&["x"]));
        let labels: Vec<&str> = model.classes().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a"]);
        assert_eq!(model.classes()[0].prior, 0.75);
        assert_eq!(model.classes()[1].prior, 0.25);
    }

    #[test]
    fn test_gaussian_fit_and_std_floor() {
        let rows = parse_csv("x,t\n2,a\n4,a\n7,b\n7,b");
        let model = NaiveBayesModel::train(&rows, "t", &features(&["x"]));

        assert_eq!(
            model.classes()[0].distributions[0],
            FeatureDistribution::Gaussian { mean: 3.0, std: 1.0 }
        );
        assert_eq!(
            model.classes()[1].distributions[0],
            FeatureDistribution::Gaussian {
                mean: 7.0,
                std: MIN_STD_DEV
            }
        );
    }

    #[test]
    fn test_mixed_feature_is_categorical() {
        let rows = parse_csv("x,t\n1,a\nred,a\n1,a");
        let model = NaiveBayesModel::train(&rows, "t", &features(&["x"]));
        match &model.classes()[0].distributions[0] {
            FeatureDistribution::Categorical { counts, total } => {
                assert_eq!(*total, 3);
                assert_eq!(counts.get("1"), Some(&2));
                assert_eq!(counts.get("red"), Some(&1));
            }
            other => panic!("expected categorical, got {:?}", other),
        }
    }

    #[test]
    fn test_laplace_smoothing() {
        let dist = FeatureDistribution::Categorical {
            counts: HashMap::from([("a".to_string(), 3), ("b".to_string(), 1)]),
            total: 4,
        };
        let seen = dist.log_likelihood(&CellValue::from("a")).exp();
        let unseen = dist.log_likelihood(&CellValue::from("z")).exp();
        assert!((seen - 4.0 / 6.0).abs() < 1e-12);
        assert!((unseen - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_density_floor() {
        let dist = FeatureDistribution::Gaussian {
            mean: 0.0,
            std: MIN_STD_DEV,
        };
        let far = dist.log_likelihood(&CellValue::Number(1000.0));
        assert_eq!(far, MIN_DENSITY.ln());
        assert!(far.is_finite());
    }

    #[test]
    fn test_predicts_separable_classes() {
        let rows = parse_csv("x,t\n1,low\n2,low\n1.5,low\n10,high\n11,high\n10.5,high");
        let model = NaiveBayesModel::train(&rows, "t", &features(&["x"]));
        let probe = parse_csv("x,t\n1.2,low\n10.8,high");
        assert_eq!(model.predict(&probe[0]), Some("low"));
        assert_eq!(model.predict(&probe[1]), Some("high"));
        assert_eq!(model.accuracy(&probe), 1.0);
    }

    #[test]
    fn test_tie_goes_to_first_class() {
        // Identical distributions and priors for both classes
        let rows = parse_csv("x,t\n1,first\n3,first\n1,second\n3,second");
        let model = NaiveBayesModel::train(&rows, "t", &features(&["x"]));
        let probe = parse_csv("x,t\n2,second");
        assert_eq!(model.predict(&probe[0]), Some("first"));
    }

    #[test]
    fn test_numeric_labels_compared_by_string_form() {
        let rows = parse_csv("x,t\n1,0\n2,0\n10,1\n11,1");
        let model = NaiveBayesModel::train(&rows, "t", &features(&["x"]));
        assert_eq!(model.classes()[0].label, "0");
        assert_eq!(model.accuracy(&rows), 1.0);
    }

    #[test]
    fn test_empty_model_predicts_nothing() {
        let model = NaiveBayesModel::train(&[], "t", &features(&["x"]));
        let probe = parse_csv("x,t\n1,a");
        assert_eq!(model.predict(&probe[0]), None);
        assert_eq!(model.accuracy(&probe), 0.0);
        assert_eq!(model.accuracy(&[]), 0.0);
    }

    #[test]
    fn test_auc_estimate() {
        assert!((auc_estimate(0.5) - 0.55).abs() < 1e-12);
        assert_eq!(auc_estimate(0.97), AUC_ESTIMATE_CAP);
        assert_eq!(auc_estimate(1.0), AUC_ESTIMATE_CAP);
    }

    #[test]
    fn test_run_naive_bayes_result() {
        let rows = parse_csv("x,t\n1,a\n2,a\n10,b\n11,b");
        let result = run_naive_bayes(&rows, &rows, "t", &features(&["x"]));
        assert_eq!(result.model_name, NAIVE_BAYES_MODEL);
        assert_eq!(result.problem_type, ProblemType::Classification);
        assert_eq!(result.accuracy, 1.0);
        assert_eq!(result.auc, AUC_ESTIMATE_CAP);
    }
}
