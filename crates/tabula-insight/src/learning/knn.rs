//! K-nearest-neighbors regression scored with R².

use super::normalizer::MinMaxNormalizer;
use crate::config::NormalizationMode;
use crate::profiler::mean;
use crate::types::{KNN_REGRESSION_MODEL, PredictionResult, ProblemType, Row};
use std::cmp::Ordering;
use tracing::debug;

/// Unweighted KNN regressor over min-max scaled features.
#[derive(Debug, Clone, Copy)]
pub struct KnnRegressor {
    n_neighbors: usize,
    normalization: NormalizationMode,
}

impl KnnRegressor {
    pub fn new(n_neighbors: usize, normalization: NormalizationMode) -> Self {
        Self {
            n_neighbors: n_neighbors.max(1),
            normalization,
        }
    }

    /// Predict the target of every `test` row from the `train` rows.
    ///
    /// Each prediction is the plain mean of the original targets of the
    /// nearest training rows (Euclidean distance on scaled features,
    /// stable order for equal distances).
    pub fn predict(&self, train: &[Row], test: &[Row], target: &str, features: &[String]) -> Vec<f64> {
        let train_norm = MinMaxNormalizer::fit(train, features);
        let test_norm = match self.normalization {
            NormalizationMode::PerSplit => MinMaxNormalizer::fit(test, features),
            NormalizationMode::FitOnTrain => train_norm.clone(),
        };

        let train_x = train_norm.transform_rows(train);
        let train_y = target_values(train, target);

        test_norm
            .transform_rows(test)
            .iter()
            .map(|x| self.predict_one(&train_x, &train_y, x))
            .collect()
    }

    fn predict_one(&self, train_x: &[Vec<f64>], train_y: &[f64], x: &[f64]) -> f64 {
        let mut distances: Vec<(usize, f64)> = train_x
            .iter()
            .enumerate()
            .map(|(idx, row)| (idx, euclidean_distance(row, x)))
            .collect();

        distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let k = self.n_neighbors.min(distances.len());
        if k == 0 {
            return 0.0;
        }
        distances.iter().take(k).map(|(idx, _)| train_y[*idx]).sum::<f64>() / k as f64
    }

    /// R² of the predictions on `test`, clamped at 0.
    pub fn score(&self, train: &[Row], test: &[Row], target: &str, features: &[String]) -> f64 {
        let predictions = self.predict(train, test, target, features);
        let actual = target_values(test, target);
        let reference = mean(&target_values(train, target)).unwrap_or_default();
        let r2 = r_squared(&actual, &predictions, reference);
        debug!("KNN (k={}) R² on {} test rows: {:.4}", self.n_neighbors, test.len(), r2);
        r2.max(0.0)
    }
}

fn target_values(rows: &[Row], target: &str) -> Vec<f64> {
    rows.iter()
        .map(|row| row.value(target).coerce_number().unwrap_or_default())
        .collect()
}

fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Coefficient of determination, `1 - SSres / SStot`.
///
/// `SStot` is taken around `reference_mean` (the training-target mean), so
/// the result can be negative. A zero `SStot` gives 0.
pub fn r_squared(actual: &[f64], predicted: &[f64], reference_mean: f64) -> f64 {
    let (ss_res, ss_tot) = actual
        .iter()
        .zip(predicted)
        .fold((0.0, 0.0), |(res, tot), (y, y_hat)| {
            (res + (y - y_hat).powi(2), tot + (y - reference_mean).powi(2))
        });

    if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    }
}

/// Fit on `train`, score on `test` and wrap the outcome.
pub fn run_knn_regression(
    train: &[Row],
    test: &[Row],
    target: &str,
    features: &[String],
    n_neighbors: usize,
    normalization: NormalizationMode,
) -> PredictionResult {
    let accuracy = KnnRegressor::new(n_neighbors, normalization).score(train, test, target, features);
    PredictionResult {
        accuracy,
        auc: 0.0,
        model_name: KNN_REGRESSION_MODEL.to_string(),
        problem_type: ProblemType::Regression,
    }
}
