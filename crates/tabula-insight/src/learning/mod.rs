//! Lightweight predictive models used to score a target/feature selection.
//!
//! - [`detect_problem_type`] picks classification or regression
//! - [`NaiveBayesModel`] handles classification (accuracy + AUC estimate)
//! - [`KnnRegressor`] handles regression (R²)
//! - [`ModelAnalyzer`] wires cleaning, splitting and scoring together

mod analysis;
mod knn;
mod naive_bayes;
mod normalizer;
mod problem;
mod split;

pub use analysis::{ModelAnalyzer, run_model_analysis};
pub use knn::{KnnRegressor, r_squared, run_knn_regression};
pub use naive_bayes::{
    AUC_ESTIMATE_BONUS, AUC_ESTIMATE_CAP, ClassModel, FeatureDistribution, MIN_DENSITY,
    MIN_STD_DEV, NaiveBayesModel, auc_estimate, run_naive_bayes,
};
pub use normalizer::MinMaxNormalizer;
pub use problem::detect_problem_type;
pub use split::{SplitStrategy, train_test_split};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::parser::parse_csv;
    use proptest::prelude::*;

    fn csv_from(xs: &[f64], labels: &[u8]) -> String {
        let mut csv = String::from("x,label\n");
        for (x, l) in xs.iter().zip(labels) {
            csv.push_str(&format!("{},c{}\n", x, l));
        }
        csv
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_classification_scores_in_range(
            pairs in prop::collection::vec((-1000i32..1000, 0u8..4), 10..60),
            seed in any::<u64>(),
        ) {
            let xs: Vec<f64> = pairs.iter().map(|(x, _)| *x as f64 / 10.0).collect();
            let labels: Vec<u8> = pairs.iter().map(|(_, l)| *l).collect();
            let rows = parse_csv(&csv_from(&xs, &labels));
            let config = AnalysisConfig::builder().seed(seed).build().unwrap();
            let result = ModelAnalyzer::new(config).run(&rows, "label", &["x".to_string()]);

            prop_assert!((0.0..=1.0).contains(&result.accuracy));
            prop_assert!((0.0..=AUC_ESTIMATE_CAP).contains(&result.auc));
        }

        #[test]
        fn prop_regression_score_in_unit_range(
            ys in prop::collection::vec(-500i32..500, 12..60),
            seed in any::<u64>(),
        ) {
            let mut csv = String::from("x,y\n");
            for (i, y) in ys.iter().enumerate() {
                csv.push_str(&format!("{},{}\n", i, y));
            }
            let rows = parse_csv(&csv);
            let config = AnalysisConfig::builder().seed(seed).build().unwrap();
            let result = ModelAnalyzer::new(config).run(&rows, "y", &["x".to_string()]);

            prop_assert!((0.0..=1.0).contains(&result.accuracy));
        }

        #[test]
        fn prop_split_partitions_input(len in 0usize..200, seed in any::<u64>()) {
            let items: Vec<usize> = (0..len).collect();
            let (train, test) = SplitStrategy::Seeded(seed).split(&items, 0.7);
            prop_assert_eq!(train.len(), (len as f64 * 0.7).floor() as usize);
            prop_assert_eq!(train.len() + test.len(), len);
        }
    }
}
