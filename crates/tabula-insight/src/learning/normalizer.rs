//! Min-max feature scaling.

use crate::profiler::min_max;
use crate::types::Row;

/// Per-feature `[min, max]` bounds mapped onto `[0, 1]`.
///
/// A feature whose bounds coincide (or that had no values when fitted)
/// maps every value to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxNormalizer {
    features: Vec<String>,
    bounds: Vec<Option<(f64, f64)>>,
}

impl MinMaxNormalizer {
    /// Compute bounds for each feature over `rows`.
    ///
    /// Values that cannot be read as numbers are ignored.
    pub fn fit(rows: &[Row], features: &[String]) -> Self {
        let bounds = features
            .iter()
            .map(|feature| {
                let values: Vec<f64> = rows
                    .iter()
                    .filter_map(|row| row.value(feature).coerce_number())
                    .collect();
                min_max(&values)
            })
            .collect();

        Self {
            features: features.to_vec(),
            bounds,
        }
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Scale one value of the feature at `index`.
    pub fn scale(&self, index: usize, value: f64) -> f64 {
        match self.bounds.get(index).copied().flatten() {
            Some((min, max)) if max != min => (value - min) / (max - min),
            _ => 0.0,
        }
    }

    /// Scaled feature vector of one row, in feature order.
    ///
    /// Unreadable values scale as 0; rows are expected to be cleaned first.
    pub fn transform(&self, row: &Row) -> Vec<f64> {
        self.features
            .iter()
            .enumerate()
            .map(|(i, feature)| match row.value(feature).coerce_number() {
                Some(v) => self.scale(i, v),
                None => 0.0,
            })
            .collect()
    }

    pub fn transform_rows(&self, rows: &[Row]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.transform(row)).collect()
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
    fn test_fit_transform_unit_range() {
        let rows = parse_csv("a,b\n0,10\n5,20\n10,30");
        let norm = MinMaxNormalizer::fit(&rows, &features(&["a", "b"]));
        let scaled = norm.transform_rows(&rows);

        assert_eq!(scaled[0], vec![0.0, 0.0]);
        assert_eq!(scaled[1], vec![0.5, 0.5]);
        assert_eq!(scaled[2], vec![1.0, 1.0]);
    }

    #[test]
    fn test_constant_feature_maps_to_zero() {
        let rows = parse_csv("a\n3\n3\n3");
        let norm = MinMaxNormalizer::fit(&rows, &features(&["a"]));
        assert!(norm.transform_rows(&rows).iter().all(|v| v[0] == 0.0));
    }

    #[test]
    fn test_train_bounds_applied_to_other_rows() {
        let train = parse_csv("a\n0\n10");
        let test = parse_csv("a\n20\n-10");
        let norm = MinMaxNormalizer::fit(&train, &features(&["a"]));
        let scaled = norm.transform_rows(&test);
        // Out-of-range values are not clipped
        assert_eq!(scaled, vec![vec![2.0], vec![-1.0]]);
    }

    #[test]
    fn test_fit_on_empty_rows() {
        let norm = MinMaxNormalizer::fit(&[], &features(&["a"]));
        assert_eq!(norm.scale(0, 42.0), 0.0);
    }
}
