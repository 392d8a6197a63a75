//! Statistical helpers shared by the profiler and the models.

/// Mean, min and max of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NumericSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl NumericSummary {
    /// Summarize a set of values; `None` when there are no values.
    pub(crate) fn from_values(values: &[f64]) -> Option<Self> {
        let (min, max) = min_max(values)?;
        Some(Self {
            mean: mean(values)?,
            min,
            max,
        })
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance (divides by `n`), `None` for an empty slice.
pub(crate) fn population_variance(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    Some(values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64)
}

/// Smallest and largest value, `None` for an empty slice.
pub(crate) fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), &v| (lo.min(v), hi.max(v)),
    ))
}
