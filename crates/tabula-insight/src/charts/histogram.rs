//! Equal-width histogram binning.

use crate::config::MAX_HISTOGRAM_BINS;
use crate::types::{BinData, Row};
use crate::utils::format_one_decimal;
use tracing::debug;

/// Bucket the numeric values of `column` into `bins` equal-width buckets.
///
/// Non-numeric and missing values are skipped. No numeric values gives no
/// buckets; a constant column gives a single bucket labeled with its value.
/// Otherwise `[min, max]` is split into `bins` contiguous buckets and the
/// value equal to `max` lands in the last one. `bins` is clamped to
/// `1..=MAX_HISTOGRAM_BINS`.
pub fn create_histogram(rows: &[Row], column: &str, bins: usize) -> Vec<BinData> {
    let values: Vec<f64> = rows
        .iter()
        .filter_map(|row| row.value(column).as_number())
        .collect();

    let Some((min, max)) = crate::profiler::min_max(&values) else {
        debug!("Column '{}' has no numeric values to bin", column);
        return Vec::new();
    };

    if min == max {
        return vec![BinData {
            bin: format!("{}", min),
            count: values.len(),
        }];
    }

    let bins = bins.clamp(1, MAX_HISTOGRAM_BINS);
    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];

    for v in &values {
        let idx = ((v - min) / width).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lower = min + i as f64 * width;
            let upper = min + (i + 1) as f64 * width;
            BinData {
                bin: format!("{} - {}", format_one_decimal(lower), format_one_decimal(upper)),
                count,
            }
        })
        .collect()
}
