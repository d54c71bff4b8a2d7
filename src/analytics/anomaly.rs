//! Standard-deviation threshold anomaly detection.

use serde::Serialize;

use super::aggregate::mean;

/// Default sensitivity, in population standard deviations.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 2.0;

/// A series entry outside the threshold: its position and value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnomalyFlag {
    pub index: usize,
    pub value: f64,
}

/// Mean and population standard deviation of a series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeriesStats {
    pub mean: f64,
    pub std_dev: f64,
}

/// Mean and standard deviation, dividing by `n` (population estimator).
pub fn population_stats(values: &[f64]) -> SeriesStats {
    if values.is_empty() {
        return SeriesStats::default();
    }
    let n = values.len() as f64;
    let mean = mean(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    SeriesStats {
        mean,
        std_dev: variance.sqrt(),
    }
}

/// Flag every value whose distance from the mean is strictly greater than
/// `threshold * std_dev`. Flags come back in index order.
///
/// A constant series has zero deviation and therefore never flags anything.
pub fn detect_anomalies(values: &[f64], threshold: Option<f64>) -> Vec<AnomalyFlag> {
    if values.is_empty() {
        return Vec::new();
    }
    let threshold = threshold.unwrap_or(DEFAULT_ANOMALY_THRESHOLD);
    let stats = population_stats(values);
    let limit = threshold * stats.std_dev;

    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| (v - stats.mean).abs() > limit)
        .map(|(index, &value)| AnomalyFlag { index, value })
        .collect()
}

/// Signed distance of each value from the mean in standard deviations.
/// All zeros when the series is constant.
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    let stats = population_stats(values);
    if stats.std_dev == 0.0 {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|v| (v - stats.mean) / stats.std_dev)
        .collect()
}
