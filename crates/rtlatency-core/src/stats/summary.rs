//! Summary statistics over a latency series

use serde::Serialize;

/// Summary of a latency series
///
/// Unit-agnostic: the fields carry whatever unit the input values had.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencySummary {
    /// Number of values summarized (NaN excluded)
    pub count: usize,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Median (nearest rank)
    pub p50: f64,
    /// 90th percentile (nearest rank)
    pub p90: f64,
    /// 99th percentile (nearest rank)
    pub p99: f64,
}

impl LatencySummary {
    /// Summarize a series, ignoring NaN values
    ///
    /// # Returns
    /// `None` if there is nothing to summarize
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean,
            std_dev: variance.sqrt(),
            p50: percentile(&sorted, 50.0),
            p90: percentile(&sorted, 90.0),
            p99: percentile(&sorted, 99.0),
        })
    }

    /// Same summary with every field multiplied by `factor`
    ///
    /// Used to switch units, e.g. nanoseconds to milliseconds with `1e-6`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            count: self.count,
            min: self.min * factor,
            max: self.max * factor,
            mean: self.mean * factor,
            std_dev: self.std_dev * factor.abs(),
            p50: self.p50 * factor,
            p90: self.p90 * factor,
            p99: self.p99 * factor,
        }
    }
}

/// Nearest-rank percentile of an ascending, non-empty slice
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let rank = ((pct / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_series() {
        assert!(LatencySummary::from_values(&[]).is_none());
        assert!(LatencySummary::from_values(&[f64::NAN]).is_none());
    }

    #[test]
    fn test_basic_moments() {
        let summary = LatencySummary::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();

        assert_eq!(summary.count, 4);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
        assert_relative_eq!(summary.mean, 2.5);
        assert_relative_eq!(summary.std_dev, 1.25f64.sqrt());
    }

    #[test]
    fn test_single_value() {
        let summary = LatencySummary::from_values(&[-0.02]).unwrap();

        assert_eq!(summary.min, -0.02);
        assert_eq!(summary.max, -0.02);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.p50, -0.02);
        assert_eq!(summary.p99, -0.02);
    }

    #[test]
    fn test_percentiles() {
        let values: Vec<f64> = (1..=100).map(|v| v as f64).collect();
        let summary = LatencySummary::from_values(&values).unwrap();

        assert_eq!(summary.p50, 50.0);
        assert_eq!(summary.p90, 90.0);
        assert_eq!(summary.p99, 99.0);
    }

    #[test]
    fn test_nan_ignored() {
        let summary = LatencySummary::from_values(&[1.0, f64::NAN, 3.0]).unwrap();
        assert_eq!(summary.count, 2);
        assert_relative_eq!(summary.mean, 2.0);
    }

    #[test]
    fn test_scaled_to_millis() {
        let summary = LatencySummary::from_values(&[1_000_000.0, 3_000_000.0]).unwrap();
        let ms = summary.scaled(1e-6);

        assert_eq!(ms.count, 2);
        assert_relative_eq!(ms.min, 1.0);
        assert_relative_eq!(ms.max, 3.0);
        assert_relative_eq!(ms.mean, 2.0);
        assert_relative_eq!(ms.std_dev, 1.0);
    }

    #[test]
    fn test_serializes_field_names() {
        let summary = LatencySummary::from_values(&[2.0]).unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["count"], 1);
        assert_eq!(json["mean"], 2.0);
        assert!(json.get("std_dev").is_some());
    }
}
