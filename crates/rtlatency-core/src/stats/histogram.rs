//! Fixed-range histogram
//!
//! Buckets values into `bins` equal-width intervals spanning `[min, max]`.
//! The last bin is closed on the right so a value equal to `max` is counted.
//! Values outside the range are tallied separately and never drawn.

use serde::Serialize;
use thiserror::Error;

/// Upper limit on the number of bins
pub const MAX_BINS: usize = 1_000_000;

/// Errors for invalid histogram parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistogramError {
    #[error("Histogram needs at least one bin")]
    NoBins,

    #[error("Histogram range must be finite, got [{min}, {max}]")]
    NonFiniteRange { min: f64, max: f64 },

    #[error("Histogram range is empty: min {min} must be below max {max}")]
    EmptyRange { min: f64, max: f64 },

    #[error("Too many bins: {bins} (at most {max})")]
    TooManyBins { bins: usize, max: usize },

    #[error("Bin width over [{min}, {max}] with {bins} bins is not a positive finite number")]
    InvalidBinWidth { min: f64, max: f64, bins: usize },
}

/// One bin of a histogram
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Inclusive lower edge
    pub start: f64,
    /// Upper edge (exclusive except for the last bin)
    pub end: f64,
    /// Number of values in this bin
    pub count: u64,
}

impl HistogramBin {
    /// Midpoint of the bin
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Width of the bin
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width histogram over a fixed range
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    /// Lower edge of the first bin
    min: f64,
    /// Upper edge of the last bin
    max: f64,
    /// Width of each bin
    width: f64,
    /// Per-bin counts
    counts: Vec<u64>,
    /// Values below `min`
    underflow: u64,
    /// Values above `max`
    overflow: u64,
    /// NaN values
    non_finite: u64,
}

impl Histogram {
    /// Create an empty histogram
    ///
    /// # Arguments
    /// * `bins` - Number of equal-width bins (1 to [`MAX_BINS`])
    /// * `min` - Lower edge of the range
    /// * `max` - Upper edge of the range (must exceed `min`)
    pub fn new(bins: usize, min: f64, max: f64) -> Result<Self, HistogramError> {
        if bins == 0 {
            return Err(HistogramError::NoBins);
        }
        if bins > MAX_BINS {
            return Err(HistogramError::TooManyBins {
                bins,
                max: MAX_BINS,
            });
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(HistogramError::NonFiniteRange { min, max });
        }
        if min >= max {
            return Err(HistogramError::EmptyRange { min, max });
        }

        // The span can overflow to inf, or a tiny span can round to zero width
        let width = (max - min) / bins as f64;
        if !width.is_finite() || width <= 0.0 {
            return Err(HistogramError::InvalidBinWidth { min, max, bins });
        }

        Ok(Self {
            min,
            max,
            width,
            counts: vec![0; bins],
            underflow: 0,
            overflow: 0,
            non_finite: 0,
        })
    }

    /// Build a histogram and record every value
    pub fn from_values(
        bins: usize,
        min: f64,
        max: f64,
        values: &[f64],
    ) -> Result<Self, HistogramError> {
        let mut histogram = Self::new(bins, min, max)?;
        for &value in values {
            histogram.record(value);
        }
        tracing::debug!(
            bins = bins,
            in_range = histogram.in_range(),
            underflow = histogram.underflow,
            overflow = histogram.overflow,
            non_finite = histogram.non_finite,
            "histogram_built"
        );
        Ok(histogram)
    }

    /// Record a single value
    pub fn record(&mut self, value: f64) {
        if value.is_nan() {
            self.non_finite += 1;
        } else if value < self.min {
            self.underflow += 1;
        } else if value > self.max {
            self.overflow += 1;
        } else {
            let index = self.bin_index(value);
            self.counts[index] += 1;
        }
    }

    /// Bin for an in-range value, corrected for rounding at the edges
    fn bin_index(&self, value: f64) -> usize {
        let last = self.counts.len() - 1;
        let mut index = (((value - self.min) / self.width) as usize).min(last);

        if index > 0 && value < self.edge(index) {
            index -= 1;
        } else if index < last && value >= self.edge(index + 1) {
            index += 1;
        }
        index
    }

    /// Edge `i` of the range, with edge `bins` pinned to `max`
    fn edge(&self, i: usize) -> f64 {
        if i == self.counts.len() {
            self.max
        } else {
            self.min + self.width * i as f64
        }
    }

    /// Number of bins
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    /// Lower edge of the range
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper edge of the range
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of each bin
    pub fn bin_width(&self) -> f64 {
        self.width
    }

    /// Per-bin counts
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Iterate over bins with their edges
    pub fn bins(&self) -> impl Iterator<Item = HistogramBin> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(move |(i, &count)| HistogramBin {
                start: self.edge(i),
                end: self.edge(i + 1),
                count,
            })
    }

    /// Largest bin count
    pub fn peak(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Values that landed in a bin
    pub fn in_range(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Values below the range
    pub fn underflow(&self) -> u64 {
        self.underflow
    }

    /// Values above the range
    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    /// NaN values
    pub fn non_finite(&self) -> u64 {
        self.non_finite
    }

    /// Every recorded value, drawn or not
    pub fn total(&self) -> u64 {
        self.in_range() + self.underflow + self.overflow + self.non_finite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_BINS, DEFAULT_RANGE_MS};
    use approx::assert_relative_eq;

    fn default_histogram() -> Histogram {
        Histogram::new(DEFAULT_BINS, DEFAULT_RANGE_MS.0, DEFAULT_RANGE_MS.1).unwrap()
    }

    #[test]
    fn test_default_layout() {
        let hist = default_histogram();
        assert_eq!(hist.bin_count(), 200);
        assert_relative_eq!(hist.bin_width(), 0.055, epsilon = 1e-12);

        let bins: Vec<_> = hist.bins().collect();
        assert_eq!(bins[0].start, -1.0);
        assert_eq!(bins[199].end, 10.0);
        for pair in bins.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_edges_of_range() {
        let mut hist = default_histogram();
        hist.record(-1.0);
        hist.record(10.0);

        assert_eq!(hist.counts()[0], 1);
        assert_eq!(hist.counts()[199], 1);
        assert_eq!(hist.underflow(), 0);
        assert_eq!(hist.overflow(), 0);
    }

    #[test]
    fn test_out_of_range_values_are_counted_not_drawn() {
        let hist = Histogram::from_values(200, -1.0, 10.0, &[-1.5, 0.5, 10.01, 250.0]).unwrap();

        assert_eq!(hist.in_range(), 1);
        assert_eq!(hist.underflow(), 1);
        assert_eq!(hist.overflow(), 2);
        assert_eq!(hist.total(), 4);
    }

    #[test]
    fn test_nan_and_infinity() {
        let hist = Histogram::from_values(
            10,
            0.0,
            1.0,
            &[f64::NAN, f64::INFINITY, f64::NEG_INFINITY],
        )
        .unwrap();

        assert_eq!(hist.non_finite(), 1);
        assert_eq!(hist.overflow(), 1);
        assert_eq!(hist.underflow(), 1);
        assert_eq!(hist.in_range(), 0);
    }

    #[test]
    fn test_values_land_in_expected_bins() {
        let hist = Histogram::from_values(200, -1.0, 10.0, &[1.0, 2.0, 5.0]).unwrap();

        // (1.0 + 1.0) / 0.055 = 36.36 -> bin 36
        assert_eq!(hist.counts()[36], 1);
        // (2.0 + 1.0) / 0.055 = 54.54 -> bin 54
        assert_eq!(hist.counts()[54], 1);
        // (5.0 + 1.0) / 0.055 = 109.09 -> bin 109
        assert_eq!(hist.counts()[109], 1);
        assert_eq!(hist.in_range(), 3);
    }

    #[test]
    fn test_value_on_interior_edge_goes_right() {
        let mut hist = Histogram::new(4, 0.0, 1.0).unwrap();
        hist.record(0.25);
        hist.record(0.5);
        hist.record(0.75);

        assert_eq!(hist.counts(), &[0, 1, 1, 1]);
    }

    #[test]
    fn test_every_edge_matches_its_bin() {
        let hist = default_histogram();
        let edges: Vec<f64> = hist.bins().map(|b| b.start).collect();

        for (i, edge) in edges.iter().enumerate() {
            let mut h = hist.clone();
            h.record(*edge);
            assert_eq!(h.counts()[i], 1, "edge {} ({}) landed elsewhere", i, edge);
        }
    }

    #[test]
    fn test_peak_and_centers() {
        let hist = Histogram::from_values(2, 0.0, 2.0, &[0.1, 0.2, 1.5]).unwrap();
        let bins: Vec<_> = hist.bins().collect();

        assert_eq!(hist.peak(), 2);
        assert_eq!(bins[0].center(), 0.5);
        assert_eq!(bins[1].center(), 1.5);
        assert_eq!(bins[1].width(), 1.0);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(Histogram::new(0, 0.0, 1.0).unwrap_err(), HistogramError::NoBins);
        assert!(matches!(
            Histogram::new(10, 1.0, 1.0),
            Err(HistogramError::EmptyRange { .. })
        ));
        assert!(matches!(
            Histogram::new(10, 5.0, -1.0),
            Err(HistogramError::EmptyRange { .. })
        ));
        assert!(matches!(
            Histogram::new(10, f64::NEG_INFINITY, 1.0),
            Err(HistogramError::NonFiniteRange { .. })
        ));
    }

    #[test]
    fn test_overflowing_span_is_rejected() {
        let err = Histogram::from_values(4, -1e308, 1e308, &[0.0, 5e307]).unwrap_err();
        assert!(matches!(
            err,
            HistogramError::InvalidBinWidth { bins: 4, .. }
        ));
    }

    #[test]
    fn test_vanishing_width_is_rejected() {
        // 5e-324 is the smallest subnormal; a quarter of it rounds to zero
        let err = Histogram::new(4, 0.0, 5e-324).unwrap_err();
        assert!(matches!(err, HistogramError::InvalidBinWidth { .. }));
    }

    #[test]
    fn test_wide_but_finite_span_keeps_even_edges() {
        let hist = Histogram::new(4, -1e307, 1e307).unwrap();
        let bins: Vec<_> = hist.bins().collect();

        assert!(bins.iter().all(|b| b.start.is_finite() && b.end.is_finite()));
        assert_relative_eq!(bins[0].width(), bins[3].width(), max_relative = 1e-12);
        assert_eq!(bins[3].end, 1e307);
    }

    #[test]
    fn test_too_many_bins() {
        assert_eq!(
            Histogram::new(usize::MAX, 0.0, 1.0).unwrap_err(),
            HistogramError::TooManyBins {
                bins: usize::MAX,
                max: MAX_BINS
            }
        );
        assert!(Histogram::new(MAX_BINS, 0.0, 1.0).is_ok());
    }
}
