//! Loaded-file report shared by the text, JSON, and window outputs

use rtlatency_core::{Histogram, LatencySamples, LatencySummary};
use serde::Serialize;
use std::path::Path;

/// Everything `latency-plot` knows about one input file
#[derive(Debug, Clone, Serialize)]
pub struct PlotReport {
    /// Input path as given on the command line
    pub source: String,
    /// Column the values were read from
    pub column: String,
    /// Number of values loaded
    pub rows: usize,
    /// Rows skipped because the cell was empty or marked missing
    pub missing: usize,
    /// Summary in milliseconds (None for an empty file)
    pub summary_ms: Option<LatencySummary>,
    /// Histogram in milliseconds
    pub histogram: Histogram,
}

impl PlotReport {
    /// Build a report from loaded samples and their millisecond histogram
    pub fn new(source: &Path, samples: &LatencySamples, histogram: Histogram) -> Self {
        let millis = samples.to_millis();
        Self {
            source: source.display().to_string(),
            column: samples.column().to_string(),
            rows: samples.len(),
            missing: samples.missing(),
            summary_ms: LatencySummary::from_values(&millis),
            histogram,
        }
    }

    /// One line with the summary statistics
    pub fn summary_line(&self) -> String {
        match &self.summary_ms {
            Some(s) => format!(
                "n={}  min={:.3} ms  max={:.3} ms  mean={:.3} ms  sd={:.3} ms  p50={:.3} ms  p99={:.3} ms",
                s.count, s.min, s.max, s.mean, s.std_dev, s.p50, s.p99
            ),
            None => "n=0  (no samples)".to_string(),
        }
    }

    /// One line describing the histogram range and what fell outside it
    pub fn range_line(&self) -> String {
        let h = &self.histogram;
        format!(
            "{} bins over [{}, {}] ms: {} in range, {} below, {} above",
            h.bin_count(),
            h.min(),
            h.max(),
            h.in_range(),
            h.underflow(),
            h.overflow()
        )
    }

    /// Plain-text report for the terminal
    pub fn render_text(&self) -> String {
        let mut text = format!("{} ({}, {} rows", self.source, self.column, self.rows);
        if self.missing > 0 {
            text.push_str(&format!(", {} missing", self.missing));
        }
        text.push_str(")\n");
        text.push_str(&self.summary_line());
        text.push('\n');
        text.push_str(&self.range_line());
        text
    }
}
