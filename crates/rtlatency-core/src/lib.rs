//! rtlatency Core - Sample loading, histogram binning, and wakeup sampling
//!
//! This library provides the core functionality for inspecting real-time
//! wakeup latency: reading `latency_ns` columns from CSV, converting them to
//! milliseconds, bucketing them into fixed-range histograms, and (on Linux)
//! measuring periodic wakeup latency of a high-priority thread.

#[cfg(target_os = "linux")]
pub mod measure;
pub mod samples;
pub mod stats;

pub use samples::reader::{LatencySamples, SamplesError};
pub use samples::writer::LatencyCsvWriter;
pub use stats::histogram::{Histogram, HistogramError};
pub use stats::summary::LatencySummary;

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date stamped by build.rs
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Name of the CSV column holding latency measurements
pub const LATENCY_COLUMN: &str = "latency_ns";

/// Nanoseconds per millisecond
pub const NS_PER_MS: f64 = 1e6;

/// Default number of histogram bins
pub const DEFAULT_BINS: usize = 200;

/// Default histogram range in milliseconds (lower, upper)
pub const DEFAULT_RANGE_MS: (f64, f64) = (-1.0, 10.0);

/// Default CPU for `rt-latency` to pin the measuring thread to
pub const DEFAULT_CPU: usize = 0;

/// Default `SCHED_FIFO` priority for `rt-latency`
pub const DEFAULT_PRIORITY: i32 = 80;
