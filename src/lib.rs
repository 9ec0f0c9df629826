//! rtlatency - Real-time wakeup latency measurement and histogram viewer
//!
//! This library re-exports the sample loading, histogram, and sampler
//! functionality from `rtlatency-core` and adds the pieces shared by the
//! `latency-plot` and `rt-latency` binaries: CLI definitions, persistent
//! configuration, report formatting, and the histogram window.

pub mod cli;
pub mod config;
pub mod report;
pub mod ui;

pub use rtlatency_core::samples;
pub use rtlatency_core::stats;
#[cfg(target_os = "linux")]
pub use rtlatency_core::measure;

pub use rtlatency_core::{Histogram, LatencyCsvWriter, LatencySamples, LatencySummary};
pub use rtlatency_core::{
    BUILD_DATE, DEFAULT_BINS, DEFAULT_CPU, DEFAULT_PRIORITY, DEFAULT_RANGE_MS, LATENCY_COLUMN,
    VERSION,
};

/// Install the stderr log subscriber used by both binaries
///
/// `RUST_LOG` is honored; without it this crate and the core crate log at info.
pub fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rtlatency=info".parse()?)
                .add_directive("rtlatency_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
