//! latency-plot - histogram viewer for wakeup latency CSV files
//!
//! Loads the `latency_ns` column, converts it to milliseconds, prints a
//! summary, and opens an interactive histogram window.

use anyhow::{Context, Result};
use clap::Parser;
use rtlatency::cli::PlotArgs;
use rtlatency::config::AppConfig;
use rtlatency::report::PlotReport;
use rtlatency::ui::histogram_window;
use rtlatency::{Histogram, LatencySamples};
use tracing::{debug, info};

fn main() -> Result<()> {
    rtlatency::init_logging()?;
    let args = PlotArgs::parse();

    debug!(
        version = rtlatency::VERSION,
        build_date = rtlatency::BUILD_DATE,
        "latency-plot starting"
    );

    let config = AppConfig::resolve(args.config.as_deref())?;
    let settings = args.resolve(&config.plot);

    let samples = LatencySamples::from_path_with_column(&args.file, &settings.column)
        .with_context(|| format!("Failed to load latencies from {}", args.file.display()))?;

    let histogram = Histogram::from_values(
        settings.bins,
        settings.range_min_ms,
        settings.range_max_ms,
        &samples.to_millis(),
    )
    .context("Invalid histogram settings")?;

    let report = PlotReport::new(&args.file, &samples, histogram);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.render_text());

    if !args.wants_window() {
        return Ok(());
    }

    histogram_window::show(report, &settings)?;
    info!("window closed");
    Ok(())
}
