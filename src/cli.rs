//! CLI argument parsing for `latency-plot` and `rt-latency`

use crate::config::{MeasureSettings, PlotSettings};
use clap::Parser;
use std::path::PathBuf;

/// Histogram of wakeup latencies from a CSV file
#[derive(Parser, Debug)]
#[command(name = "latency-plot")]
#[command(version)]
#[command(
    about = "Plot a histogram of the latency_ns column of a CSV file (in milliseconds)",
    long_about = None
)]
pub struct PlotArgs {
    /// CSV file with a latency_ns column
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Column holding latencies in nanoseconds
    #[arg(long, value_name = "NAME")]
    pub column: Option<String>,

    /// Number of histogram bins (default: 200)
    #[arg(long, value_name = "N")]
    pub bins: Option<usize>,

    /// Lower edge of the histogram in ms (default: -1)
    #[arg(long, value_name = "MS", allow_hyphen_values = true)]
    pub min: Option<f64>,

    /// Upper edge of the histogram in ms (default: 10)
    #[arg(long, value_name = "MS", allow_hyphen_values = true)]
    pub max: Option<f64>,

    /// Config file (default: <config_dir>/rtlatency/config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the summary only, without opening a window
    #[arg(long = "no-window")]
    pub no_window: bool,

    /// Print summary and histogram as JSON instead of opening a window
    #[arg(long)]
    pub json: bool,
}

impl PlotArgs {
    /// Settings from the config file with command-line overrides applied
    pub fn resolve(&self, config: &PlotSettings) -> PlotSettings {
        PlotSettings {
            column: self.column.clone().unwrap_or_else(|| config.column.clone()),
            bins: self.bins.unwrap_or(config.bins),
            range_min_ms: self.min.unwrap_or(config.range_min_ms),
            range_max_ms: self.max.unwrap_or(config.range_max_ms),
            ..config.clone()
        }
    }

    /// Whether an interactive window should be opened
    pub fn wants_window(&self) -> bool {
        !self.no_window && !self.json
    }
}

/// Periodic wakeup latency measurement
#[derive(Parser, Debug)]
#[command(name = "rt-latency")]
#[command(version)]
#[command(
    about = "Measure periodic wakeup latency (ns) of a high-priority thread",
    long_about = None
)]
pub struct MeasureArgs {
    /// Wakeup period in microseconds
    #[arg(value_name = "PERIOD_US")]
    pub period_us: u64,

    /// Number of wakeups to record
    #[arg(value_name = "ITERATIONS")]
    pub iterations: usize,

    /// Output CSV (default: latency_YYYYMMDD_HHMMSS.csv)
    #[arg(value_name = "OUT")]
    pub out: Option<PathBuf>,

    /// CPU to pin the measuring thread to (default: 0)
    #[arg(long, value_name = "N")]
    pub cpu: Option<usize>,

    /// SCHED_FIFO priority (default: 80)
    #[arg(long, value_name = "P")]
    pub priority: Option<i32>,

    /// Do not lock memory with mlockall
    #[arg(long = "no-mlock")]
    pub no_mlock: bool,

    /// Skip all real-time setup (no mlockall, pinning, or SCHED_FIFO)
    #[arg(long = "no-rt")]
    pub no_rt: bool,

    /// Config file (default: <config_dir>/rtlatency/config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl MeasureArgs {
    /// Settings from the config file with command-line overrides applied
    pub fn resolve(&self, config: &MeasureSettings) -> MeasureSettings {
        if self.no_rt {
            return MeasureSettings {
                cpu: None,
                priority: None,
                lock_memory: false,
            };
        }
        MeasureSettings {
            cpu: self.cpu.or(config.cpu),
            priority: self.priority.or(config.priority),
            lock_memory: config.lock_memory && !self.no_mlock,
        }
    }

    /// Output path, generating a timestamped name when none was given
    pub fn output_path(&self) -> PathBuf {
        self.out.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "latency_{}.csv",
                chrono::Local::now().format("%Y%m%d_%H%M%S")
            ))
        })
    }
}
