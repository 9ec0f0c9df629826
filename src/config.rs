//! Persistent application configuration
//!
//! Stores histogram and measurement defaults in a JSON file at
//! `<config_dir>/rtlatency/config.json` (`~/.config` on Linux).
//! Command-line flags override whatever the file says.

use rtlatency_core::{
    DEFAULT_BINS, DEFAULT_CPU, DEFAULT_PRIORITY, DEFAULT_RANGE_MS, LATENCY_COLUMN,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_column() -> String {
    LATENCY_COLUMN.to_string()
}

fn default_bins() -> usize {
    DEFAULT_BINS
}

fn default_range_min_ms() -> f64 {
    DEFAULT_RANGE_MS.0
}

fn default_range_max_ms() -> f64 {
    DEFAULT_RANGE_MS.1
}

fn default_window_width() -> f32 {
    700.0
}

fn default_window_height() -> f32 {
    400.0
}

fn default_cpu() -> Option<usize> {
    Some(DEFAULT_CPU)
}

fn default_priority() -> Option<i32> {
    Some(DEFAULT_PRIORITY)
}

fn default_lock_memory() -> bool {
    true
}

/// Histogram and window settings for `latency-plot`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSettings {
    /// CSV column holding nanosecond latencies
    #[serde(default = "default_column")]
    pub column: String,
    /// Number of histogram bins
    #[serde(default = "default_bins")]
    pub bins: usize,
    /// Lower edge of the histogram (ms)
    #[serde(default = "default_range_min_ms")]
    pub range_min_ms: f64,
    /// Upper edge of the histogram (ms)
    #[serde(default = "default_range_max_ms")]
    pub range_max_ms: f64,
    /// Initial window width in points
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    /// Initial window height in points
    #[serde(default = "default_window_height")]
    pub window_height: f32,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            column: default_column(),
            bins: default_bins(),
            range_min_ms: default_range_min_ms(),
            range_max_ms: default_range_max_ms(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

/// Real-time settings for `rt-latency`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureSettings {
    /// CPU to pin to (null = no pinning)
    #[serde(default = "default_cpu")]
    pub cpu: Option<usize>,
    /// `SCHED_FIFO` priority (null = keep default policy)
    #[serde(default = "default_priority")]
    pub priority: Option<i32>,
    /// Lock memory with mlockall before measuring
    #[serde(default = "default_lock_memory")]
    pub lock_memory: bool,
}

impl Default for MeasureSettings {
    fn default() -> Self {
        Self {
            cpu: default_cpu(),
            priority: default_priority(),
            lock_memory: default_lock_memory(),
        }
    }
}

/// Persistent application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub plot: PlotSettings,
    #[serde(default)]
    pub measure: MeasureSettings,
}

impl AppConfig {
    /// Config file path: `<config_dir>/rtlatency/config.json`
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rtlatency")
            .join("config.json")
    }

    /// Load config from the default location, falling back to defaults on any error
    pub fn load() -> Self {
        let path = Self::path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded config from disk");
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Load config from an explicitly requested file
    ///
    /// Unlike [`AppConfig::load`], a missing or invalid file is an error.
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::info!(path = %path.display(), "Loaded config from disk");
        Ok(config)
    }

    /// Load from `path` when given, otherwise from the default location
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => Ok(Self::load()),
        }
    }

    /// Save config to disk, creating parent directories if needed
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "Config saved to disk");
        Ok(())
    }
}
