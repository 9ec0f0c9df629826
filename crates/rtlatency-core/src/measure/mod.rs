//! Periodic wakeup latency measurement (Linux)
//!
//! This module contains:
//! - Real-time process setup: memory locking, CPU pinning, `SCHED_FIFO` ([`realtime`])
//! - The absolute-deadline wakeup loop ([`sampler`])
//!
//! ## Measurement
//!
//! The sampler sleeps until absolute `CLOCK_MONOTONIC` deadlines spaced one
//! period apart and records, for every wakeup:
//!
//! ```text
//! latency_ns = now_ns - deadline_ns
//! ```
//!
//! Positive values mean the thread woke late. Deadlines advance by exactly
//! one period each time, so a late wakeup never shifts the schedule.

pub mod realtime;
pub mod sampler;

use thiserror::Error;

pub use realtime::{RealtimeReport, RealtimeSetup};
pub use sampler::PeriodicSampler;

/// Errors that can occur while measuring wakeup latency
#[derive(Error, Debug)]
pub enum MeasureError {
    #[error("Period must be greater than zero")]
    ZeroPeriod,

    #[error("Period of {0:?} is too long to schedule")]
    PeriodTooLong(std::time::Duration),

    #[error("Iteration count must be greater than zero")]
    ZeroIterations,

    #[error("Failed to read CLOCK_MONOTONIC: {0}")]
    Clock(#[from] nix::Error),

    #[error("clock_nanosleep failed: {0}")]
    Sleep(nix::errno::Errno),
}
