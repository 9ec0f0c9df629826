//! Absolute-deadline wakeup loop

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use nix::errno::Errno;
use nix::sys::time::TimeSpec;
use nix::time::{clock_gettime, clock_nanosleep, ClockId, ClockNanosleepFlags};

use super::MeasureError;

const NS_PER_SEC: i64 = 1_000_000_000;

/// Measures wakeup latency of the calling thread
///
/// # Example
/// ```no_run
/// use rtlatency_core::measure::PeriodicSampler;
/// use std::sync::atomic::AtomicBool;
/// use std::time::Duration;
///
/// let sampler = PeriodicSampler::new(Duration::from_micros(1000), 200_000).unwrap();
/// let running = AtomicBool::new(true);
/// let latencies = sampler.run(&running).unwrap();
/// println!("{} wakeups", latencies.len());
/// ```
#[derive(Debug, Clone)]
pub struct PeriodicSampler {
    period_ns: i64,
    iterations: usize,
}

impl PeriodicSampler {
    /// Create a sampler
    ///
    /// # Arguments
    /// * `period` - Time between consecutive deadlines
    /// * `iterations` - Number of wakeups to record
    pub fn new(period: Duration, iterations: usize) -> Result<Self, MeasureError> {
        if period.is_zero() {
            return Err(MeasureError::ZeroPeriod);
        }
        if iterations == 0 {
            return Err(MeasureError::ZeroIterations);
        }
        let period_ns =
            i64::try_from(period.as_nanos()).map_err(|_| MeasureError::PeriodTooLong(period))?;

        Ok(Self {
            period_ns,
            iterations,
        })
    }

    /// Period in nanoseconds
    pub fn period_ns(&self) -> i64 {
        self.period_ns
    }

    /// Requested number of wakeups
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run the loop on the calling thread
    ///
    /// Returns one latency per wakeup in nanoseconds. Stops early, keeping
    /// what was measured so far, once `running` is cleared.
    pub fn run(&self, running: &AtomicBool) -> Result<Vec<i64>, MeasureError> {
        // Reserve up front so the loop never allocates
        let mut latencies = Vec::with_capacity(self.iterations);

        let start_ns = monotonic_ns()?;
        let mut next_ns = start_ns + self.period_ns;

        tracing::info!(
            period_ns = self.period_ns,
            iterations = self.iterations,
            "sampling_started"
        );

        for _ in 0..self.iterations {
            if !running.load(Ordering::Relaxed) {
                break;
            }

            sleep_until(next_ns)?;
            let now_ns = monotonic_ns()?;

            latencies.push(now_ns - next_ns);
            next_ns += self.period_ns;
        }

        if latencies.len() < self.iterations {
            tracing::warn!(
                recorded = latencies.len(),
                requested = self.iterations,
                "sampling stopped early"
            );
        } else {
            tracing::info!(recorded = latencies.len(), "sampling_finished");
        }

        Ok(latencies)
    }
}

fn monotonic_ns() -> Result<i64, MeasureError> {
    let now = clock_gettime(ClockId::CLOCK_MONOTONIC)?;
    Ok(timespec_to_ns(&now))
}

fn timespec_to_ns(ts: &TimeSpec) -> i64 {
    ts.tv_sec() as i64 * NS_PER_SEC + ts.tv_nsec() as i64
}

fn ns_to_timespec(ns: i64) -> TimeSpec {
    TimeSpec::new(
        ns.div_euclid(NS_PER_SEC) as _,
        ns.rem_euclid(NS_PER_SEC) as _,
    )
}

/// Sleep until an absolute `CLOCK_MONOTONIC` time, retrying on EINTR
fn sleep_until(deadline_ns: i64) -> Result<(), MeasureError> {
    let deadline = ns_to_timespec(deadline_ns);
    loop {
        match clock_nanosleep(
            ClockId::CLOCK_MONOTONIC,
            ClockNanosleepFlags::TIMER_ABSTIME,
            &deadline,
        ) {
            Ok(_) => return Ok(()),
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(MeasureError::Sleep(errno)),
        }
    }
}
