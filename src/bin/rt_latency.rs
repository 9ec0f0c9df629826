//! rt-latency - periodic wakeup latency measurement
//!
//! Wakes a high-priority thread on an absolute `CLOCK_MONOTONIC` schedule,
//! writes one `index,latency_ns` row per wakeup, and prints summary
//! statistics. Press Ctrl+C to stop early and keep what was measured.

#[cfg(target_os = "linux")]
fn main() -> anyhow::Result<()> {
    linux::run()
}

#[cfg(not(target_os = "linux"))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("rt-latency needs Linux (clock_nanosleep with TIMER_ABSTIME and SCHED_FIFO)")
}

#[cfg(target_os = "linux")]
mod linux {
    use anyhow::{Context, Result};
    use clap::Parser;
    use rtlatency::cli::MeasureArgs;
    use rtlatency::config::AppConfig;
    use rtlatency::measure::{PeriodicSampler, RealtimeSetup};
    use rtlatency::{LatencyCsvWriter, LatencySummary};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tracing::{debug, info, warn};

    pub fn run() -> Result<()> {
        rtlatency::init_logging()?;
        let args = MeasureArgs::parse();

        debug!(
            version = rtlatency::VERSION,
            build_date = rtlatency::BUILD_DATE,
            "rt-latency starting"
        );

        let config = AppConfig::resolve(args.config.as_deref())?;
        let settings = args.resolve(&config.measure);

        let sampler = PeriodicSampler::new(Duration::from_micros(args.period_us), args.iterations)
            .context("Invalid measurement parameters")?;

        // Open the output before measuring so a bad path fails fast
        let out = args.output_path();
        let mut writer = LatencyCsvWriter::create(&out)
            .with_context(|| format!("Failed to create {}", out.display()))?;

        let running = Arc::new(AtomicBool::new(true));
        let r = running.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            r.store(false, Ordering::SeqCst);
        }) {
            warn!(error = %e, "Ctrl+C handler not installed");
        }

        let setup = RealtimeSetup {
            lock_memory: settings.lock_memory,
            cpu: settings.cpu,
            priority: settings.priority,
        };
        let realtime = setup.apply();
        if !realtime.is_complete(&setup) {
            warn!("real-time setup incomplete, latencies may be higher than on a tuned system");
        }

        let latencies = sampler.run(&running)?;

        writer
            .write_all(&latencies)
            .with_context(|| format!("Failed to write {}", out.display()))?;
        writer
            .finish()
            .with_context(|| format!("Failed to write {}", out.display()))?;
        info!(path = %out.display(), rows = latencies.len(), "latencies written");

        println!("period_us={} iterations={}", args.period_us, args.iterations);
        println!(
            "mlock={} cpu={} fifo_priority={}",
            realtime.memory_locked,
            realtime
                .pinned_cpu
                .map_or_else(|| "-".to_string(), |c| c.to_string()),
            realtime
                .fifo_priority
                .map_or_else(|| "-".to_string(), |p| p.to_string()),
        );

        let values: Vec<f64> = latencies.iter().map(|&ns| ns as f64).collect();
        match LatencySummary::from_values(&values) {
            Some(s) => {
                println!(
                    "min={:.0} ns  max={:.0} ns  mean={:.2} ns  sd={:.2} ns",
                    s.min, s.max, s.mean, s.std_dev
                );
                println!("p50={:.0} ns  p90={:.0} ns  p99={:.0} ns", s.p50, s.p90, s.p99);
            }
            None => println!("No wakeups recorded"),
        }
        println!("Wrote {} samples to {}", latencies.len(), out.display());

        Ok(())
    }
}
