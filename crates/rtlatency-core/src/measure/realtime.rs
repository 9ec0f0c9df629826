//! Real-time process setup
//!
//! Locks memory to avoid page faults, pins the process to one CPU, and
//! switches it to `SCHED_FIFO`. Each step may fail without root or
//! `CAP_SYS_NICE`/`CAP_IPC_LOCK`; failures are logged and the measurement
//! still runs, just with less realistic numbers.

use nix::sched::{sched_setaffinity, CpuSet};
use nix::sys::mman::{mlockall, MlockAllFlags};
use nix::unistd::Pid;

/// Which real-time settings to apply before measuring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealtimeSetup {
    /// Lock current and future pages into RAM
    pub lock_memory: bool,
    /// CPU to pin to (None = leave affinity alone)
    pub cpu: Option<usize>,
    /// `SCHED_FIFO` priority (None = keep the default policy)
    pub priority: Option<i32>,
}

/// What [`RealtimeSetup::apply`] actually achieved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RealtimeReport {
    /// Memory is locked
    pub memory_locked: bool,
    /// CPU the process is pinned to
    pub pinned_cpu: Option<usize>,
    /// Active `SCHED_FIFO` priority
    pub fifo_priority: Option<i32>,
}

impl RealtimeReport {
    /// True when every requested step succeeded
    pub fn is_complete(&self, setup: &RealtimeSetup) -> bool {
        self.memory_locked == setup.lock_memory
            && self.pinned_cpu == setup.cpu
            && self.fifo_priority == setup.priority
    }
}

impl RealtimeSetup {
    /// Apply the requested settings to the calling process
    ///
    /// Never fails: each step that cannot be applied is logged as a warning.
    pub fn apply(&self) -> RealtimeReport {
        let mut report = RealtimeReport::default();

        if self.lock_memory {
            match mlockall(MlockAllFlags::MCL_CURRENT | MlockAllFlags::MCL_FUTURE) {
                Ok(()) => report.memory_locked = true,
                Err(e) => tracing::warn!(error = %e, "mlockall failed, continuing"),
            }
        }

        if let Some(cpu) = self.cpu {
            match pin_to_cpu(cpu) {
                Ok(()) => report.pinned_cpu = Some(cpu),
                Err(e) => {
                    tracing::warn!(cpu = cpu, error = %e, "sched_setaffinity failed, continuing")
                }
            }
        }

        if let Some(priority) = self.priority {
            match set_fifo_priority(priority) {
                Ok(()) => report.fifo_priority = Some(priority),
                Err(e) => tracing::warn!(
                    priority = priority,
                    error = %e,
                    "couldn't set SCHED_FIFO; run as root or with CAP_SYS_NICE for real-time priority"
                ),
            }
        }

        tracing::info!(
            memory_locked = report.memory_locked,
            pinned_cpu = ?report.pinned_cpu,
            fifo_priority = ?report.fifo_priority,
            "realtime_setup"
        );
        report
    }
}

fn pin_to_cpu(cpu: usize) -> nix::Result<()> {
    let mut set = CpuSet::new();
    set.set(cpu)?;
    sched_setaffinity(Pid::from_raw(0), &set)
}

fn set_fifo_priority(priority: i32) -> std::io::Result<()> {
    // sched_param has extra private fields on some libcs
    let mut param: libc::sched_param = unsafe { std::mem::zeroed() };
    param.sched_priority = priority;

    let rc = unsafe { libc::sched_setscheduler(0, libc::SCHED_FIFO, &param) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}
