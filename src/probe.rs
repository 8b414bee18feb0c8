//! Scoped time and memory measurement
//!
//! A [`Probe`] attributes wall-clock time and resident-memory growth to one
//! bounded span of work. It snapshots the current process at construction and
//! again at [`Probe::stop`], then freezes the difference as a [`Diff`]. Probes
//! are single-use: the only state transition is `Created -> Stopped`.

use crate::{Error, Result};
use serde::Serialize;
use std::time::{Duration, Instant};
use sysinfo::{Pid, ProcessesToUpdate, System, get_current_pid};

/// Frozen result of a stopped probe
#[derive(Debug, Clone, Serialize)]
pub struct Diff {
    /// Wall-clock time spent in the span
    pub elapsed: Duration,

    /// Change in the process's resident memory over the span, in bytes.
    /// Negative when more memory was reclaimed than allocated during the
    /// span; that is a valid outcome, not an error.
    pub memory_delta_bytes: i64,
}

impl Diff {
    /// Elapsed span duration in whole milliseconds
    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Measures one span of work
///
/// Reading the diff before stopping, or stopping twice, is a contract
/// violation reported as [`Error::ProbeMisuse`].
pub struct Probe {
    started: Instant,
    baseline_bytes: u64,
    sys: System,
    pid: Pid,
    diff: Option<Diff>,
}

impl Probe {
    /// Start measuring: snapshot resident memory, then the clock
    ///
    /// When a label is given it is echoed to stdout, purely for observability.
    pub fn start(label: Option<&str>) -> Result<Self> {
        let pid =
            get_current_pid().map_err(|e| Error::Probe(format!("cannot resolve current pid: {e}")))?;
        let mut sys = System::new();
        let baseline_bytes = resident_memory(&mut sys, pid)?;

        if let Some(message) = label {
            println!("{message}");
        }

        Ok(Self {
            started: Instant::now(),
            baseline_bytes,
            sys,
            pid,
            diff: None,
        })
    }

    /// Stop measuring and freeze the diff
    ///
    /// # Errors
    ///
    /// [`Error::ProbeMisuse`] if the probe was already stopped.
    pub fn stop(&mut self) -> Result<&Diff> {
        if self.diff.is_some() {
            return Err(Error::ProbeMisuse("stop() called on an already-stopped probe"));
        }

        let elapsed = self.started.elapsed();
        let current_bytes = resident_memory(&mut self.sys, self.pid)?;

        let diff = Diff {
            elapsed,
            memory_delta_bytes: current_bytes as i64 - self.baseline_bytes as i64,
        };

        Ok(self.diff.insert(diff))
    }

    /// The frozen diff of a stopped probe
    ///
    /// # Errors
    ///
    /// [`Error::ProbeMisuse`] if the probe has not been stopped yet.
    pub fn diff(&self) -> Result<&Diff> {
        self.diff
            .as_ref()
            .ok_or(Error::ProbeMisuse("diff() read before stop()"))
    }
}

/// Resident memory of `pid` in bytes, from a fresh process refresh
fn resident_memory(sys: &mut System, pid: Pid) -> Result<u64> {
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    sys.process(pid)
        .map(|process| process.memory())
        .ok_or_else(|| Error::Probe(format!("process {pid} not visible to sysinfo")))
}
