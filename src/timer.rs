//! Monotonic timer primitive
//!
//! Both profiling wrappers measure wall time with this timer. It is built on
//! `std::time::Instant`, which is monotonic and immune to system clock
//! adjustment. Stopping a timer that was never started is programmer misuse
//! and signals [`ProfilerError::InvalidState`].

use std::time::{Duration, Instant};

use crate::error::ProfilerError;

/// A start/stop stopwatch over a monotonic clock
#[derive(Debug, Default)]
pub struct Timer {
    started: Option<Instant>,
}

impl Timer {
    /// Create a stopped timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the start timestamp. Restarting a running timer discards the
    /// previous start point.
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Return elapsed time since the matching `start()` and stop the timer
    pub fn stop(&mut self) -> Result<Duration, ProfilerError> {
        match self.started.take() {
            Some(start) => Ok(start.elapsed()),
            None => Err(ProfilerError::InvalidState("stop() without start()")),
        }
    }

    /// Elapsed time so far without stopping, for mid-call checkpoints
    pub fn elapsed(&self) -> Result<Duration, ProfilerError> {
        match self.started {
            Some(start) => Ok(start.elapsed()),
            None => Err(ProfilerError::InvalidState("elapsed() without start()")),
        }
    }

    /// Whether a start timestamp is currently held
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }
}
