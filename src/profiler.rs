//! Profiling wrappers for whole-function and line-level timing
//!
//! [`function_profile`] times one full invocation of a callable and routes
//! the resulting record to the configured shared log and/or exporter.
//! [`line_profile`] does the same but additionally arms the line tracer for
//! the call frame, producing a per-line timing table from [`trace_line!`]
//! events fired inside the callable.
//!
//! A panic raised by the profiled callable always propagates unchanged: the
//! wrapper records the duration elapsed up to the failure point, logs it, and
//! resumes the unwind. Profiling-layer failures (export, tracer setup) are
//! returned as [`ProfilerError`] and never mask the callable's own outcome.
//!
//! [`trace_line!`]: crate::trace_line

use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ProfilerError;
use crate::export::{self, ExportFormat};
use crate::line_tracer::{LineEventSource, ThreadLineEvents};
use crate::record::ProfileRecord;
use crate::shared_log::SharedLog;
use crate::timer::Timer;

/// Policy when the line event source cannot be armed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceFallback {
    /// Warn and degrade to whole-function timing; the call still runs
    #[default]
    WholeFunction,
    /// Surface [`ProfilerError::TracingUnavailable`] without running the call
    Fail,
}

/// Configuration shared by both profiling wrappers
#[derive(Debug, Clone, Default)]
pub struct ProfileConfig {
    /// Export the record in this format after each call; `None` disables export
    pub export_format: Option<ExportFormat>,
    /// Export path stem (extension appended); derived from the callable
    /// identity when unset
    pub filename: Option<String>,
    /// Store to append each record to; `None` disables shared logging
    pub shared_log: Option<Arc<SharedLog>>,
    /// What to do when line tracing is unavailable
    pub fallback: TraceFallback,
    /// Optional arguments summary carried on each record
    pub arguments: Option<String>,
}

impl ProfileConfig {
    /// Configuration with everything disabled: no export, no shared log
    pub fn new() -> Self {
        Self::default()
    }

    /// Export each record in `format`
    pub fn export_format(mut self, format: ExportFormat) -> Self {
        self.export_format = Some(format);
        self
    }

    /// Export path stem; the format's extension is appended
    pub fn filename(mut self, stem: impl Into<String>) -> Self {
        self.filename = Some(stem.into());
        self
    }

    /// Append each record to `log`
    pub fn shared_log(mut self, log: Arc<SharedLog>) -> Self {
        self.shared_log = Some(log);
        self
    }

    /// Policy when line tracing is unavailable
    pub fn fallback(mut self, fallback: TraceFallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Arguments summary carried on each record
    pub fn arguments(mut self, summary: impl Into<String>) -> Self {
        self.arguments = Some(summary.into());
        self
    }

    fn export_path(&self, identity: &str, format: ExportFormat) -> PathBuf {
        match &self.filename {
            Some(stem) => PathBuf::from(format!("{}.{}", stem, format.extension())),
            None => export::derive_filename(identity, format),
        }
    }
}

/// Route a finished record to the shared log and/or exporter
fn dispatch(identity: &str, record: ProfileRecord, config: &ProfileConfig) -> Result<(), ProfilerError> {
    if let Some(log) = &config.shared_log {
        log.append(record.clone());
        debug!(identity, "appended profile record to shared log");
    }
    if let Some(format) = config.export_format {
        let path = config.export_path(identity, format);
        export::export_to_file(std::slice::from_ref(&record), format, &path)?;
    }
    Ok(())
}

/// Run the callable under the timer, relaying panics after logging the
/// elapsed duration. Partial profiling data for a panicked call is discarded.
fn timed_call<R>(identity: &str, f: impl FnOnce() -> R) -> (Duration, R) {
    let mut timer = Timer::new();
    timer.start();
    let outcome = catch_unwind(AssertUnwindSafe(f));
    let total = timer.stop().unwrap_or(Duration::ZERO);
    match outcome {
        Ok(value) => (total, value),
        Err(payload) => {
            warn!(
                identity,
                elapsed_s = total.as_secs_f64(),
                "profiled callable panicked; discarding partial profile"
            );
            resume_unwind(payload)
        }
    }
}

/// Time one full invocation of `f` and record it under `identity`
///
/// Returns the callable's result unchanged. Shared-log appends happen before
/// export, so an export failure surfaces as `Err` but never loses the record
/// from the log or undoes the callable's work.
pub fn function_profile<R>(
    identity: &str,
    config: &ProfileConfig,
    f: impl FnOnce() -> R,
) -> Result<R, ProfilerError> {
    let (total, value) = timed_call(identity, f);

    let mut record = ProfileRecord::new(identity, total);
    if let Some(args) = &config.arguments {
        record = record.with_arguments(args.clone());
    }
    dispatch(identity, record, config)?;
    Ok(value)
}

/// Time one invocation of `f` with per-line attribution
///
/// Statements inside `f` instrumented with [`trace_line!`](crate::trace_line)
/// contribute to the record's line table. Recursive calls through this
/// wrapper each produce their own record; nested profiled calls get isolated
/// frames and their time lands on the outer call's current line.
pub fn line_profile<R>(
    identity: &str,
    config: &ProfileConfig,
    f: impl FnOnce() -> R,
) -> Result<R, ProfilerError> {
    line_profile_with(&ThreadLineEvents, identity, config, f)
}

/// [`line_profile`] with an explicit line event source
///
/// When arming fails, `config.fallback` decides between degrading to
/// whole-function timing (with a warning) and surfacing the error without
/// running the callable.
pub fn line_profile_with<S, R>(
    source: &S,
    identity: &str,
    config: &ProfileConfig,
    f: impl FnOnce() -> R,
) -> Result<R, ProfilerError>
where
    S: LineEventSource + ?Sized,
{
    if let Err(err) = source.arm(identity) {
        return match config.fallback {
            TraceFallback::WholeFunction => {
                warn!(identity, %err, "line tracing unavailable; falling back to whole-function timing");
                function_profile(identity, config, f)
            }
            TraceFallback::Fail => Err(err),
        };
    }

    let mut timer = Timer::new();
    timer.start();
    let outcome = catch_unwind(AssertUnwindSafe(f));
    // The frame must come off the stack even when the callable panicked,
    // otherwise the next profiled call on this thread inherits a stale frame.
    // Disarming also flushes the final line's delta, and happens before the
    // timer stops so line durations stay within the whole-call window.
    let lines = source.disarm();
    let total = timer.stop().unwrap_or(Duration::ZERO);

    match outcome {
        Ok(value) => {
            let mut record = ProfileRecord::new(identity, total).with_lines(lines?);
            if let Some(args) = &config.arguments {
                record = record.with_arguments(args.clone());
            }
            dispatch(identity, record, config)?;
            Ok(value)
        }
        Err(payload) => {
            warn!(
                identity,
                elapsed_s = total.as_secs_f64(),
                "profiled callable panicked; discarding partial line profile"
            );
            resume_unwind(payload)
        }
    }
}
