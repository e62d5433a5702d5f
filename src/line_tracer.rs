//! Line-level tracing engine
//!
//! Attributes execution time to individual source lines of a profiled
//! callable. Statements are instrumented with the [`trace_line!`] macro, which
//! fires a line-boundary event before the statement executes. The engine
//! charges the time elapsed since the previous event to the previously
//! executed line, so a line's cost includes everything that ran between its
//! event and the next one, including calls into uninstrumented code.
//!
//! Frames form a stack per thread. Each profiled call arms its own frame, and
//! events are always delivered to the innermost armed frame, so nested and
//! recursive profiled calls never corrupt an outer frame's cursor. A nested
//! call that is itself line-profiled gets its own record; one that is not is
//! opaque work charged to the calling line.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::error::ProfilerError;
use crate::record::LineTiming;

/// Capability interface for line-boundary event delivery
///
/// The engine depends only on this interface. [`ThreadLineEvents`] is the
/// implementation for hosts with thread-local storage; a runtime without a
/// usable instrumentation mechanism models that by failing `arm`, which the
/// profiling wrapper turns into a fallback-policy decision.
pub trait LineEventSource {
    /// Register a new innermost call frame to receive line events
    fn arm(&self, identity: &str) -> Result<(), ProfilerError>;

    /// Tear down the innermost frame, flushing the delta for the final
    /// executed line, and return the accumulated line table
    fn disarm(&self) -> Result<Vec<LineTiming>, ProfilerError>;
}

/// Ordered per-line accumulation table for one call frame
///
/// Entries keep first-encounter order; re-executing a line (loop body)
/// accumulates into its existing entry instead of appending a duplicate.
#[derive(Debug, Default)]
struct LineTable {
    entries: Vec<LineTiming>,
    index: HashMap<u32, usize>,
}

impl LineTable {
    fn charge(&mut self, line_number: u32, source_text: &'static str, delta: Duration) {
        match self.index.get(&line_number) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.duration += delta.as_secs_f64();
                entry.hit_count += 1;
            }
            None => {
                self.index.insert(line_number, self.entries.len());
                self.entries.push(LineTiming {
                    line_number,
                    source_text: source_text.to_string(),
                    duration: delta.as_secs_f64(),
                    hit_count: 1,
                });
            }
        }
    }
}

/// Tracer state for one call frame: the cursor (last line, last timestamp)
/// and the accumulated table
#[derive(Debug)]
struct Frame {
    cursor: Option<(u32, &'static str)>,
    last_ts: Instant,
    table: LineTable,
}

impl Frame {
    fn new(now: Instant) -> Self {
        Self {
            cursor: None,
            last_ts: now,
            table: LineTable::default(),
        }
    }

    /// A line-boundary event: close out the previous line, advance the cursor
    fn on_line(&mut self, line_number: u32, source_text: &'static str, now: Instant) {
        if let Some((prev_line, prev_text)) = self.cursor.take() {
            self.table
                .charge(prev_line, prev_text, now.duration_since(self.last_ts));
        }
        self.cursor = Some((line_number, source_text));
        self.last_ts = now;
    }

    /// Flush the delta for the final executed line
    fn flush(&mut self, now: Instant) {
        if let Some((line, text)) = self.cursor.take() {
            self.table.charge(line, text, now.duration_since(self.last_ts));
        }
    }
}

thread_local! {
    static FRAMES: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

/// Line event source backed by a thread-local frame stack
///
/// Frame state is call-frame-local and thread-local; concurrent invocations
/// of the same profiled function on different threads never share a cursor.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadLineEvents;

impl LineEventSource for ThreadLineEvents {
    fn arm(&self, _identity: &str) -> Result<(), ProfilerError> {
        FRAMES.with(|frames| frames.borrow_mut().push(Frame::new(Instant::now())));
        Ok(())
    }

    fn disarm(&self) -> Result<Vec<LineTiming>, ProfilerError> {
        FRAMES.with(|frames| {
            let mut frames = frames.borrow_mut();
            let mut frame = frames
                .pop()
                .ok_or(ProfilerError::InvalidState("disarm() without arm()"))?;
            frame.flush(Instant::now());
            Ok(frame.table.entries)
        })
    }
}

/// Deliver a line-boundary event to the innermost armed frame, if any
///
/// Called by the [`trace_line!`] macro expansion. Events fired outside any
/// armed frame are dropped, so instrumented statements cost almost nothing
/// when the surrounding function is invoked unprofiled.
pub fn emit_line(line_number: u32, source_text: &'static str) {
    FRAMES.with(|frames| {
        if let Some(frame) = frames.borrow_mut().last_mut() {
            frame.on_line(line_number, source_text, Instant::now());
        }
    });
}

/// Instrument one statement for line-level tracing
///
/// Fires a line-boundary event carrying the call-site line number and the
/// statement text, then evaluates the statement and yields its value:
///
/// ```
/// use funcprofiler::{line_profile, trace_line, ProfileConfig};
///
/// let result = line_profile("sum_squares", &ProfileConfig::new(), || {
///     let mut total = 0u64;
///     for i in 0..10 {
///         trace_line!(total += i * i);
///     }
///     trace_line!(total)
/// })
/// .unwrap();
/// assert_eq!(result, 285);
/// ```
#[macro_export]
macro_rules! trace_line {
    ($e:expr) => {{
        $crate::line_tracer::emit_line(::core::line!(), ::core::stringify!($e));
        $e
    }};
}
