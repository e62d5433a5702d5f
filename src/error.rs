//! Error taxonomy for the profiling layer
//!
//! Profiling-layer failures are surfaced as typed errors so callers can
//! distinguish them from anything the profiled callable itself does. A panic
//! raised inside the profiled callable is never converted into one of these
//! variants; it propagates unchanged.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the profiler itself (never by the profiled callable)
#[derive(Error, Debug)]
pub enum ProfilerError {
    /// Timer misuse, e.g. `stop()` without a matching `start()`
    #[error("invalid timer state: {0}")]
    InvalidState(&'static str),

    /// The line event source could not be armed for this call frame
    #[error("line tracing unavailable: {0}")]
    TracingUnavailable(String),

    /// An export format string that is not one of json, csv, html
    #[error("unsupported export format: {0:?}")]
    UnsupportedFormat(String),

    /// Filesystem write failure during export
    #[error("failed to write export to {path}")]
    ExportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record serialization failure (JSON export)
    #[error("failed to serialize profile records")]
    Serialization(#[from] serde_json::Error),
}
