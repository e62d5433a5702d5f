//! Funcprofiler - function and line-level execution profiler
//!
//! This library measures how long a callable (or each instrumented source
//! line within it) takes to execute, accumulates results in an in-memory
//! shared log, and exports them to JSON, CSV, or HTML.

pub mod csv_output;
pub mod error;
pub mod export;
pub mod html_output;
pub mod json_output;
pub mod line_tracer;
pub mod profiler;
pub mod record;
pub mod shared_log;
pub mod timer;

pub use error::ProfilerError;
pub use export::ExportFormat;
pub use line_tracer::{LineEventSource, ThreadLineEvents};
pub use profiler::{function_profile, line_profile, line_profile_with, ProfileConfig, TraceFallback};
pub use record::{LineTiming, ProfileRecord};
pub use shared_log::SharedLog;
pub use timer::Timer;
