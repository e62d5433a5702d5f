//! Profile record data model
//!
//! One [`ProfileRecord`] is produced per profiled invocation. A record with an
//! empty line table came from the whole-function wrapper; a record with line
//! timings came from the line tracer. Both shapes flow through the same shared
//! log and exporters.

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Accumulated timing for one source line within a single call frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTiming {
    /// 1-based source line number
    pub line_number: u32,
    /// The statement text as written at the call site
    pub source_text: String,
    /// Total seconds attributed to this line across all executions
    pub duration: f64,
    /// Number of times execution passed through this line
    pub hit_count: u64,
}

/// The timing result for one invocation of a callable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Stable identity of the profiled callable
    pub callable: String,
    /// Wall time of the whole invocation, in seconds
    pub total_duration: f64,
    /// Unix timestamp of the invocation, in milliseconds
    pub timestamp_ms: u64,
    /// Optional summary of the call arguments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
    /// Per-line timings, ordered by first encounter. Empty for
    /// whole-function profiles.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<LineTiming>,
}

impl ProfileRecord {
    /// Build a whole-function record from a measured duration
    pub fn new(callable: impl Into<String>, total: Duration) -> Self {
        Self {
            callable: callable.into(),
            total_duration: total.as_secs_f64(),
            timestamp_ms: unix_timestamp_ms(),
            arguments: None,
            lines: Vec::new(),
        }
    }

    /// Attach a per-line timing table, turning this into a line profile
    pub fn with_lines(mut self, lines: Vec<LineTiming>) -> Self {
        self.lines = lines;
        self
    }

    /// Attach an arguments summary
    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = Some(arguments.into());
        self
    }

    /// Whether this record carries line-level timings
    pub fn is_line_profile(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Sum of per-line durations, in seconds. Always <= `total_duration`
    /// plus tracer overhead tolerance.
    pub fn line_duration_sum(&self) -> f64 {
        self.lines.iter().map(|l| l.duration).sum()
    }
}

/// Milliseconds since the Unix epoch, 0 if the system clock predates it
fn unix_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_duration() {
        let record = ProfileRecord::new("my_func", Duration::from_millis(1500));
        assert_eq!(record.callable, "my_func");
        assert!((record.total_duration - 1.5).abs() < 1e-9);
        assert!(record.timestamp_ms > 0);
        assert!(!record.is_line_profile());
    }

    #[test]
    fn test_with_lines_marks_line_profile() {
        let record = ProfileRecord::new("f", Duration::from_secs(1)).with_lines(vec![LineTiming {
            line_number: 3,
            source_text: "total += i".to_string(),
            duration: 0.25,
            hit_count: 10,
        }]);
        assert!(record.is_line_profile());
        assert!((record.line_duration_sum() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_line_duration_sum_accumulates() {
        let record = ProfileRecord::new("f", Duration::from_secs(1)).with_lines(vec![
            LineTiming {
                line_number: 1,
                source_text: "a".to_string(),
                duration: 0.1,
                hit_count: 1,
            },
            LineTiming {
                line_number: 2,
                source_text: "b".to_string(),
                duration: 0.2,
                hit_count: 2,
            },
        ]);
        assert!((record.line_duration_sum() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let record = ProfileRecord::new("f", Duration::from_secs(1));
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("arguments"));
        assert!(!json.contains("lines"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let record = ProfileRecord::new("f", Duration::from_millis(42))
            .with_arguments("n=10")
            .with_lines(vec![LineTiming {
                line_number: 7,
                source_text: "x * x".to_string(),
                duration: 0.001,
                hit_count: 5,
            }]);
        let json = serde_json::to_string(&record).unwrap();
        let back: ProfileRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
