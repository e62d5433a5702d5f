//! CSV export format for profile records
//!
//! Line profiles flatten to one row per line timing under the header
//! `line_number,source_text,duration,hit_count`. Whole-function profiles use
//! `callable,total_duration` with one row per record. A record set containing
//! any line profile uses the line-level shape.

use crate::record::ProfileRecord;

/// Header for flattened line-timing rows
pub const LINE_HEADER: &str = "line_number,source_text,duration,hit_count";

/// Header for whole-function profile rows
pub const FUNCTION_HEADER: &str = "callable,total_duration";

/// Render records as CSV with a fixed column header
pub fn to_csv(records: &[ProfileRecord]) -> String {
    let mut output = String::new();

    if records.iter().any(ProfileRecord::is_line_profile) {
        output.push_str(LINE_HEADER);
        output.push('\n');
        for record in records {
            for line in &record.lines {
                output.push_str(&format!(
                    "{},{},{:.9},{}\n",
                    line.line_number,
                    escape_field(&line.source_text),
                    line.duration,
                    line.hit_count
                ));
            }
        }
    } else {
        output.push_str(FUNCTION_HEADER);
        output.push('\n');
        for record in records {
            output.push_str(&format!(
                "{},{:.9}\n",
                escape_field(&record.callable),
                record.total_duration
            ));
        }
    }

    output
}

/// Escape a CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
