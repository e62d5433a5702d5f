//! JSON export format for profile records
//!
//! Records serialize as a pretty-printed array of objects with nested line
//! tables, directly from the serde shapes in [`crate::record`].

use crate::error::ProfilerError;
use crate::record::ProfileRecord;

/// Serialize records to a JSON array string
pub fn to_json(records: &[ProfileRecord]) -> Result<String, ProfilerError> {
    Ok(serde_json::to_string_pretty(records)?)
}
