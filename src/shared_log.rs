//! Process-wide shared log of profile records
//!
//! An explicitly constructed, injectable store: callers create one (usually
//! wrapped in `Arc`) and configure which store a profiling wrapper appends
//! to. Records accumulate per callable identity in call order and are never
//! trimmed automatically; callers export and clear explicitly.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::ProfilerError;
use crate::export::{self, ExportFormat};
use crate::record::ProfileRecord;

/// Append-only history of profile records, keyed by callable identity
///
/// A single store-wide mutex serializes appends, so records from concurrent
/// calls are never lost or interleaved, and reads observe a consistent
/// snapshot.
#[derive(Debug, Default)]
pub struct SharedLog {
    records: Mutex<HashMap<String, Vec<ProfileRecord>>>,
}

impl SharedLog {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock poisons it; the map itself is still
    // consistent (appends are single push operations), so recover it rather
    // than dropping the history.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<ProfileRecord>>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a record under its callable identity
    pub fn append(&self, record: ProfileRecord) {
        let mut map = self.lock();
        map.entry(record.callable.clone()).or_default().push(record);
    }

    /// Snapshot of all records for one identity, in call order
    pub fn records(&self, identity: &str) -> Vec<ProfileRecord> {
        self.lock().get(identity).cloned().unwrap_or_default()
    }

    /// Number of records held for one identity
    pub fn record_count(&self, identity: &str) -> usize {
        self.lock().get(identity).map_or(0, Vec::len)
    }

    /// All identities with at least one record, sorted
    pub fn identities(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Remove accumulated history for one identity
    pub fn clear(&self, identity: &str) {
        self.lock().remove(identity);
    }

    /// Remove all accumulated history
    pub fn clear_all(&self) {
        self.lock().clear();
    }

    /// Serialize all records for one identity to a file
    pub fn export(
        &self,
        identity: &str,
        format: ExportFormat,
        path: &Path,
    ) -> Result<(), ProfilerError> {
        let snapshot = self.records(identity);
        export::export_to_file(&snapshot, format, path)
    }
}
