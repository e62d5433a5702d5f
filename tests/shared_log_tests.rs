// Integration tests for the shared log accessors consumed by external
// callers: read, clear, and per-identity export.

use std::sync::Arc;
use std::time::Duration;

use funcprofiler::{
    function_profile, line_profile, trace_line, ExportFormat, ProfileConfig, ProfileRecord,
    SharedLog,
};

#[test]
fn test_mixed_wrappers_share_one_store() {
    let log = Arc::new(SharedLog::new());
    let config = ProfileConfig::new().shared_log(Arc::clone(&log));

    function_profile("whole", &config, || 1).unwrap();
    line_profile("lines", &config, || trace_line!(2)).unwrap();

    assert_eq!(log.identities(), vec!["lines", "whole"]);
    assert!(!log.records("whole")[0].is_line_profile());
    assert!(log.records("lines")[0].is_line_profile());
}

#[test]
fn test_clear_by_identity_then_clear_all() {
    let log = SharedLog::new();
    log.append(ProfileRecord::new("a", Duration::from_millis(1)));
    log.append(ProfileRecord::new("b", Duration::from_millis(1)));

    log.clear("a");
    assert!(log.records("a").is_empty());
    assert_eq!(log.record_count("b"), 1);

    log.clear_all();
    assert!(log.identities().is_empty());
}

#[test]
fn test_export_by_identity_only_includes_that_identity() {
    let log = Arc::new(SharedLog::new());
    let config = ProfileConfig::new().shared_log(Arc::clone(&log));

    function_profile("wanted", &config, || ()).unwrap();
    function_profile("unwanted", &config, || ()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wanted.json");
    log.export("wanted", ExportFormat::Json, &path).unwrap();

    let body = std::fs::read_to_string(&path).unwrap();
    assert!(body.contains("wanted"));
    assert!(!body.contains("unwanted"));
}

#[test]
fn test_store_is_never_trimmed_automatically() {
    let log = Arc::new(SharedLog::new());
    let config = ProfileConfig::new().shared_log(Arc::clone(&log));

    for _ in 0..500 {
        function_profile("bulk", &config, || ()).unwrap();
    }
    assert_eq!(log.record_count("bulk"), 500);
}

#[test]
fn test_two_stores_are_independent() {
    let first = Arc::new(SharedLog::new());
    let second = Arc::new(SharedLog::new());

    let config_first = ProfileConfig::new().shared_log(Arc::clone(&first));
    let config_second = ProfileConfig::new().shared_log(Arc::clone(&second));

    function_profile("f", &config_first, || ()).unwrap();
    function_profile("f", &config_second, || ()).unwrap();
    function_profile("f", &config_second, || ()).unwrap();

    assert_eq!(first.record_count("f"), 1);
    assert_eq!(second.record_count("f"), 2);
}
