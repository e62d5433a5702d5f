//! Export dispatch: format selection, filename derivation, file writing
//!
//! The serializers themselves live in [`crate::json_output`],
//! [`crate::csv_output`], and [`crate::html_output`]; this module routes a
//! record set to the requested one and handles the filesystem.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::csv_output;
use crate::error::ProfilerError;
use crate::html_output;
use crate::json_output;
use crate::record::ProfileRecord;

/// Serialization target for persisting profile records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Structured array of records with nested line tables
    Json,
    /// Flattened rows with a fixed column header
    Csv,
    /// Minimal self-contained table rendering
    Html,
}

impl ExportFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Html => "html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ProfilerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "html" => Ok(ExportFormat::Html),
            other => Err(ProfilerError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Render records to an in-memory string in the requested format
pub fn render(records: &[ProfileRecord], format: ExportFormat) -> Result<String, ProfilerError> {
    match format {
        ExportFormat::Json => json_output::to_json(records),
        ExportFormat::Csv => Ok(csv_output::to_csv(records)),
        ExportFormat::Html => Ok(html_output::to_html(records)),
    }
}

/// Render records and write them to `path`
///
/// A write failure surfaces as [`ProfilerError::ExportIo`] carrying the path;
/// it is never silently dropped.
pub fn export_to_file(
    records: &[ProfileRecord],
    format: ExportFormat,
    path: &Path,
) -> Result<(), ProfilerError> {
    let body = render(records, format)?;
    fs::write(path, body).map_err(|source| ProfilerError::ExportIo {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), %format, "wrote profile export");
    Ok(())
}

/// Default export path for a callable when no filename is configured
///
/// The identity is sanitized so module paths like `app::compute` produce a
/// plain filename.
pub fn derive_filename(identity: &str, format: ExportFormat) -> PathBuf {
    let stem: String = identity
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    PathBuf::from(format!("{}_profile.{}", stem, format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("html".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
    }

    #[test]
    fn test_unknown_format_is_unsupported() {
        let err = "yaml".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, ProfilerError::UnsupportedFormat(ref s) if s == "yaml"));
    }

    #[test]
    fn test_derive_filename_sanitizes_identity() {
        let path = derive_filename("app::compute", ExportFormat::Json);
        assert_eq!(path, PathBuf::from("app__compute_profile.json"));
    }

    #[test]
    fn test_export_to_missing_directory_is_export_io() {
        let record = ProfileRecord::new("f", Duration::from_millis(1));
        let err = export_to_file(
            &[record],
            ExportFormat::Csv,
            Path::new("/no/such/dir/out.csv"),
        )
        .unwrap_err();
        assert!(matches!(err, ProfilerError::ExportIo { .. }));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let record = ProfileRecord::new("f", Duration::from_millis(1));

        export_to_file(std::slice::from_ref(&record), ExportFormat::Json, &path).unwrap();

        let body = fs::read_to_string(&path).unwrap();
        assert!(body.contains("\"callable\": \"f\""));
    }
}
