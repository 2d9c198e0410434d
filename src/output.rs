//! Run reporting: per-file CSV records and the end-of-run summary.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, error, info};

use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Outcome of one processed input file, one CSV row in the report.
#[derive(Debug, Default, Serialize)]
pub struct ConversionRecord {
    pub file: String,
    pub station: Option<&'static str>,
    pub parameter: Option<&'static str>,
    pub samples: usize,
    pub warnings: u32,
    pub status: &'static str,
    pub error: Option<String>,
}

impl ConversionRecord {
    pub fn ok(
        file: &Path,
        station: &'static str,
        parameter: &'static str,
        samples: usize,
        warnings: u32,
    ) -> Self {
        Self {
            file: file.display().to_string(),
            station: Some(station),
            parameter: Some(parameter),
            samples,
            warnings,
            status: "ok",
            error: None,
        }
    }

    pub fn failed(file: &Path, error: String) -> Self {
        Self {
            file: file.display().to_string(),
            status: "failed",
            error: Some(error),
            ..Self::default()
        }
    }
}

/// Counters for one whole run.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub files: usize,
    pub ok_files: usize,
    pub failed_files: usize,
    pub output_files: usize,
    pub warnings: u32,
}

impl RunSummary {
    /// Process exit code: number of failed files, capped at 255.
    pub fn exit_code(&self) -> i32 {
        self.failed_files.min(255) as i32
    }

    /// Logs the run summary; a run with failures logs at error level.
    pub fn log(&self) {
        if self.failed_files > 0 {
            error!(
                files = self.files,
                ok = self.ok_files,
                failed = self.failed_files,
                "conversion finished with errors"
            );
        } else {
            info!(
                files = self.files,
                ok = self.ok_files,
                output_files = self.output_files,
                warnings = self.warnings,
                "conversion finished"
            );
        }
    }
}

/// Logs a run summary as pretty-printed JSON.
pub fn print_json(summary: &RunSummary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Appends a [`ConversionRecord`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, record: &ConversionRecord) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_print_json_does_not_panic() {
        let summary = RunSummary::default();
        print_json(&summary).unwrap();
    }

    #[test]
    fn test_exit_code() {
        let mut summary = RunSummary::default();
        assert_eq!(summary.exit_code(), 0);
        summary.failed_files = 3;
        assert_eq!(summary.exit_code(), 3);
        summary.failed_files = 1000;
        assert_eq!(summary.exit_code(), 255);
    }

    #[test]
    fn test_append_record_creates_file() {
        let path = temp_path("ebas_convert_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        let record = ConversionRecord::failed(Path::new("in.txt"), "boom".to_string());
        append_record(&path, &record).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_writes_header_once() {
        let path = temp_path("ebas_convert_test_header.csv");
        let _ = fs::remove_file(&path);

        let record = ConversionRecord::ok(Path::new("in.txt"), "NO0042G", "ethane", 2, 0);
        append_record(&path, &record).unwrap();
        append_record(&path, &record).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Header line should appear exactly once
        let header_count = content.lines().filter(|l| l.contains("status")).count();
        assert_eq!(header_count, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_two_rows() {
        let path = temp_path("ebas_convert_test_rows.csv");
        let _ = fs::remove_file(&path);

        let record = ConversionRecord::ok(Path::new("in.txt"), "NO0042G", "ethane", 2, 1);
        append_record(&path, &record).unwrap();
        append_record(&path, &record).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // 1 header + 2 data rows = 3 lines (last may be empty due to trailing newline)
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);

        fs::remove_file(&path).unwrap();
    }
}
