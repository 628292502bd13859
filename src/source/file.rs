//! File-based intake source.
//!
//! Polls a JSON file for intake records.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{IntakeRecord, IntakeSource};
use crate::data::ReadingSet;

/// An intake source that reads readings from a JSON file.
///
/// A device bridge (or a text editor) writes an [`IntakeRecord`] to the file
/// and this source polls it. The source tracks the file's modification time
/// and only returns new data when the file has been updated.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    /// Read and parse the file.
    fn read_file(&mut self) -> Option<ReadingSet> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                return None;
            }
        };

        let record: IntakeRecord = match serde_json::from_str(&content) {
            Ok(record) => record,
            Err(e) => {
                self.last_error = Some(format!("Parse error: {}", e));
                return None;
            }
        };

        match record.into_readings() {
            Ok(readings) => {
                self.last_error = None;
                tracing::debug!(path = %self.path.display(), readings = readings.len(), "read intake file");
                Some(readings)
            }
            Err(e) => {
                self.last_error = Some(format!("Parse error: {}", e));
                None
            }
        }
    }
}

impl IntakeSource for FileSource {
    fn poll(&mut self) -> Option<ReadingSet> {
        let current_modified = self.get_modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, keep last readings
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            if let Some(readings) = self.read_file() {
                self.last_modified = current_modified;
                return Some(readings);
            }
        }

        None
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Metric;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "heart_rate": 75,
            "blood_pressure": "120/80",
            "weight": 70.0,
            "sleep_hours": 7.0,
            "steps": 10000
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/readings.json");
        assert_eq!(source.path(), Path::new("/tmp/readings.json"));
        assert_eq!(source.description(), "file: /tmp/readings.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_poll_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        // First poll should return data
        let readings = source.poll().unwrap();
        assert_eq!(readings.len(), 6);
        assert_eq!(readings.get(Metric::DiastolicBp), Some(80.0));

        // Second poll without file change should return None
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/readings.json");

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Read error"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Parse error"));
    }

    #[test]
    fn test_file_source_invalid_blood_pressure() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"blood_pressure": "120"}}"#).unwrap();

        let mut source = FileSource::new(file.path());

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("invalid blood pressure"));
    }
}
