//! Conversion summary and reporting
//!
//! This module defines structures for tracking and reporting conversion results.

use crate::domain::Fast5Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Granularity of a conversion failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A whole source file was skipped
    File,
    /// A single read was skipped
    Read,
}

/// One logged conversion failure
#[derive(Debug, Clone)]
pub struct ConversionFailure {
    /// Granularity of the failure
    pub kind: FailureKind,

    /// Source file the failure belongs to
    pub source_path: PathBuf,

    /// Read id, for read-level failures
    pub read_id: Option<String>,

    /// Root cause
    pub message: String,
}

/// Summary of a conversion run
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    /// Number of source files discovered
    pub files_discovered: usize,

    /// Number of source files skipped because they could not be opened or listed
    pub files_failed: usize,

    /// Reads counted upfront, used to size progress
    pub reads_expected: u64,

    /// Reads attempted; equals the final value of the global read counter
    pub reads_attempted: u64,

    /// Reads written to a single-read file
    pub reads_converted: u64,

    /// Reads skipped after a failure
    pub reads_failed: u64,

    /// Duration of the run
    pub duration: Duration,

    /// Every file- and read-level failure, in the order encountered
    pub failures: Vec<ConversionFailure>,
}

impl ConversionSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self {
            files_discovered: 0,
            files_failed: 0,
            reads_expected: 0,
            reads_attempted: 0,
            reads_converted: 0,
            reads_failed: 0,
            duration: Duration::from_secs(0),
            failures: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a converted read
    pub fn add_converted(&mut self) {
        self.reads_converted += 1;
    }

    /// Record a skipped read
    pub fn add_read_failure(&mut self, source_path: &Path, read_id: &str, error: &Fast5Error) {
        self.reads_failed += 1;
        self.failures.push(ConversionFailure {
            kind: FailureKind::Read,
            source_path: source_path.to_path_buf(),
            read_id: Some(read_id.to_string()),
            message: error.to_string(),
        });
    }

    /// Record a skipped source file
    pub fn add_file_failure(&mut self, source_path: &Path, error: &Fast5Error) {
        self.files_failed += 1;
        self.failures.push(ConversionFailure {
            kind: FailureKind::File,
            source_path: source_path.to_path_buf(),
            read_id: None,
            message: error.to_string(),
        });
    }

    /// Check if the run completed without any failure
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty()
    }

    /// Get success rate as a percentage of attempted reads
    pub fn success_rate(&self) -> f64 {
        if self.reads_attempted == 0 {
            return 100.0;
        }
        (self.reads_converted as f64 / self.reads_attempted as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            files_discovered = self.files_discovered,
            files_failed = self.files_failed,
            reads_attempted = self.reads_attempted,
            reads_converted = self.reads_converted,
            reads_failed = self.reads_failed,
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Conversion completed"
        );

        if !self.failures.is_empty() {
            tracing::warn!(
                failure_count = self.failures.len(),
                "Conversion completed with failures"
            );
        }
    }
}

impl Default for ConversionSummary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_creation() {
        let summary = ConversionSummary::new();

        assert_eq!(summary.files_discovered, 0);
        assert_eq!(summary.reads_attempted, 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(summary.failures.is_empty());
        assert!(summary.is_successful());
    }

    #[test]
    fn test_summary_with_duration() {
        let summary = ConversionSummary::new().with_duration(Duration::from_secs(90));
        assert_eq!(summary.duration, Duration::from_secs(90));
    }

    #[test]
    fn test_summary_records_failures() {
        let mut summary = ConversionSummary::new();
        let path = Path::new("/data/run.fast5");

        summary.add_read_failure(
            path,
            "r1",
            &Fast5Error::Remap {
                read_id: "r1".to_string(),
                reason: "no read_number".to_string(),
            },
        );
        summary.add_file_failure(path, &Fast5Error::Discovery("gone".to_string()));

        assert_eq!(summary.reads_failed, 1);
        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.failures.len(), 2);
        assert_eq!(summary.failures[0].kind, FailureKind::Read);
        assert_eq!(summary.failures[0].read_id.as_deref(), Some("r1"));
        assert!(summary.failures[0].message.contains("no read_number"));
        assert_eq!(summary.failures[1].kind, FailureKind::File);
        assert!(summary.failures[1].read_id.is_none());
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_summary_success_rate() {
        let mut summary = ConversionSummary::new();
        assert_eq!(summary.success_rate(), 100.0);

        summary.reads_attempted = 8;
        summary.reads_converted = 6;
        assert_eq!(summary.success_rate(), 75.0);
    }
}
