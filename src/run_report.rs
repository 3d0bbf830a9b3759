use std::path::PathBuf;

use serde::Serialize;

use crate::errors::RewriteError;
use crate::excise::RewriteRecord;
use crate::pipeline::FileOutcome;

/// Summary counts for one run over a batch of files.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunSummary {
    /// Files processed without a fatal error.
    pub files_ok: usize,

    /// Files with a parse failure or conflicting edit (no output produced).
    pub files_failed: usize,

    /// Total rewrite records across all files.
    pub rewrites: usize,

    /// Total errors reported across all files, fatal or not.
    pub errors: usize,
}

/// Per-file slice of the machine-readable report.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: PathBuf,
    pub records: Vec<RewriteRecord>,
    pub errors: Vec<RewriteError>,
    pub failed: bool,
}

impl FileReport {
    pub fn from_outcome(outcome: &FileOutcome) -> Self {
        Self {
            file: outcome.file.clone(),
            records: outcome.records.clone(),
            errors: outcome.errors.clone(),
            failed: outcome.failed(),
        }
    }
}

/// Machine-readable report for a whole run.
///
/// In `--json` mode this is printed to stdout as pretty JSON; all human
/// output moves to stderr so stdout stays parseable.
#[derive(Debug, Serialize)]
pub struct RewriteRunReport {
    /// Tool name, stable across versions.
    pub tool: &'static str,

    /// Current crate version.
    pub version: &'static str,

    /// Marker the run matched against.
    pub marker: String,

    /// Per-file outcomes in processing order.
    pub files: Vec<FileReport>,

    /// Aggregate counts.
    pub summary: RunSummary,
}

impl RewriteRunReport {
    pub fn new(marker: String) -> Self {
        Self {
            tool: "deco-strip",
            version: env!("CARGO_PKG_VERSION"),
            marker,
            files: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    /// Fold one file's outcome into the report.
    pub fn push(&mut self, outcome: &FileOutcome) {
        let report = FileReport::from_outcome(outcome);
        if report.failed {
            self.summary.files_failed += 1;
        } else {
            self.summary.files_ok += 1;
        }
        self.summary.rewrites += report.records.len();
        self.summary.errors += report.errors.len();
        self.files.push(report);
    }

    /// Record a file that could not even be read.
    pub fn push_read_failure(&mut self, file: PathBuf, reason: String) {
        self.summary.files_failed += 1;
        self.summary.errors += 1;
        self.files.push(FileReport {
            file,
            records: Vec::new(),
            errors: vec![RewriteError::ReadFailure { reason }],
            failed: true,
        });
    }

    pub fn any_failed(&self) -> bool {
        self.summary.files_failed > 0
    }
}
