use std::path::{Path, PathBuf};

use crate::assemble::assemble;
use crate::buffer::SourceBuffer;
use crate::errors::RewriteError;
use crate::excise::{Policy, RewriteRecord, excise};
use crate::marker::is_marker;
use crate::parse::Frontend;
use crate::report::{DiagnosticSink, format_record};
use crate::walk::walk;

/// Engine configuration: what to match and what to do with matches.
#[derive(Debug, Clone)]
pub struct Config {
    /// Substring that identifies decorators of interest.
    pub marker: String,

    /// Strip bodies or report only.
    pub policy: Policy,
}

/// Everything one file's pass produced.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    /// Path the file was read from, kept for reporting.
    pub file: PathBuf,

    /// Rewrite log, in source order.
    pub records: Vec<RewriteRecord>,

    /// Errors collected during the pass. Non-fatal ones skip a single
    /// decorator; fatal ones void the file's output.
    pub errors: Vec<RewriteError>,

    /// Rewritten text under [`Policy::Strip`], absent on a fatal error or
    /// under [`Policy::Inspect`].
    pub output: Option<String>,
}

impl FileOutcome {
    /// True if the file counts as failed for exit-status purposes.
    pub fn failed(&self) -> bool {
        self.errors.iter().any(RewriteError::is_fatal)
    }
}

/// Run the full per-file pass: parse, walk, excise, assemble.
///
/// Pure function of (buffer, config, front-end); nothing is printed and no
/// file is touched. Errors never abort the walk: the tree is traversed to
/// completion and every matched decorator is attempted, so one malformed
/// annotation cannot hide its siblings.
pub fn process_source(
    file: &Path,
    buffer: &SourceBuffer,
    config: &Config,
    frontend: &dyn Frontend,
) -> FileOutcome {
    let mut outcome = FileOutcome {
        file: file.to_path_buf(),
        records: Vec::new(),
        errors: Vec::new(),
        output: None,
    };

    let tree = match frontend.parse(buffer) {
        Ok(tree) => tree,
        Err(e) => {
            outcome.errors.push(e);
            return outcome;
        }
    };
    let Some(root) = tree.root() else {
        outcome.errors.push(RewriteError::ParseFailure {
            reason: "front-end produced a tree without a root".to_string(),
        });
        return outcome;
    };

    // Pre-order walk; matched decorators come out in source order.
    let mut matched = Vec::new();
    walk(&tree, root, &mut |t, id| {
        if is_marker(buffer, t, id, &config.marker) {
            matched.push(id);
        }
    });

    let mut edits = Vec::new();
    for deco in matched {
        match excise(&tree, deco, config.policy, &mut outcome.records) {
            Ok(Some(edit)) => edits.push(edit),
            Ok(None) => {}
            Err(e) => outcome.errors.push(e),
        }
    }

    if config.policy == Policy::Strip {
        match assemble(buffer.text(), &edits) {
            Ok(text) => outcome.output = Some(text),
            Err(e) => outcome.errors.push(e),
        }
    }

    outcome
}

/// Emit one diagnostic line per record and per error, in that order.
pub fn report_outcome(buffer: &SourceBuffer, outcome: &FileOutcome, sink: &mut dyn DiagnosticSink) {
    for record in &outcome.records {
        sink.emit(&format_record(&outcome.file, buffer, record));
    }
    for error in &outcome.errors {
        sink.emit(&format!("{}: {error}", outcome.file.display()));
    }
}
