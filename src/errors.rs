use serde::Serialize;
use thiserror::Error;

use crate::span::Span;

/// Everything that can go wrong while rewriting one file.
///
/// `ReadFailure`, `ParseFailure`, `OrphanDecorator`, and `MissingBody` are
/// skip-and-report: the batch (and, for the latter two, the rest of the file)
/// continues. `ConflictingEdit` is fatal for the file's rewrite; no output is
/// produced.
#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
pub enum RewriteError {
    #[error("failed to read file: {reason}")]
    ReadFailure { reason: String },

    #[error("parse failure: {reason}")]
    ParseFailure { reason: String },

    #[error("decorator at offset {offset} has no parent node")]
    OrphanDecorator { offset: u32 },

    #[error("annotated method at offset {offset} has no body")]
    MissingBody { offset: u32 },

    #[error(
        "conflicting edits: spans [{}..{}) and [{}..{}) overlap",
        .first.start, .first.end(), .second.start, .second.end()
    )]
    ConflictingEdit { first: Span, second: Span },
}

impl RewriteError {
    /// True if the error invalidates the whole file's rewrite.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RewriteError::ReadFailure { .. }
                | RewriteError::ParseFailure { .. }
                | RewriteError::ConflictingEdit { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        let e = RewriteError::MissingBody { offset: 42 };
        assert_eq!(e.to_string(), "annotated method at offset 42 has no body");

        let e = RewriteError::ConflictingEdit {
            first: Span::new(3, 4),
            second: Span::new(5, 10),
        };
        assert_eq!(
            e.to_string(),
            "conflicting edits: spans [3..7) and [5..15) overlap"
        );
    }

    #[test]
    fn read_parse_and_conflict_are_fatal() {
        assert!(
            RewriteError::ReadFailure {
                reason: "x".to_string()
            }
            .is_fatal()
        );
        assert!(
            RewriteError::ParseFailure {
                reason: "x".to_string()
            }
            .is_fatal()
        );
        assert!(
            RewriteError::ConflictingEdit {
                first: Span::new(0, 2),
                second: Span::new(1, 2),
            }
            .is_fatal()
        );
        assert!(!RewriteError::OrphanDecorator { offset: 0 }.is_fatal());
        assert!(!RewriteError::MissingBody { offset: 0 }.is_fatal());
    }
}
