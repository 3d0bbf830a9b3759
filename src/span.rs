use serde::{Deserialize, Serialize};

/// Byte span inside a source buffer.
///
/// `start` is a byte offset into the text, `len` the width in bytes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: u32,

    /// Width in bytes.
    pub len: u32,
}

impl Span {
    pub fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// End byte offset (exclusive).
    pub fn end(&self) -> u32 {
        self.start + self.len
    }

    /// True if `other` lies entirely inside this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }

    /// True if the spans cannot be applied side by side: they share at least
    /// one byte, or one is a zero-width span strictly inside the other.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}
