use crate::span::Span;

/// Immutable owner of one input file's text.
///
/// The line-start offset table is computed once at construction so that
/// byte offsets can be mapped back to positions without rescanning the text.
/// Rewrites never touch a live buffer; they produce a new one.
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    text: String,
    line_starts: Vec<u32>,
}

impl SourceBuffer {
    pub fn new(text: String) -> Self {
        let mut line_starts = vec![0u32];
        for (idx, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push((idx + 1) as u32);
            }
        }
        Self { text, line_starts }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> u32 {
        self.text.len() as u32
    }

    /// Raw text covered by `span`.
    ///
    /// `span` must lie inside the buffer on UTF-8 boundaries; spans produced
    /// by the front-end always do.
    pub fn slice(&self, span: Span) -> &str {
        &self.text[span.start as usize..span.end() as usize]
    }

    /// Convert a byte offset into a 1-based (line, column) position.
    ///
    /// Column counts Unicode scalar values on the line segment. Returns
    /// `None` for offsets past the end of the buffer.
    pub fn line_col(&self, offset: u32) -> Option<(usize, usize)> {
        if offset > self.len() {
            return None;
        }

        let line_idx = self.line_starts.partition_point(|&s| s <= offset) - 1;
        let line_start = self.line_starts[line_idx] as usize;
        let col = self.text[line_start..offset as usize].chars().count() + 1;

        Some((line_idx + 1, col))
    }
}
