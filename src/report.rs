use std::path::Path;

use crate::buffer::SourceBuffer;
use crate::excise::RewriteRecord;

/// Destination for diagnostic lines.
///
/// The pipeline never prints on its own; every diagnostic goes through a
/// sink handed in by the caller, which keeps the engine a pure function of
/// (buffer, tree, config). Production uses [`crate::ui::Ui`]; tests use
/// [`CollectSink`].
pub trait DiagnosticSink {
    fn emit(&mut self, line: &str);
}

/// Sink that remembers every line, for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CollectSink {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl DiagnosticSink for CollectSink {
    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Format one rewrite record as `<file> (<line>,<col>): <message>`.
///
/// Line and column are 1-based, derived from the buffer's offset table.
/// Falls back to the raw byte offset for spans past the end of the buffer,
/// which only happens for records fabricated outside a parse.
pub fn format_record(file: &Path, buffer: &SourceBuffer, record: &RewriteRecord) -> String {
    match buffer.line_col(record.span.start) {
        Some((line, col)) => {
            format!("{} ({line},{col}): {}", file.display(), record.message)
        }
        None => format!(
            "{} (offset {}): {}",
            file.display(),
            record.span.start,
            record.message
        ),
    }
}
