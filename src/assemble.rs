use crate::errors::RewriteError;
use crate::span::Span;

/// One textual replacement, produced by the excisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Byte span of `code` to replace.
    pub span: Span,

    /// Replacement text (empty for a strip).
    pub replacement: String,
}

/// Splice all edits into `code` in one left-to-right pass.
///
/// Edits are sorted by start offset first; overlapping spans are a
/// [`RewriteError::ConflictingEdit`] and produce no output. Offsets always
/// refer to the original `code`, so earlier edits never invalidate later
/// ones. With zero edits the input comes back byte-identical.
pub fn assemble(code: &str, edits: &[Edit]) -> Result<String, RewriteError> {
    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by_key(|e| e.span.start);

    for pair in ordered.windows(2) {
        if pair[0].span.overlaps(&pair[1].span) {
            return Err(RewriteError::ConflictingEdit {
                first: pair[0].span,
                second: pair[1].span,
            });
        }
    }

    if let Some(last) = ordered.last() {
        debug_assert!(
            last.span.end() as usize <= code.len(),
            "edit span [{}, {}) is out of bounds for code length {}",
            last.span.start,
            last.span.end(),
            code.len()
        );
    }

    let mut out = String::with_capacity(code.len());
    let mut cursor = 0usize;
    for edit in ordered {
        out.push_str(&code[cursor..edit.span.start as usize]);
        out.push_str(&edit.replacement);
        cursor = edit.span.end() as usize;
    }
    out.push_str(&code[cursor..]);

    Ok(out)
}
