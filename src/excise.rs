use serde::Serialize;

use crate::assemble::Edit;
use crate::errors::RewriteError;
use crate::span::Span;
use crate::tree::{NodeId, NodeKind, SyntaxTree};

/// Fixed diagnostic message for every excision.
pub const REMOVAL_MESSAGE: &str = "annotated code removed";

/// What to do with a matched method body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Remove the body interior, keeping the delimiters.
    Strip,

    /// Report matches only; the text is left unchanged.
    Inspect,
}

/// One entry of the rewrite log: where a change happened and why.
///
/// Records are appended in visit order, which is source order for the
/// pre-order walk driving the pipeline. Lifetime = one rewrite pass.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RewriteRecord {
    /// Span of the decorator that triggered the excision.
    pub span: Span,

    /// Human-readable reason.
    pub message: String,
}

/// Locate the body of the method a matched decorator is attached to and
/// compute the minimal edit that empties it.
///
/// The target is found structurally, never by traversal order: the
/// decorator's parent must be a `MethodDeclaration`, and the body is that
/// parent's first `Block` child. The returned edit covers the block interior
/// only; exactly one delimiter byte at each end is excluded so the braces
/// survive the rewrite.
///
/// On success a [`RewriteRecord`] is appended at the decorator's start
/// offset. Under [`Policy::Inspect`] no edit is produced.
pub fn excise(
    tree: &SyntaxTree,
    decorator: NodeId,
    policy: Policy,
    records: &mut Vec<RewriteRecord>,
) -> Result<Option<Edit>, RewriteError> {
    let deco = tree.node(decorator);

    let Some(parent) = deco.parent else {
        return Err(RewriteError::OrphanDecorator {
            offset: deco.span.start,
        });
    };

    let body = if tree.node(parent).kind == NodeKind::MethodDeclaration {
        tree.child_of_kind(parent, NodeKind::Block)
    } else {
        None
    };
    let Some(body) = body else {
        return Err(RewriteError::MissingBody {
            offset: deco.span.start,
        });
    };

    let block_span = tree.node(body).span;
    let target = Span::new(block_span.start + 1, block_span.len.saturating_sub(2));
    debug_assert!(
        block_span.contains(&target),
        "excision target {target:?} escapes its block {block_span:?}"
    );

    records.push(RewriteRecord {
        span: deco.span,
        message: REMOVAL_MESSAGE.to_string(),
    });

    match policy {
        Policy::Strip => Ok(Some(Edit {
            span: target,
            replacement: String::new(),
        })),
        Policy::Inspect => Ok(None),
    }
}
