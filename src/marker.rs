use crate::buffer::SourceBuffer;
use crate::tree::{NodeId, NodeKind, SyntaxTree};

/// True if `node` is a decorator whose raw text contains `marker`.
///
/// This is a substring test, not an exact-name match, so call-style
/// decorators with arguments (`@remote({on: 'server'})`) still match. The
/// flip side is that a decorator whose name merely contains the marker
/// (`@remoteControl` for marker `remote`) also matches; that imprecision is
/// part of the contract and pinned down by a test below.
pub fn is_marker(buffer: &SourceBuffer, tree: &SyntaxTree, node: NodeId, marker: &str) -> bool {
    let n = tree.node(node);
    n.kind == NodeKind::Decorator && buffer.slice(n.span).contains(marker)
}
