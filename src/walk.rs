use crate::tree::{NodeId, SyntaxTree};

/// Depth-first pre-order traversal.
///
/// Visits every node reachable from `root` exactly once, the root included,
/// in source order. The visitor's return value is ignored; this is the
/// read-only inspection mode.
pub fn walk<F>(tree: &SyntaxTree, root: NodeId, visitor: &mut F)
where
    F: FnMut(&SyntaxTree, NodeId),
{
    visitor(tree, root);
    // Child lists are cheap to clone (small Vec<NodeId>), and cloning keeps
    // the visitor free to borrow the tree.
    let children = tree.node(root).children.clone();
    for child in children {
        walk(tree, child, visitor);
    }
}

/// Bottom-up tree rebuild.
///
/// Constructs a new tree: each node's children are rebuilt first, then the
/// node is created in the new arena with its rebuilt children attached, then
/// the visitor runs on it and returns a replacement id (possibly the node
/// itself). The input tree is never mutated, so no traversal ever observes a
/// half-updated graph. A node's decision can depend only on its own data and
/// its already-transformed children, never on unvisited siblings.
///
/// The walker does not validate structural well-formedness of replacements;
/// that responsibility belongs to the visitor.
#[allow(dead_code)]
pub fn rebuild<F>(tree: &SyntaxTree, root: NodeId, visitor: &mut F) -> SyntaxTree
where
    F: FnMut(&mut SyntaxTree, NodeId) -> NodeId,
{
    let mut out = SyntaxTree::new();
    let new_root = rebuild_node(tree, root, &mut out, visitor);
    out.set_root(new_root);
    out.fix_parents(new_root);
    out
}

fn rebuild_node<F>(tree: &SyntaxTree, id: NodeId, out: &mut SyntaxTree, visitor: &mut F) -> NodeId
where
    F: FnMut(&mut SyntaxTree, NodeId) -> NodeId,
{
    let node = tree.node(id);

    let mut new_children = Vec::with_capacity(node.children.len());
    for &child in &node.children {
        new_children.push(rebuild_node(tree, child, out, visitor));
    }

    let candidate = out.push(node.kind, node.span);
    out.node_mut(candidate).children = new_children;

    visitor(out, candidate)
}
