use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Node kinds the rewriting engine cares about.
///
/// Everything the front-end recognizes but the engine does not act on is
/// folded into `Other` (class declarations, top-level statements, ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NodeKind {
    Decorator,
    MethodDeclaration,
    Block,
    Other,
}

/// Index of a node inside its owning [`SyntaxTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// One syntax node: a kind tag, a byte span, a non-owning parent link,
/// and owned children in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Arena-backed syntax tree.
///
/// Nodes own their children by id; parent links are plain indices used for
/// lookup only, so no reference cycles exist. The tree exclusively owns the
/// node graph for the duration of one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    root: Option<NodeId>,
}

impl SyntaxTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached node and return its id.
    pub fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SyntaxNode {
            kind,
            span,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` to `parent`'s child list and set its parent link.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0 as usize].parent = Some(parent);
        self.nodes[parent.0 as usize].children.push(child);
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0 as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SyntaxNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Parent node id, if any.
    #[allow(dead_code)]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// First child of `id` with the given kind.
    pub fn child_of_kind(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.node(id)
            .children
            .iter()
            .copied()
            .find(|&c| self.node(c).kind == kind)
    }

    /// Recompute every parent link from the child lists, starting at `root`.
    ///
    /// Used after a bottom-up rebuild, where nodes are created before their
    /// final parent exists.
    pub fn fix_parents(&mut self, root: NodeId) {
        self.nodes[root.0 as usize].parent = None;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let children = self.nodes[id.0 as usize].children.clone();
            for child in children {
                self.nodes[child.0 as usize].parent = Some(id);
                stack.push(child);
            }
        }
    }
}
