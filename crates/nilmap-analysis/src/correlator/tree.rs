//! Arena-backed syntax tree for one file.

use serde::Serialize;

use nilmap_core::types::SmallVec4;

use crate::syntax::{NodeDescriptor, NodeId, NodeKind, Span};

/// Position of a node in its file's arena. Visitation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// A node with its reconstructed links. `parent` is a lookup, not ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeIndex>,
    /// Insertion order = traversal order.
    pub children: SmallVec4<NodeIndex>,
}

/// All nodes of one file, built once during correlation and never mutated
/// afterward.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyntaxTree {
    path: String,
    nodes: Vec<SyntaxNode>,
    roots: Vec<NodeIndex>,
}

impl SyntaxTree {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(path: impl Into<String>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            nodes: Vec::with_capacity(capacity),
            roots: Vec::new(),
        }
    }

    /// Append a visited node and link it to `parent` both ways.
    pub(crate) fn push(&mut self, node: NodeDescriptor, parent: Option<NodeIndex>) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        match parent.and_then(|p| self.nodes.get_mut(p.as_usize())) {
            Some(parent_node) => parent_node.children.push(index),
            None => self.roots.push(index),
        }
        self.nodes.push(SyntaxNode {
            id: node.id,
            kind: node.kind,
            span: node.span,
            parent: parent.filter(|p| p.as_usize() < index.as_usize()),
            children: SmallVec4::new(),
        });
        index
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: NodeIndex) -> Option<&SyntaxNode> {
        self.nodes.get(index.as_usize())
    }

    /// Panics on an index from another tree.
    pub fn node(&self, index: NodeIndex) -> &SyntaxNode {
        &self.nodes[index.as_usize()]
    }

    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.get(index).and_then(|n| n.parent)
    }

    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.get(index)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    /// Nodes in visitation order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NodeIndex, &SyntaxNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeIndex(i as u32), n))
    }

    /// Where `index` sits among its parent's children.
    pub fn child_position(&self, index: NodeIndex) -> Option<usize> {
        let parent = self.parent(index)?;
        self.children(parent).iter().position(|&c| c == index)
    }
}
