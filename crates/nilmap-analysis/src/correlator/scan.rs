//! Parent reconstruction from a flat pre-order stream.

use crate::syntax::NodeDescriptor;

use super::tree::{NodeIndex, SyntaxTree};

/// Rebuilds parents when the source only yields a flat pre-order stream.
pub struct TreeCorrelator;

impl TreeCorrelator {
    /// For each node, scan the already-visited nodes backward and take the
    /// first one whose span contains it. None found means a root.
    ///
    /// O(n) per node. Spans are assumed well nested; overlapping spans may
    /// yield a wrong or missing parent for the affected node only.
    pub fn from_preorder<I>(path: impl Into<String>, nodes: I) -> SyntaxTree
    where
        I: IntoIterator<Item = NodeDescriptor>,
    {
        let nodes = nodes.into_iter();
        let mut tree = SyntaxTree::with_capacity(path, nodes.size_hint().0);
        for node in nodes {
            let parent = Self::nearest_container(&tree, &node);
            tree.push(node, parent);
        }
        tree
    }

    /// Parent a single candidate would get, given the nodes visited so far.
    pub fn nearest_container(tree: &SyntaxTree, node: &NodeDescriptor) -> Option<NodeIndex> {
        tree.iter()
            .rev()
            .find(|(_, visited)| visited.span.contains(&node.span))
            .map(|(index, _)| index)
    }
}
