//! Parent reconstruction from enter/exit events.

use crate::syntax::{NodeDescriptor, TraversalEvent};

use super::tree::{NodeIndex, SyntaxTree};

/// Stack-based tree construction: the parent of an entered node is whatever
/// is open on top of the stack. Linear overall.
pub struct TreeBuilder {
    tree: SyntaxTree,
    open: Vec<NodeIndex>,
    unmatched_exits: usize,
}

impl TreeBuilder {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            tree: SyntaxTree::new(path),
            open: Vec::with_capacity(32),
            unmatched_exits: 0,
        }
    }

    pub fn enter(&mut self, node: NodeDescriptor) -> NodeIndex {
        let index = self.tree.push(node, self.open.last().copied());
        self.open.push(index);
        index
    }

    /// Close the most recently entered node. An exit with nothing open is
    /// ignored.
    pub fn exit(&mut self) {
        if self.open.pop().is_none() {
            self.unmatched_exits += 1;
        }
    }

    pub fn apply(&mut self, event: TraversalEvent) {
        match event {
            TraversalEvent::Enter(node) => {
                self.enter(node);
            }
            TraversalEvent::Exit => self.exit(),
        }
    }

    /// Nodes still open are closed implicitly.
    pub fn finish(self) -> SyntaxTree {
        if self.unmatched_exits > 0 {
            tracing::debug!(
                path = %self.tree.path(),
                unmatched_exits = self.unmatched_exits,
                "ignored exit events with no open node"
            );
        }
        if !self.open.is_empty() {
            tracing::debug!(
                path = %self.tree.path(),
                open = self.open.len(),
                "closing nodes left open at end of stream"
            );
        }
        self.tree
    }
}

impl Extend<TraversalEvent> for TreeBuilder {
    fn extend<T: IntoIterator<Item = TraversalEvent>>(&mut self, events: T) {
        for event in events {
            self.apply(event);
        }
    }
}
