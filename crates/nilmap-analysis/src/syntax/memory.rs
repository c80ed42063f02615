//! In-memory syntax source.
//!
//! `MemorySource` is an owned, serializable snapshot of one parsed and
//! type-checked file. A front end can emit it as JSON; `MemorySourceBuilder`
//! assembles one structurally, laying out spans itself.

use std::path::Path;

use serde::{Deserialize, Serialize};

use nilmap_core::errors::SourceError;
use nilmap_core::types::FxHashMap;

use super::line_index::LineIndex;
use super::source::{SyntaxSource, TypeOracle};
use super::types::{
    AssignForm, NodeDescriptor, NodeId, NodeKind, Span, Traversal, TraversalEvent, TypeDescriptor,
};

/// One node of a `MemorySource`, stored in pre-order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub span: Span,
    /// Static type of the node, if it is an expression the oracle knows.
    #[serde(default)]
    pub ty: TypeDescriptor,
    /// Nesting depth (root = 0). Required for event traversal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

impl MemoryNode {
    fn descriptor(&self) -> NodeDescriptor {
        NodeDescriptor::new(self.id, self.kind.clone(), self.span)
    }
}

/// Which traversal a `MemorySource` hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalShape {
    /// Events when every node carries a depth, pre-order otherwise.
    #[default]
    Auto,
    Preorder,
    Events,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MemorySourceData {
    path: String,
    #[serde(default)]
    line_starts: Vec<u32>,
    nodes: Vec<MemoryNode>,
    #[serde(default)]
    shape: TraversalShape,
}

/// Owned syntax source: pre-order nodes, their types, and line starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "MemorySourceData", into = "MemorySourceData")]
pub struct MemorySource {
    path: String,
    line_index: LineIndex,
    nodes: Vec<MemoryNode>,
    types: FxHashMap<NodeId, TypeDescriptor>,
    shape: TraversalShape,
}

impl MemorySource {
    pub fn new(path: impl Into<String>, line_index: LineIndex, nodes: Vec<MemoryNode>) -> Self {
        let types = nodes
            .iter()
            .filter(|n| n.ty != TypeDescriptor::Unknown)
            .map(|n| (n.id, n.ty))
            .collect();
        Self {
            path: path.into(),
            line_index,
            nodes,
            types,
            shape: TraversalShape::Auto,
        }
    }

    /// Decode a JSON syntax dump.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        serde_json::from_str(json).map_err(|e| SourceError::Decode {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Read and decode a JSON syntax dump from disk.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| SourceError::Decode {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn with_shape(mut self, shape: TraversalShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn nodes(&self) -> &[MemoryNode] {
        &self.nodes
    }

    pub fn shape(&self) -> TraversalShape {
        self.shape
    }

    fn has_depths(&self) -> bool {
        self.nodes.iter().all(|n| n.depth.is_some())
    }
}

impl From<MemorySourceData> for MemorySource {
    fn from(data: MemorySourceData) -> Self {
        Self::new(
            data.path,
            LineIndex::from_line_starts(data.line_starts),
            data.nodes,
        )
        .with_shape(data.shape)
    }
}

impl From<MemorySource> for MemorySourceData {
    fn from(source: MemorySource) -> Self {
        Self {
            path: source.path,
            line_starts: source.line_index.line_starts().to_vec(),
            nodes: source.nodes,
            shape: source.shape,
        }
    }
}

impl TypeOracle for MemorySource {
    fn type_of(&self, node: NodeId) -> TypeDescriptor {
        self.types.get(&node).copied().unwrap_or_default()
    }
}

impl SyntaxSource for MemorySource {
    fn path(&self) -> &str {
        &self.path
    }

    fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    fn traversal(&self) -> Traversal<'_> {
        let events = match self.shape {
            TraversalShape::Auto => self.has_depths(),
            TraversalShape::Events if !self.has_depths() => {
                tracing::debug!(path = %self.path, "nodes lack depths, using pre-order traversal");
                false
            }
            TraversalShape::Events => true,
            TraversalShape::Preorder => false,
        };
        if events {
            Traversal::Events(Box::new(DepthEvents {
                nodes: self.nodes.iter(),
                pending: None,
                open: 0,
            }))
        } else {
            Traversal::Preorder(Box::new(self.nodes.iter().map(MemoryNode::descriptor)))
        }
    }
}

/// Turns pre-order nodes with depths into enter/exit events.
struct DepthEvents<'a> {
    nodes: std::slice::Iter<'a, MemoryNode>,
    pending: Option<&'a MemoryNode>,
    open: u32,
}

impl Iterator for DepthEvents<'_> {
    type Item = TraversalEvent;

    fn next(&mut self) -> Option<TraversalEvent> {
        loop {
            if let Some(node) = self.pending {
                if self.open > node.depth.unwrap_or(0) {
                    self.open -= 1;
                    return Some(TraversalEvent::Exit);
                }
                self.pending = None;
                self.open += 1;
                return Some(TraversalEvent::Enter(node.descriptor()));
            }
            match self.nodes.next() {
                Some(node) => self.pending = Some(node),
                None if self.open > 0 => {
                    self.open -= 1;
                    return Some(TraversalEvent::Exit);
                }
                None => return None,
            }
        }
    }
}

/// Assembles a `MemorySource` from nested closures.
///
/// Layout: every inner node takes one offset before and one after its
/// children, so parents strictly contain children. Identifiers are as wide
/// as their name. Each `stmt` starts a new line; the first one is line 1.
pub struct MemorySourceBuilder {
    path: String,
    nodes: Vec<MemoryNode>,
    line_starts: Vec<u32>,
    cursor: u32,
    depth: u32,
    next_id: u32,
}

impl MemorySourceBuilder {
    pub fn new(path: impl Into<String>) -> Self {
        let mut builder = Self {
            path: path.into(),
            nodes: Vec::new(),
            line_starts: vec![0],
            cursor: 0,
            depth: 0,
            next_id: 0,
        };
        // The file node stays open until `build`.
        builder.open(NodeKind::File, TypeDescriptor::Unknown);
        builder
    }

    /// Start a new line and add one statement to it.
    pub fn stmt(&mut self, f: impl FnOnce(&mut Self)) -> &mut Self {
        let line_start = self.line_starts.last().copied().unwrap_or(0);
        if self.cursor > line_start {
            self.cursor += 1;
            self.line_starts.push(self.cursor);
        }
        f(self);
        self
    }

    /// Inner node with children.
    pub fn node(
        &mut self,
        kind: NodeKind,
        ty: TypeDescriptor,
        children: impl FnOnce(&mut Self),
    ) -> NodeId {
        let (slot, id) = self.open(kind, ty);
        self.cursor += 1;
        children(self);
        self.cursor += 1;
        self.close(slot);
        id
    }

    /// Node without children.
    pub fn leaf(&mut self, kind: NodeKind, ty: TypeDescriptor) -> NodeId {
        let width = kind.as_ident().map_or(1, |name| name.len().max(1) as u32);
        let (slot, id) = self.open(kind, ty);
        self.cursor += width;
        self.close(slot);
        id
    }

    pub fn ident(&mut self, name: &str, ty: TypeDescriptor) -> NodeId {
        self.leaf(NodeKind::ident(name), ty)
    }

    /// The discard placeholder `_`.
    pub fn blank(&mut self) -> NodeId {
        self.ident(nilmap_core::constants::BLANK_IDENTIFIER, TypeDescriptor::Unknown)
    }

    pub fn literal(&mut self, ty: TypeDescriptor) -> NodeId {
        self.leaf(NodeKind::Literal, ty)
    }

    pub fn index(&mut self, ty: TypeDescriptor, children: impl FnOnce(&mut Self)) -> NodeId {
        self.node(NodeKind::IndexExpr, ty, children)
    }

    /// `container[<literal key>]` with `container` an identifier.
    pub fn lookup(
        &mut self,
        container: &str,
        container_ty: TypeDescriptor,
        value_ty: TypeDescriptor,
    ) -> NodeId {
        self.index(value_ty, |b| {
            b.ident(container, container_ty);
            b.literal(TypeDescriptor::Primitive);
        })
    }

    pub fn call(&mut self, ty: TypeDescriptor, children: impl FnOnce(&mut Self)) -> NodeId {
        self.node(NodeKind::Call, ty, children)
    }

    pub fn selector(&mut self, ty: TypeDescriptor, children: impl FnOnce(&mut Self)) -> NodeId {
        self.node(NodeKind::Selector, ty, children)
    }

    pub fn assign(
        &mut self,
        form: AssignForm,
        targets: u8,
        children: impl FnOnce(&mut Self),
    ) -> NodeId {
        self.node(
            NodeKind::assign(form, targets),
            TypeDescriptor::Unknown,
            children,
        )
    }

    pub fn build(mut self) -> MemorySource {
        if let Some(file) = self.nodes.first_mut() {
            file.span.end = self.cursor;
        }
        MemorySource::new(
            self.path,
            LineIndex::from_line_starts(self.line_starts),
            self.nodes,
        )
    }

    fn open(&mut self, kind: NodeKind, ty: TypeDescriptor) -> (usize, NodeId) {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(MemoryNode {
            id,
            kind,
            span: Span::new(self.cursor, self.cursor),
            ty,
            depth: Some(self.depth),
        });
        self.depth += 1;
        (self.nodes.len() - 1, id)
    }

    fn close(&mut self, slot: usize) {
        self.depth -= 1;
        self.nodes[slot].span.end = self.cursor;
    }
}
