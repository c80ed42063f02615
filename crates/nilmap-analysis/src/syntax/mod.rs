//! Syntax Source boundary. A front end hands the analyzer, per file, a
//! traversal, a type oracle, and a line index.

pub mod line_index;
pub mod memory;
pub mod source;
pub mod types;

pub use line_index::LineIndex;
pub use memory::{MemoryNode, MemorySource, MemorySourceBuilder, TraversalShape};
pub use source::{SyntaxSource, TypeOracle};
pub use types::{
    AssignForm, NodeDescriptor, NodeId, NodeKind, Position, Span, Traversal, TraversalEvent,
    TypeDescriptor,
};
