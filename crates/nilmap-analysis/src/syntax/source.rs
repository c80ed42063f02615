//! The two capabilities a front end must provide: a traversal and a type oracle.

use super::line_index::LineIndex;
use super::types::{NodeId, Traversal, TypeDescriptor};

/// Answers "what is the static type of this expression?".
pub trait TypeOracle {
    /// Returns `TypeDescriptor::Unknown` when the type cannot be resolved.
    fn type_of(&self, node: NodeId) -> TypeDescriptor;
}

/// One already-parsed, type-checked file.
///
/// Sources are shared across worker threads during a multi-file run, hence
/// the `Sync` bound.
pub trait SyntaxSource: TypeOracle + Sync {
    /// File path reported in diagnostics.
    fn path(&self) -> &str;

    fn line_index(&self) -> &LineIndex;

    /// A fresh depth-first traversal of the file's syntax tree.
    fn traversal(&self) -> Traversal<'_>;
}

impl<T: TypeOracle + ?Sized> TypeOracle for &T {
    fn type_of(&self, node: NodeId) -> TypeDescriptor {
        (**self).type_of(node)
    }
}

impl<T: SyntaxSource + ?Sized> SyntaxSource for &T {
    fn path(&self) -> &str {
        (**self).path()
    }

    fn line_index(&self) -> &LineIndex {
        (**self).line_index()
    }

    fn traversal(&self) -> Traversal<'_> {
        (**self).traversal()
    }
}
