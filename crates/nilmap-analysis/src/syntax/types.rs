//! Syntax-source boundary types: spans, node kinds, type descriptors.
//!
//! These are what an external front end hands the analyzer. Nothing here is
//! parsed or inferred by nilmap itself.

use serde::{Deserialize, Serialize};

use nilmap_core::constants::BLANK_IDENTIFIER;

/// Half-open byte-offset range `[start, end)` within one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// True when `other` lies inside `self` (bounds inclusive).
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stable node identity issued by the syntax source. Type queries use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Flavor of an assignment-like statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignForm {
    /// `a = b`
    Assign,
    /// `a := b`
    Define,
    /// `var a = b` / `var a T = b`
    VarDecl,
}

/// Node-kind discrimination, just fine-grained enough for classification.
///
/// Anything the classifier never looks at can travel as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    File,
    Ident {
        name: String,
    },
    /// `container[key]`. First child is the container, second the key.
    IndexExpr,
    /// The first `targets` children are the left-hand side; the remaining
    /// children (minus any `TypeExpr`) are the values.
    Assign {
        form: AssignForm,
        targets: u8,
    },
    /// Type annotation inside a declaration; never a value.
    TypeExpr,
    Call,
    Selector,
    CompositeLit,
    Paren,
    Star,
    Unary,
    Binary,
    Literal,
    Block,
    If,
    Return,
    Other {
        kind: String,
    },
}

impl NodeKind {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident { name: name.into() }
    }

    pub fn assign(form: AssignForm, targets: u8) -> Self {
        Self::Assign { form, targets }
    }

    pub fn is_index_expr(&self) -> bool {
        matches!(self, Self::IndexExpr)
    }

    pub fn is_type_expr(&self) -> bool {
        matches!(self, Self::TypeExpr)
    }

    /// Identifier name, if this is an identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Self::Ident { name } => Some(name),
            _ => None,
        }
    }

    /// The discard placeholder `_`.
    pub fn is_blank_ident(&self) -> bool {
        self.as_ident() == Some(BLANK_IDENTIFIER)
    }

    /// Number of left-hand targets, if this is an assignment.
    pub fn assignment_targets(&self) -> Option<usize> {
        match self {
            Self::Assign { targets, .. } => Some(usize::from(*targets)),
            _ => None,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &str {
        match self {
            Self::File => "file",
            Self::Ident { .. } => "ident",
            Self::IndexExpr => "index_expr",
            Self::Assign { .. } => "assign",
            Self::TypeExpr => "type_expr",
            Self::Call => "call",
            Self::Selector => "selector",
            Self::CompositeLit => "composite_lit",
            Self::Paren => "paren",
            Self::Star => "star",
            Self::Unary => "unary",
            Self::Binary => "binary",
            Self::Literal => "literal",
            Self::Block => "block",
            Self::If => "if",
            Self::Return => "return",
            Self::Other { kind } => kind,
        }
    }
}

/// Static type of an expression, as answered by the type oracle.
///
/// Interface, struct and primitive types are all non-nilable values for the
/// purpose of this analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    Mapping,
    Sequence,
    Pointer,
    Function,
    Interface,
    Struct,
    Primitive,
    #[default]
    Unknown,
}

impl TypeDescriptor {
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping)
    }

    /// Pointer and function values read as a null sentinel when absent.
    pub fn is_nilable(&self) -> bool {
        matches!(self, Self::Pointer | Self::Function)
    }
}

/// One node as emitted by the syntax source's traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub id: NodeId,
    pub kind: NodeKind,
    pub span: Span,
}

impl NodeDescriptor {
    pub fn new(id: NodeId, kind: NodeKind, span: Span) -> Self {
        Self { id, kind, span }
    }
}

/// Enter/exit event for sources that expose the traversal directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraversalEvent {
    Enter(NodeDescriptor),
    Exit,
}

/// The two shapes a syntax source may produce.
pub enum Traversal<'a> {
    /// Depth-first pre-order stream with no structure attached.
    Preorder(Box<dyn Iterator<Item = NodeDescriptor> + 'a>),
    /// Enter/exit events; parents follow from the event nesting.
    Events(Box<dyn Iterator<Item = TraversalEvent> + 'a>),
}

/// 1-based line and 0-based column offset within that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}
