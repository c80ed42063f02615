use std::fmt;

use serde::{Deserialize, Serialize};

use nilmap_core::types::IssueCategory;

use crate::syntax::{Position, Span};

/// A located, categorized finding. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    pub category: IssueCategory,
    pub file: String,
    /// 1-based.
    pub line: u32,
    /// Offset within the line, 0-based.
    pub column: u32,
    /// Span of the offending index expression.
    pub span: Span,
}

impl Diagnostic {
    pub fn new(
        category: IssueCategory,
        file: impl Into<String>,
        position: Position,
        span: Span,
    ) -> Self {
        Self {
            category,
            file: file.into(),
            line: position.line,
            column: position.column,
            span,
        }
    }

    pub fn message(&self) -> &'static str {
        self.category.message()
    }

    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: [{}] {}",
            self.file,
            self.line,
            self.column,
            self.category,
            self.message()
        )
    }
}
