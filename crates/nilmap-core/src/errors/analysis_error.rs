//! Analysis errors: structural inconsistencies in a supplied syntax tree.
//!
//! None of these abort a run: the offending node is skipped and the error is
//! kept as a note next to the diagnostics.

use super::error_code::{self, NilmapErrorCode};

/// A node did not have the shape its kind promises.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("{path}: index expression at offset {offset} has no indexed-entity child")]
    MissingIndexedEntity { path: String, offset: u32 },

    #[error("{path}: assignment at offset {offset} declares {targets} targets but has {children} children")]
    MalformedAssignment {
        path: String,
        offset: u32,
        targets: u8,
        children: usize,
    },

    #[error("{path}: node at offset {offset} is not among its parent's children")]
    DetachedNode { path: String, offset: u32 },
}

impl NilmapErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        error_code::STRUCTURAL_INCONSISTENCY
    }
}
