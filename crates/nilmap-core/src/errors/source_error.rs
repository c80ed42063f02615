//! Syntax source errors.

use std::path::PathBuf;

use super::error_code::{self, NilmapErrorCode};

/// Errors raised while obtaining a syntax tree from outside the analyzer.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read syntax dump {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid syntax dump {path}: {message}")]
    Decode { path: String, message: String },
}

impl NilmapErrorCode for SourceError {
    fn error_code(&self) -> &'static str {
        error_code::SOURCE_ERROR
    }
}
