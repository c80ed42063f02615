//! Pipeline errors and non-fatal error collection.

use super::error_code::{self, NilmapErrorCode};
use super::{AnalysisError, ConfigError, SourceError};

/// Errors that can occur during a multi-file analysis run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build worker pool with {threads} threads: {message}")]
    ThreadPool { threads: usize, message: String },
}

impl NilmapErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Analysis(e) => e.error_code(),
            Self::Source(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::ThreadPool { .. } => error_code::THREAD_POOL_ERROR,
        }
    }
}

/// Result of a pipeline run that accumulates non-fatal errors.
/// Allows the full result to be returned even when some nodes were skipped.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the pipeline run.
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    /// Create a new pipeline result with no errors.
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Add a non-fatal error to the result.
    pub fn add_error(&mut self, error: PipelineError) {
        self.errors.push(error);
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of non-fatal errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
