//! Error handling for nilmap.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analysis_error;
pub mod config_error;
pub mod error_code;
pub mod pipeline_error;
pub mod source_error;

pub use analysis_error::AnalysisError;
pub use config_error::ConfigError;
pub use error_code::NilmapErrorCode;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use source_error::SourceError;
