//! nilmap-core: shared foundation for the nilmap analyzer.
//!
//! Issue-category identifiers, one error enum per subsystem, layered TOML
//! configuration, tracing setup, and the collection aliases the analysis
//! crate builds on.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::{AnalysisConfig, NilmapConfig};
pub use types::IssueCategory;
