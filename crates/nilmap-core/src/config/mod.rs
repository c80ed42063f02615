//! Configuration system for nilmap.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod nilmap_config;

pub use analysis_config::AnalysisConfig;
pub use nilmap_config::{CliOverrides, NilmapConfig};
