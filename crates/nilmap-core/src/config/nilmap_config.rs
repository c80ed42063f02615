//! Top-level nilmap configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::AnalysisConfig;
use crate::constants::{PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;
use crate::types::IssueCategory;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`NILMAP_*`)
/// 3. Project config (`nilmap.toml` in the analysis root)
/// 4. User config (`~/.nilmap/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NilmapConfig {
    pub analysis: AnalysisConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub enabled_categories: Option<Vec<String>>,
    pub flag_single_target_reads: Option<bool>,
    pub threads: Option<usize>,
    pub sort_by_location: Option<bool>,
}

impl NilmapConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &NilmapConfig) -> Result<(), ConfigError> {
        for id in &config.analysis.enabled_categories {
            if id.parse::<IssueCategory>().is_err() {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.enabled_categories".to_string(),
                    message: format!(
                        "unknown category '{id}', expected one of: {}",
                        IssueCategory::ALL.map(|c| c.as_str()).join(", ")
                    ),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.nilmap/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(USER_CONFIG_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut NilmapConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: NilmapConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it sets a value.
    fn merge(base: &mut NilmapConfig, other: &NilmapConfig) {
        if !other.analysis.enabled_categories.is_empty() {
            base.analysis.enabled_categories = other.analysis.enabled_categories.clone();
        }
        if other.analysis.flag_single_target_reads.is_some() {
            base.analysis.flag_single_target_reads = other.analysis.flag_single_target_reads;
        }
        if other.analysis.threads.is_some() {
            base.analysis.threads = other.analysis.threads;
        }
        if other.analysis.sort_by_location.is_some() {
            base.analysis.sort_by_location = other.analysis.sort_by_location;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `NILMAP_ANALYSIS_THREADS`, `NILMAP_ANALYSIS_ENABLED_CATEGORIES`, etc.
    fn apply_env_overrides(config: &mut NilmapConfig) {
        if let Ok(val) = std::env::var("NILMAP_ANALYSIS_ENABLED_CATEGORIES") {
            let ids: Vec<String> = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if !ids.is_empty() {
                config.analysis.enabled_categories = ids;
            }
        }
        if let Ok(val) = std::env::var("NILMAP_ANALYSIS_FLAG_SINGLE_TARGET_READS") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.flag_single_target_reads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("NILMAP_ANALYSIS_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("NILMAP_ANALYSIS_SORT_BY_LOCATION") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.sort_by_location = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut NilmapConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.enabled_categories {
            config.analysis.enabled_categories = v.clone();
        }
        if let Some(v) = cli.flag_single_target_reads {
            config.analysis.flag_single_target_reads = Some(v);
        }
        if let Some(v) = cli.threads {
            config.analysis.threads = Some(v);
        }
        if let Some(v) = cli.sort_by_location {
            config.analysis.sort_by_location = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
