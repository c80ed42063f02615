//! Shared constants for the nilmap analyzer.

/// Project-level config file name, looked up in the analysis root.
pub const PROJECT_CONFIG_FILE: &str = "nilmap.toml";

/// User-level config directory name under `$HOME`.
pub const USER_CONFIG_DIR: &str = ".nilmap";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "NILMAP_LOG";

/// Default tracing filter when `NILMAP_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "nilmap_core=info,nilmap_analysis=info";

/// Default number of worker threads (0 = rayon's global pool).
pub const DEFAULT_THREADS: usize = 0;

/// Single-target reads (`v := m[k]`) are reported unless turned off.
pub const DEFAULT_FLAG_SINGLE_TARGET_READS: bool = true;

/// Diagnostics keep discovery order unless sorting is requested.
pub const DEFAULT_SORT_BY_LOCATION: bool = false;

/// The blank identifier that explicitly discards a value.
pub const BLANK_IDENTIFIER: &str = "_";
