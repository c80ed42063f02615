//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FLAG_SINGLE_TARGET_READS, DEFAULT_SORT_BY_LOCATION, DEFAULT_THREADS,
};
use crate::types::{FxHashSet, IssueCategory};

/// Configuration for the analysis subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Categories to report, by stable identifier. Empty means all.
    #[serde(default)]
    pub enabled_categories: Vec<String>,
    /// Report `v := m[k]` single-target reads. Default: true.
    pub flag_single_target_reads: Option<bool>,
    /// Worker threads for multi-file runs. Default: 0 (rayon's global pool).
    pub threads: Option<usize>,
    /// Sort diagnostics by file, line, column after aggregation. Default: false.
    pub sort_by_location: Option<bool>,
}

impl AnalysisConfig {
    /// Returns whether single-target reads are reported, defaulting to true.
    pub fn effective_flag_single_target_reads(&self) -> bool {
        self.flag_single_target_reads
            .unwrap_or(DEFAULT_FLAG_SINGLE_TARGET_READS)
    }

    /// Returns the worker thread count, defaulting to 0.
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(DEFAULT_THREADS)
    }

    /// Returns whether diagnostics are sorted by location, defaulting to false.
    pub fn effective_sort_by_location(&self) -> bool {
        self.sort_by_location.unwrap_or(DEFAULT_SORT_BY_LOCATION)
    }

    /// Resolve the set of reported categories.
    ///
    /// Unknown identifiers are skipped here; `NilmapConfig::validate` rejects
    /// them before a config is handed out. Turning off single-target reads
    /// removes that category even when it is listed explicitly.
    pub fn effective_categories(&self) -> FxHashSet<IssueCategory> {
        let mut categories: FxHashSet<IssueCategory> = if self.enabled_categories.is_empty() {
            IssueCategory::ALL.into_iter().collect()
        } else {
            self.enabled_categories
                .iter()
                .filter_map(|id| id.parse().ok())
                .collect()
        };
        if !self.effective_flag_single_target_reads() {
            categories.remove(&IssueCategory::AmbiguousSingleTargetRead);
        }
        categories
    }
}
