//! Which categories a run reports.

use nilmap_core::config::AnalysisConfig;
use nilmap_core::types::{FxHashSet, IssueCategory};

/// Reporting policy applied after classification.
///
/// Classification itself never depends on the policy; a disabled category is
/// classified as usual and then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierPolicy {
    /// Report `v := m[k]`. Reads and write-throughs are not told apart by
    /// syntax alone, so this is a switch rather than a fixed rule.
    pub flag_single_target_reads: bool,
    enabled: FxHashSet<IssueCategory>,
}

impl ClassifierPolicy {
    /// Every category on.
    pub fn all() -> Self {
        Self {
            flag_single_target_reads: true,
            enabled: IssueCategory::ALL.into_iter().collect(),
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            flag_single_target_reads: config.effective_flag_single_target_reads(),
            enabled: config.effective_categories(),
        }
    }

    pub fn only(categories: impl IntoIterator<Item = IssueCategory>) -> Self {
        Self {
            flag_single_target_reads: true,
            enabled: categories.into_iter().collect(),
        }
    }

    pub fn is_enabled(&self, category: IssueCategory) -> bool {
        if category == IssueCategory::AmbiguousSingleTargetRead && !self.flag_single_target_reads {
            return false;
        }
        self.enabled.contains(&category)
    }
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self::all()
    }
}
