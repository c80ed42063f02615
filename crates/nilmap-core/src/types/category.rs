//! Issue categories: the fixed, stable identifiers every diagnostic carries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of unsafe map access a diagnostic reports.
///
/// The kebab-case identifiers are stable: they appear in config files,
/// serialized diagnostics, and driver output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCategory {
    /// A nilable map value is used in place, with no presence check at all.
    DirectAccess,
    /// `v, _ := m[k]`: the presence flag was available and thrown away.
    DiscardedPresenceCheck,
    /// `v := m[k]`: single-target read, the presence flag is never produced.
    AmbiguousSingleTargetRead,
}

impl IssueCategory {
    /// All categories, in declaration order.
    pub const ALL: [IssueCategory; 3] = [
        Self::DirectAccess,
        Self::DiscardedPresenceCheck,
        Self::AmbiguousSingleTargetRead,
    ];

    /// The stable identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectAccess => "direct-access",
            Self::DiscardedPresenceCheck => "discarded-presence-check",
            Self::AmbiguousSingleTargetRead => "ambiguous-single-target-read",
        }
    }

    /// Human-readable description of the finding.
    pub fn message(&self) -> &'static str {
        match self {
            Self::DirectAccess => "direct access to nilable map value",
            Self::DiscardedPresenceCheck => "skipped key existence checking with _",
            Self::AmbiguousSingleTargetRead => "assignment lhs variable length < 2",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the stable identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown issue category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for IssueCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
