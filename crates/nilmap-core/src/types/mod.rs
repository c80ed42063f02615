//! Shared data types for nilmap.
//! FxHashMap/SmallVec aliases and the stable issue-category identifiers.

pub mod category;
pub mod collections;

pub use category::IssueCategory;
pub use collections::{FxHashMap, FxHashSet, SmallVec, SmallVec4};
