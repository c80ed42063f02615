//! Access Classifier: finds map reads of nilable values with no presence
//! check and decides which category each one falls in.

pub mod access;
pub mod policy;

pub use access::{AccessClassifier, Classification, FileAnalysis};
pub use policy::ClassifierPolicy;
