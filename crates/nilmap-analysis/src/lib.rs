//! # nilmap-analysis
//!
//! Flags reads of nilable map values (pointers, functions) that skip the
//! presence check, working purely on local syntactic shape.
//!
//! ## Flow
//! 1. **Syntax source**: a parsed, type-checked file supplied from outside
//! 2. **Correlator**: parent/child structure rebuilt from the traversal
//! 3. **Classifier**: each map index expression judged by its parent
//! 4. **Reporter**: ordered diagnostics plus a run-level failure signal
//!
//! ## Categories
//! - `direct-access`: `handlers["k"]()`, `ptrs["k"].Field`
//! - `discarded-presence-check`: `v, _ := ptrs["k"]`
//! - `ambiguous-single-target-read`: `v := ptrs["k"]` (toggleable)

pub mod classifier;
pub mod correlator;
pub mod diagnostics;
pub mod pipeline;
pub mod syntax;

pub use classifier::{AccessClassifier, Classification, ClassifierPolicy, FileAnalysis};
pub use correlator::{correlate, SyntaxTree, TreeBuilder, TreeCorrelator};
pub use diagnostics::{Diagnostic, DiagnosticReporter};
pub use pipeline::Analyzer;
pub use syntax::{MemorySource, MemorySourceBuilder, SyntaxSource, TypeOracle};
