//! Diagnostic records and the run-level reporter.

pub mod diagnostic;
pub mod reporter;

pub use diagnostic::Diagnostic;
pub use reporter::DiagnosticReporter;
