use serde::Serialize;

use nilmap_core::types::{FxHashMap, IssueCategory};

use super::diagnostic::Diagnostic;

/// Ordered collection of a run's diagnostics.
///
/// Keeps discovery order (file order, then traversal order within a file)
/// unless `sort_by_location` is called. Formatting and exit codes belong to
/// the driver.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiagnosticReporter {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_findings(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// A run with any diagnostic counts as failed.
    pub fn is_failed(&self) -> bool {
        self.has_findings()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn counts_by_category(&self) -> FxHashMap<IssueCategory, usize> {
        let mut counts = FxHashMap::default();
        for d in &self.diagnostics {
            *counts.entry(d.category).or_insert(0) += 1;
        }
        counts
    }

    /// Stable sort by file path, then line, then column.
    pub fn sort_by_location(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then(a.line.cmp(&b.line))
                .then(a.column.cmp(&b.column))
        });
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
