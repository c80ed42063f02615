//! Multi-file analysis: correlate, classify, aggregate.
//!
//! One file is one unit of work. Files share nothing, so they run on rayon
//! workers; results are gathered in input order once every worker is done.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use nilmap_core::config::AnalysisConfig;
use nilmap_core::errors::{PipelineError, PipelineResult};

use crate::classifier::{AccessClassifier, ClassifierPolicy, FileAnalysis};
use crate::correlator::correlate;
use crate::diagnostics::DiagnosticReporter;
use crate::syntax::{MemorySource, SyntaxSource};

/// Runs the full analysis over one or many syntax sources.
#[derive(Debug, Clone)]
pub struct Analyzer {
    classifier: AccessClassifier,
    /// 0 = rayon's global pool.
    threads: usize,
    sort_by_location: bool,
}

impl Analyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            classifier: AccessClassifier::new(ClassifierPolicy::from_config(config)),
            threads: config.effective_threads(),
            sort_by_location: config.effective_sort_by_location(),
        }
    }

    pub fn with_policy(mut self, policy: ClassifierPolicy) -> Self {
        self.classifier = AccessClassifier::new(policy);
        self
    }

    pub fn classifier(&self) -> &AccessClassifier {
        &self.classifier
    }

    /// Analyze a single file. Sequential: the tree is fully correlated
    /// before classification starts.
    pub fn analyze_file<S: SyntaxSource + ?Sized>(&self, source: &S) -> FileAnalysis {
        let span = tracing::debug_span!("analyze_file", path = %source.path());
        let _guard = span.enter();

        let tree = correlate(source.path(), source.traversal());
        let analysis = self.classifier.scan(&tree, source, source.line_index());

        for note in &analysis.notes {
            tracing::warn!(error = %note, "skipped node with unexpected shape");
        }
        tracing::debug!(
            nodes = analysis.node_count,
            index_exprs = analysis.index_exprs,
            diagnostics = analysis.diagnostics.len(),
            "file analyzed"
        );
        analysis
    }

    /// Analyze every source and aggregate in input order.
    ///
    /// Structural notes come back as non-fatal errors. Failing to build a
    /// dedicated worker pool is the only fatal error.
    pub fn analyze_all<S: SyntaxSource>(
        &self,
        sources: &[S],
    ) -> Result<PipelineResult<DiagnosticReporter>, PipelineError> {
        let started = Instant::now();
        let analyses = self.run_parallel(|| {
            sources
                .par_iter()
                .map(|source| self.analyze_file(source))
                .collect::<Vec<_>>()
        })?;

        let result = self.aggregate(analyses, PipelineResult::default());
        tracing::info!(
            files = sources.len(),
            diagnostics = result.data.len(),
            notes = result.error_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis complete"
        );
        Ok(result)
    }

    /// Load JSON syntax dumps and analyze them. A dump that cannot be read or
    /// decoded is skipped and reported as a non-fatal source error.
    pub fn analyze_dumps<P: AsRef<Path> + Sync>(
        &self,
        paths: &[P],
    ) -> Result<PipelineResult<DiagnosticReporter>, PipelineError> {
        let started = Instant::now();
        let loaded = self.run_parallel(|| {
            paths
                .par_iter()
                .map(|path| {
                    MemorySource::from_path(path.as_ref()).map(|source| self.analyze_file(&source))
                })
                .collect::<Vec<_>>()
        })?;

        let mut result = PipelineResult::default();
        let mut analyses = Vec::with_capacity(loaded.len());
        for outcome in loaded {
            match outcome {
                Ok(analysis) => analyses.push(analysis),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable syntax dump");
                    result.add_error(e.into());
                }
            }
        }

        let result = self.aggregate(analyses, result);
        tracing::info!(
            files = paths.len(),
            diagnostics = result.data.len(),
            errors = result.error_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis complete"
        );
        Ok(result)
    }

    fn run_parallel<T, F>(&self, work: F) -> Result<T, PipelineError>
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        if self.threads == 0 {
            return Ok(work());
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .map_err(|e| PipelineError::ThreadPool {
                threads: self.threads,
                message: e.to_string(),
            })?;
        Ok(pool.install(work))
    }

    fn aggregate(
        &self,
        analyses: Vec<FileAnalysis>,
        mut result: PipelineResult<DiagnosticReporter>,
    ) -> PipelineResult<DiagnosticReporter> {
        for analysis in analyses {
            result.data.extend(analysis.diagnostics);
            for note in analysis.notes {
                result.add_error(note.into());
            }
        }
        if self.sort_by_location {
            result.data.sort_by_location();
        }
        result
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}
