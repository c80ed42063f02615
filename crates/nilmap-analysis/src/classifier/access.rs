//! Per-index-expression classification.

use nilmap_core::errors::AnalysisError;
use nilmap_core::types::IssueCategory;

use crate::correlator::{NodeIndex, SyntaxNode, SyntaxTree};
use crate::diagnostics::Diagnostic;
use crate::syntax::{LineIndex, NodeKind, TypeOracle};

use super::policy::ClassifierPolicy;

/// Outcome for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Not a map read of a nilable value, or a type was unknown.
    Irrelevant,
    /// A nilable map read whose shape is fine.
    Safe,
    Finding(IssueCategory),
}

impl Classification {
    pub fn category(&self) -> Option<IssueCategory> {
        match self {
            Self::Finding(category) => Some(*category),
            _ => None,
        }
    }
}

/// Everything the classifier produced for one file.
#[derive(Debug, Clone, Default)]
pub struct FileAnalysis {
    pub path: String,
    /// Traversal order.
    pub diagnostics: Vec<Diagnostic>,
    /// Skipped nodes. Never fatal.
    pub notes: Vec<AnalysisError>,
    pub node_count: usize,
    pub index_exprs: usize,
}

impl FileAnalysis {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccessClassifier {
    policy: ClassifierPolicy,
}

impl AccessClassifier {
    pub fn new(policy: ClassifierPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ClassifierPolicy {
        &self.policy
    }

    /// Classify the node at `index`.
    ///
    /// Only index expressions over a mapping whose value type is nilable can
    /// be findings. The immediate parent decides which one:
    /// not an assignment means `direct-access`, otherwise the assignment's
    /// shape does (see `classify_assignment`).
    pub fn classify<O>(
        &self,
        tree: &SyntaxTree,
        oracle: &O,
        index: NodeIndex,
    ) -> Result<Classification, AnalysisError>
    where
        O: TypeOracle + ?Sized,
    {
        let Some(node) = tree.get(index) else {
            return Ok(Classification::Irrelevant);
        };
        if !node.kind.is_index_expr() {
            return Ok(Classification::Irrelevant);
        }

        let container = tree
            .children(index)
            .first()
            .and_then(|&c| tree.get(c))
            .ok_or_else(|| AnalysisError::MissingIndexedEntity {
                path: tree.path().to_string(),
                offset: node.span.start,
            })?;
        if !oracle.type_of(container.id).is_mapping() {
            return Ok(Classification::Irrelevant);
        }
        if !oracle.type_of(node.id).is_nilable() {
            return Ok(Classification::Irrelevant);
        }

        let parent = tree.parent(index).and_then(|p| tree.get(p).map(|n| (p, n)));
        match parent {
            Some((parent, parent_node)) => match parent_node.kind.assignment_targets() {
                Some(targets) => self.classify_assignment(tree, parent, index, targets),
                None => Ok(Classification::Finding(IssueCategory::DirectAccess)),
            },
            None => Ok(Classification::Finding(IssueCategory::DirectAccess)),
        }
    }

    /// An index expression directly under an assignment with `targets`
    /// left-hand children.
    ///
    /// - among the targets: a write, safe.
    /// - two or more targets: the second target decides, however many values
    ///   there are. `_` discards the presence flag, a name keeps it.
    /// - one target: a single-target read.
    fn classify_assignment(
        &self,
        tree: &SyntaxTree,
        assignment: NodeIndex,
        index: NodeIndex,
        targets: usize,
    ) -> Result<Classification, AnalysisError> {
        let children = tree.children(assignment);
        let offset = tree.node(index).span.start;

        let position = tree
            .child_position(index)
            .ok_or_else(|| AnalysisError::DetachedNode {
                path: tree.path().to_string(),
                offset,
            })?;
        if position < targets {
            return Ok(Classification::Safe);
        }

        let values: Vec<NodeIndex> = children[targets.min(children.len())..]
            .iter()
            .copied()
            .filter(|&c| !tree.node(c).kind.is_type_expr())
            .collect();
        let value_position = values.iter().position(|&v| v == index);
        let malformed = || AnalysisError::MalformedAssignment {
            path: tree.path().to_string(),
            offset: tree.node(assignment).span.start,
            targets: u8::try_from(targets).unwrap_or(u8::MAX),
            children: children.len(),
        };

        if targets >= 2 {
            let flag = children.get(1).map(|&c| tree.node(c)).ok_or_else(malformed)?;
            return Ok(if flag.kind.is_blank_ident() {
                Classification::Finding(IssueCategory::DiscardedPresenceCheck)
            } else {
                Classification::Safe
            });
        }

        let target = value_position
            .filter(|&v| v < targets)
            .and_then(|v| children.get(v))
            .map(|&c| tree.node(c))
            .ok_or_else(malformed)?;
        Ok(single_target(target))
    }

    /// Classify every index expression of `tree`, in visitation order, and
    /// turn enabled findings into diagnostics.
    pub fn scan<O>(&self, tree: &SyntaxTree, oracle: &O, lines: &LineIndex) -> FileAnalysis
    where
        O: TypeOracle + ?Sized,
    {
        let mut analysis = FileAnalysis::new(tree.path());
        analysis.node_count = tree.len();

        for (index, node) in tree.iter().filter(|(_, n)| n.kind.is_index_expr()) {
            analysis.index_exprs += 1;
            match self.classify(tree, oracle, index) {
                Ok(Classification::Finding(category)) if self.policy.is_enabled(category) => {
                    analysis.diagnostics.push(Diagnostic::new(
                        category,
                        tree.path(),
                        lines.position(node.span.start),
                        node.span,
                    ));
                }
                Ok(_) => {}
                Err(note) => analysis.notes.push(note),
            }
        }
        analysis
    }
}

/// `v := m[k]`: a plain variable read loses the presence flag. `_ = m[k]` and
/// writes through a non-identifier target (`x.f = m[k]`, `a[i] = m[k]`) are
/// left alone.
fn single_target(target: &SyntaxNode) -> Classification {
    match &target.kind {
        NodeKind::Ident { .. } if target.kind.is_blank_ident() => Classification::Safe,
        NodeKind::Ident { .. } => {
            Classification::Finding(IssueCategory::AmbiguousSingleTargetRead)
        }
        _ => Classification::Safe,
    }
}
