//! Offset → line/column mapping.

use serde::{Deserialize, Serialize};

use super::types::Position;

/// Sorted start offsets of every line in a file.
///
/// Deserialized starts go through `from_line_starts` like any other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LineIndexData", into = "LineIndexData")]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

#[derive(Serialize, Deserialize)]
struct LineIndexData {
    line_starts: Vec<u32>,
}

impl From<LineIndexData> for LineIndex {
    fn from(data: LineIndexData) -> Self {
        Self::from_line_starts(data.line_starts)
    }
}

impl From<LineIndex> for LineIndexData {
    fn from(index: LineIndex) -> Self {
        Self {
            line_starts: index.line_starts,
        }
    }
}

impl LineIndex {
    pub fn from_text(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i as u32 + 1),
        );
        Self { line_starts }
    }

    /// Build from explicit line starts. Offset 0 is always a line start;
    /// the rest are sorted and deduplicated.
    pub fn from_line_starts(mut line_starts: Vec<u32>) -> Self {
        line_starts.push(0);
        line_starts.sort_unstable();
        line_starts.dedup();
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_starts(&self) -> &[u32] {
        &self.line_starts
    }

    /// Line (1-based) and column offset within that line (0-based).
    pub fn position(&self, offset: u32) -> Position {
        // line_starts[0] == 0, so at least one start is <= offset.
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .max(1);
        let line_start = self.line_starts.get(line - 1).copied().unwrap_or(0);
        Position {
            line: line as u32,
            column: offset.saturating_sub(line_start),
        }
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::from_line_starts(Vec::new())
    }
}
