//! Source positions reported by parsers.

use serde::{Deserialize, Serialize};

/// A 1-based line/column position in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// The location of a parse failure: a point or a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Start of the offending region.
    pub start: Position,
    /// End of the offending region, if it spans more than a point. The
    /// column is exclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Position>,
}

impl SourceLocation {
    /// A single-point location.
    pub fn point(start: Position) -> Self {
        Self { start, end: None }
    }

    /// A range location.
    pub fn range(start: Position, end: Position) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }
}
