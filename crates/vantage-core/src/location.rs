use serde::{Deserialize, Serialize};

/// A line/column range within a source file.
///
/// `line` is 1-based, `column` is 0-based, matching the convention most
/// JS/TS tooling already uses so offsets read naturally in editor output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
}

impl SourceLocation {
    pub fn point(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            end_line: None,
            end_column: None,
        }
    }

    pub fn range(line: usize, column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            line,
            column,
            end_line: Some(end_line),
            end_column: Some(end_column),
        }
    }

    fn end(&self) -> (usize, usize) {
        (
            self.end_line.unwrap_or(self.line),
            self.end_column.unwrap_or(self.column),
        )
    }

    /// A location is well-formed iff its start does not follow its end and
    /// both endpoints fall within `[1, line_count]`.
    pub fn is_well_formed(&self, line_count: usize) -> bool {
        if self.line < 1 || self.line > line_count {
            return false;
        }
        let (end_line, end_column) = self.end();
        if end_line < 1 || end_line > line_count {
            return false;
        }
        (self.line, self.column) <= (end_line, end_column)
    }
}
