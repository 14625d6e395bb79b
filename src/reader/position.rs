//! Line and column tracking.

use std::fmt::Display;

/// Tab width used when none is configured.
/// Editors count characters rather than terminal cells, so a tab is one column.
pub const DEFAULT_TAB_WIDTH: isize = 1;

/// A zero-based location in the input.
///
/// `column` is -1 until the first character of the line has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: isize,
}

impl Default for Position {
    fn default() -> Self {
        Position {
            line: 0,
            column: -1,
        }
    }
}

impl Position {
    pub fn new(line: usize, column: isize) -> Self {
        Position { line, column }
    }

    /// Account for one consumed character; `None` is the end of the input,
    /// which still counts as a column.
    pub fn advance(&mut self, ch: Option<char>, tab_width: isize) {
        match ch {
            Some('\n') => {
                self.line += 1;
                self.column = -1;
            }
            Some('\t') => self.column += tab_width,
            _ => self.column += 1,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}
