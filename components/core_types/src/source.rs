//! Source position type for compiler diagnostics.

use serde::Serialize;

/// Represents a position in source code.
///
/// Used for error reporting to indicate where an issue occurred. Lines and
/// columns are 1-based; `offset` is the byte offset from the start of the
/// source text.
///
/// # Examples
///
/// ```
/// use core_types::SourcePosition;
///
/// let pos = SourcePosition {
///     line: 10,
///     column: 5,
///     offset: 150,
/// };
///
/// assert_eq!(pos.line, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourcePosition {
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
    /// Byte offset from the start of the source text
    pub offset: usize,
}

impl SourcePosition {
    /// Position carrying only a byte offset, with unknown line and column.
    pub fn offset_only(offset: usize) -> Self {
        Self {
            line: 0,
            column: 0,
            offset,
        }
    }

    /// Compute line and column for a byte offset into `source`.
    ///
    /// Offsets past the end of the source are clamped to the end.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let clamped = offset.min(source.len());
        let mut line = 1;
        let mut column = 1;
        for (idx, ch) in source.char_indices() {
            if idx >= clamped {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self {
            line,
            column,
            offset,
        }
    }

    /// Whether line and column information is available.
    pub fn has_line_info(&self) -> bool {
        self.line > 0
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_line_info() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "offset {}", self.offset)
        }
    }
}
