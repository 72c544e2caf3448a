//! Display-line accounting for streamed terminal output.
//!
//! While a response streams, raw text is written straight to the terminal.
//! To erase it afterwards, the caller must know exactly how many terminal
//! rows that text occupied, accounting for wraps at the terminal width and
//! for embedded newlines. [`LineCursor`] tracks that incrementally, one
//! fragment at a time, and is independent of how the text is chunked.

/// The terminal width used for wrap accounting.
///
/// Invariant: the width is always at least 1, so wrap arithmetic can never
/// divide by zero or loop forever.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TerminalWidth(usize);

impl TerminalWidth {
    /// Width assumed when the terminal cannot be queried.
    pub const FALLBACK_COLUMNS: usize = 80;

    /// Create a width, clamping zero to the minimum of 1.
    pub fn new(columns: usize) -> Self {
        TerminalWidth(columns.max(1))
    }

    /// Sample the width of the attached terminal, falling back to
    /// [`Self::FALLBACK_COLUMNS`] when there is no terminal to ask.
    pub fn detect() -> Self {
        match crossterm::terminal::size() {
            Ok((columns, _rows)) => Self::new(columns as usize),
            Err(_) => TerminalWidth(Self::FALLBACK_COLUMNS),
        }
    }

    /// The width in columns.
    pub fn columns(&self) -> usize {
        self.0
    }
}

impl Default for TerminalWidth {
    fn default() -> Self {
        TerminalWidth(Self::FALLBACK_COLUMNS)
    }
}

impl From<usize> for TerminalWidth {
    fn from(columns: usize) -> Self {
        Self::new(columns)
    }
}

/// Transient cursor state for one streaming pass.
///
/// Tracks the column offset within the row currently being written and the
/// number of display rows completed so far. Reset (recreate) at the start of
/// every streaming request; never persisted.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct LineCursor {
    column: usize,
    completed: usize,
}

impl LineCursor {
    /// A cursor at column zero with no completed rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a newly written fragment and return how many additional
    /// rows it completed.
    ///
    /// An embedded newline completes the current row and resets the column.
    /// Between newlines the column advances one per character; reaching the
    /// width completes a row and wraps the column modulo the width. The
    /// final state depends only on the concatenation of the fragments fed
    /// in, not on where the chunk boundaries fell.
    pub fn advance(&mut self, fragment: &str, width: TerminalWidth) -> usize {
        let width = width.columns();
        let before = self.completed;
        for ch in fragment.chars() {
            if ch == '\n' {
                self.completed += 1;
                self.column = 0;
                continue;
            }
            self.column += 1;
            if self.column >= width {
                self.completed += 1;
                self.column -= width;
            }
        }
        self.completed - before
    }

    /// The column offset within the row currently being written.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The number of display rows completed so far.
    pub fn completed_lines(&self) -> usize {
        self.completed
    }
}
