//! Cursor-control erasure of previously streamed terminal rows.
//!
//! After a response finishes streaming, the raw text on screen is replaced
//! by a formatted rendering. The replacement starts by erasing exactly the
//! rows the raw output occupied; the count comes from the stream
//! accumulator's wrap accounting. Erasing too few rows leaves stale raw
//! text behind, erasing too many destroys unrelated scrollback, so callers
//! must invoke [`Repaint::erase_lines`] exactly once per response with the
//! precise count.

use std::io::{self, Stdout, Write};

/// ANSI escape code to clear the line the cursor is on.
const ANSI_CLEAR_LINE: &str = "\x1b[2K";

/// ANSI escape code to move the cursor up one line.
const ANSI_CURSOR_UP: &str = "\x1b[1A";

/// Capability for erasing previously written terminal rows.
///
/// Terminals without ANSI cursor control get [`NoopRepaint`], which keeps
/// the accumulation logic correct while skipping the in-place replacement.
pub trait Repaint: Send {
    /// Erase `n` rows, ending with the cursor at the start of the topmost
    /// erased row. `erase_lines(0)` is a no-op.
    fn erase_lines(&mut self, n: usize);
}

/// ANSI implementation writing clear-line/cursor-up pairs to a sink.
///
/// Each erased row is a clear-current-line followed by a cursor-up, in that
/// order, so the row the cursor starts on is cleared too.
pub struct AnsiRepaint<W: Write> {
    out: W,
}

impl AnsiRepaint<Stdout> {
    /// An eraser writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> AnsiRepaint<W> {
    /// An eraser writing to the given sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the eraser and return the sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Repaint for AnsiRepaint<W> {
    fn erase_lines(&mut self, n: usize) {
        for _ in 0..n {
            let _ = write!(self.out, "{ANSI_CLEAR_LINE}{ANSI_CURSOR_UP}");
        }
        let _ = self.out.flush();
    }
}

/// Repaint implementation that erases nothing.
///
/// Used when standard output is not a terminal, leaving the raw streamed
/// text in place.
pub struct NoopRepaint;

impl Repaint for NoopRepaint {
    fn erase_lines(&mut self, _n: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_one_clear_up_pair_per_line() {
        let mut repaint = AnsiRepaint::new(Vec::new());
        repaint.erase_lines(3);
        let written = String::from_utf8(repaint.into_inner()).unwrap();
        assert_eq!(written, "\x1b[2K\x1b[1A".repeat(3));
    }

    #[test]
    fn clear_precedes_cursor_up() {
        let mut repaint = AnsiRepaint::new(Vec::new());
        repaint.erase_lines(1);
        let written = String::from_utf8(repaint.into_inner()).unwrap();
        assert_eq!(written, "\x1b[2K\x1b[1A");
    }

    #[test]
    fn zero_lines_emits_nothing() {
        let mut repaint = AnsiRepaint::new(Vec::new());
        repaint.erase_lines(0);
        assert!(repaint.into_inner().is_empty());
    }
}
