//! Accumulates streaming events into a final answer while tracking how many
//! terminal rows the raw output occupied.
//!
//! The accumulator is a pure state-transition function over stream events:
//! it performs no I/O of its own. The driver prints each fragment (via
//! [`StreamAccumulator::display_text`]) and feeds the same event to
//! [`StreamAccumulator::observe`], which keeps the wrap accounting exactly
//! in step with what reached the terminal.

use crate::types::ResponseStreamEvent;
use crate::wrap::{LineCursor, TerminalWidth};

/// Accumulates one streamed response.
///
/// Recreated for every request; never reused across streams.
#[derive(Debug, Clone)]
pub struct StreamAccumulator {
    width: TerminalWidth,
    cursor: LineCursor,
    buffer: String,
    canonical: Option<String>,
    complete: bool,
}

impl StreamAccumulator {
    /// Create an accumulator for a stream displayed at the given width.
    pub fn new(width: TerminalWidth) -> Self {
        Self {
            width,
            cursor: LineCursor::new(),
            buffer: String::new(),
            canonical: None,
            complete: false,
        }
    }

    /// The raw text the driver should write for this event, if any.
    ///
    /// Only delta events produce display output; framing and terminal
    /// events are silent.
    pub fn display_text(event: &ResponseStreamEvent) -> Option<&str> {
        match event {
            ResponseStreamEvent::OutputTextDelta(delta) => Some(&delta.delta),
            _ => None,
        }
    }

    /// Fold one event into the accumulated state.
    pub fn observe(&mut self, event: &ResponseStreamEvent) {
        match event {
            ResponseStreamEvent::OutputTextDelta(delta) => {
                self.buffer.push_str(&delta.delta);
                self.cursor.advance(&delta.delta, self.width);
            }
            ResponseStreamEvent::OutputTextDone(done) => {
                self.canonical = Some(done.text.clone());
            }
            ResponseStreamEvent::Completed(_) | ResponseStreamEvent::Incomplete => {
                self.complete = true;
            }
            _ => {}
        }
    }

    /// Whether a terminal event has been observed.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The answer text: the transport-reported canonical text when present,
    /// otherwise the concatenation of the displayed fragments.
    pub fn answer(&self) -> &str {
        self.canonical.as_deref().unwrap_or(&self.buffer)
    }

    /// Consume the accumulator, yielding the answer.
    pub fn into_answer(self) -> String {
        match self.canonical {
            Some(text) => text,
            None => self.buffer,
        }
    }

    /// Display rows fully completed by the raw output.
    pub fn completed_lines(&self) -> usize {
        self.cursor.completed_lines()
    }

    /// Total rows the raw output occupies on screen: the completed rows
    /// plus the row currently being written.
    pub fn display_rows(&self) -> usize {
        self.cursor.completed_lines() + 1
    }

    /// The column offset within the row currently being written.
    pub fn column(&self) -> usize {
        self.cursor.column()
    }
}
