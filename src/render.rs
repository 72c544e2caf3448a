//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction that allows
//! for different output styles. The default implementation uses ANSI
//! escape codes for styling the model banner and diagnostics, and renders
//! final answers through the Markdown formatter.

use std::io::{self, Stdout, Write};

use crate::markdown::render_markdown;
use crate::types::Model;

/// ANSI escape code for bold text.
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for yellow text (model banner and headers).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for red text (errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for green text (confirmations).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Rows the thinking banner occupies above the raw streamed output.
///
/// The repaint step erases the streamed rows plus this fixed offset.
pub const BANNER_ROWS: usize = 1;

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
/// - Capturing output in tests
pub trait Renderer: Send {
    /// Print a raw streamed fragment, unbuffered.
    ///
    /// This is called incrementally as fragments arrive from the API and
    /// must reach the terminal immediately.
    fn print_fragment(&mut self, text: &str);

    /// Print the fixed banner shown while a response streams.
    ///
    /// Occupies exactly [`BANNER_ROWS`] rows above the raw output.
    fn print_banner(&mut self, model: &Model);

    /// Print the formatted final answer in place of the erased raw output.
    fn print_answer(&mut self, model: &Model, answer: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print a confirmation message.
    fn print_success(&mut self, message: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Called when the stream is interrupted by the user.
    fn print_interrupted(&mut self);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            use_color: true,
        }
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    /// Flushes stdout to ensure immediate display of streamed content.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn model_label(&self, model: &Model) -> String {
        if self.use_color {
            format!("{ANSI_BOLD}{ANSI_YELLOW}{model}{ANSI_RESET}")
        } else {
            model.to_string()
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_fragment(&mut self, text: &str) {
        print!("{text}");
        self.flush();
    }

    fn print_banner(&mut self, model: &Model) {
        // One separator row that stays, then the banner row the repaint
        // erases along with the raw output.
        println!("\n{} is thinking...", self.model_label(model));
        self.flush();
    }

    fn print_answer(&mut self, model: &Model, answer: &str) {
        println!("{}:", self.model_label(model));
        print!("{}", render_markdown(answer, self.use_color));
        println!();
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }

    fn print_success(&mut self, message: &str) {
        if self.use_color {
            println!("{ANSI_BOLD}{ANSI_GREEN}{message}{ANSI_RESET}");
        } else {
            println!("{message}");
        }
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        if self.use_color {
            eprintln!("\n{ANSI_BOLD}{ANSI_RED}Error:{ANSI_RESET} {error}");
        } else {
            eprintln!("\nError: {error}");
        }
    }

    fn print_interrupted(&mut self) {
        println!("\n[interrupted]");
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color);
    }

    #[test]
    fn model_label_is_plain_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert_eq!(renderer.model_label(&Model::Gpt41Nano), "gpt-4.1-nano");
    }
}
