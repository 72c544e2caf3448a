// Public modules
pub mod accumulator;
pub mod chat;
pub mod client;
pub mod error;
pub mod markdown;
pub mod observability;
pub mod render;
pub mod repaint;
pub mod sse;
pub mod types;
pub mod wrap;

// Re-exports
pub use accumulator::StreamAccumulator;
pub use client::{CompletionTransport, EventStream, OpenAi};
pub use error::{Error, Result};
pub use render::{BANNER_ROWS, PlainTextRenderer, Renderer};
pub use repaint::{AnsiRepaint, NoopRepaint, Repaint};
pub use types::*;
pub use wrap::{LineCursor, TerminalWidth};
