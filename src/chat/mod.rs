//! Chat application module for interactive conversations.
//!
//! This module provides a streaming REPL chat interface built on top of the
//! ovidius client library. It supports:
//!
//! - Streaming responses with real-time fragment display
//! - In-place replacement of raw output with Markdown-rendered answers
//! - Slash commands for session control
//! - Per-session transcript logs
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Core chat session management and API interaction
//! - [`commands`]: Slash command parsing and handling
//! - [`transcript`]: Append-only per-session log files

mod commands;
mod config;
mod session;
mod transcript;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, USAGE_URL, help_text, model_overview, parse_command};
pub use config::{ChatArgs, ChatArgsError, ChatConfig};
pub use session::ChatSession;
pub use transcript::Transcript;
