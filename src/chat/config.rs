//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::fmt;
use std::path::PathBuf;

use arrrg_derive::CommandLine;

use crate::types::{Model, ModelParseError};

/// Default system prompt applied to every conversation.
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Default directory for transcript logs.
const DEFAULT_LOG_DIR: &str = "logs";

/// Command-line arguments for the ovidius-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: gpt-4.1-nano)", "MODEL")]
    pub model: Option<String>,

    /// System prompt to set context for the conversation.
    #[arrrg(optional, "System prompt for the conversation", "PROMPT")]
    pub system: Option<String>,

    /// Directory for per-session transcript logs.
    #[arrrg(optional, "Directory for transcript logs (default: logs)", "DIR")]
    pub log_dir: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Error produced when command-line arguments cannot be resolved into a
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatArgsError {
    /// The requested model is not in the allowed set.
    InvalidModel(ModelParseError),
}

impl fmt::Display for ChatArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatArgsError::InvalidModel(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ChatArgsError {}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// The model to use for generating responses.
    pub model: Model,

    /// System prompt that opens every conversation.
    pub system_prompt: String,

    /// Directory where transcript logs are written.
    pub log_dir: PathBuf,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: gpt-4.1-nano
    /// - System prompt: "You are a helpful assistant."
    /// - Log directory: logs
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            model: Model::default(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            use_color: true,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Sets the transcript log directory.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<ChatArgs> for ChatConfig {
    type Error = ChatArgsError;

    fn try_from(args: ChatArgs) -> Result<Self, Self::Error> {
        let model = match args.model {
            Some(name) => name
                .parse::<Model>()
                .map_err(ChatArgsError::InvalidModel)?,
            None => Model::default(),
        };

        let mut config = ChatConfig::new().with_model(model);
        if let Some(system) = args.system {
            config = config.with_system_prompt(system);
        }
        if let Some(log_dir) = args.log_dir {
            config = config.with_log_dir(log_dir);
        }
        if args.no_color {
            config = config.without_color();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.model, Model::Gpt41Nano);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_defaults() {
        let args = ChatArgs::default();
        let config = ChatConfig::try_from(args).unwrap();
        assert_eq!(config.model, Model::Gpt41Nano);
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            model: Some("o4-mini".to_string()),
            system: Some("You are terse.".to_string()),
            log_dir: Some("/tmp/chat-logs".to_string()),
            no_color: true,
        };
        let config = ChatConfig::try_from(args).unwrap();
        assert_eq!(config.model, Model::O4Mini);
        assert_eq!(config.system_prompt, "You are terse.");
        assert_eq!(config.log_dir, PathBuf::from("/tmp/chat-logs"));
        assert!(!config.use_color);
    }

    #[test]
    fn config_rejects_unknown_models() {
        let args = ChatArgs {
            model: Some("gpt-9000".to_string()),
            ..ChatArgs::default()
        };
        let err = ChatConfig::try_from(args).unwrap_err();
        assert!(err.to_string().contains("gpt-9000"));
        assert!(err.to_string().contains("gpt-4.1-nano"));
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_model(Model::Gpt41)
            .with_system_prompt("Test prompt")
            .with_log_dir("elsewhere")
            .without_color();

        assert_eq!(config.model, Model::Gpt41);
        assert_eq!(config.system_prompt, "Test prompt");
        assert_eq!(config.log_dir, PathBuf::from("elsewhere"));
        assert!(!config.use_color);
    }
}
