//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the API.

use crate::types::Model;

/// The billing/usage page opened by `/usage`.
pub const USAGE_URL: &str = "https://platform.openai.com/usage";

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the API.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Exit the chat gracefully.
    Thanks,

    /// Show the current model (`None`) or switch to a named one.
    Model(Option<String>),

    /// Open the API usage page in a browser.
    Usage,

    /// Read local files and inject their contents as conversation context.
    Import(Vec<String>),

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use ovidius::chat::parse_command;
/// assert!(parse_command("/thanks").is_some());
/// assert!(parse_command("/model gpt-4.1").is_some());
/// assert!(parse_command("Hello!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "thanks" => ChatCommand::Thanks,
        "model" => ChatCommand::Model(argument.map(|s| s.to_string())),
        "usage" => ChatCommand::Usage,
        "import" => parse_import_command(argument),
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn parse_import_command(argument: Option<&str>) -> ChatCommand {
    let Some(arg) = argument else {
        return ChatCommand::Invalid("Usage: /import <file_path> [...]".to_string());
    };

    match shlex::split(arg) {
        Some(paths) if !paths.is_empty() => ChatCommand::Import(paths),
        Some(_) => ChatCommand::Invalid("Usage: /import <file_path> [...]".to_string()),
        None => ChatCommand::Invalid("Could not parse /import arguments".to_string()),
    }
}

/// Returns help text describing available commands, shown at startup and
/// after an unrecognized command.
pub fn help_text() -> &'static str {
    r#"/thanks to leave
/model to show or switch models
/import file1.txt (file2.txt)...
/usage to view API usage"#
}

/// Describes the current model, the allowed set, and how they compare.
pub fn model_overview(current: &Model) -> String {
    format!(
        r#"Current model: {current}
Available: {}

Model comparison:
gpt-4.1: Flagship GPT model for complex tasks.
gpt-4.1-mini: Balanced for intelligence, speed, and cost
gpt-4.1-nano (default): Fastest, most cost-effective GPT-4.1 model
o4-mini: Faster, more affordable reasoning model

| Model        | Intelligence    | Speed | Price (Input/Output per 1M tokens) |
|--------------|-----------------|-------|------------------------------------|
| gpt-4.1      | 4/5             | 3/5   | $2.00 / $8.00                      |
| gpt-4.1-mini | 3/5             | 4/5   | $0.40 / $1.60                      |
| gpt-4.1-nano | 2/5             | 5/5   | $0.10 / $0.40                      |
| o4-mini      | 4/5 (Reasoning) | 3/5   | $1.10 / $4.40                      |"#,
        Model::allowed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_thanks() {
        assert_eq!(parse_command("/thanks"), Some(ChatCommand::Thanks));
        assert_eq!(parse_command("  /thanks  "), Some(ChatCommand::Thanks));
        assert_eq!(parse_command("/THANKS"), Some(ChatCommand::Thanks));
    }

    #[test]
    fn parse_model() {
        assert_eq!(parse_command("/model"), Some(ChatCommand::Model(None)));
        assert_eq!(
            parse_command("/model gpt-4.1"),
            Some(ChatCommand::Model(Some("gpt-4.1".to_string())))
        );
        assert_eq!(
            parse_command("/model   o4-mini  "),
            Some(ChatCommand::Model(Some("o4-mini".to_string())))
        );
    }

    #[test]
    fn parse_usage() {
        assert_eq!(parse_command("/usage"), Some(ChatCommand::Usage));
    }

    #[test]
    fn parse_import() {
        assert_eq!(
            parse_command("/import notes.txt"),
            Some(ChatCommand::Import(vec!["notes.txt".to_string()]))
        );
        assert_eq!(
            parse_command("/import a.txt b.txt"),
            Some(ChatCommand::Import(vec![
                "a.txt".to_string(),
                "b.txt".to_string()
            ]))
        );
        assert_eq!(
            parse_command("/import \"my notes.txt\""),
            Some(ChatCommand::Import(vec!["my notes.txt".to_string()]))
        );
    }

    #[test]
    fn parse_import_without_arguments() {
        assert!(matches!(
            parse_command("/import"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("Usage")
        ));
    }

    #[test]
    fn parse_import_with_unbalanced_quotes() {
        assert!(matches!(
            parse_command("/import \"unterminated"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("parse")
        ));
    }

    #[test]
    fn unknown_commands_are_invalid() {
        assert!(matches!(
            parse_command("/frobnicate"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("/frobnicate")
        ));
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("Hello!"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(help.contains("/thanks"));
        assert!(help.contains("/model"));
        assert!(help.contains("/import"));
        assert!(help.contains("/usage"));
    }

    #[test]
    fn model_overview_lists_the_allowed_set() {
        let overview = model_overview(&Model::Gpt41Nano);
        assert!(overview.contains("Current model: gpt-4.1-nano"));
        for model in Model::ALL {
            assert!(overview.contains(model.as_str()));
        }
    }
}
