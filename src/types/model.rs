use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An OpenAI model identifier.
///
/// The set is closed: the chat client only offers these models, and
/// switching to anything else is rejected with a diagnostic listing the
/// allowed values.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    /// Fastest, most cost-effective GPT-4.1 model. The default.
    #[default]
    #[serde(rename = "gpt-4.1-nano")]
    Gpt41Nano,

    /// Balanced for intelligence, speed, and cost.
    #[serde(rename = "gpt-4.1-mini")]
    Gpt41Mini,

    /// Flagship GPT model for complex tasks.
    #[serde(rename = "gpt-4.1")]
    Gpt41,

    /// Faster, more affordable reasoning model.
    #[serde(rename = "o4-mini")]
    O4Mini,
}

impl Model {
    /// Every model the client can talk to, in display order.
    pub const ALL: [Model; 4] = [
        Model::Gpt41Nano,
        Model::Gpt41Mini,
        Model::Gpt41,
        Model::O4Mini,
    ];

    /// The wire identifier for this model.
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Gpt41Nano => "gpt-4.1-nano",
            Model::Gpt41Mini => "gpt-4.1-mini",
            Model::Gpt41 => "gpt-4.1",
            Model::O4Mini => "o4-mini",
        }
    }

    /// A comma-separated listing of the allowed identifiers, for
    /// diagnostics.
    pub fn allowed() -> String {
        Model::ALL
            .iter()
            .map(Model::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing a string that names no allowed model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelParseError {
    /// The string that could not be parsed.
    pub invalid_value: String,
}

impl fmt::Display for ModelParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a valid model. Choose from: {}",
            self.invalid_value,
            Model::allowed()
        )
    }
}

impl std::error::Error for ModelParseError {}

impl FromStr for Model {
    type Err = ModelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gpt-4.1-nano" => Ok(Model::Gpt41Nano),
            "gpt-4.1-mini" => Ok(Model::Gpt41Mini),
            "gpt-4.1" => Ok(Model::Gpt41),
            "o4-mini" => Ok(Model::O4Mini),
            _ => Err(ModelParseError {
                invalid_value: s.to_string(),
            }),
        }
    }
}
