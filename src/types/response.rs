use serde::{Deserialize, Serialize};

use crate::types::{Model, Usage};

/// Summary of a generated response, as carried by the terminal stream event.
///
/// The full API object has many more fields; only the ones the chat client
/// consumes are modeled, and unknown fields are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    /// The unique identifier of the response.
    pub id: String,

    /// The model that generated the response.
    pub model: Model,

    /// Token usage, present once generation finishes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl Response {
    /// Create a new `Response` summary.
    pub fn new(id: impl Into<String>, model: Model) -> Self {
        Self {
            id: id.into(),
            model,
            usage: None,
        }
    }

    /// Set the usage totals.
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }
}
