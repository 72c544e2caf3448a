use serde::{Deserialize, Serialize};

/// An event carrying the complete text of a finished output item.
///
/// The transport is authoritative about the final text: the `text` field
/// here is the canonical answer, not necessarily byte-identical to the
/// concatenation of displayed fragments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputTextDoneEvent {
    /// The complete generated text.
    pub text: String,

    /// The identifier of the output item.
    #[serde(default)]
    pub item_id: String,

    /// The index of the output item within the response.
    #[serde(default)]
    pub output_index: usize,

    /// The index of the content part within the output item.
    #[serde(default)]
    pub content_index: usize,
}

impl OutputTextDoneEvent {
    /// Create a new `OutputTextDoneEvent` with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            item_id: String::new(),
            output_index: 0,
            content_index: 0,
        }
    }
}
