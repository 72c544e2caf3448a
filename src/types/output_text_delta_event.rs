use serde::{Deserialize, Serialize};

/// An event carrying one incremental fragment of generated text.
///
/// Fragments arrive in order and concatenate to the full output text; each
/// one is displayed immediately as it arrives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputTextDeltaEvent {
    /// The newly generated text fragment.
    pub delta: String,

    /// The identifier of the output item the fragment belongs to.
    #[serde(default)]
    pub item_id: String,

    /// The index of the output item within the response.
    #[serde(default)]
    pub output_index: usize,

    /// The index of the content part within the output item.
    #[serde(default)]
    pub content_index: usize,
}

impl OutputTextDeltaEvent {
    /// Create a new `OutputTextDeltaEvent` with the given fragment.
    pub fn new(delta: impl Into<String>) -> Self {
        Self {
            delta: delta.into(),
            item_id: String::new(),
            output_index: 0,
            content_index: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialization() {
        let json = json!({
            "type": "response.output_text.delta",
            "item_id": "msg_0123",
            "output_index": 0,
            "content_index": 0,
            "delta": "Hello"
        });

        let event: OutputTextDeltaEvent = serde_json::from_value(json).unwrap();
        assert_eq!(event.delta, "Hello");
        assert_eq!(event.item_id, "msg_0123");
    }

    #[test]
    fn missing_indices_default() {
        let json = json!({"delta": "fragment"});
        let event: OutputTextDeltaEvent = serde_json::from_value(json).unwrap();
        assert_eq!(event.delta, "fragment");
        assert_eq!(event.output_index, 0);
    }
}
