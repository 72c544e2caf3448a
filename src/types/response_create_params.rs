use serde::{Deserialize, Serialize};

use crate::types::{MessageParam, Model};

/// Parameters for creating a model response.
///
/// This is the request body for the `/responses` endpoint: a model
/// identifier and the ordered conversation input. The client sets `stream`
/// before sending when incremental delivery is requested.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseCreateParams {
    /// The model that generates the response.
    pub model: Model,

    /// The ordered list of conversation messages.
    pub input: Vec<MessageParam>,

    /// Whether to stream the response as server-sent events.
    #[serde(default, skip_serializing_if = "is_false")]
    pub stream: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ResponseCreateParams {
    /// Create new parameters for a non-streaming request.
    pub fn new(model: Model, input: Vec<MessageParam>) -> Self {
        Self {
            model,
            input,
            stream: false,
        }
    }

    /// Create new parameters with streaming enabled.
    pub fn streaming(model: Model, input: Vec<MessageParam>) -> Self {
        Self {
            model,
            input,
            stream: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn non_streaming_omits_the_stream_field() {
        let params = ResponseCreateParams::new(Model::Gpt41Nano, vec![MessageParam::user("hi")]);
        let json = to_value(&params).unwrap();

        assert_eq!(
            json,
            json!({
                "model": "gpt-4.1-nano",
                "input": [{"role": "user", "content": "hi"}]
            })
        );
    }

    #[test]
    fn streaming_serializes_the_stream_field() {
        let params =
            ResponseCreateParams::streaming(Model::O4Mini, vec![MessageParam::user("hi")]);
        let json = to_value(&params).unwrap();
        assert_eq!(json["stream"], json!(true));
        assert_eq!(json["model"], json!("o4-mini"));
    }

    #[test]
    fn deserialization_defaults_stream_to_false() {
        let json = json!({
            "model": "gpt-4.1",
            "input": []
        });
        let params: ResponseCreateParams = serde_json::from_value(json).unwrap();
        assert!(!params.stream);
        assert_eq!(params.model, Model::Gpt41);
    }
}
