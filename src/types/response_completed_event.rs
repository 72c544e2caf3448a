use serde::{Deserialize, Serialize};

use crate::types::Response;

/// The terminal event of a successful stream.
///
/// Carries the finished response summary, including usage totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseCompletedEvent {
    /// The completed response.
    pub response: Response,
}

impl ResponseCompletedEvent {
    /// Create a new `ResponseCompletedEvent`.
    pub fn new(response: Response) -> Self {
        Self { response }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Model;
    use serde_json::json;

    #[test]
    fn deserialization() {
        let json = json!({
            "type": "response.completed",
            "response": {
                "id": "resp_0123",
                "model": "gpt-4.1-mini",
                "usage": {
                    "input_tokens": 3,
                    "output_tokens": 4,
                    "total_tokens": 7
                }
            }
        });

        let event: ResponseCompletedEvent = serde_json::from_value(json).unwrap();
        assert_eq!(event.response.id, "resp_0123");
        assert_eq!(event.response.model, Model::Gpt41Mini);
        assert_eq!(event.response.usage.unwrap().total_tokens, 7);
    }
}
