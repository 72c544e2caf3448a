use serde::{Deserialize, Serialize};

/// Token usage reported for a completed response.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    /// The number of input tokens consumed.
    pub input_tokens: u64,

    /// The number of output tokens generated.
    pub output_tokens: u64,

    /// The total tokens billed for the request.
    pub total_tokens: u64,
}

impl Usage {
    /// Create a new `Usage` with the given input and output tokens.
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}
