// Public modules
pub mod message_param;
pub mod model;
pub mod output_text_delta_event;
pub mod output_text_done_event;
pub mod response;
pub mod response_completed_event;
pub mod response_create_params;
pub mod response_stream_event;
pub mod usage;

// Re-exports
pub use message_param::{MessageParam, MessageRole};
pub use model::{Model, ModelParseError};
pub use output_text_delta_event::OutputTextDeltaEvent;
pub use output_text_done_event::OutputTextDoneEvent;
pub use response::Response;
pub use response_completed_event::ResponseCompletedEvent;
pub use response_create_params::ResponseCreateParams;
pub use response_stream_event::ResponseStreamEvent;
pub use usage::Usage;
