use crate::types::{OutputTextDeltaEvent, OutputTextDoneEvent, ResponseCompletedEvent};

/// An event in a response stream.
///
/// This enum represents the server-sent events delivered while a response
/// streams. Events arrive in lifecycle order: `response.created`, then
/// output item and content part framing interleaved with text deltas, then
/// the done/completed events. The chat client only consumes the text
/// deltas, the canonical done text, and the terminal event; the framing
/// variants are decoded so the stream parses cleanly, and carry no payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseStreamEvent {
    /// The response has been created.
    Created,

    /// Generation is in progress.
    InProgress,

    /// A new output item was added to the response.
    OutputItemAdded,

    /// A new content part was added to an output item.
    ContentPartAdded,

    /// An incremental fragment of output text.
    OutputTextDelta(OutputTextDeltaEvent),

    /// The complete text of a finished output item. Canonical.
    OutputTextDone(OutputTextDoneEvent),

    /// A content part finished streaming.
    ContentPartDone,

    /// An output item finished streaming.
    OutputItemDone,

    /// The response finished successfully. Always the last event of a
    /// successful stream.
    Completed(ResponseCompletedEvent),

    /// The response ended before generation finished (e.g. it hit the
    /// output token limit). Terminal; whatever text streamed stands.
    Incomplete,
}

impl ResponseStreamEvent {
    /// Returns true for the events that end a stream.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ResponseStreamEvent::Completed(_) | ResponseStreamEvent::Incomplete
        )
    }
}
