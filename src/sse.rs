//! Server-Sent Events (SSE) processing for streaming responses.
//!
//! This module handles parsing and processing of SSE streams from the
//! responses endpoint, converting raw byte streams into structured
//! ResponseStreamEvent objects.

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};

use crate::observability::{STREAM_BYTES, STREAM_EVENTS};
use crate::{
    Error, OutputTextDeltaEvent, OutputTextDoneEvent, ResponseCompletedEvent, ResponseStreamEvent,
    Result,
};

/// Process a stream of bytes into a stream of server-sent events.
///
/// This function takes a byte stream from an HTTP response and converts it
/// into a stream of parsed ResponseStreamEvent objects, handling SSE
/// parsing, buffering, and error conditions.
pub fn process_sse<S>(byte_stream: S) -> impl Stream<Item = Result<ResponseStreamEvent>>
where
    S: Stream<Item = std::result::Result<Bytes, reqwest::Error>> + Unpin + 'static,
{
    // Convert reqwest errors to our error type
    let stream = byte_stream.map(|result| {
        result
            .map_err(|e| Error::streaming(format!("Error in HTTP stream: {e}"), Some(Box::new(e))))
    });

    // Use a state machine to process the SSE stream
    let buffer = String::new();

    stream::unfold(
        (stream, buffer),
        move |(mut stream, mut buffer)| async move {
            loop {
                // First check if we have a complete event in the buffer
                if let Some((event, remaining)) = extract_event(&buffer) {
                    STREAM_EVENTS.click();
                    buffer = remaining;
                    return Some((event, (stream, buffer)));
                }

                // Read more data
                match stream.next().await {
                    Some(Ok(bytes)) => {
                        STREAM_BYTES.count(bytes.len() as u64);
                        match String::from_utf8(bytes.to_vec()) {
                            Ok(text) => buffer.push_str(&text),
                            Err(e) => {
                                return Some((
                                    Err(Error::encoding(
                                        format!("Invalid UTF-8 in stream: {e}"),
                                        Some(Box::new(e)),
                                    )),
                                    (stream, buffer),
                                ));
                            }
                        }
                    }
                    Some(Err(e)) => {
                        return Some((Err(e), (stream, buffer)));
                    }
                    None => {
                        // End of stream
                        if !buffer.is_empty() {
                            if let Some((event, _)) = extract_event(&buffer) {
                                return Some((event, (stream, buffer)));
                            }
                        }
                        return None;
                    }
                }
            }
        },
    )
}

/// Extract a complete SSE event from a buffer string.
///
/// Parses SSE format where events are delimited by double newlines and
/// each event has an event type line followed by a data line.
fn extract_event(buffer: &str) -> Option<(Result<ResponseStreamEvent>, String)> {
    // Simple SSE parsing - each event is delimited by double newlines
    let parts: Vec<&str> = buffer.splitn(2, "\n\n").collect();
    if parts.len() != 2 {
        return None;
    }
    let event_text = parts[0];
    let rest = parts[1].to_string();

    // Parse event type and data
    let Some((event_type, event_data)) = event_text.split_once('\n') else {
        return Some((
            Err(Error::serialization(
                format!("Malformed SSE event: missing newline separator in '{event_text}'"),
                None,
            )),
            rest,
        ));
    };

    let Some(event_data) = event_data.strip_prefix("data:").map(str::trim) else {
        return Some((
            Err(Error::serialization(
                format!("Malformed SSE event: missing 'data:' prefix in '{event_data}'"),
                None,
            )),
            rest,
        ));
    };

    // Parse specific event types
    parse_event_type(event_type, event_data, rest)
}

/// Parse a specific SSE event type and its data.
fn parse_event_type(
    event_type: &str,
    event_data: &str,
    rest: String,
) -> Option<(Result<ResponseStreamEvent>, String)> {
    match event_type {
        "event: response.created" => Some((Ok(ResponseStreamEvent::Created), rest)),

        "event: response.in_progress" => Some((Ok(ResponseStreamEvent::InProgress), rest)),

        "event: response.output_item.added" => {
            Some((Ok(ResponseStreamEvent::OutputItemAdded), rest))
        }

        "event: response.content_part.added" => {
            Some((Ok(ResponseStreamEvent::ContentPartAdded), rest))
        }

        "event: response.output_text.delta" => {
            match serde_json::from_str::<OutputTextDeltaEvent>(event_data) {
                Ok(event) => Some((Ok(ResponseStreamEvent::OutputTextDelta(event)), rest)),
                Err(e) => Some((Err(e.into()), rest)),
            }
        }

        "event: response.output_text.done" => {
            match serde_json::from_str::<OutputTextDoneEvent>(event_data) {
                Ok(event) => Some((Ok(ResponseStreamEvent::OutputTextDone(event)), rest)),
                Err(e) => Some((Err(e.into()), rest)),
            }
        }

        "event: response.content_part.done" => {
            Some((Ok(ResponseStreamEvent::ContentPartDone), rest))
        }

        "event: response.output_item.done" => {
            Some((Ok(ResponseStreamEvent::OutputItemDone), rest))
        }

        "event: response.completed" => {
            match serde_json::from_str::<ResponseCompletedEvent>(event_data) {
                Ok(event) => Some((Ok(ResponseStreamEvent::Completed(event)), rest)),
                Err(e) => Some((Err(e.into()), rest)),
            }
        }

        "event: response.incomplete" => Some((Ok(ResponseStreamEvent::Incomplete), rest)),

        "event: response.failed" => Some((Err(parse_failure(event_data)), rest)),

        "event: error" => {
            // Parse error event - the data should contain error details
            Some((
                Err(Error::api(
                    500,
                    Some("stream_error".to_string()),
                    event_data.to_string(),
                    None,
                )),
                rest,
            ))
        }

        _ => Some((
            Err(Error::serialization(
                format!("Unknown SSE event type: {event_type}"),
                None,
            )),
            rest,
        )),
    }
}

/// Extract the failure message carried by a `response.failed` event.
fn parse_failure(event_data: &str) -> Error {
    #[derive(serde::Deserialize)]
    struct FailedEvent {
        response: FailedResponse,
    }

    #[derive(serde::Deserialize)]
    struct FailedResponse {
        error: Option<FailureDetail>,
    }

    #[derive(serde::Deserialize)]
    struct FailureDetail {
        code: Option<String>,
        message: Option<String>,
    }

    let detail = serde_json::from_str::<FailedEvent>(event_data)
        .ok()
        .and_then(|event| event.response.error);
    let code = detail.as_ref().and_then(|d| d.code.clone());
    let message = detail
        .and_then(|d| d.message)
        .unwrap_or_else(|| event_data.to_string());
    Error::api(500, code, message, None)
}
