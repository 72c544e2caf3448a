use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("ovidius.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("ovidius.client.request_errors");

pub(crate) static STREAM_EVENTS: Counter = Counter::new("ovidius.stream.events");
pub(crate) static STREAM_BYTES: Counter = Counter::new("ovidius.stream.bytes");
pub(crate) static STREAM_DURATION: Moments = Moments::new("ovidius.stream.duration_seconds");

pub(crate) static CHAT_TURNS: Counter = Counter::new("ovidius.chat.turns");
pub(crate) static CHAT_TURN_ERRORS: Counter = Counter::new("ovidius.chat.turn_errors");
pub(crate) static CHAT_IMPORTS: Counter = Counter::new("ovidius.chat.imports");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);

    collector.register_counter(&STREAM_EVENTS);
    collector.register_counter(&STREAM_BYTES);
    collector.register_moments(&STREAM_DURATION);

    collector.register_counter(&CHAT_TURNS);
    collector.register_counter(&CHAT_TURN_ERRORS);
    collector.register_counter(&CHAT_IMPORTS);
}
