//! Payload serialization helper for capture instrumentation

use serde::Serialize;

/// Serialize a value to JSON for display in a call event.
///
/// This is a display helper, not a fallible API: values that cannot be
/// serialized render as an empty string, which the event model already
/// treats as "no payload captured".
pub fn marshal_payload<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
#[path = "payload_test.rs"]
mod tests;
