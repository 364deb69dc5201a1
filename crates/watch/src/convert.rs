//! Domain to wire conversions

use std::collections::HashMap;

use scope_domain::{CallEvent, Metadata};
use scope_proto::scope::v1;

/// Convert a domain event to its `scope.v1` wire representation.
pub fn call_event_to_proto(event: &CallEvent) -> v1::CallEvent {
    v1::CallEvent {
        id: event.id.clone(),
        method: event.method.clone(),
        start_time: Some(prost_types::Timestamp::from(event.start_time)),
        duration: prost_types::Duration::try_from(event.duration).ok(),
        status_code: event.status_code.value(),
        status_message: event.status_message.clone(),
        request_metadata: metadata_to_proto(&event.request_metadata),
        response_headers: metadata_to_proto(&event.response_headers),
        response_trailers: metadata_to_proto(&event.response_trailers),
        request_payload: event.request_payload.clone(),
        response_payload: event.response_payload.clone(),
    }
}

fn metadata_to_proto(metadata: &Metadata) -> HashMap<String, v1::MetadataValues> {
    metadata
        .iter()
        .map(|(key, values)| {
            (
                key.clone(),
                v1::MetadataValues {
                    values: values.clone(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "convert_test.rs"]
mod tests;
