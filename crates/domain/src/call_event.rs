//! CallEvent - the record of one completed gRPC call
//!
//! Events are created once by the capture layer and never mutated after
//! construction. The broker hands each subscriber its own clone; nothing is
//! retained after fan-out.

use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use crate::status::StatusCode;

/// gRPC metadata (headers or trailers): header name to ordered values.
///
/// Repeated headers keep their order. Keys are stored as received; case
/// normalization is a replay concern, not a capture concern.
pub type Metadata = HashMap<String, Vec<String>>;

/// A single captured gRPC call.
#[derive(Debug, Clone)]
pub struct CallEvent {
    /// Unique per-process identifier, assigned by the capture layer.
    pub id: String,
    /// Full method path, e.g. `/pkg.Service/Method`.
    pub method: String,
    pub start_time: SystemTime,
    pub duration: Duration,
    pub status_code: StatusCode,
    /// Empty unless the call failed.
    pub status_message: String,
    pub request_metadata: Metadata,
    pub response_headers: Metadata,
    pub response_trailers: Metadata,
    /// Request body pre-serialized to JSON at capture time.
    pub request_payload: String,
    /// Response body pre-serialized to JSON at capture time.
    pub response_payload: String,
}

impl Default for CallEvent {
    fn default() -> Self {
        Self {
            id: String::new(),
            method: String::new(),
            start_time: SystemTime::UNIX_EPOCH,
            duration: Duration::ZERO,
            status_code: StatusCode::UNSPECIFIED,
            status_message: String::new(),
            request_metadata: Metadata::new(),
            response_headers: Metadata::new(),
            response_trailers: Metadata::new(),
            request_payload: String::new(),
            response_payload: String::new(),
        }
    }
}

impl CallEvent {
    /// Whether the call ended with a non-OK status.
    ///
    /// An `UNSPECIFIED` status also counts as an error: a call whose status
    /// was never recorded is not treated as a success.
    #[inline]
    pub fn is_error(&self) -> bool {
        !self.status_code.is_ok()
    }
}

#[cfg(test)]
#[path = "call_event_test.rs"]
mod tests;
