//! Status code model with offset encoding
//!
//! Domain status codes are native gRPC status codes shifted by +1 so that
//! `0` is reserved for "unspecified" (the call's status was never recorded).
//! A genuine OK is therefore `1`, CANCELLED is `2`, and so on through
//! UNAUTHENTICATED at `17`.

use std::fmt;

/// A gRPC status code in the domain's offset encoding.
///
/// The wrapped value is total: any integer is representable, and values
/// outside the defined 0..=17 range render as `"UNKNOWN"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatusCode(i32);

impl StatusCode {
    /// Status was never recorded. Counts as an error.
    pub const UNSPECIFIED: StatusCode = StatusCode(0);
    pub const OK: StatusCode = StatusCode(1);
    pub const CANCELLED: StatusCode = StatusCode(2);
    pub const UNKNOWN: StatusCode = StatusCode(3);
    pub const INVALID_ARGUMENT: StatusCode = StatusCode(4);
    pub const DEADLINE_EXCEEDED: StatusCode = StatusCode(5);
    pub const NOT_FOUND: StatusCode = StatusCode(6);
    pub const ALREADY_EXISTS: StatusCode = StatusCode(7);
    pub const PERMISSION_DENIED: StatusCode = StatusCode(8);
    pub const RESOURCE_EXHAUSTED: StatusCode = StatusCode(9);
    pub const FAILED_PRECONDITION: StatusCode = StatusCode(10);
    pub const ABORTED: StatusCode = StatusCode(11);
    pub const OUT_OF_RANGE: StatusCode = StatusCode(12);
    pub const UNIMPLEMENTED: StatusCode = StatusCode(13);
    pub const INTERNAL: StatusCode = StatusCode(14);
    pub const UNAVAILABLE: StatusCode = StatusCode(15);
    pub const DATA_LOSS: StatusCode = StatusCode(16);
    pub const UNAUTHENTICATED: StatusCode = StatusCode(17);

    /// Create a status code from a native (0-based) gRPC code.
    #[inline]
    pub fn from_grpc(code: i32) -> Self {
        StatusCode(code.saturating_add(1))
    }

    /// Create a status code directly from its domain (offset) value.
    #[inline]
    pub fn from_domain(value: i32) -> Self {
        StatusCode(value)
    }

    /// The domain (offset) value, as carried on the wire.
    #[inline]
    pub fn value(self) -> i32 {
        self.0
    }

    /// Canonical short name for the code.
    ///
    /// Total over all inputs: anything outside 0..=17 is `"UNKNOWN"`.
    pub fn as_str(self) -> &'static str {
        match self.0 {
            0 => "UNSPECIFIED",
            1 => "OK",
            2 => "CANCELLED",
            3 => "UNKNOWN",
            4 => "INVALID_ARGUMENT",
            5 => "DEADLINE_EXCEEDED",
            6 => "NOT_FOUND",
            7 => "ALREADY_EXISTS",
            8 => "PERMISSION_DENIED",
            9 => "RESOURCE_EXHAUSTED",
            10 => "FAILED_PRECONDITION",
            11 => "ABORTED",
            12 => "OUT_OF_RANGE",
            13 => "UNIMPLEMENTED",
            14 => "INTERNAL",
            15 => "UNAVAILABLE",
            16 => "DATA_LOSS",
            17 => "UNAUTHENTICATED",
            _ => "UNKNOWN",
        }
    }

    /// Whether the code represents a successful call.
    #[inline]
    pub fn is_ok(self) -> bool {
        self == StatusCode::OK
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
