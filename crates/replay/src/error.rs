//! Error types for replay operations
//!
//! The taxonomy keeps local failures apart from remote ones: everything here
//! means the replay could not be attempted or completed. A target server
//! answering with a non-OK status is reported through
//! [`ReplayResult`](crate::ReplayResult), not through this enum.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while replaying a call.
#[derive(Error, Debug)]
pub enum ReplayError {
    /// Malformed full method path
    #[error("invalid method format {0:?} (expected /service/method)")]
    InvalidMethod(String),

    /// Dial failure
    #[error("connect to {target}: {source}")]
    Connect {
        target: String,
        #[source]
        source: tonic::transport::Error,
    },

    /// Transport failure on an established connection
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// The reflection stream itself failed
    #[error("reflection stream: {0}")]
    Reflection(tonic::Status),

    /// The server answered the reflection request with an error response
    #[error("reflection error response: {message} (code {code})")]
    ReflectionResponse { code: i32, message: String },

    /// The server answered with neither descriptors nor an error
    #[error("unexpected reflection response")]
    UnexpectedReflectionResponse,

    /// A serialized file descriptor could not be decoded
    #[error("decode file descriptor: {0}")]
    DecodeDescriptor(#[from] prost::DecodeError),

    /// The returned descriptors do not form a valid schema
    #[error("build descriptor pool: {0}")]
    DescriptorPool(#[from] prost_reflect::DescriptorError),

    /// The service symbol was not present in the resolved schema
    #[error("service {0:?} not found")]
    ServiceNotFound(String),

    /// The method was not declared by the resolved service
    #[error("method {method:?} not found in service {service:?}")]
    MethodNotFound { service: String, method: String },

    /// Streaming methods cannot be replayed
    #[error("streaming methods cannot be replayed")]
    StreamingNotSupported,

    /// The request payload does not conform to the input schema
    #[error("unmarshal request JSON: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    /// The response message could not be rendered as JSON
    #[error("marshal response JSON: {0}")]
    MarshalResponse(#[source] serde_json::Error),

    /// A forwarded metadata key or value is not valid for gRPC
    #[error("invalid metadata entry {0:?}")]
    InvalidMetadata(String),

    /// The replay exceeded its fixed upper bound
    #[error("replay timed out after {0:?}")]
    DeadlineExceeded(Duration),
}

/// Result type for replay operations.
pub type Result<T> = std::result::Result<T, ReplayError>;
