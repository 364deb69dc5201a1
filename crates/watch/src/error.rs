//! Error types for the watch server

use std::io;

use thiserror::Error;

/// Errors that can occur while serving watch streams.
#[derive(Error, Debug)]
pub enum WatchError {
    /// I/O error (binding the listener)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// gRPC transport error
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}

/// Result type for watch operations.
pub type Result<T> = std::result::Result<T, WatchError>;
