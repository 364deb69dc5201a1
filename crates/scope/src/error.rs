//! Error types for scope lifecycle

use std::io;

use thiserror::Error;

/// Errors that can occur starting or stopping a scope.
#[derive(Error, Debug)]
pub enum ScopeError {
    /// I/O error (binding the watch listener)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Watch server failure
    #[error(transparent)]
    Watch(#[from] scope_watch::WatchError),

    /// The watch server task panicked or was cancelled
    #[error("watch server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type for scope operations.
pub type Result<T> = std::result::Result<T, ScopeError>;
