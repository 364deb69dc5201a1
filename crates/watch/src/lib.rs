//! Scope Watch - streaming server for captured call events
//!
//! Exposes the broker to remote watchers over the `scope.v1.ScopeService`
//! server-streaming API. Each `Watch` call holds one broker subscription for
//! the lifetime of the stream:
//!
//! ```text
//! Broker ──► Subscription ──► forwarding task ──► tonic stream ──► watcher
//! ```
//!
//! The subscription is released exactly once, whichever way the stream ends
//! (watcher disconnect, transport failure, or the queue closing).

mod convert;
mod error;
mod server;
mod service;

pub use convert::call_event_to_proto;
pub use error::{Result, WatchError};
pub use server::{WatchServer, WatchServerConfig, DEFAULT_PORT};
pub use service::WatchService;
