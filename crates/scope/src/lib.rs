//! grpc-scope - live gRPC traffic scope
//!
//! The process-facing entry point: owns the broker and the watch server and
//! hands capture instrumentation everything it needs to publish events.
//!
//! ```no_run
//! use grpc_scope::Scope;
//!
//! # async fn run() -> Result<(), grpc_scope::ScopeError> {
//! let scope = Scope::builder().port(9090).start().await?;
//!
//! // In an interceptor, for each completed call:
//! let mut event = grpc_scope::CallEvent::default();
//! event.id = scope.next_event_id();
//! scope.publish(event);
//!
//! scope.shutdown().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod payload;
mod scope;

pub use error::{Result, ScopeError};
pub use payload::marshal_payload;
pub use scope::{Scope, ScopeBuilder};

pub use scope_broker::{Broker, Subscription};
pub use scope_domain::{CallEvent, Metadata, StatusCode};
