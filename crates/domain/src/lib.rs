//! Scope Domain - captured call data model
//!
//! The value types shared by the capture, broker, watch, and replay layers:
//! [`CallEvent`] records one completed gRPC call, [`StatusCode`] carries its
//! status in an offset encoding that keeps "never recorded" distinguishable
//! from a genuine OK, and [`Metadata`] holds gRPC headers/trailers.

mod call_event;
mod status;

pub use call_event::{CallEvent, Metadata};
pub use status::StatusCode;
