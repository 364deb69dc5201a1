//! Scope Replay - resend captured gRPC calls without compiled types
//!
//! A captured (or hand-edited) request is replayed against the original
//! server with no compile-time knowledge of its message types. The method's
//! schema is resolved over gRPC server reflection, the request is built as a
//! schema-driven [`prost_reflect::DynamicMessage`] from JSON, and the call
//! is invoked by its full path:
//!
//! ```text
//! send(request)
//!   ├─ parse_method ───── "/pkg.Service/Method" → (service, method)
//!   ├─ reflection ─────── FileContainingSymbol → DescriptorRegistry → pool
//!   ├─ DynamicMessage ─── payload JSON parsed against the input schema
//!   └─ invoke ─────────── unary call, 30s bound, marker metadata attached
//! ```
//!
//! A non-OK status from the target server is not a local error: it comes
//! back inside [`ReplayResult`] so callers can display it directly. Only
//! failures to attempt or complete the call surface as [`ReplayError`].

mod client;
mod codec;
mod descriptor;
mod error;
mod metadata;
mod method;

pub use client::{ReplayClient, ReplayRequest, ReplayResult, REPLAY_METADATA_KEY};
pub use codec::DynamicCodec;
pub use descriptor::DescriptorRegistry;
pub use error::{ReplayError, Result};
pub use metadata::filter_metadata;
pub use method::parse_method;
