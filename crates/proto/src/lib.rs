//! Scope Proto - generated `scope.v1` wire protocol
//!
//! Message and service stubs for the watch stream, generated from
//! `proto/scope/v1/scope.proto` at build time. The server side is consumed
//! by `scope-watch`; the client stub is used by remote viewers and tests.

pub mod scope {
    pub mod v1 {
        tonic::include_proto!("scope.v1");
    }
}

/// Serialized `FileDescriptorSet` for `scope.v1`, for registration with a
/// reflection service.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("scope_descriptor");

pub use scope::v1::{CallEvent, MetadataValues, WatchRequest, WatchResponse};
