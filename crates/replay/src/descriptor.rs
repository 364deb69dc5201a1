//! Schema resolution from reflection responses
//!
//! A reflection exchange returns serialized `FileDescriptorProto`s for the
//! requested symbol and all its transitive dependencies. Dependencies may be
//! referenced by multiple responses, so registration deduplicates by file
//! name before the descriptor pool is built.

use std::collections::{HashMap, HashSet};

use prost::Message;
use prost_reflect::{DescriptorPool, MethodDescriptor, ServiceDescriptor};
use prost_types::{FileDescriptorProto, FileDescriptorSet};
use tracing::trace;

use crate::error::{ReplayError, Result};

/// Accumulates file descriptors received over reflection.
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    files: Vec<FileDescriptorProto>,
    names: HashSet<String>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a serialized file descriptor and register it.
    ///
    /// Returns `false` if a file with the same name was already registered;
    /// registration is idempotent.
    pub fn add_encoded_file(&mut self, bytes: &[u8]) -> Result<bool> {
        let file = FileDescriptorProto::decode(bytes)?;
        Ok(self.add_file(file))
    }

    /// Register a decoded file descriptor, skipping duplicates by name.
    pub fn add_file(&mut self, file: FileDescriptorProto) -> bool {
        let name = file.name().to_string();
        if !self.names.insert(name.clone()) {
            trace!(file = %name, "descriptor already registered, skipping");
            return false;
        }
        self.files.push(file);
        true
    }

    /// Number of distinct registered files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Build a descriptor pool from the registered files.
    ///
    /// Files are ordered so declared dependencies precede their dependents;
    /// reflection servers do not guarantee any response order.
    pub fn into_pool(mut self) -> Result<DescriptorPool> {
        let order: Vec<String> = self.files.iter().map(|f| f.name().to_string()).collect();
        let mut by_name: HashMap<String, FileDescriptorProto> = self
            .files
            .drain(..)
            .map(|f| (f.name().to_string(), f))
            .collect();

        let mut ordered = Vec::with_capacity(order.len());
        for name in &order {
            visit(name, &mut by_name, &mut ordered);
        }

        let pool = DescriptorPool::from_file_descriptor_set(FileDescriptorSet { file: ordered })?;
        Ok(pool)
    }
}

fn visit(
    name: &str,
    by_name: &mut HashMap<String, FileDescriptorProto>,
    ordered: &mut Vec<FileDescriptorProto>,
) {
    if let Some(file) = by_name.remove(name) {
        for dependency in &file.dependency {
            visit(dependency, by_name, ordered);
        }
        ordered.push(file);
    }
}

/// Look up a service by fully-qualified name.
pub(crate) fn find_service(pool: &DescriptorPool, service: &str) -> Result<ServiceDescriptor> {
    pool.get_service_by_name(service)
        .ok_or_else(|| ReplayError::ServiceNotFound(service.to_string()))
}

/// Look up a method by name within a service.
pub(crate) fn find_method(service: &ServiceDescriptor, method: &str) -> Result<MethodDescriptor> {
    service
        .methods()
        .find(|m| m.name() == method)
        .ok_or_else(|| ReplayError::MethodNotFound {
            service: service.full_name().to_string(),
            method: method.to_string(),
        })
}

/// Reject streaming methods before any invocation is attempted.
pub(crate) fn ensure_unary(method: &MethodDescriptor) -> Result<()> {
    if method.is_client_streaming() || method.is_server_streaming() {
        return Err(ReplayError::StreamingNotSupported);
    }
    Ok(())
}

#[cfg(test)]
#[path = "descriptor_test.rs"]
mod tests;
