//! Metadata filtering and conversion
//!
//! Captured metadata includes headers the transport manages itself; those
//! must not be forwarded verbatim on a new call or the replay would carry a
//! stale authority, content type, or deadline.

use tonic::metadata::{Ascii, KeyAndValueRef, MetadataKey, MetadataMap, MetadataValue};

use scope_domain::Metadata;

use crate::client::REPLAY_METADATA_KEY;
use crate::error::{ReplayError, Result};

/// Transport-managed keys that are never forwarded.
const DROPPED_KEYS: [&str; 4] = [":authority", "content-type", "user-agent", "te"];

/// Drop transport-managed headers and lower-case the survivors.
///
/// Keys are matched case-insensitively; anything starting with `grpc-` is
/// also dropped. Returns `None` when nothing survives.
pub fn filter_metadata(metadata: &Metadata) -> Option<Metadata> {
    let mut out = Metadata::new();
    for (key, values) in metadata {
        let lower = key.to_ascii_lowercase();
        if DROPPED_KEYS.contains(&lower.as_str()) || lower.starts_with("grpc-") {
            continue;
        }
        out.insert(lower, values.clone());
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Build the outgoing metadata for a replayed call: the filtered captured
/// headers plus the replay marker.
pub(crate) fn build_outgoing_metadata(metadata: &Metadata) -> Result<MetadataMap> {
    let mut map = MetadataMap::new();

    if let Some(filtered) = filter_metadata(metadata) {
        for (key, values) in &filtered {
            let parsed_key: MetadataKey<Ascii> = MetadataKey::from_bytes(key.as_bytes())
                .map_err(|_| ReplayError::InvalidMetadata(key.clone()))?;
            for value in values {
                let parsed_value: MetadataValue<Ascii> = value
                    .parse()
                    .map_err(|_| ReplayError::InvalidMetadata(key.clone()))?;
                map.append(parsed_key.clone(), parsed_value);
            }
        }
    }

    map.insert(REPLAY_METADATA_KEY, MetadataValue::from_static("true"));
    Ok(map)
}

/// Convert a tonic metadata map back into the domain representation.
///
/// Binary-valued keys are skipped; the domain model carries text metadata.
pub(crate) fn metadata_map_to_domain(map: &MetadataMap) -> Metadata {
    let mut out = Metadata::new();
    for entry in map.iter() {
        if let KeyAndValueRef::Ascii(key, value) = entry {
            if let Ok(value) = value.to_str() {
                out.entry(key.as_str().to_string())
                    .or_default()
                    .push(value.to_string());
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "metadata_test.rs"]
mod tests;
