//! Full method path parsing

use crate::error::{ReplayError, Result};

/// Split a full method path into service and method names.
///
/// Accepts `"/pkg.Service/Method"` with or without the leading slash.
/// Fails on an empty string, a missing separator, or an empty component.
pub fn parse_method(full_method: &str) -> Result<(String, String)> {
    let trimmed = full_method.strip_prefix('/').unwrap_or(full_method);
    match trimmed.split_once('/') {
        Some((service, method)) if !service.is_empty() && !method.is_empty() => {
            Ok((service.to_string(), method.to_string()))
        }
        _ => Err(ReplayError::InvalidMethod(full_method.to_string())),
    }
}

#[cfg(test)]
#[path = "method_test.rs"]
mod tests;
