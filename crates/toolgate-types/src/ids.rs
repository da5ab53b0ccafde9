//! Tool identity: composing and sanitizing the registry key.

/// Sanitize a service or tool name fragment for use in a registry key.
///
/// Replaces any byte that is not `[A-Za-z0-9_-]` with `_`, and trims
/// leading/trailing whitespace before sanitizing. Empty input sanitizes
/// to an empty string (callers must reject that separately - see
/// [`compose_tool_id`]).
#[must_use]
pub fn sanitize(fragment: &str) -> String {
    fragment
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Error composing a tool id: empty service id is rejected per the
/// registration invariant ("empty serviceID is rejected").
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("service id must not be empty")]
pub struct EmptyServiceId;

/// Compose the registry key `sanitize(serviceId) + "." + sanitize(toolName)`.
pub fn compose_tool_id(service_id: &str, tool_name: &str) -> Result<String, EmptyServiceId> {
    if service_id.trim().is_empty() {
        return Err(EmptyServiceId);
    }
    Ok(format!("{}.{}", sanitize(service_id), sanitize(tool_name)))
}
