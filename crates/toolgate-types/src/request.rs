//! Execution requests and health status.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A single inbound call, addressed by tool name, carrying raw JSON inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub tool_name: String,
    /// Raw parameter values as decoded from the caller's JSON payload,
    /// before schema filtering.
    pub tool_inputs: HashMap<String, Value>,
    /// Extra positional arguments appended after rendered args, if the tool
    /// declares `allow_extra_arguments`.
    #[serde(default)]
    pub arguments: Vec<String>,
    #[serde(default)]
    pub dry_run: bool,
}

/// The outcome of a completed or dry-run execution. Mirrors the documented
/// success response `{command, args, stdout, stderr, combined_output,
/// exit_code, status}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub command: String,
    pub args: Vec<String>,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub combined_output: String,
    /// `"ok"` for every successfully completed or dry-run call; errors are
    /// never represented as an `ExecutionResult`, they short-circuit as a
    /// `GatewayError` instead.
    pub status: String,
    /// Set when `dry_run` was requested; holds the command/request that
    /// would have been run, with secret values already redacted.
    pub dry_run_preview: Option<String>,
}

/// A service's current health, as tracked by the manager for gating calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    Unknown,
}

impl Default for HealthStatus {
    fn default() -> Self {
        HealthStatus::Unknown
    }
}

impl HealthStatus {
    #[must_use]
    pub fn permits_calls(self) -> bool {
        !matches!(self, HealthStatus::Unhealthy)
    }
}
