//! Configuration for command-tool execution (spec AMBIENT: Configuration).

use std::time::Duration;

use toolgate_validator::SecurityOverrides;

/// Resolved, caller-supplied configuration for a `CommandTool`/
/// `LocalCommandTool`. Built once at construction; the validator and
/// executor read only this resolved struct, never `std::env::var`
/// directly at the check site.
#[derive(Debug, Clone)]
pub struct CommandToolConfig {
    pub security: SecurityOverrides,
    /// Host paths permitted for absolute-path parameters in Docker mode.
    pub allowed_host_paths: Vec<String>,
    /// Per-call execution timeout; `None` waits indefinitely.
    pub call_timeout: Option<Duration>,
}

impl Default for CommandToolConfig {
    fn default() -> Self {
        Self {
            security: SecurityOverrides::default(),
            allowed_host_paths: Vec::new(),
            call_timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl CommandToolConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            security: SecurityOverrides::from_env(),
            ..Self::default()
        }
    }
}
