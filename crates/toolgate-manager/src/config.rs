//! Configuration for a `Manager` (spec AMBIENT: Configuration).

use toolgate_types::HealthStatus;

/// Resolved, caller-supplied configuration. The only knob the core spec
/// names is the default health a service starts in before its first
/// explicit health update; everything else (middlewares, hooks, the
/// optional MCP sync collaborator) is supplied to [`crate::Manager::new`]
/// directly rather than through a config struct, since they're trait
/// objects, not scalar settings.
#[derive(Debug, Clone, Copy)]
pub struct ManagerConfig {
    pub default_health: HealthStatus,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            default_health: HealthStatus::Unknown,
        }
    }
}
