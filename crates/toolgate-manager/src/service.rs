//! `ServiceInfo`: per-service health and hook configuration.

use std::sync::Arc;

use toolgate_types::HealthStatus;

use crate::hooks::{PostCallHook, PreCallHook};

/// A service's health and the hooks that apply to every tool it owns.
///
/// `call_policies` is a legacy field carried over from an earlier
/// `CallPolicies` design; it is promoted to pre-hooks at read time
/// rather than consulted separately, so [`ServiceInfo::
/// effective_pre_hooks`] is the only place callers should read pre-hooks
/// from.
#[derive(Clone)]
pub struct ServiceInfo {
    pub name: String,
    pub health_status: HealthStatus,
    pub pre_hooks: Vec<Arc<dyn PreCallHook>>,
    pub post_hooks: Vec<Arc<dyn PostCallHook>>,
    pub call_policies: Vec<Arc<dyn PreCallHook>>,
}

impl ServiceInfo {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            health_status: HealthStatus::default(),
            pre_hooks: Vec::new(),
            post_hooks: Vec::new(),
            call_policies: Vec::new(),
        }
    }

    #[must_use]
    pub fn effective_pre_hooks(&self) -> Vec<Arc<dyn PreCallHook>> {
        self.pre_hooks
            .iter()
            .cloned()
            .chain(self.call_policies.iter().cloned())
            .collect()
    }
}
