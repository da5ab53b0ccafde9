//! `Manager`: tool registry, middleware chain, hook application, service
//! health gating.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::RwLock;
use tracing::{info, warn};

use toolgate_types::{compose_tool_id, ExecutionRequest, ExecutionResult, GatewayError, HealthStatus};

use crate::config::ManagerConfig;
use crate::hooks::Action;
use crate::mcp_sync::McpSync;
use crate::middleware::{Middleware, Next};
use crate::service::ServiceInfo;
use crate::tool::Tool;

struct State {
    tools: HashMap<String, Arc<dyn Tool>>,
    services: HashMap<String, ServiceInfo>,
    middlewares: Vec<Arc<dyn Middleware>>,
}

/// Registry, middleware chain, and hook dispatcher. All three maps in
/// [`State`] share one reader-writer lock: reads (lookup,
/// list) are hot and run concurrently; writes (registration, health
/// updates) are rare and serialize. The lock is never held across a tool
/// `Execute` call - `execute_tool` takes a snapshot under a brief read
/// guard, drops it, then runs the chain against owned clones.
pub struct Manager {
    state: RwLock<State>,
    config: ManagerConfig,
    mcp_sync: Option<Arc<dyn McpSync>>,
}

impl Manager {
    #[must_use]
    pub fn new(
        middlewares: Vec<Arc<dyn Middleware>>,
        mcp_sync: Option<Arc<dyn McpSync>>,
        config: ManagerConfig,
    ) -> Self {
        Self {
            state: RwLock::new(State {
                tools: HashMap::new(),
                services: HashMap::new(),
                middlewares,
            }),
            config,
            mcp_sync,
        }
    }

    /// Register (or overwrite) a tool. Requires a non-empty `service_id`.
    /// Registering the same tool twice leaves exactly one entry in
    /// `list_tools`, not two.
    pub async fn add_tool(&self, tool: Arc<dyn Tool>) -> Result<String, GatewayError> {
        let definition = tool.definition().clone();
        let id = compose_tool_id(&definition.service_id, &definition.name)
            .map_err(|_| GatewayError::BadRequest("service id must not be empty".to_string()))?;

        let default_health = self.config.default_health;
        let mut state = self.state.write().await;
        if state.tools.insert(id.clone(), tool).is_some() {
            warn!(tool_id = %id, "overwriting existing tool registration");
        } else {
            info!(tool_id = %id, "registered tool");
        }
        state
            .services
            .entry(definition.service_id.clone())
            .or_insert_with(|| {
                let mut info = ServiceInfo::new(&definition.service_id);
                info.health_status = default_health;
                info
            });
        drop(state);

        if let Some(sync) = &self.mcp_sync {
            sync.tool_registered(&definition);
        }
        Ok(id)
    }

    /// Remove every tool whose id is `sanitize(service_id) + "." + ...`.
    pub async fn clear_tools_for_service(&self, service_id: &str) {
        let prefix = format!("{}.", toolgate_types::sanitize(service_id));
        let mut state = self.state.write().await;
        let removed: Vec<String> = state
            .tools
            .keys()
            .filter(|id| id.starts_with(&prefix))
            .cloned()
            .collect();
        for id in &removed {
            state.tools.remove(id);
        }
        state.services.remove(service_id);
        drop(state);

        if let Some(sync) = &self.mcp_sync {
            for id in &removed {
                sync.tool_removed(id);
            }
        }
        info!(service_id, removed = removed.len(), "cleared tools for service");
    }

    pub async fn get_tool(&self, id: &str) -> Option<Arc<dyn Tool>> {
        self.state.read().await.tools.get(id).cloned()
    }

    pub async fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.state.read().await.tools.values().cloned().collect()
    }

    pub async fn get_service_info(&self, service_id: &str) -> Option<ServiceInfo> {
        self.state.read().await.services.get(service_id).cloned()
    }

    pub async fn list_services(&self) -> Vec<ServiceInfo> {
        self.state.read().await.services.values().cloned().collect()
    }

    /// Replace a service's health status, creating the entry if absent.
    pub async fn set_service_health(&self, service_id: &str, status: HealthStatus) {
        let mut state = self.state.write().await;
        let info = state
            .services
            .entry(service_id.to_string())
            .or_insert_with(|| ServiceInfo::new(service_id));
        info.health_status = status;
        info!(service_id, ?status, "service health updated");
    }

    /// Add (or replace) a service's pre/post hooks.
    pub async fn set_service_hooks(
        &self,
        service_id: &str,
        pre_hooks: Vec<Arc<dyn crate::hooks::PreCallHook>>,
        post_hooks: Vec<Arc<dyn crate::hooks::PostCallHook>>,
    ) {
        let mut state = self.state.write().await;
        let info = state
            .services
            .entry(service_id.to_string())
            .or_insert_with(|| ServiceInfo::new(service_id));
        info.pre_hooks = pre_hooks;
        info.post_hooks = post_hooks;
    }

    /// Resolve by id, gate on service health, run middlewares (outermost
    /// first) then pre-hooks then `Tool::execute` then post-hooks.
    pub async fn execute_tool(&self, req: ExecutionRequest) -> Result<ExecutionResult, GatewayError> {
        let (tool, service, middlewares) = {
            let state = self.state.read().await;
            let tool = state
                .tools
                .get(&req.tool_name)
                .cloned()
                .ok_or_else(|| GatewayError::ToolNotFound(req.tool_name.clone()))?;
            let service_id = tool.definition().service_id.clone();
            let service = state
                .services
                .get(&service_id)
                .cloned()
                .unwrap_or_else(|| ServiceInfo::new(&service_id));
            let middlewares = state.middlewares.clone();
            (tool, service, middlewares)
        };

        if !service.health_status.permits_calls() {
            return Err(GatewayError::ServiceUnhealthy {
                service_id: service.name,
            });
        }

        let pre_hooks = service.effective_pre_hooks();
        let post_hooks = service.post_hooks.clone();
        let terminal = build_terminal(tool, pre_hooks, post_hooks);
        let chain: Arc<[Arc<dyn Middleware>]> = Arc::from(middlewares);
        dispatch(chain, 0, terminal, req).await
    }
}

type Terminal = Arc<
    dyn Fn(ExecutionRequest) -> BoxFuture<'static, Result<ExecutionResult, GatewayError>>
        + Send
        + Sync,
>;

fn build_terminal(
    tool: Arc<dyn Tool>,
    pre_hooks: Vec<Arc<dyn crate::hooks::PreCallHook>>,
    post_hooks: Vec<Arc<dyn crate::hooks::PostCallHook>>,
) -> Terminal {
    Arc::new(move |req: ExecutionRequest| {
        let tool = Arc::clone(&tool);
        let pre_hooks = pre_hooks.clone();
        let post_hooks = post_hooks.clone();
        Box::pin(async move {
            let mut current = req;
            for hook in &pre_hooks {
                let (action, replacement) = hook.execute_pre(&current).await?;
                match action {
                    Action::Allow => {
                        if let Some(replacement) = replacement {
                            current = replacement;
                        }
                    }
                    Action::Deny(reason) => return Err(GatewayError::DeniedByHook(reason)),
                }
            }
            let mut result = tool.execute(&current).await?;
            for hook in &post_hooks {
                result = hook.execute_post(&current, result).await?;
            }
            Ok(result)
        }) as BoxFuture<'static, Result<ExecutionResult, GatewayError>>
    })
}

/// Recursively invoke middlewares outermost-first, each one receiving a
/// `next` that resumes the chain at the following index; `idx ==
/// middlewares.len()` runs the terminal (pre-hooks -> execute -> post-hooks).
fn dispatch(
    middlewares: Arc<[Arc<dyn Middleware>]>,
    idx: usize,
    terminal: Terminal,
    req: ExecutionRequest,
) -> BoxFuture<'static, Result<ExecutionResult, GatewayError>> {
    if idx >= middlewares.len() {
        return terminal(req);
    }
    let mw = Arc::clone(&middlewares[idx]);
    Box::pin(async move {
        let next: Next = Box::new(move |r: ExecutionRequest| dispatch(middlewares, idx + 1, terminal, r));
        mw.execute(req, next).await
    })
}
