//! Adapts `CommandTool` to the `Tool` capability set so `toolgate-manager`
//! can register and dispatch it identically to the other tool variants.

use async_trait::async_trait;
use toolgate_manager::Tool;
use toolgate_types::{ExecutionRequest, ExecutionResult, GatewayError, ToolDefinition};

use crate::executor::Executor;
use crate::pipeline::CommandTool;

/// A `CommandTool` paired with the declarative definition the registry
/// keys on. Construct once at registration time and hand an `Arc` of it
/// to `Manager::add_tool`.
pub struct ManagedCommandTool<E: Executor> {
    definition: ToolDefinition,
    inner: CommandTool<E>,
}

impl<E: Executor> ManagedCommandTool<E> {
    #[must_use]
    pub fn new(definition: ToolDefinition, inner: CommandTool<E>) -> Self {
        Self { definition, inner }
    }
}

#[async_trait]
impl<E: Executor + 'static> Tool for ManagedCommandTool<E> {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, req: &ExecutionRequest) -> Result<ExecutionResult, GatewayError> {
        self.inner.execute(req).await.map_err(GatewayError::from)
    }
}
