//! The capability set every tool variant implements: `Tool()`,
//! `MCPTool()`, `Execute(ctx, req)`, `GetCacheConfig()`. `Manager` stores
//! and dispatches `CommandTool`, `LocalCommandTool`, `OpenApiTool`,
//! `WebhookTool`, and `WebRtcTool` identically through this trait, never
//! by concrete type.

use std::time::Duration;

use async_trait::async_trait;
use toolgate_types::{ExecutionRequest, ExecutionResult, GatewayError, ToolDefinition};

/// Caching hint a tool variant may expose for its results. No crate in
/// this workspace implements the cache itself; this is the declaration
/// surface `GetCacheConfig()` describes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl: Option<Duration>,
}

#[async_trait]
pub trait Tool: Send + Sync {
    /// The declarative schema this instance was registered under.
    fn definition(&self) -> &ToolDefinition;

    /// Whether this tool is additionally exposed to an MCP server (the
    /// declared `mcpServer: Provider?` field). Most tools answer `false`.
    fn is_mcp_tool(&self) -> bool {
        false
    }

    async fn execute(&self, req: &ExecutionRequest) -> Result<ExecutionResult, GatewayError>;

    fn cache_config(&self) -> CacheConfig {
        CacheConfig::default()
    }
}
