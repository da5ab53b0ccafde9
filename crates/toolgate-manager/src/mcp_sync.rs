//! Narrow collaborator the registry calls into when an MCP server is
//! configured.

use toolgate_types::ToolDefinition;

pub trait McpSync: Send + Sync {
    fn tool_registered(&self, definition: &ToolDefinition);
    fn tool_removed(&self, tool_id: &str);
}
