//! `OpenApiTool`: path-template substitution plus a traversal check on the
//! rendered path. The HTTP transport is a narrow collaborator this crate
//! only calls, keeping "build the request" separate from "validate the
//! URL".

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use toolgate_manager::Tool;
use toolgate_renderer::render_template;
use toolgate_types::{
    DenialReason, ExecutionRequest, ExecutionResult, GatewayError, ParameterMapping, ToolDefinition,
};
use toolgate_validator::{check_path_traversal, PathMode};

use crate::common::{schema_filter, scalar_values};
use crate::transport::{HttpResponse, OpenApiTransport, TransportError};

/// Declarative shape of one OpenAPI-backed call: a path template (e.g.
/// `/users/{{userId}}`) plus the parameters bound to it.
#[derive(Debug, Clone)]
pub struct OpenApiCall {
    pub method: String,
    pub base_path: String,
    pub path_template: String,
    pub parameters: Vec<ParameterMapping>,
}

pub struct OpenApiTool {
    definition: ToolDefinition,
    call: OpenApiCall,
    transport: Arc<dyn OpenApiTransport>,
}

impl OpenApiTool {
    #[must_use]
    pub fn new(
        definition: ToolDefinition,
        call: OpenApiCall,
        transport: Arc<dyn OpenApiTransport>,
    ) -> Self {
        Self {
            definition,
            call,
            transport,
        }
    }

    fn render_path(&self, inputs: &HashMap<String, Value>) -> String {
        let scalars = scalar_values(&self.call.parameters, inputs);
        render_template(&self.call.path_template, &scalars)
    }
}

#[async_trait]
impl Tool for OpenApiTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, req: &ExecutionRequest) -> Result<ExecutionResult, GatewayError> {
        let inputs = schema_filter(&self.call.parameters, &req.tool_inputs);
        let path = self.render_path(&inputs);
        check_rendered_path(&path, &self.call.base_path)?;

        let response = self
            .transport
            .send(&self.call.method, &path, None)
            .await
            .map_err(transport_error)?;

        Ok(response_to_result(response, &self.call.method, path))
    }
}

/// Rejects if, after stripping the declared base path, the rendered path
/// still contains a `..` that escapes it.
fn check_rendered_path(rendered_path: &str, base_path: &str) -> Result<(), DenialReason> {
    let remainder = rendered_path.strip_prefix(base_path).unwrap_or(rendered_path);
    let remainder = remainder.trim_start_matches('/');
    check_path_traversal(remainder, PathMode::HostLocal, &[])
}

fn transport_error(err: TransportError) -> GatewayError {
    GatewayError::ExecutionFailed(err.to_string())
}

fn response_to_result(response: HttpResponse, method: &str, path: String) -> ExecutionResult {
    ExecutionResult {
        command: method.to_string(),
        args: vec![path],
        exit_code: i32::from(response.status),
        stdout: response.body.clone(),
        stderr: String::new(),
        combined_output: response.body,
        status: "ok".to_string(),
        dry_run_preview: None,
    }
}
