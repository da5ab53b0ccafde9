//! `WebRtcTool`: dispatches through a pooled peer connection rather than
//! an HTTP transport. The pool itself is out of scope here - this crate
//! only calls it through the narrow [`PeerConnectionPool`] interface, the
//! same validated-at-the-boundary posture as
//! [`crate::openapi::OpenApiTool`]'s transport.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use toolgate_manager::Tool;
use toolgate_renderer::coerce_scalar;
use toolgate_types::{ExecutionRequest, ExecutionResult, GatewayError, ParameterMapping, ToolDefinition};

use crate::common::schema_filter;

const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// One message exchanged over a pooled peer connection.
#[async_trait]
pub trait PooledConnection: Send + Sync {
    async fn send_and_wait(&self, payload: &str) -> Result<String, GatewayError>;
}

/// Acquires a connection for a given service id. Implementations own STUN
/// negotiation, ICE candidate gathering, and connection reuse; none of
/// that is this crate's concern.
#[async_trait]
pub trait PeerConnectionPool: Send + Sync {
    async fn get(&self, service_id: &str) -> Option<Arc<dyn PooledConnection>>;
}

#[derive(Debug, Clone)]
pub struct WebRtcCall {
    pub payload_template: String,
    pub parameters: Vec<ParameterMapping>,
}

pub struct WebRtcTool {
    definition: ToolDefinition,
    call: WebRtcCall,
    pool: Arc<dyn PeerConnectionPool>,
    acquire_timeout: Duration,
}

impl WebRtcTool {
    #[must_use]
    pub fn new(definition: ToolDefinition, call: WebRtcCall, pool: Arc<dyn PeerConnectionPool>) -> Self {
        Self {
            definition,
            call,
            pool,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    fn render_payload(&self, inputs: &HashMap<String, Value>) -> String {
        let mut payload = self.call.payload_template.clone();
        for mapping in &self.call.parameters {
            let Some(value) = inputs.get(&mapping.schema.name) else {
                continue;
            };
            let rendered = coerce_scalar(value, mapping.schema.param_type);
            payload = payload.replace(&format!("{{{{{}}}}}", mapping.schema.name), &rendered);
        }
        payload
    }
}

#[async_trait]
impl Tool for WebRtcTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, req: &ExecutionRequest) -> Result<ExecutionResult, GatewayError> {
        let inputs = schema_filter(&self.call.parameters, &req.tool_inputs);
        let payload = self.render_payload(&inputs);

        let connection = tokio::time::timeout(self.acquire_timeout, self.pool.get(&self.definition.service_id))
            .await
            .map_err(|_| GatewayError::PoolAcquisition)?
            .ok_or(GatewayError::PoolAcquisition)?;

        let reply = connection.send_and_wait(&payload).await?;

        Ok(ExecutionResult {
            command: self.definition.service_id.clone(),
            args: vec![payload],
            exit_code: 0,
            stdout: reply.clone(),
            stderr: String::new(),
            combined_output: reply,
            status: "ok".to_string(),
            dry_run_preview: None,
        })
    }
}
