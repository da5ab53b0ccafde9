//! `WebhookTool`: SSRF-gated POST with secret-bearing headers, sharing
//! `toolgate-secrets`'s resolver and redaction set with `toolgate-command`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use toolgate_manager::Tool;
use toolgate_renderer::render_template;
use toolgate_secrets::{resolve_secret, RedactionSet};
use toolgate_types::{
    ExecutionRequest, ExecutionResult, GatewayError, ParameterMapping, ToolDefinition,
};
use toolgate_validator::{check_ssrf, NetworkMode, SecurityOverrides};

use crate::common::{schema_filter, scalar_values};
use crate::transport::{HttpResponse, TransportError, WebhookTransport};

/// Declarative shape of a webhook call: a URL template, a body template,
/// and the parameters bound to both. `secret_headers` maps an HTTP header
/// name to the name of a secret-bound parameter in `parameters`; its
/// resolved plaintext becomes the header value and is recorded for
/// post-execution redaction, the same way `toolgate-command` resolves
/// secrets into environment variables.
#[derive(Debug, Clone)]
pub struct WebhookCall {
    pub url_template: String,
    pub body_template: String,
    pub parameters: Vec<ParameterMapping>,
    pub secret_headers: Vec<(String, String)>,
}

pub struct WebhookTool {
    definition: ToolDefinition,
    call: WebhookCall,
    security: SecurityOverrides,
    transport: Arc<dyn WebhookTransport>,
}

impl WebhookTool {
    #[must_use]
    pub fn new(
        definition: ToolDefinition,
        call: WebhookCall,
        security: SecurityOverrides,
        transport: Arc<dyn WebhookTransport>,
    ) -> Self {
        Self {
            definition,
            call,
            security,
            transport,
        }
    }

    fn resolve_headers(&self, redaction: &mut RedactionSet) -> Result<HashMap<String, String>, GatewayError> {
        let mut headers = HashMap::new();
        for (header_name, param_name) in &self.call.secret_headers {
            let Some(mapping) = self.call.parameters.iter().find(|p| &p.schema.name == param_name) else {
                continue;
            };
            let Some(secret) = &mapping.secret else {
                continue;
            };
            let plaintext = resolve_secret(secret)
                .map_err(|e| GatewayError::SecretResolution(e.to_string()))?;
            redaction.record(plaintext.clone());
            headers.insert(header_name.clone(), plaintext);
        }
        Ok(headers)
    }
}

#[async_trait]
impl Tool for WebhookTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, req: &ExecutionRequest) -> Result<ExecutionResult, GatewayError> {
        let inputs = schema_filter(&self.call.parameters, &req.tool_inputs);
        let scalars = scalar_values(&self.call.parameters, &inputs);

        let url = render_template(&self.call.url_template, &scalars);
        check_ssrf(&url, NetworkMode::HostLocal, &[], &self.security)?;

        let body = render_template(&self.call.body_template, &scalars);

        let mut redaction = RedactionSet::new();
        let headers = self.resolve_headers(&mut redaction)?;

        let response = self
            .transport
            .post(&url, &headers, &body)
            .await
            .map_err(transport_error)?;

        Ok(redact_result(response, &redaction, url))
    }
}

fn transport_error(err: TransportError) -> GatewayError {
    GatewayError::ExecutionFailed(err.to_string())
}

fn redact_result(response: HttpResponse, redaction: &RedactionSet, url: String) -> ExecutionResult {
    let body = redaction.redact(&response.body);
    ExecutionResult {
        command: "POST".to_string(),
        args: vec![url],
        exit_code: i32::from(response.status),
        stdout: body.clone(),
        stderr: String::new(),
        combined_output: body,
        status: "ok".to_string(),
        dry_run_preview: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolgate_types::{ParameterSchema, ParameterType, SecretValue};

    fn definition() -> ToolDefinition {
        ToolDefinition {
            name: "notify".to_string(),
            service_id: "svc".to_string(),
            description: String::new(),
            input_schema: serde_json::json!({}),
            underlying_method_fqn: String::new(),
        }
    }

    struct StubTransport {
        response: HttpResponse,
    }

    #[async_trait]
    impl WebhookTransport for StubTransport {
        async fn post(
            &self,
            _url: &str,
            _headers: &HashMap<String, String>,
            _body: &str,
        ) -> Result<HttpResponse, TransportError> {
            Ok(self.response.clone())
        }
    }

    fn call() -> WebhookCall {
        WebhookCall {
            url_template: "https://example.com/hooks/{{id}}".to_string(),
            body_template: "{\"msg\":\"{{msg}}\"}".to_string(),
            parameters: vec![
                ParameterMapping {
                    schema: ParameterSchema {
                        name: "id".to_string(),
                        param_type: ParameterType::String,
                    },
                    secret: None,
                },
                ParameterMapping {
                    schema: ParameterSchema {
                        name: "msg".to_string(),
                        param_type: ParameterType::String,
                    },
                    secret: None,
                },
                ParameterMapping {
                    schema: ParameterSchema {
                        name: "token".to_string(),
                        param_type: ParameterType::String,
                    },
                    secret: Some(SecretValue::PlainText("sekret-token".to_string())),
                },
            ],
            secret_headers: vec![("Authorization".to_string(), "token".to_string())],
        }
    }

    #[tokio::test]
    async fn renders_url_and_body_and_redacts_secret_in_response() {
        let transport = Arc::new(StubTransport {
            response: HttpResponse {
                status: 200,
                body: "echoed token sekret-token".to_string(),
            },
        });
        let tool = WebhookTool::new(
            definition(),
            call(),
            SecurityOverrides::default(),
            transport,
        );
        let req = ExecutionRequest {
            tool_name: "svc.notify".to_string(),
            tool_inputs: HashMap::from([
                ("id".to_string(), serde_json::json!("abc")),
                ("msg".to_string(), serde_json::json!("hi")),
            ]),
            arguments: vec![],
            dry_run: false,
        };
        let result = tool.execute(&req).await.unwrap();
        assert!(result.stdout.contains("[REDACTED]"));
        assert!(!result.stdout.contains("sekret-token"));
    }

    #[tokio::test]
    async fn dangerous_scheme_url_is_rejected() {
        let mut c = call();
        c.url_template = "gopher://{{id}}".to_string();
        let transport = Arc::new(StubTransport {
            response: HttpResponse { status: 200, body: String::new() },
        });
        let tool = WebhookTool::new(definition(), c, SecurityOverrides::default(), transport);
        let req = ExecutionRequest {
            tool_name: "svc.notify".to_string(),
            tool_inputs: HashMap::from([
                ("id".to_string(), serde_json::json!("127.0.0.1:6379/x")),
                ("msg".to_string(), serde_json::json!("hi")),
            ]),
            arguments: vec![],
            dry_run: false,
        };
        let err = tool.execute(&req).await.unwrap_err();
        assert!(err.to_string().contains("dangerous scheme detected"));
    }
}
