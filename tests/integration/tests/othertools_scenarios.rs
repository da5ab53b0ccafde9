//! End-to-end OpenAPI/webhook scenarios registered on a `Manager`,
//! exercising the adapters through the same dispatch path a command tool
//! goes through.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use toolgate_manager::{Manager, ManagerConfig, Tool};
use toolgate_othertools::{
    HttpResponse, OpenApiCall, OpenApiTool, OpenApiTransport, TransportError, WebhookCall,
    WebhookTool,
};
use toolgate_types::{
    ExecutionRequest, ParameterMapping, ParameterSchema, ParameterType, SecretValue, ToolDefinition,
};
use toolgate_validator::SecurityOverrides;

fn definition(service_id: &str, name: &str) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        service_id: service_id.to_string(),
        description: String::new(),
        input_schema: json!({}),
        underlying_method_fqn: String::new(),
    }
}

struct StubOpenApiTransport;

#[async_trait]
impl OpenApiTransport for StubOpenApiTransport {
    async fn send(
        &self,
        _method: &str,
        _url: &str,
        _body: Option<&str>,
    ) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status: 200,
            body: "{}".to_string(),
        })
    }
}

/// Scenario 9, exercised through `Manager::execute_tool` rather than
/// calling the adapter directly.
#[tokio::test]
async fn openapi_path_traversal_is_rejected_through_manager() {
    let call = OpenApiCall {
        method: "GET".to_string(),
        base_path: "/users".to_string(),
        path_template: "/users/{{userId}}".to_string(),
        parameters: vec![ParameterMapping {
            schema: ParameterSchema {
                name: "userId".to_string(),
                param_type: ParameterType::String,
            },
            secret: None,
        }],
    };
    let tool: Arc<dyn Tool> = Arc::new(OpenApiTool::new(
        definition("users-api", "get_user"),
        call,
        Arc::new(StubOpenApiTransport),
    ));

    let manager = Manager::new(vec![], None, ManagerConfig::default());
    let id = manager.add_tool(tool).await.unwrap();

    let req = ExecutionRequest {
        tool_name: id,
        tool_inputs: HashMap::from([("userId".to_string(), json!("../admin"))]),
        arguments: vec![],
        dry_run: false,
    };
    let err = manager.execute_tool(req).await.unwrap_err();
    assert!(err.to_string().contains("path traversal"));
}

struct StubWebhookTransport {
    seen_headers: std::sync::Mutex<Option<HashMap<String, String>>>,
}

#[async_trait]
impl toolgate_othertools::WebhookTransport for StubWebhookTransport {
    async fn post(
        &self,
        _url: &str,
        headers: &HashMap<String, String>,
        _body: &str,
    ) -> Result<HttpResponse, TransportError> {
        *self.seen_headers.lock().unwrap() = Some(headers.clone());
        Ok(HttpResponse {
            status: 204,
            body: String::new(),
        })
    }
}

/// A webhook tool, registered on a `Manager`, resolves its secret-bound
/// header and reaches the transport with the plaintext - redaction only
/// applies to the captured *response*, not to outbound headers.
#[tokio::test]
async fn webhook_tool_resolves_secret_header_through_manager() {
    let transport = Arc::new(StubWebhookTransport {
        seen_headers: std::sync::Mutex::new(None),
    });
    let call = WebhookCall {
        url_template: "https://example.com/hooks/{{id}}".to_string(),
        body_template: "{}".to_string(),
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
                    name: "token".to_string(),
                    param_type: ParameterType::String,
                },
                secret: Some(SecretValue::PlainText("hook-secret".to_string())),
            },
        ],
        secret_headers: vec![("Authorization".to_string(), "token".to_string())],
    };
    let tool: Arc<dyn Tool> = Arc::new(WebhookTool::new(
        definition("hooks", "notify"),
        call,
        SecurityOverrides::default(),
        transport.clone(),
    ));

    let manager = Manager::new(vec![], None, ManagerConfig::default());
    let id = manager.add_tool(tool).await.unwrap();

    let req = ExecutionRequest {
        tool_name: id,
        tool_inputs: HashMap::from([("id".to_string(), json!("abc"))]),
        arguments: vec![],
        dry_run: false,
    };
    manager.execute_tool(req).await.unwrap();

    let headers = transport.seen_headers.lock().unwrap().clone().unwrap();
    assert_eq!(headers.get("Authorization").unwrap(), "hook-secret");
}
