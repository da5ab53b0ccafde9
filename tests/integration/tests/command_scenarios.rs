//! End-to-end command-tool scenarios run through `Manager::execute_tool`,
//! exercising registration, health gating, hooks, and the command
//! pipeline together rather than each crate in isolation.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use toolgate_command::{CommandTool, CommandToolConfig, ManagedCommandTool};
use toolgate_command::executor::ProcessExecutor;
use toolgate_manager::{Manager, ManagerConfig, Tool};
use toolgate_types::{
    CallDefinition, CommandLineUpstreamService, ExecutionRequest, ParameterMapping,
    ParameterSchema, ParameterType, SecretValue, ToolDefinition,
};

fn service(command: &str) -> CommandLineUpstreamService {
    CommandLineUpstreamService {
        command: command.to_string(),
        arguments: vec![],
        working_directory: None,
        local: true,
        container_environment: None,
    }
}

fn string_param(name: &str) -> ParameterMapping {
    ParameterMapping {
        schema: ParameterSchema {
            name: name.to_string(),
            param_type: ParameterType::String,
        },
        secret: None,
    }
}

fn definition(service_id: &str, name: &str) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        service_id: service_id.to_string(),
        description: String::new(),
        input_schema: json!({}),
        underlying_method_fqn: String::new(),
    }
}

async fn manager_with_tool(
    service_id: &str,
    tool_name: &str,
    svc: CommandLineUpstreamService,
    call: CallDefinition,
) -> (Manager, String) {
    let manager = Manager::new(vec![], None, ManagerConfig::default());
    let inner = CommandTool::new(svc, call, CommandToolConfig::default(), Arc::new(ProcessExecutor));
    let tool: Arc<dyn Tool> = Arc::new(ManagedCommandTool::new(definition(service_id, tool_name), inner));
    let id = manager.add_tool(tool).await.unwrap();
    (manager, id)
}

fn request(tool_name: &str, inputs: HashMap<String, serde_json::Value>) -> ExecutionRequest {
    ExecutionRequest {
        tool_name: tool_name.to_string(),
        tool_inputs: inputs,
        arguments: vec![],
        dry_run: false,
    }
}

/// Scenario 1: repeated and concatenated placeholders each render their
/// own value, independently of position.
#[tokio::test]
async fn repeated_placeholders_render_independently() {
    let call = CallDefinition {
        args: vec!["{{p1}}".to_string(), "{{p2}}".to_string(), "{{p1}}{{p2}}".to_string()],
        parameters: vec![string_param("p1"), string_param("p2")],
    };
    let (manager, id) = manager_with_tool("echosvc", "echo", service("echo"), call).await;

    let inputs = HashMap::from([
        ("p1".to_string(), json!("AAA")),
        ("p2".to_string(), json!("BBB")),
    ]);
    let result = manager.execute_tool(request(&id, inputs)).await.unwrap();
    assert!(result.stdout.contains("AAABBB"));
}

/// Scenario 2: a value that itself looks like a placeholder is never
/// recursively expanded.
#[tokio::test]
async fn placeholder_shaped_values_do_not_recursively_expand() {
    let call = CallDefinition {
        args: vec!["{{p1}}".to_string()],
        parameters: vec![string_param("p1"), string_param("p2")],
    };
    let (manager, id) = manager_with_tool("echosvc", "echo", service("echo"), call).await;

    let inputs = HashMap::from([
        ("p1".to_string(), json!("{{p2}}")),
        ("p2".to_string(), json!("SECRET")),
    ]);
    let result = manager.execute_tool(request(&id, inputs)).await.unwrap();
    assert!(result.stdout.contains("{{p2}}"));
    assert!(!result.stdout.contains("SECRET"));
}

/// Scenario 5: a declared `args` array parameter whose element starts
/// with `-` is argument injection, even for a non-shell-family command.
#[tokio::test]
async fn leading_dash_in_args_array_is_argument_injection() {
    let call = CallDefinition {
        args: vec!["{{args}}".to_string()],
        parameters: vec![ParameterMapping {
            schema: ParameterSchema {
                name: "args".to_string(),
                param_type: ParameterType::Array,
            },
            secret: None,
        }],
    };
    let (manager, id) = manager_with_tool("shsvc", "run", service("sh"), call).await;

    let inputs = HashMap::from([("args".to_string(), json!(["-c", "echo pwned"]))]);
    let err = manager.execute_tool(request(&id, inputs)).await.unwrap_err();
    assert!(err.to_string().contains("argument injection detected"));
    assert!(err.to_string().contains("starts with '-'"));
}

/// Scenario 6: a value containing a space but no shell metacharacter is
/// not a shell-injection rejection, even though it may fail at execution.
#[tokio::test]
async fn space_separated_value_is_not_shell_injection() {
    let call = CallDefinition {
        args: vec!["{{rev}}".to_string()],
        parameters: vec![string_param("rev")],
    };
    let (manager, id) = manager_with_tool("gitsvc", "show", service("git"), call).await;

    let inputs = HashMap::from([("rev".to_string(), json!("HEAD HEAD"))]);
    let result = manager.execute_tool(request(&id, inputs)).await;
    match result {
        Ok(_) => {}
        Err(err) => assert!(!err.to_string().contains("shell injection detected")),
    }
}

/// Scenario 7: dry-run with a secret-bound parameter redacts the plaintext
/// in the preview, never emitting it.
#[tokio::test]
async fn dry_run_redacts_secret_in_env_preview() {
    let call = CallDefinition {
        args: vec![],
        parameters: vec![ParameterMapping {
            schema: ParameterSchema {
                name: "api_key".to_string(),
                param_type: ParameterType::String,
            },
            secret: Some(SecretValue::PlainText("sk-super-secret".to_string())),
        }],
    };
    let manager = Manager::new(vec![], None, ManagerConfig::default());
    let inner = CommandTool::new(service("echo"), call, CommandToolConfig::default(), Arc::new(ProcessExecutor));
    let tool: Arc<dyn Tool> = Arc::new(ManagedCommandTool::new(definition("echosvc", "echo"), inner));
    let id = manager.add_tool(tool).await.unwrap();

    let req = ExecutionRequest {
        tool_name: id,
        tool_inputs: HashMap::new(),
        arguments: vec![],
        dry_run: true,
    };
    let result = manager.execute_tool(req).await.unwrap();
    let preview = result.dry_run_preview.unwrap();
    assert!(preview.contains("api_key=[REDACTED]"));
    assert!(!preview.contains("sk-super-secret"));
}

/// Scenario 8: a dangerous URL scheme is rejected before any egress is
/// attempted, regardless of the command it's bound to.
#[tokio::test]
async fn dangerous_scheme_url_param_is_rejected() {
    let call = CallDefinition {
        args: vec!["{{url}}".to_string()],
        parameters: vec![string_param("url")],
    };
    let (manager, id) = manager_with_tool("curlsvc", "fetch", service("curl"), call).await;

    let inputs = HashMap::from([("url".to_string(), json!("gopher://127.0.0.1:6379/_info"))]);
    let err = manager.execute_tool(request(&id, inputs)).await.unwrap_err();
    assert!(err.to_string().contains("dangerous scheme detected"));
    assert!(err.to_string().contains("gopher:"));
}

/// Scenario 10: an unhealthy service blocks execution with the literal
/// message, without ever reaching the tool.
#[tokio::test]
async fn unhealthy_service_blocks_execution() {
    let call = CallDefinition {
        args: vec![],
        parameters: vec![],
    };
    let (manager, id) = manager_with_tool("flakysvc", "ping", service("echo"), call).await;
    manager
        .set_service_health("flakysvc", toolgate_types::HealthStatus::Unhealthy)
        .await;

    let err = manager.execute_tool(request(&id, HashMap::new())).await.unwrap_err();
    assert_eq!(err.to_string(), "service flakysvc is currently unhealthy");
}

/// Scenario 11: a denying pre-hook short-circuits before the tool's
/// `execute` ever runs.
#[tokio::test]
async fn denying_pre_hook_short_circuits_execution() {
    use async_trait::async_trait;
    use toolgate_manager::{Action, PreCallHook};
    use toolgate_types::GatewayError;

    struct DenyAll;

    #[async_trait]
    impl PreCallHook for DenyAll {
        async fn execute_pre(
            &self,
            _req: &ExecutionRequest,
        ) -> Result<(Action, Option<ExecutionRequest>), GatewayError> {
            Ok((Action::Deny("policy violation".to_string()), None))
        }
    }

    let call = CallDefinition {
        args: vec![],
        parameters: vec![],
    };
    let (manager, id) = manager_with_tool("gatedsvc", "ping", service("echo"), call).await;
    manager.set_service_hooks("gatedsvc", vec![Arc::new(DenyAll)], vec![]).await;

    let err = manager.execute_tool(request(&id, HashMap::new())).await.unwrap_err();
    assert_eq!(err.to_string(), "denied by hook: policy violation");
}
