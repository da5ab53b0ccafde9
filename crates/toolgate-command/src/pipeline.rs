//! `CommandTool`/`LocalCommandTool` orchestration.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use toolgate_renderer::{is_bare_placeholder, render_argv_segments, tokenize, Token};
use toolgate_secrets::{resolve_secret, RedactionSet};
use toolgate_types::{
    CallDefinition, CommandLineUpstreamService, DenialReason, ExecutionRequest, ExecutionResult,
    ParameterType,
};
use toolgate_validator::{
    check_args_array_element_is_string, check_args_parameter_allowed, check_argument_injection,
    check_dangerous_env_var, check_path_traversal, check_shell_injection, check_ssrf,
    filter_dangerous_env, infer_quote_level, interpreter_family, is_shell_family, ArgInjectionContext,
    NetworkMode, PathMode,
};

use crate::config::CommandToolConfig;
use crate::error::ToolError;
use crate::executor::Executor;

/// Orchestrates one call: decode, schema-filter, validate, render, execute,
/// redact. Whether it runs in Docker mode is
/// determined by `service.is_docker_mode()`.
pub struct CommandTool<E: Executor> {
    pub service: CommandLineUpstreamService,
    pub call: CallDefinition,
    pub config: CommandToolConfig,
    pub executor: Arc<E>,
}

impl<E: Executor> CommandTool<E> {
    pub fn new(
        service: CommandLineUpstreamService,
        call: CallDefinition,
        config: CommandToolConfig,
        executor: Arc<E>,
    ) -> Self {
        Self {
            service,
            call,
            config,
            executor,
        }
    }

    /// Run the full pipeline for `req`. On `req.dry_run`, returns a preview
    /// with all secret values already redacted and spawns nothing.
    pub async fn execute(&self, req: &ExecutionRequest) -> Result<ExecutionResult, ToolError> {
        let inputs = schema_filter(&self.call, &req.tool_inputs)?;
        self.validate_inputs(&inputs)?;

        let segments = render_argv_segments(&self.call, &inputs);
        self.validate_rendered_segments(&segments)?;

        let mut argv: Vec<String> = self.service.arguments.clone();
        for segment in &segments {
            argv.extend(segment.iter().cloned());
        }

        let mut redaction = RedactionSet::new();
        let env = self.resolve_env(&mut redaction)?;

        if req.dry_run {
            return Ok(dry_run_result(&self.service.command, &argv, &env));
        }

        let output = self
            .executor
            .execute(
                &self.service.command,
                &argv,
                self.service.working_directory.as_deref(),
                &env,
                self.config.call_timeout,
            )
            .await
            .map_err(ToolError::Spawn)?;

        let combined = format!("{}{}", output.stdout, output.stderr);
        Ok(ExecutionResult {
            command: self.service.command.clone(),
            args: argv,
            exit_code: output.exit_code,
            stdout: redaction.redact(&output.stdout),
            stderr: redaction.redact(&output.stderr),
            combined_output: redaction.redact(&combined),
            status: "ok".to_string(),
            dry_run_preview: None,
        })
    }

    fn path_mode(&self) -> PathMode {
        if self.service.is_docker_mode() {
            PathMode::Docker
        } else {
            PathMode::HostLocal
        }
    }

    fn network_mode(&self) -> NetworkMode {
        if self.service.is_docker_mode() {
            NetworkMode::Docker
        } else {
            NetworkMode::HostLocal
        }
    }

    /// Step 3: per-parameter validate, in the order path-traversal →
    /// absolute-path → scheme/SSRF → argument-injection →
    /// dangerous-env-var-name.
    fn validate_inputs(&self, inputs: &HashMap<String, Value>) -> Result<(), DenialReason> {
        for mapping in &self.call.parameters {
            let name = &mapping.schema.name;
            check_dangerous_env_var(name)?;

            let Some(value) = inputs.get(name) else {
                continue;
            };

            let template_is_bare_placeholder = self
                .call
                .args
                .iter()
                .any(|t| is_bare_placeholder(t) == Some(name.as_str()));

            if mapping.schema.param_type == ParameterType::Array {
                if let Value::Array(items) = value {
                    let ctx = ArgInjectionContext {
                        param_name: name,
                        param_type: mapping.schema.param_type,
                        template_is_bare_placeholder,
                        command_is_shell_family: is_shell_family(&self.service.command),
                    };
                    for item in items {
                        check_args_array_element_is_string(item)?;
                        if let Value::String(s) = item {
                            check_argument_injection(s, &ctx)?;
                        }
                    }
                }
                continue;
            }

            let Value::String(s) = value else {
                continue;
            };

            check_path_traversal(s, self.path_mode(), &self.config.allowed_host_paths)?;
            check_ssrf(s, self.network_mode(), &[], &self.config.security)?;

            let ctx = ArgInjectionContext {
                param_name: name,
                param_type: mapping.schema.param_type,
                template_is_bare_placeholder,
                command_is_shell_family: is_shell_family(&self.service.command),
            };
            check_argument_injection(s, &ctx)?;
        }
        Ok(())
    }

    /// Step 4: shell-injection predicate over each rendered segment, quote
    /// level inferred per template, plus interpreter-specific checks. One
    /// entry in `segments` per template in `self.call.args`, in order
    /// (array-typed bare placeholders may render to more than one rendered
    /// value per template - see [`toolgate_renderer::render_argv_segments`]).
    fn validate_rendered_segments(&self, segments: &[Vec<String>]) -> Result<(), DenialReason> {
        let shell_family = is_shell_family(&self.service.command);
        let interpreter = interpreter_family(&self.service.command);

        for (template, rendered_values) in self.call.args.iter().zip(segments.iter()) {
            let level = first_placeholder_name(template)
                .map(|name| infer_quote_level(template, &name))
                .unwrap_or(toolgate_validator::QuoteLevel::Bare);

            for rendered in rendered_values {
                check_shell_injection(rendered, level, shell_family)?;

                if let Some(family) = interpreter {
                    let ctx = toolgate_validator::InterpreterContext {
                        in_double_quoted_template: matches!(
                            level,
                            toolgate_validator::QuoteLevel::DoubleQuoted
                        ),
                        enclosing_is_fstring: is_python_fstring_prefixed(template),
                        enclosing_is_template_literal: template.contains('`'),
                    };
                    toolgate_validator::check_interpreter(family, rendered, &ctx)?;
                }
            }
        }
        Ok(())
    }

    /// Step 6: resolve secrets, build env, filtering any dangerous name.
    fn resolve_env(&self, redaction: &mut RedactionSet) -> Result<HashMap<String, String>, ToolError> {
        let mut env = Vec::new();
        for mapping in &self.call.parameters {
            let Some(secret) = &mapping.secret else {
                continue;
            };
            let plaintext = resolve_secret(secret)?;
            redaction.record(plaintext.clone());
            env.push((mapping.schema.name.clone(), plaintext));
        }
        let filtered = filter_dangerous_env(&env);
        Ok(filtered.into_iter().collect())
    }
}

/// Step 2: retain only keys declared in `call.parameters`. The special key
/// `args` is admitted only if it is itself a declared parameter.
fn schema_filter(
    call: &CallDefinition,
    raw_inputs: &HashMap<String, Value>,
) -> Result<HashMap<String, Value>, DenialReason> {
    if raw_inputs.contains_key("args") {
        check_args_parameter_allowed(call.parameter("args").is_some())?;
    }

    Ok(raw_inputs
        .iter()
        .filter(|(name, _)| call.parameter(name).is_some())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect())
}

/// The name of the first `{{placeholder}}` token in `template`, regardless
/// of whether it is bare or sits inside quotes.
fn first_placeholder_name(template: &str) -> Option<String> {
    tokenize(template).into_iter().find_map(|t| match t {
        Token::Placeholder(name) => Some(name),
        Token::Literal(_) => None,
    })
}

/// Python string-prefix forms that make the literal an f-string: `f"..."`,
/// `f'...'`, and the raw-string combinations `fr"..."`/`rf"..."` (and their
/// single-quote/case variants).
fn is_python_fstring_prefixed(template: &str) -> bool {
    const PREFIXES: &[&str] = &["f\"", "f'", "fr\"", "fr'", "rf\"", "rf'"];
    let lower = template.to_lowercase();
    PREFIXES.iter().any(|p| lower.contains(p))
}

fn dry_run_result(command: &str, argv: &[String], env: &HashMap<String, String>) -> ExecutionResult {
    let env_preview: Vec<String> = env
        .keys()
        .map(|name| toolgate_secrets::RedactionSet::preview_entry(name))
        .collect();
    let preview = serde_json::json!({
        "dry_run": true,
        "request": {
            "command": command,
            "args": argv,
            "env": env_preview,
        }
    })
    .to_string();

    ExecutionResult {
        command: command.to_string(),
        args: argv.to_vec(),
        exit_code: 0,
        stdout: String::new(),
        stderr: String::new(),
        combined_output: String::new(),
        status: "ok".to_string(),
        dry_run_preview: Some(preview),
    }
}
