//! Shared error taxonomy. `DenialReason` is the validator's rejection
//! taxonomy; per-crate error enums (`SecretError`, `ToolError`) convert
//! into [`GatewayError`] at the manager boundary alongside it.

use thiserror::Error;

/// Why the validator rejected a call, before any subprocess was spawned.
///
/// Display strings are part of the external contract - callers and tests
/// match on these prefixes, so wording changes are breaking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenialReason {
    #[error("shell injection detected: {detail}")]
    ShellInjection { detail: String },

    #[error("argument injection detected: {detail}")]
    ArgumentInjection { detail: String },

    #[error("path traversal attempt detected: {path}")]
    PathTraversal { path: String },

    #[error("absolute path detected: {path}")]
    AbsolutePathDetected { path: String },

    #[error("absolute path not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("dangerous scheme detected: {scheme}")]
    DangerousScheme { scheme: String },

    #[error("{interpreter} injection detected: {detail}")]
    InterpreterInjection { interpreter: String, detail: String },

    #[error("'{name}' matches a dangerous environment variable name")]
    DangerousEnvVar { name: String },

    #[error("'args' parameter is not allowed")]
    ArgsParameterNotAllowed,

    #[error("non-string value in 'args' array")]
    NonStringInArgsArray,

    #[error("SSRF: target resolves to a blocked address: {detail}")]
    BlockedNetworkTarget { detail: String },

    #[error("unknown parameter: {name}")]
    UnknownParameter { name: String },

    #[error("missing required parameter: {name}")]
    MissingRequiredParameter { name: String },

    #[error("parameter '{name}' has wrong type: expected {expected}")]
    WrongParameterType { name: String, expected: String },
}

/// Top-level error returned by `Manager::execute_tool`.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("service {service_id} is currently unhealthy")]
    ServiceUnhealthy { service_id: String },

    #[error("denied by hook: {0}")]
    DeniedByHook(String),

    #[error("validation failed: {0}")]
    ValidationFailed(#[from] DenialReason),

    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    #[error("secret resolution failed: {0}")]
    SecretResolution(String),

    #[error("hook failed: {0}")]
    HookFailed(String),

    #[error("failed to get peer connection from pool")]
    PoolAcquisition,

    #[error("bad request: {0}")]
    BadRequest(String),
}
