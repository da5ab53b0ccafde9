//! Errors raised while orchestrating or executing a command call.

use thiserror::Error;
use toolgate_types::DenialReason;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("request body is not a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Validation(#[from] DenialReason),

    #[error("secret resolution failed: {0}")]
    Secret(#[from] toolgate_secrets::SecretError),

    #[error("failed to spawn process: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("failed to read process output: {0}")]
    Io(#[source] std::io::Error),
}

impl From<ToolError> for toolgate_types::GatewayError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotAnObject => {
                Self::BadRequest("request body is not a JSON object".to_string())
            }
            ToolError::Validation(reason) => Self::ValidationFailed(reason),
            ToolError::Secret(e) => Self::SecretResolution(e.to_string()),
            ToolError::Spawn(e) | ToolError::Io(e) => Self::ExecutionFailed(e.to_string()),
        }
    }
}
