//! Pre/post call hooks. Tagged variants in the source system
//! (`CallPolicy`, `TextTruncation`, ...) collapse here to two traits;
//! concrete hooks are ordinary implementors, not an enum, since Rust's
//! trait objects already give the open set the tagged union was standing
//! in for.

use async_trait::async_trait;
use toolgate_types::{ExecutionRequest, ExecutionResult, GatewayError};

/// A pre-call hook's verdict. `Deny` carries the reason surfaced to the
/// caller as `denied by hook: {reason}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Allow,
    Deny(String),
}

#[async_trait]
pub trait PreCallHook: Send + Sync {
    /// Inspect (and optionally replace) the request before `Tool::execute`
    /// runs. Returning `(Action::Allow, Some(replacement))` substitutes
    /// the request seen by the rest of the chain; `None` leaves it as-is.
    async fn execute_pre(
        &self,
        req: &ExecutionRequest,
    ) -> Result<(Action, Option<ExecutionRequest>), GatewayError>;
}

#[async_trait]
pub trait PostCallHook: Send + Sync {
    /// Transform a completed result: text truncation, redaction
    /// enforcement, policy logging. Runs after `Tool::execute`, in
    /// registration order.
    async fn execute_post(
        &self,
        req: &ExecutionRequest,
        result: ExecutionResult,
    ) -> Result<ExecutionResult, GatewayError>;
}
