//! Middleware chain: `Execute(ctx, req, next) -> (result, err)`.
//! Middlewares are composed outermost-first; each must call `next` exactly
//! once unless it intentionally short-circuits (e.g. a cache hit, a rate
//! limit).

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use toolgate_types::{ExecutionRequest, ExecutionResult, GatewayError};

/// The continuation a [`Middleware`] invokes to run the rest of the chain.
/// Owned (not borrowed) so a middleware can move it into a spawned task or
/// call it conditionally without fighting the borrow checker.
pub type Next = Box<dyn FnOnce(ExecutionRequest) -> BoxFuture<'static, Result<ExecutionResult, GatewayError>> + Send>;

#[async_trait]
pub trait Middleware: Send + Sync {
    async fn execute(
        &self,
        req: ExecutionRequest,
        next: Next,
    ) -> Result<ExecutionResult, GatewayError>;
}
