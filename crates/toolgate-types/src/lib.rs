//! Core domain types for the tool-invocation gateway.
//!
//! No I/O, no async: this crate holds the wire/domain shapes shared by the
//! validator, renderer, secrets, command, manager, and othertools crates,
//! plus the shared error taxonomy.

pub mod error;
pub mod ids;
pub mod request;
pub mod tool;

pub use error::{DenialReason, GatewayError};
pub use ids::{compose_tool_id, sanitize, EmptyServiceId};
pub use request::{ExecutionRequest, ExecutionResult, HealthStatus};
pub use tool::{
    CallDefinition, CommandLineUpstreamService, ContainerEnvironment, ParameterMapping,
    ParameterSchema, ParameterType, SecretValue, ToolDefinition,
};
