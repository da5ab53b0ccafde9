//! Tool, service, and call definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-Schema-ish parameter type, restricted to the set a [`ParameterMapping`]
/// can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParameterType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl ParameterType {
    #[must_use]
    pub fn is_boolean(self) -> bool {
        matches!(self, ParameterType::Boolean)
    }
}

/// The declared name and type of one call parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParameterType,
}

/// A secret reference bound to a [`ParameterMapping`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum SecretValue {
    PlainText(String),
    EnvironmentVariable(String),
}

/// Binds a declared parameter to an optional secret source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterMapping {
    pub schema: ParameterSchema,
    pub secret: Option<SecretValue>,
}

/// The argument templates and parameter declarations for a command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallDefinition {
    /// Argument templates, e.g. `["commit", "-m", "{{message}}"]`.
    pub args: Vec<String>,
    pub parameters: Vec<ParameterMapping>,
}

impl CallDefinition {
    /// Find the declared parameter schema for `name`, if any.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterMapping> {
        self.parameters.iter().find(|p| p.schema.name == name)
    }
}

/// Container image and related settings; presence on a service enables
/// "Docker mode".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerEnvironment {
    pub image: String,
    #[serde(default)]
    pub allowed_host_paths: Vec<String>,
}

/// The upstream command-line service a [`CallDefinition`] is executed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLineUpstreamService {
    pub command: String,
    #[serde(default)]
    pub arguments: Vec<String>,
    pub working_directory: Option<String>,
    #[serde(default)]
    pub local: bool,
    pub container_environment: Option<ContainerEnvironment>,
}

impl CommandLineUpstreamService {
    /// "`containerEnvironment != nil` ⇒ Docker mode".
    #[must_use]
    pub fn is_docker_mode(&self) -> bool {
        self.container_environment.is_some()
    }
}

/// A registered tool's declarative definition (schema, not behavior).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub service_id: String,
    pub description: String,
    /// `{type:"object", properties:{...}, required:[...]}`
    pub input_schema: Value,
    pub underlying_method_fqn: String,
}
