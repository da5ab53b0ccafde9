//! Secret resolution.

use toolgate_types::SecretValue;

/// Error resolving a declared secret.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SecretError {
    #[error("environment variable '{0}' is not set")]
    EnvVarMissing(String),
}

/// Resolve a [`SecretValue`] to its plaintext.
///
/// `PlainText` returns its literal string; `EnvironmentVariable` reads the
/// named process environment variable, failing if it is absent. The error
/// never includes the resolved value, only the variable name.
pub fn resolve_secret(secret: &SecretValue) -> Result<String, SecretError> {
    match secret {
        SecretValue::PlainText(s) => Ok(s.clone()),
        SecretValue::EnvironmentVariable(name) => std::env::var(name).map_err(|_| {
            tracing::warn!(env_var = %name, "secret environment variable not set");
            SecretError::EnvVarMissing(name.clone())
        }),
    }
}
