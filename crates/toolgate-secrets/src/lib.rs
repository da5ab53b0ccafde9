//! Secret resolution and redaction.

pub mod redaction;
pub mod resolver;

pub use redaction::RedactionSet;
pub use resolver::{resolve_secret, SecretError};
