//! The tool-invocation gateway's security layer: stateless predicates over
//! (command, argument template, rendered value, quote level).
//!
//! Every function here is pure and synchronous; no crate in this workspace
//! performs validation anywhere except through these predicates.

pub mod argument_injection;
pub mod env_var;
pub mod interpreter;
pub mod path_traversal;
pub mod quote_level;
pub mod shell_family;
pub mod ssrf;

pub use argument_injection::{check_argument_injection, ArgInjectionContext};
pub use env_var::{check_dangerous_env_var, filter_dangerous_env};
pub use interpreter::{check_interpreter, InterpreterContext};
pub use path_traversal::{check_path_traversal, PathMode};
pub use quote_level::{infer_quote_level, QuoteLevel};
pub use shell_family::{interpreter_family, is_shell_family, InterpreterFamily};
pub use shell_injection::check_shell_injection;
pub use ssrf::{check_ssrf, NetworkMode, SecurityOverrides};

mod shell_injection;

use toolgate_types::DenialReason;

/// Reject the literal `args` key when the caller declares it outside of an
/// explicit `args`-typed parameter.
pub fn check_args_parameter_allowed(declared_as_parameter: bool) -> Result<(), DenialReason> {
    if declared_as_parameter {
        Ok(())
    } else {
        Err(DenialReason::ArgsParameterNotAllowed)
    }
}

/// Reject a non-string element inside an `args` array value.
pub fn check_args_array_element_is_string(value: &serde_json::Value) -> Result<(), DenialReason> {
    if value.is_string() {
        Ok(())
    } else {
        Err(DenialReason::NonStringInArgsArray)
    }
}
