//! Argument-injection predicate.

use toolgate_types::{DenialReason, ParameterType};

/// Context needed to decide whether a leading `-` is admissible.
pub struct ArgInjectionContext<'a> {
    pub param_name: &'a str,
    pub param_type: ParameterType,
    /// True when the argument template is exactly `{{p}}` with nothing else.
    pub template_is_bare_placeholder: bool,
    pub command_is_shell_family: bool,
}

/// Reject values starting with `-` unless the narrow boolean-flag or
/// known-safe-`args`-array exception applies.
pub fn check_argument_injection(
    value: &str,
    ctx: &ArgInjectionContext<'_>,
) -> Result<(), DenialReason> {
    let trimmed = value.trim_start();
    if !trimmed.starts_with('-') {
        return Ok(());
    }

    if ctx.param_type.is_boolean() {
        return Ok(());
    }

    // The `args` exception only ever admits leading `-` for
    // bare-placeholder templates against non-shell-family commands.
    if ctx.param_name == "args"
        && ctx.template_is_bare_placeholder
        && !ctx.command_is_shell_family
    {
        return Ok(());
    }

    Err(DenialReason::ArgumentInjection {
        detail: "value starts with '-'".into(),
    })
}
