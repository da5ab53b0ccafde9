//! Interpreter-specific injection recognizers.

use toolgate_types::DenialReason;

use crate::shell_family::InterpreterFamily;

fn deny(interpreter: &str, detail: impl Into<String>) -> Result<(), DenialReason> {
    Err(DenialReason::InterpreterInjection {
        interpreter: interpreter.to_string(),
        detail: detail.into(),
    })
}

/// Reject `system(`, `getline`, and pipe-to-shell tokens in an awk script,
/// while admitting the benign double-character operators `||`/`&&`.
fn check_awk(value: &str) -> Result<(), DenialReason> {
    if value.contains("system(") {
        return deny("awk", "system() call in script");
    }
    if value.contains("getline") {
        return deny("awk", "getline in script");
    }
    let bytes = value.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'|' {
            continue;
        }
        let prev_is_pipe = i > 0 && bytes[i - 1] == b'|';
        let next_is_pipe = i + 1 < bytes.len() && bytes[i + 1] == b'|';
        if prev_is_pipe || next_is_pipe {
            continue; // part of `||`
        }
        return deny("awk", "pipe to external command in script");
    }
    if value.contains('>') {
        return deny("awk", "file redirection in script");
    }
    Ok(())
}

/// Reject Ruby string interpolation and pipe-to-shell via `open("|cmd")`.
fn check_ruby(value: &str, in_double_quoted_template: bool) -> Result<(), DenialReason> {
    if in_double_quoted_template && value.contains("#{") {
        return deny("ruby", "string interpolation in value");
    }
    if value.starts_with('|') {
        return deny("ruby", "leading pipe opens a subprocess");
    }
    Ok(())
}

/// Reject `{`/`}` in values substituted into an f-string literal.
fn check_python(value: &str, enclosing_is_fstring: bool) -> Result<(), DenialReason> {
    if enclosing_is_fstring && (value.contains('{') || value.contains('}')) {
        return deny("python", "brace in value substituted into an f-string");
    }
    Ok(())
}

/// Reject `${` in values substituted into a JS template literal.
fn check_javascript(value: &str, enclosing_is_template_literal: bool) -> Result<(), DenialReason> {
    if enclosing_is_template_literal && value.contains("${") {
        return deny("javascript", "template-literal expression in value");
    }
    Ok(())
}

/// Context describing the literal form enclosing the placeholder, needed by
/// the python/javascript checks which only trigger for specific literal
/// syntaxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterpreterContext {
    pub in_double_quoted_template: bool,
    pub enclosing_is_fstring: bool,
    pub enclosing_is_template_literal: bool,
}

/// Dispatch to the interpreter-specific check for `family`, if any applies.
pub fn check_interpreter(
    family: InterpreterFamily,
    value: &str,
    ctx: &InterpreterContext,
) -> Result<(), DenialReason> {
    match family {
        InterpreterFamily::Awk => check_awk(value),
        InterpreterFamily::Ruby => check_ruby(value, ctx.in_double_quoted_template),
        InterpreterFamily::Python => check_python(value, ctx.enclosing_is_fstring),
        InterpreterFamily::JavaScript => {
            check_javascript(value, ctx.enclosing_is_template_literal)
        }
        InterpreterFamily::PosixShell => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn awk_system_call_rejected() {
        assert!(check_awk("system(\"rm -rf /\")").is_err());
    }

    #[test]
    fn awk_benign_double_pipe_admitted() {
        assert!(check_awk("a == 1 || b == 2 { print a }").is_ok());
    }

    #[test]
    fn awk_single_pipe_rejected() {
        assert!(check_awk("BEGIN { print \"x\" | \"sh\" }").is_err());
    }

    #[test]
    fn ruby_interpolation_rejected_in_double_quoted_template() {
        assert!(check_ruby("#{`rm -rf /`}", true).is_err());
    }

    #[test]
    fn ruby_interpolation_admitted_outside_double_quoted_template() {
        assert!(check_ruby("#{literally a hash}", false).is_ok());
    }

    #[test]
    fn ruby_leading_pipe_rejected() {
        assert!(check_ruby("|rm -rf /", false).is_err());
    }

    #[test]
    fn ruby_leading_space_pipe_admitted() {
        // A leading space before the pipe is not a leading-pipe payload.
        assert!(check_ruby(" |echo", false).is_ok());
    }

    #[test]
    fn python_fstring_brace_rejected_only_in_fstring_context() {
        assert!(check_python("{evil}", true).is_err());
        assert!(check_python(r#"{"foo":"bar"}"#, false).is_ok());
    }

    #[test]
    fn javascript_template_literal_expression_rejected() {
        assert!(check_javascript("${process.exit()}", true).is_err());
        assert!(check_javascript("${literal dollar brace}", false).is_ok());
    }
}
