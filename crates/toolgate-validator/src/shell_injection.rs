//! Shell-injection predicate over (rendered value, quote level, command
//! family).

use toolgate_types::DenialReason;

use crate::quote_level::QuoteLevel;

const LEVEL0_DANGEROUS: &[char] = &[';', '&', '|', '>', '<', '$', '`', '\n', '\r'];

/// Reject `value` if it contains characters that escape the given quote
/// context. `shell_family` narrows the check at level 0: bare space is only
/// dangerous for shell-family commands (strict mode: `sh`/`bash`/`zsh`
/// with `-c`).
pub fn check_shell_injection(
    value: &str,
    level: QuoteLevel,
    shell_family: bool,
) -> Result<(), DenialReason> {
    match level {
        QuoteLevel::Bare => check_bare(value, shell_family),
        QuoteLevel::DoubleQuoted => check_double_quoted(value),
        QuoteLevel::SingleQuoted => check_single_quoted(value),
        QuoteLevel::CommandSubstitution => check_command_substitution(value),
    }
}

fn deny(detail: impl Into<String>) -> Result<(), DenialReason> {
    let detail = detail.into();
    tracing::debug!(%detail, "shell injection check rejected value");
    Err(DenialReason::ShellInjection { detail })
}

fn check_bare(value: &str, shell_family: bool) -> Result<(), DenialReason> {
    for c in value.chars() {
        if LEVEL0_DANGEROUS.contains(&c) {
            return deny(format!("dangerous character '{c}' in bare argument"));
        }
        if shell_family && c == ' ' {
            return deny("embedded space in bare argument to shell-family command");
        }
    }
    Ok(())
}

fn check_double_quoted(value: &str) -> Result<(), DenialReason> {
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ';' | '&' | '\n' | '\r' | '$' | '`' | '|' => {
                return deny(format!("dangerous character '{c}' inside double quotes"));
            }
            '\\' if matches!(chars.peek(), Some('"')) => {
                return deny("escaped closing double quote in value");
            }
            _ => {}
        }
    }
    Ok(())
}

fn check_single_quoted(value: &str) -> Result<(), DenialReason> {
    // A single-quoted shell literal has no escape sequence at all; the
    // only way out of it is an embedded `'` that closes the quote early.
    // `;`, `\n`, `` ` ``, and `$(` are all inert literal characters inside
    // single quotes, not metacharacters - only the quote itself is checked.
    if value.contains('\'') {
        return deny("embedded single quote would close the enclosing quote");
    }
    Ok(())
}

fn check_command_substitution(value: &str) -> Result<(), DenialReason> {
    check_bare(value, true)
}
