//! Quote-context inference for argument templates.

/// Lexical context enclosing a placeholder in an argument template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteLevel {
    /// No surrounding quotes around the placeholder.
    Bare,
    /// `"...{{p}}..."`.
    DoubleQuoted,
    /// `'...{{p}}...'`.
    SingleQuoted,
    /// `` `...{{p}}...` `` or `$(...{{p}}...)`.
    CommandSubstitution,
}

impl QuoteLevel {
    #[must_use]
    pub fn as_index(self) -> u8 {
        match self {
            QuoteLevel::Bare => 0,
            QuoteLevel::DoubleQuoted => 1,
            QuoteLevel::SingleQuoted => 2,
            QuoteLevel::CommandSubstitution => 3,
        }
    }
}

/// Infer the quote level enclosing `{{name}}` in `template`.
///
/// Lexical only: the first enclosing quote pair that matches both sides of
/// the placeholder wins; command-substitution wins over both quote forms
/// since it nests deepest. Placeholders not found in the template infer as
/// [`QuoteLevel::Bare`].
#[must_use]
pub fn infer_quote_level(template: &str, placeholder: &str) -> QuoteLevel {
    let token = format!("{{{{{placeholder}}}}}");
    let Some(start) = template.find(&token) else {
        return QuoteLevel::Bare;
    };
    let end = start + token.len();
    let before = &template[..start];
    let after = &template[end..];

    if encloses_command_sub(before, after) {
        return QuoteLevel::CommandSubstitution;
    }
    if encloses(before, after, "\"", "\"") {
        return QuoteLevel::DoubleQuoted;
    }
    if encloses(before, after, "'", "'") {
        return QuoteLevel::SingleQuoted;
    }
    QuoteLevel::Bare
}

fn encloses(before: &str, after: &str, open: &str, close: &str) -> bool {
    before.ends_with(open) && after.starts_with(close)
}

fn encloses_command_sub(before: &str, after: &str) -> bool {
    (before.ends_with('`') && after.starts_with('`'))
        || (before.ends_with("$(") && after.starts_with(')'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_placeholder_is_level_zero() {
        assert_eq!(infer_quote_level("echo {{p}}", "p"), QuoteLevel::Bare);
    }

    #[test]
    fn double_quoted_placeholder() {
        assert_eq!(
            infer_quote_level("awk \"{{script}}\"", "script"),
            QuoteLevel::DoubleQuoted
        );
    }

    #[test]
    fn single_quoted_placeholder() {
        assert_eq!(
            infer_quote_level("awk '{{script}}'", "script"),
            QuoteLevel::SingleQuoted
        );
    }

    #[test]
    fn backtick_command_substitution() {
        assert_eq!(
            infer_quote_level("echo `{{cmd}}`", "cmd"),
            QuoteLevel::CommandSubstitution
        );
    }

    #[test]
    fn dollar_paren_command_substitution() {
        assert_eq!(
            infer_quote_level("echo $({{cmd}})", "cmd"),
            QuoteLevel::CommandSubstitution
        );
    }

    #[test]
    fn missing_placeholder_defaults_bare() {
        assert_eq!(infer_quote_level("echo hi", "p"), QuoteLevel::Bare);
    }
}
