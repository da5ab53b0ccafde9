//! Single-pass placeholder substitution.

use std::collections::HashMap;

use crate::tokenize::{tokenize, Token};

/// Substitute `{{name}}` placeholders in `template` from `values`.
/// Unresolved placeholders are left as the literal `{{name}}` text. Output
/// from one substitution is never re-scanned for further placeholders -
/// the no-recursive-injection invariant.
#[must_use]
pub fn render_template(template: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    for token in tokenize(template) {
        match token {
            Token::Literal(text) => out.push_str(&text),
            Token::Placeholder(name) => match values.get(&name) {
                Some(value) => out.push_str(value),
                None => {
                    out.push_str("{{");
                    out.push_str(&name);
                    out.push_str("}}");
                }
            },
        }
    }
    out
}
