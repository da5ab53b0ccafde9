//! The per-call redaction set.

use aho_corasick::{AhoCorasick, MatchKind};

const REDACTED: &str = "[REDACTED]";

/// Accumulates plaintext secret values resolved during a call; applies them
/// as a deterministic find-and-replace over captured output.
#[derive(Debug, Default, Clone)]
pub struct RedactionSet {
    plaintexts: Vec<String>,
}

impl RedactionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved secret plaintext. Empty strings are ignored - they
    /// would match everywhere and redact non-secret output.
    pub fn record(&mut self, plaintext: impl Into<String>) {
        let plaintext = plaintext.into();
        if !plaintext.is_empty() {
            self.plaintexts.push(plaintext);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plaintexts.is_empty()
    }

    /// Replace every recorded plaintext with `[REDACTED]` in `text`.
    /// Longest-match-first ordering avoids partial-overlap artifacts when
    /// one secret is a substring of another.
    #[must_use]
    pub fn redact(&self, text: &str) -> String {
        if self.plaintexts.is_empty() {
            return text.to_string();
        }
        let ac = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&self.plaintexts)
            .expect("redaction patterns are plain literals, never invalid");
        ac.replace_all(text, &vec![REDACTED; self.plaintexts.len()])
    }

    /// Render an env-preview entry with the value redacted.
    #[must_use]
    pub fn preview_entry(name: &str) -> String {
        format!("{name}={REDACTED}")
    }
}
