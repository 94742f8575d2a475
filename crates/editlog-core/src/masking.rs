//! Redaction of sensitive text before export
//!
//! Two passes run in a fixed order:
//!
//! 1. every configured pattern (case-insensitive regex) is replaced with
//!    [`REDACTED_TEXT`];
//! 2. every quoted literal (`'…'`, `"…"` or `` `…` ``) is replaced whole when
//!    its content mentions `key`, `secret`, `password` or `token`, or when it
//!    is the value assigned to a name pass 1 already redacted.
//!
//! Masking is best effort and not a security boundary.

use crate::config::LoggerConfig;
use crate::error::{EditLogError, EditLogResult};
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;
use tracing::warn;

/// Placeholder substituted for masked content
pub const REDACTED_TEXT: &str = "[REDACTED]";

const SENSITIVE_WORDS: &[&str] = &["key", "secret", "password", "token"];

static QUOTED_LITERAL: OnceLock<Option<Regex>> = OnceLock::new();

fn quoted_literal() -> Option<&'static Regex> {
    QUOTED_LITERAL
        .get_or_init(|| Regex::new(r#"['"`][^'"`]*['"`]"#).ok())
        .as_ref()
}

/// Compiled set of mask patterns
#[derive(Debug, Clone)]
pub struct MaskingEngine {
    enabled: bool,
    patterns: Vec<Regex>,
    skipped: Vec<String>,
}

impl MaskingEngine {
    /// Compile the given patterns, skipping (and logging) any that are malformed
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut compiled = Vec::with_capacity(patterns.len());
        let mut skipped = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            match compile(pattern) {
                Ok(regex) => compiled.push(regex),
                Err(e) => {
                    warn!("Skipping mask pattern: {}", e);
                    skipped.push(pattern.to_string());
                }
            }
        }

        Self {
            enabled: true,
            patterns: compiled,
            skipped,
        }
    }

    /// An engine that passes text through untouched
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            patterns: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Build from the `enableMasking` / `maskPatterns` settings
    pub fn from_config(config: &LoggerConfig) -> Self {
        if config.enable_masking {
            Self::new(&config.mask_patterns)
        } else {
            Self::disabled()
        }
    }

    /// Check a single pattern without building an engine
    pub fn check_pattern(pattern: &str) -> EditLogResult<()> {
        compile(pattern).map(|_| ())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Patterns that failed to compile
    pub fn skipped_patterns(&self) -> &[String] {
        &self.skipped
    }

    /// Redact `text`
    pub fn mask(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }

        let mut masked = text.to_string();
        for regex in &self.patterns {
            masked = regex.replace_all(&masked, REDACTED_TEXT).into_owned();
        }

        mask_quoted_literals(&masked)
    }
}

/// One-shot helper: compile `patterns` and mask `text`
pub fn mask_sensitive<S: AsRef<str>>(text: &str, patterns: &[S]) -> String {
    MaskingEngine::new(patterns).mask(text)
}

fn compile(pattern: &str) -> EditLogResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| EditLogError::invalid_pattern(pattern, e.to_string()))
}

fn mask_quoted_literals(text: &str) -> String {
    let Some(literal) = quoted_literal() else {
        return text.to_string();
    };

    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for found in literal.find_iter(text) {
        out.push_str(&text[last..found.start()]);
        if is_sensitive_literal(found.as_str()) || follows_redacted_name(&out) {
            out.push_str(REDACTED_TEXT);
        } else {
            out.push_str(found.as_str());
        }
        last = found.end();
    }

    out.push_str(&text[last..]);
    out
}

fn is_sensitive_literal(literal: &str) -> bool {
    let lower = literal.to_lowercase();
    SENSITIVE_WORDS.iter().any(|word| lower.contains(word))
}

/// `[REDACTED] = `, `[REDACTED]: ` or `"[REDACTED]": ` directly before a literal
///
/// Checked against the output built so far, so a key literal redacted in this
/// pass also covers its value.
fn follows_redacted_name(prefix: &str) -> bool {
    let trimmed = prefix.trim_end();
    let Some(before_op) = trimmed
        .strip_suffix('=')
        .or_else(|| trimmed.strip_suffix(':'))
    else {
        return false;
    };

    let name = before_op
        .trim_end()
        .trim_end_matches(['\'', '"', '`']);
    name.ends_with(REDACTED_TEXT)
}
