//! Which documents are tracked
//!
//! Patterns are globs where `*` matches any run of characters (slashes
//! included) and `?` matches exactly one. They are matched against the whole
//! path after backslashes are turned into `/`.

use crate::config::LoggerConfig;
use crate::error::{EditLogError, EditLogResult};
use crate::events::FILE_SCHEME;
use regex::Regex;
use std::path::Path;
use tracing::warn;

/// A compiled glob pattern
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> EditLogResult<Self> {
        let regex = Regex::new(&glob_to_regex(pattern))
            .map_err(|e| EditLogError::invalid_pattern(pattern, e.to_string()))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match against `path`, normalizing separators first
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(&normalize_separators(path))
    }
}

fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2 + 2);
    out.push('^');
    for c in pattern.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '\\' => out.push('/'),
            other => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }
    out.push('$');
    out
}

fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Include/exclude decision for documents
#[derive(Debug, Clone, Default)]
pub struct TrackingFilter {
    include: Vec<GlobPattern>,
    exclude: Vec<GlobPattern>,
}

impl TrackingFilter {
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Self {
        Self {
            include: compile_all(include),
            exclude: compile_all(exclude),
        }
    }

    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::new(&config.include_patterns, &config.exclude_patterns)
    }

    /// Whether a path passes the include/exclude patterns
    ///
    /// Excludes win; an empty include list admits everything else.
    pub fn matches_path(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path))
    }

    /// Whether a document should be tracked at all
    pub fn should_track(&self, scheme: &str, path: &Path) -> bool {
        scheme == FILE_SCHEME && self.matches_path(path)
    }
}

fn compile_all<S: AsRef<str>>(patterns: &[S]) -> Vec<GlobPattern> {
    patterns
        .iter()
        .filter_map(|p| match GlobPattern::new(p.as_ref()) {
            Ok(glob) => Some(glob),
            Err(e) => {
                warn!("Skipping path pattern: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_crosses_directories() {
        let glob = GlobPattern::new("**/node_modules/**").unwrap();
        assert!(glob.matches("/home/me/app/node_modules/lodash/index.js"));
        assert!(!glob.matches("/home/me/app/src/index.js"));
    }

    #[test]
    fn test_question_mark() {
        let glob = GlobPattern::new("*/v?.rs").unwrap();
        assert!(glob.matches("/src/v1.rs"));
        assert!(!glob.matches("/src/v10.rs"));
    }

    #[test]
    fn test_literal_characters_are_escaped() {
        let glob = GlobPattern::new("*.ts").unwrap();
        assert!(glob.matches("/w/a.ts"));
        assert!(!glob.matches("/w/a_ts"));
        assert!(!glob.matches("/w/a.tsx"));
    }

    #[test]
    fn test_backslash_paths() {
        let glob = GlobPattern::new("**/dist/**").unwrap();
        assert!(glob.matches(r"C:\work\app\dist\bundle.js"));
    }

    #[test]
    fn test_exclude_beats_include() {
        let filter = TrackingFilter::new(&["*.js"], &["**/dist/**"]);
        assert!(filter.matches_path(Path::new("/w/src/a.js")));
        assert!(!filter.matches_path(Path::new("/w/dist/a.js")));
        assert!(!filter.matches_path(Path::new("/w/src/a.py")));
    }

    #[test]
    fn test_empty_include_admits_all() {
        let filter = TrackingFilter::from_config(&LoggerConfig::default());
        assert!(filter.matches_path(Path::new("/w/src/main.rs")));
        assert!(!filter.matches_path(Path::new("/w/.git/HEAD")));
        assert!(!filter.matches_path(Path::new("/w/venv/lib/site.py")));
    }

    #[test]
    fn test_only_file_scheme_is_tracked() {
        let filter = TrackingFilter::default();
        assert!(filter.should_track("file", Path::new("/w/a.rs")));
        assert!(!filter.should_track("untitled", Path::new("Untitled-1")));
        assert!(!filter.should_track("git", Path::new("/w/a.rs")));
    }
}
