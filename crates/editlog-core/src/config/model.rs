//! Logger configuration model

use super::logging_config::LoggingConfig;
use super::validation::validate_number;
use crate::error::{EditLogError, EditLogResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default values, shared with the CLI's `config init`
pub mod defaults {
    pub const DATASET_ROOT: &str = "dataset";
    pub const HISTORY_SIZE: usize = 5;
    pub const DEBOUNCE_MS: u64 = 1000;
    pub const ENABLE_MASKING: bool = true;

    pub const EXCLUDE_PATTERNS: &[&str] = &[
        "**/node_modules/**",
        "**/dist/**",
        "**/build/**",
        "**/.git/**",
        "**/venv/**",
    ];

    pub const MASK_PATTERNS: &[&str] = &[
        "api[_-]?key",
        "secret[_-]?key",
        "password",
        "token",
        "auth[_-]?token",
        "bearer[_-]?token",
        "access[_-]?token",
        "refresh[_-]?token",
    ];
}

/// Everything the engine needs to know about how to log edits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggerConfig {
    /// Root directory for exported dataset files
    pub dataset_root: PathBuf,
    /// Number of past bursts embedded in each export
    pub history_size: usize,
    /// Idle gap that ends a burst
    pub debounce_ms: u64,
    /// Only track files matching one of these (empty = everything)
    pub include_patterns: Vec<String>,
    /// Never track files matching these; wins over includes
    pub exclude_patterns: Vec<String>,
    /// Redact sensitive text before export
    pub enable_masking: bool,
    /// Case-insensitive regular expressions to redact
    pub mask_patterns: Vec<String>,
    /// File names embedded verbatim under `context`
    pub context_files: Vec<String>,
    /// Workspace roots, in lookup order
    pub workspace_roots: Vec<PathBuf>,
    /// Logging settings for the binary
    pub logging: LoggingConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            dataset_root: PathBuf::from(defaults::DATASET_ROOT),
            history_size: defaults::HISTORY_SIZE,
            debounce_ms: defaults::DEBOUNCE_MS,
            include_patterns: Vec::new(),
            exclude_patterns: to_strings(defaults::EXCLUDE_PATTERNS),
            enable_masking: defaults::ENABLE_MASKING,
            mask_patterns: to_strings(defaults::MASK_PATTERNS),
            context_files: Vec::new(),
            workspace_roots: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl LoggerConfig {
    /// Set the dataset root
    pub fn with_dataset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.dataset_root = root.into();
        self
    }

    /// Add a workspace root
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_roots.push(root.into());
        self
    }

    /// Set the debounce interval without validation (0 is allowed)
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Set the history size, clamping nothing; call [`validate`](Self::validate) afterwards
    pub fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }

    /// Set the history size from user input
    pub fn set_history_size(&mut self, input: &str) -> EditLogResult<()> {
        let size = validate_number(input, 1)?;
        self.history_size = size as usize;
        Ok(())
    }

    /// Set the debounce interval from user input
    pub fn set_debounce_ms(&mut self, input: &str) -> EditLogResult<()> {
        self.debounce_ms = validate_number(input, 0)?;
        Ok(())
    }

    /// Check the numeric bounds
    ///
    /// Malformed mask patterns are not an error here; the masking engine skips
    /// them with a warning.
    pub fn validate(&self) -> EditLogResult<()> {
        if self.history_size < 1 {
            return Err(EditLogError::validation("historySize must be at least 1"));
        }

        Ok(())
    }
}
