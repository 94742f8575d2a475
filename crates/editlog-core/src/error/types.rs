//! Core error type for editlog

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for editlog operations
pub type EditLogResult<T> = Result<T, EditLogError>;

/// Main error type for editlog
#[derive(Error, Debug, Clone)]
pub enum EditLogError {
    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// Configuration could not be written back
    #[error("Failed to update configuration '{key}': {message}")]
    ConfigUpdate { key: String, message: String },

    /// Reading, writing or creating a file or directory failed
    #[error("File operation failed on {}: {message}", path.display())]
    FileOperation { path: PathBuf, message: String },

    /// Unexpected failure while classifying or flushing edit events
    #[error("Event processing error: {message}")]
    EventProcessing { message: String },

    /// Invalid user input (numeric settings, etc.)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A mask or path pattern failed to compile
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// IO errors without a specific path
    #[error("IO error: {message}")]
    Io { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },
}

impl EditLogError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "CONFIG_LOAD_FAILED",
            Self::ConfigUpdate { .. } => "CONFIG_UPDATE_FAILED",
            Self::FileOperation { .. } | Self::Io { .. } => "FILE_OPERATION_FAILED",
            Self::EventProcessing { .. } | Self::Json { .. } => "EVENT_PROCESSING_FAILED",
            Self::Validation { .. } => "VALIDATION_FAILED",
            Self::InvalidPattern { .. } => "INVALID_PATTERN",
        }
    }

    /// Whether the engine can keep running after this error
    ///
    /// Configuration and file failures leave the aggregator usable; the
    /// caller logs them and carries on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::ConfigUpdate { .. }
                | Self::FileOperation { .. }
                | Self::Io { .. }
        )
    }

    /// Optional context attached to the error
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. } => context.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EditLogError::config("x").error_code(), "CONFIG_LOAD_FAILED");
        assert_eq!(
            EditLogError::config_update("historySize", "x").error_code(),
            "CONFIG_UPDATE_FAILED"
        );
        assert_eq!(
            EditLogError::file_operation("/tmp/a", "denied").error_code(),
            "FILE_OPERATION_FAILED"
        );
        assert_eq!(
            EditLogError::event_processing("boom").error_code(),
            "EVENT_PROCESSING_FAILED"
        );
        assert_eq!(EditLogError::validation("bad").error_code(), "VALIDATION_FAILED");
        assert_eq!(
            EditLogError::invalid_pattern("(", "unclosed group").error_code(),
            "INVALID_PATTERN"
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(EditLogError::config("x").is_recoverable());
        assert!(EditLogError::file_operation("/tmp/a", "denied").is_recoverable());
        assert!(!EditLogError::validation("bad").is_recoverable());
        assert!(!EditLogError::event_processing("boom").is_recoverable());
    }

    #[test]
    fn test_display_includes_path() {
        let err = EditLogError::file_operation("/data/out.json", "permission denied");
        let text = err.to_string();
        assert!(text.contains("/data/out.json"));
        assert!(text.contains("permission denied"));
    }

    #[test]
    fn test_context() {
        let err = EditLogError::config_with_context("parse failed", "Reading 'a.toml'");
        assert_eq!(err.context(), Some("Reading 'a.toml'"));
        assert_eq!(EditLogError::validation("x").context(), None);
    }
}
