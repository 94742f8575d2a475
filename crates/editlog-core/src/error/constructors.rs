//! Constructor methods for EditLogError

use super::types::EditLogError;
use std::path::PathBuf;

impl EditLogError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a configuration update error
    pub fn config_update(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigUpdate {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a file operation error
    pub fn file_operation(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FileOperation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an event processing error
    pub fn event_processing(message: impl Into<String>) -> Self {
        Self::EventProcessing {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}
