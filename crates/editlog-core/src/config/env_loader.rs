//! Environment variable overrides

use super::model::LoggerConfig;
use crate::error::{EditLogError, EditLogResult};
use std::path::PathBuf;

/// Apply `EDITLOG_*` environment variables on top of a loaded config
pub fn apply_env_overrides(config: &mut LoggerConfig) -> EditLogResult<()> {
    apply_env_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides using a custom variable lookup
pub fn apply_env_overrides_from<F>(config: &mut LoggerConfig, lookup: F) -> EditLogResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(root) = lookup("EDITLOG_DATASET_ROOT") {
        config.dataset_root = PathBuf::from(root);
    }

    if let Some(size) = lookup("EDITLOG_HISTORY_SIZE") {
        config
            .set_history_size(&size)
            .map_err(|e| EditLogError::config(format!("Invalid EDITLOG_HISTORY_SIZE: {}", e)))?;
    }

    if let Some(ms) = lookup("EDITLOG_DEBOUNCE_MS") {
        config
            .set_debounce_ms(&ms)
            .map_err(|e| EditLogError::config(format!("Invalid EDITLOG_DEBOUNCE_MS: {}", e)))?;
    }

    if let Some(masking) = lookup("EDITLOG_ENABLE_MASKING") {
        config.enable_masking = masking.parse().map_err(|_| {
            EditLogError::config(format!("Invalid EDITLOG_ENABLE_MASKING value: {}", masking))
        })?;
    }

    Ok(())
}
