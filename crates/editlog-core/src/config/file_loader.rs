//! File-based configuration loading

use super::model::LoggerConfig;
use crate::error::{EditLogError, EditLogResult};
use std::fs;
use std::path::Path;

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> EditLogResult<LoggerConfig> {
    if !path.exists() {
        tracing::debug!("Config file {} not found, using defaults", path.display());
        return Ok(LoggerConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        EditLogError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    let config: LoggerConfig = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| {
            EditLogError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
            EditLogError::config_with_context(
                format!("Failed to parse YAML config: {}", e),
                format!("Deserializing YAML configuration from '{}'", path.display()),
            )
        })?,
        _ => serde_json::from_str(&content).map_err(|e| {
            EditLogError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        })?,
    };

    Ok(config)
}

/// Write configuration as pretty JSON
pub fn save_to_file(config: &LoggerConfig, path: &Path) -> EditLogResult<()> {
    let content = serde_json::to_string_pretty(config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| EditLogError::config_update("file", e.to_string()))?;
    }

    fs::write(path, content).map_err(|e| EditLogError::config_update("file", e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_from_file(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn test_load_from_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("editlog.json");
        fs::write(
            &path,
            r#"{
                "datasetRoot": "/data/edits",
                "historySize": 3,
                "contextFiles": ["README.md"],
                "logging": { "level": "debug" }
            }"#,
        )
        .unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.dataset_root, PathBuf::from("/data/edits"));
        assert_eq!(config.history_size, 3);
        assert_eq!(config.context_files, vec!["README.md".to_string()]);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("editlog.toml");
        fs::write(&path, "debounceMs = 300\nenableMasking = false\n").unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.debounce_ms, 300);
        assert!(!config.enable_masking);
    }

    #[test]
    fn test_load_from_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("editlog.yaml");
        fs::write(&path, "includePatterns:\n  - \"*.rs\"\n").unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.include_patterns, vec!["*.rs".to_string()]);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_from_file(&path).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_LOAD_FAILED");
        assert!(err.context().unwrap().contains("broken.json"));
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("editlog.json");
        let config = LoggerConfig::default().with_history_size(9);

        save_to_file(&config, &path).unwrap();
        assert_eq!(load_from_file(&path).unwrap(), config);
    }
}
