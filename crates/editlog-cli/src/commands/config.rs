//! Configuration management commands

use crate::console::CliConsole;
use anyhow::{Context, bail};
use editlog_core::MaskingEngine;
use editlog_core::config::{LoggerConfig, save_to_file};
use std::path::Path;

/// Write a configuration file with default settings
pub async fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    let console = CliConsole::new();

    if path.exists() && !force {
        console.info("Use --force to overwrite");
        bail!("Configuration file already exists: {}", path.display());
    }

    save_to_file(&LoggerConfig::default(), path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    console.success(&format!("Created configuration file: {}", path.display()));
    Ok(())
}

/// Print the effective configuration as JSON
pub async fn show(path: &Path, config: &LoggerConfig) -> anyhow::Result<()> {
    let console = CliConsole::new();

    if path.exists() {
        console.info(&format!("Loaded configuration from {}", path.display()));
    } else {
        console.warn(&format!("Configuration file not found: {}", path.display()));
        console.info("Using default configuration");
    }

    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

/// Validate the effective configuration
pub async fn validate(path: &Path, config: &LoggerConfig) -> anyhow::Result<()> {
    let console = CliConsole::new();

    if !path.exists() {
        bail!("Configuration file not found: {}", path.display());
    }

    for pattern in &config.mask_patterns {
        if let Err(e) = MaskingEngine::check_pattern(pattern) {
            console.warn(&format!("Mask pattern will be skipped: {e}"));
        }
    }

    match config.validate() {
        Ok(()) => {
            console.success("Configuration is valid");
            console.field("History size", config.history_size);
            console.field("Debounce (ms)", config.debounce_ms);
            console.field("Mask patterns", config.mask_patterns.len());
            Ok(())
        }
        Err(e) => {
            console.error(&format!("Configuration validation failed: {e}"));
            Err(e.into())
        }
    }
}
