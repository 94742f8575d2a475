//! `editlog mask`

use crate::console::CliConsole;
use anyhow::Context;
use editlog_core::{LoggerConfig, MaskingEngine};
use std::path::Path;

pub async fn execute(file: &Path, config: &LoggerConfig) -> anyhow::Result<()> {
    let console = CliConsole::new();
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let engine = MaskingEngine::from_config(config);
    if !engine.is_enabled() {
        console.warn("Masking is disabled in the configuration; printing the file unchanged");
    }
    for pattern in engine.skipped_patterns() {
        console.warn(&format!("Skipped invalid mask pattern: {pattern}"));
    }

    print!("{}", engine.mask(&text));
    Ok(())
}
