//! `editlog status`

use crate::console::CliConsole;
use editlog_core::LoggerConfig;
use editlog_core::export::workspace_folder_name;
use std::path::Path;

pub async fn execute(config: &LoggerConfig) -> anyhow::Result<()> {
    let console = CliConsole::new();
    let root = &config.dataset_root;

    console.print_header("Editlog Status");
    console.field("Dataset root", root.display());
    console.field(
        "Workspace folder",
        workspace_folder_name(&config.workspace_roots),
    );

    let exported = if root.exists() {
        count_exports(root)?
    } else {
        0
    };
    console.field("Exported events", exported);
    console.field("History size", config.history_size);
    console.field("Debounce (ms)", config.debounce_ms);
    console.field(
        "Masking",
        if config.enable_masking {
            format!("on ({} patterns)", config.mask_patterns.len())
        } else {
            "off".to_string()
        },
    );
    console.field("Context files", config.context_files.join(", "));
    Ok(())
}

/// Number of `.json` files anywhere under `dir`
fn count_exports(dir: &Path) -> std::io::Result<usize> {
    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            count += count_exports(&path)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            count += 1;
        }
    }
    Ok(count)
}
