//! Configuration resolution and command routing

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands;
use anyhow::Context;
use editlog_core::config::{DEFAULT_CONFIG_FILE, LoggerConfig, apply_env_overrides, load_from_file};
use std::path::PathBuf;

/// Where the configuration is read from (and where `config init` writes)
///
/// An explicit `--config` wins. Otherwise `./editlog.json` is used when it
/// exists, then the per-user config directory, then `./editlog.json` again
/// (which yields defaults).
pub fn config_path(cli: &Cli) -> PathBuf {
    if let Some(path) = &cli.config {
        return path.clone();
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }

    dirs::config_dir()
        .map(|dir| dir.join("editlog").join(DEFAULT_CONFIG_FILE))
        .filter(|path| path.exists())
        .unwrap_or(local)
}

/// Load the file configuration and apply `EDITLOG_*` overrides
pub fn load_config(cli: &Cli) -> anyhow::Result<LoggerConfig> {
    let path = config_path(cli);
    let mut config = load_from_file(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    apply_env_overrides(&mut config).context("Invalid environment override")?;
    Ok(config)
}

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli, config: LoggerConfig) -> anyhow::Result<()> {
    let path = config_path(&cli);

    match cli.command {
        Commands::Replay { file, workspaces } => {
            commands::replay::execute(&file, workspaces, config).await
        }
        Commands::Diff { old, new, context } => commands::diff::execute(&old, &new, context).await,
        Commands::Mask { file } => commands::mask::execute(&file, &config).await,
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => commands::config::init(&path, force).await,
            ConfigAction::Show => commands::config::show(&path, &config).await,
            ConfigAction::Validate => commands::config::validate(&path, &config).await,
        },
        Commands::Status => commands::status::execute(&config).await,
    }
}
