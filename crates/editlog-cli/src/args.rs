//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use editlog_core::diff::DEFAULT_CONTEXT_LINES;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "editlog")]
#[command(about = "Turn editing sessions into masked, diffed dataset records")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (JSON, TOML or YAML)
    #[arg(long, short, global = true, env = "EDITLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a JSON-lines session recording through the edit logger
    Replay {
        /// Recording to replay
        file: PathBuf,

        /// Workspace root (repeatable; overrides workspaceRoots)
        #[arg(long = "workspace", short = 'w')]
        workspaces: Vec<PathBuf>,
    },

    /// Print the unified hunks between two files
    Diff {
        old: PathBuf,
        new: PathBuf,

        /// Unchanged lines kept around each change
        #[arg(long, default_value_t = DEFAULT_CONTEXT_LINES)]
        context: usize,
    },

    /// Print a file with sensitive text redacted
    Mask { file: PathBuf },

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show dataset location, export count and effective settings
    Status,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigAction {
    /// Write a configuration file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display the effective configuration
    Show,

    /// Check the configuration for errors
    Validate,
}
