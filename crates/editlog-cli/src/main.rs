//! Editlog CLI application
//!
//! Replays recorded editing sessions through the edit logger and exposes the
//! engine's building blocks (diff, masking, configuration) on the command
//! line.
//!
//! ```bash
//! editlog config init                 # write editlog.json with defaults
//! editlog replay session.jsonl        # turn a recording into dataset files
//! editlog diff old.rs new.rs          # print unified hunks
//! editlog mask src/secrets.ts         # print a file with secrets redacted
//! editlog status                      # dataset location and export count
//! ```

mod args;
mod commands;
mod console;
mod router;
mod session;

use clap::Parser;
use editlog_core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

pub use args::{Cli, Commands, ConfigAction};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = router::load_config(&cli)?;

    init_tracing(&config.logging, cli.verbose);

    router::route(cli, config).await
}

/// Install the global subscriber; `RUST_LOG` wins unless `--verbose` is set
fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.is_json() {
        builder.json().init();
    } else {
        builder.init();
    }
}
