//! Configuration for the edit logger
//!
//! The engine only ever reads a [`LoggerConfig`]; where it comes from (a
//! file, the environment, an editor's settings store) is up to the caller.

mod env_loader;
mod file_loader;
mod logging_config;
mod model;
mod validation;

pub use env_loader::{apply_env_overrides, apply_env_overrides_from};
pub use file_loader::{load_from_file, save_to_file};
pub use logging_config::LoggingConfig;
pub use model::{LoggerConfig, defaults};
pub use validation::validate_number;

/// Default configuration file name used by the CLI
pub const DEFAULT_CONFIG_FILE: &str = "editlog.json";
