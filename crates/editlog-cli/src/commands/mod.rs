//! CLI commands

pub mod config;
pub mod diff;
pub mod mask;
pub mod replay;
pub mod status;
