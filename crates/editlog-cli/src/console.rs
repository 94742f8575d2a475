//! CLI console utilities

use colored::*;

/// Formatted output for commands
///
/// Results go to stdout; diagnostics go to stderr so piped output stays clean.
pub struct CliConsole;

impl CliConsole {
    pub const fn new() -> Self {
        Self
    }

    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    }

    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green().bold(), message.green());
    }

    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.len()).dimmed());
    }

    /// Print a `label: value` line
    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        println!("{:<18} {}", format!("{label}:").dimmed(), value);
    }
}
