//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for ermask using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// ermask - reversible PII masking for entity-resolution JSON
#[derive(Parser, Debug)]
#[command(name = "ermask")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, env = "ERMASK_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ERMASK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mask PII in JSON documents
    Mask(commands::mask::MaskArgs),

    /// Restore original values in text that mentions tokens
    Unmask(commands::unmask::UnmaskArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Whether the command needs a loaded configuration before it runs
    pub fn needs_config(&self) -> bool {
        matches!(self, Commands::Mask(_) | Commands::Unmask(_))
    }
}
