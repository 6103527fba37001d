//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for ado-batch using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// ado-batch - bulk import of user stories and tasks into Azure DevOps
#[derive(Parser, Debug)]
#[command(name = "ado-batch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ado-batch.toml", env = "ADO_BATCH_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ADO_BATCH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the user stories and tasks from the items file
    Import(commands::import::ImportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
