//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the ado-batch configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Service URL: {}", config.devops.service_url);
        println!("  Organization: {}", config.devops.organization);
        println!("  Project: {}", config.devops.project);
        println!("  PAT: ***");
        println!("  API Version: {}", config.devops.api_version);
        println!("  Timeout: {}s", config.devops.timeout_seconds);
        println!("  Items File: {}", config.import.items_path);
        println!("  Concurrency: {}", config.import.max_concurrency);
        println!("  Dry Run: {}", config.import.dry_run);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();

        Ok(0)
    }
}
