//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "ado-batch.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing ado-batch configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your organization and project", self.output);
                println!("  2. Create a .env file with ADO_BATCH_DEVOPS_PAT=<your PAT>");
                println!("  3. Validate configuration: ado-batch validate-config");
                println!("  4. Preview the import: ado-batch import --dry-run");
                println!("  5. Run the import: ado-batch import");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn generate_config() -> String {
        r#"# ado-batch Configuration File
# Bulk import of user stories and tasks into Azure DevOps

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[devops]
# Azure DevOps organization and project
organization = "my-org"
project = "my-project"

# Personal access token with work item write scope (use environment variable)
pat = "${ADO_BATCH_DEVOPS_PAT}"

# service_url = "https://dev.azure.com"
# api_version = "7.0"
# timeout_seconds = 30

[import]
# JSON file with the user stories and their tasks
items_path = "data/items.json"

# User stories processed at the same time (1-16)
max_concurrency = 1

# Log the patch documents without creating anything
dry_run = false

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "./logs"

# daily, hourly or never
local_rotation = "daily"
"#
        .to_string()
    }
}
