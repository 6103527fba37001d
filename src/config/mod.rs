//! Configuration management for ado-batch.
//!
//! ado-batch reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ADO_BATCH_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation before anything touches the network
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [devops]
//! organization = "my-org"
//! project = "my-project"
//! pat = "${ADO_BATCH_DEVOPS_PAT}"
//!
//! [import]
//! items_path = "data/items.json"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ado_batch::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ado-batch.toml")?;
//! println!("Importing into {}/{}", config.devops.organization, config.devops.project);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{ApplicationConfig, DevOpsConfig, ImportConfig, ImporterConfig, LoggingConfig};
pub use secret::{secret_string, SecretString, SecretValue};
