//! Core import logic for ado-batch.
//!
//! # Modules
//!
//! - [`input`] - Reading the backlog items file
//! - [`mapping`] - Field mapping from backlog records to patch documents
//! - [`iteration`] - Optional iteration lookup for stories and tasks
//! - [`import`] - Orchestration of the create calls and the run summary
//!
//! # Import Workflow
//!
//! 1. **Load**: Decode the items file into user stories with nested tasks
//! 2. **Create story**: Send one create call per user story
//! 3. **Create tasks**: On success, create each task linked to the new story id
//! 4. **Report**: Fold every outcome into an [`import::ImportSummary`]
//!
//! # Example
//!
//! ```rust,no_run
//! use ado_batch::adapters::devops::DevOpsClient;
//! use ado_batch::config::load_config;
//! use ado_batch::core::import::ImportOrchestrator;
//! use ado_batch::core::input::load_user_stories;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ado-batch.toml")?;
//! let stories = load_user_stories(&config.import.items_path)?;
//!
//! let client = Arc::new(DevOpsClient::new(config.devops.clone())?);
//! let orchestrator = ImportOrchestrator::new(client);
//!
//! let summary = orchestrator
//!     .run(&stories, &config.devops, &CancellationToken::new())
//!     .await?;
//!
//! println!("Created {} user stories", summary.user_stories_created);
//! # Ok(())
//! # }
//! ```

pub mod import;
pub mod input;
pub mod iteration;
pub mod mapping;
