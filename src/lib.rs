// ado-batch - Bulk work item import for Azure DevOps
// Copyright (c) 2025 ado-batch Contributors
// Licensed under the MIT License

//! # ado-batch - Bulk work item import for Azure DevOps
//!
//! ado-batch reads a JSON backlog of user stories with nested tasks and creates
//! them as work items in an Azure DevOps project, linking every task to the
//! user story it belongs to.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Input loading, field mapping and import orchestration
//! - [`adapters`] - Azure DevOps client and dry-run service
//! - [`domain`] - Backlog records, work item ids and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ado_batch::adapters::devops::DevOpsClient;
//! use ado_batch::config::load_config;
//! use ado_batch::core::import::ImportOrchestrator;
//! use ado_batch::core::input::load_user_stories;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("ado-batch.toml")?;
//!     let stories = load_user_stories(&config.import.items_path)?;
//!
//!     let client = Arc::new(DevOpsClient::new(config.devops.clone())?);
//!     let summary = ImportOrchestrator::new(client)
//!         .run(&stories, &config.devops, &CancellationToken::new())
//!         .await?;
//!
//!     println!(
//!         "Created {} user stories and {} tasks",
//!         summary.user_stories_created, summary.tasks_created
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Isolation
//!
//! A failed create call is recorded against its own record and the run moves
//! on. When a user story fails, its tasks are skipped since there is nothing
//! to link them to.
//!
//! ## Error Handling
//!
//! Fatal problems use [`domain::ImportError`]; a single failed create call is a
//! [`domain::DevOpsError`] kept in the run summary:
//!
//! ```rust,no_run
//! use ado_batch::domain::ImportError;
//!
//! fn example() -> Result<(), ImportError> {
//!     let _config = ado_batch::config::load_config("ado-batch.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
