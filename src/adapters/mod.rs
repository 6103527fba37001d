//! External system integrations for ado-batch.
//!
//! - [`devops`] - Azure DevOps work item tracking (live client and dry run)
//!
//! # Design Pattern
//!
//! The import logic talks to Azure DevOps only through the
//! [`devops::WorkItemService`] trait, so the live client, the dry-run service
//! and test doubles are interchangeable.
//!
//! ```rust,no_run
//! use ado_batch::adapters::devops::{DevOpsClient, WorkItemService};
//! use ado_batch::config::DevOpsConfig;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = DevOpsConfig::new("my-org", "my-project", "my-pat");
//! let service: Arc<dyn WorkItemService> = Arc::new(DevOpsClient::new(settings)?);
//! # Ok(())
//! # }
//! ```

pub mod devops;
