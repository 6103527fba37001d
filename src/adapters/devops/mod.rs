//! Azure DevOps adapter
//!
//! This module provides the integration with the Azure DevOps work item REST API:
//! the JSON Patch wire models, the [`WorkItemService`] seam, the live
//! [`DevOpsClient`] and the [`DryRunService`] used by `--dry-run`.

pub mod client;
pub mod dry_run;
pub mod models;
pub mod service;

pub use client::DevOpsClient;
pub use dry_run::DryRunService;
pub use models::{
    fields, PatchOp, PatchOperation, PatchValue, RelationAttributes, WorkItemRelation,
    HIERARCHY_REVERSE, JSON_PATCH_CONTENT_TYPE,
};
pub use service::WorkItemService;
