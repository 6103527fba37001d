//! Dry-run work item service
//!
//! Logs the patch document each create call would send and hands back synthetic
//! ids, so a backlog file can be checked end to end without touching Azure DevOps.

use super::models::PatchOperation;
use super::service::WorkItemService;
use crate::domain::{DevOpsError, WorkItemId, WorkItemKind};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::sync::CancellationToken;

/// Service that never leaves the process
#[derive(Debug)]
pub struct DryRunService {
    next_id: AtomicU64,
}

impl DryRunService {
    /// Create a dry-run service whose synthetic ids start at 1
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of work items that would have been created so far
    pub fn created(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst) - 1
    }
}

impl Default for DryRunService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkItemService for DryRunService {
    async fn create_work_item(
        &self,
        kind: WorkItemKind,
        document: &[PatchOperation],
        cancel: &CancellationToken,
    ) -> Result<WorkItemId, DevOpsError> {
        if cancel.is_cancelled() {
            return Err(DevOpsError::Cancelled);
        }

        let payload =
            serde_json::to_string(document).map_err(|e| DevOpsError::Serialize(e.to_string()))?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        tracing::info!(
            kind = %kind,
            synthetic_id = id,
            payload = %payload,
            "[DRY RUN] Would create work item"
        );

        WorkItemId::new(id).map_err(DevOpsError::InvalidId)
    }
}
