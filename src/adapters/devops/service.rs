//! Work item service trait definition
//!
//! The importer only ever needs one remote capability: create a work item from a
//! patch document and learn its id. Keeping it behind a trait lets the dry-run
//! mode and tests stand in for the live Azure DevOps client.

use super::models::PatchOperation;
use crate::domain::{DevOpsError, WorkItemId, WorkItemKind};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Creates work items in a remote tracker
///
/// # Example
///
/// ```no_run
/// use ado_batch::adapters::devops::{DevOpsClient, WorkItemService, PatchOperation, fields};
/// use ado_batch::config::DevOpsConfig;
/// use ado_batch::domain::WorkItemKind;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = DevOpsClient::new(DevOpsConfig::new("my-org", "my-project", "pat"))?;
/// let document = vec![PatchOperation::add(fields::TITLE, "Login page")];
/// let id = client
///     .create_work_item(WorkItemKind::UserStory, &document, &CancellationToken::new())
///     .await?;
/// println!("Created work item {id}");
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait WorkItemService: Send + Sync {
    /// Create one work item and return the id the service assigned
    ///
    /// Each successful call creates a new item; calls are not idempotent.
    ///
    /// # Errors
    ///
    /// Returns a [`DevOpsError`] naming the step that failed. Cancelling `cancel`
    /// while the call is in flight yields [`DevOpsError::Cancelled`].
    async fn create_work_item(
        &self,
        kind: WorkItemKind,
        document: &[PatchOperation],
        cancel: &CancellationToken,
    ) -> Result<WorkItemId, DevOpsError>;
}
