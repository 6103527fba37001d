//! Azure DevOps REST client
//!
//! Creates work items through `POST {org}/{project}/_apis/wit/workitems/${type}`
//! using basic authentication with an empty username and the PAT as password.

use super::models::{CreatedWorkItem, ErrorBody, PatchOperation, JSON_PATCH_CONTENT_TYPE};
use super::service::WorkItemService;
use crate::config::DevOpsConfig;
use crate::domain::{DevOpsError, WorkItemId, WorkItemKind};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Live Azure DevOps work item client
///
/// The settings are checked when the client is built and again before every
/// call, so an incomplete configuration never produces a request.
pub struct DevOpsClient {
    /// HTTP client for making requests
    client: Client,

    /// Connection settings
    settings: DevOpsConfig,
}

impl DevOpsClient {
    /// Create a new client from explicit settings
    ///
    /// # Errors
    ///
    /// Returns [`DevOpsError::Configuration`] if organization, project or PAT is
    /// empty, and [`DevOpsError::BuildRequest`] if the HTTP client cannot be built.
    pub fn new(settings: DevOpsConfig) -> Result<Self, DevOpsError> {
        settings.ensure_complete()?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DevOpsError::BuildRequest(format!("HTTP client: {e}")))?;

        Ok(Self { client, settings })
    }

    /// Build the create endpoint for a work item kind
    ///
    /// ```
    /// use ado_batch::adapters::devops::DevOpsClient;
    /// use ado_batch::config::DevOpsConfig;
    /// use ado_batch::domain::WorkItemKind;
    ///
    /// let client = DevOpsClient::new(DevOpsConfig::new("org", "proj", "pat")).unwrap();
    /// let url = client.create_url(WorkItemKind::UserStory).unwrap();
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://dev.azure.com/org/proj/_apis/wit/workitems/$User%20Story?api-version=7.0"
    /// );
    /// ```
    pub fn create_url(&self, kind: WorkItemKind) -> Result<Url, DevOpsError> {
        let mut url = self.settings.organization_url()?;

        url.path_segments_mut()
            .map_err(|_| {
                DevOpsError::BuildRequest(format!(
                    "service URL '{}' cannot carry a path",
                    self.settings.service_url
                ))
            })?
            .extend([
                self.settings.project.as_str(),
                "_apis",
                "wit",
                "workitems",
                kind.path_segment().as_str(),
            ]);

        url.query_pairs_mut()
            .append_pair("api-version", &self.settings.api_version);

        Ok(url)
    }

    /// Send the request and interpret the response
    async fn send(
        &self,
        kind: WorkItemKind,
        document: &[PatchOperation],
    ) -> Result<WorkItemId, DevOpsError> {
        let url = self.create_url(kind)?;
        let body =
            serde_json::to_vec(document).map_err(|e| DevOpsError::Serialize(e.to_string()))?;

        tracing::debug!(
            url = %url,
            kind = %kind,
            operations = document.len(),
            "Sending work item create request"
        );

        let pat: &str = self.settings.pat.expose_secret().as_ref();
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_PATCH_CONTENT_TYPE)
            .basic_auth("", Some(pat))
            .body(body)
            .build()
            .map_err(|e| DevOpsError::BuildRequest(e.to_string()))?;

        let response = self.client.execute(request).await.map_err(|e| {
            if e.is_timeout() {
                DevOpsError::Timeout(e.to_string())
            } else {
                DevOpsError::Send(e.to_string())
            }
        })?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                let created: CreatedWorkItem = response
                    .json()
                    .await
                    .map_err(|e| DevOpsError::Decode(e.to_string()))?;
                created.work_item_id()
            }
            _ => Err(rejection(response).await),
        }
    }
}

/// Turn a non-success response into an error carrying the service's message
async fn rejection(response: Response) -> DevOpsError {
    let status = status_line(response.status());

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            return DevOpsError::UndecodableErrorBody {
                status,
                reason: e.to_string(),
            }
        }
    };

    match serde_json::from_slice::<ErrorBody>(&bytes) {
        Ok(body) => DevOpsError::Rejected {
            status,
            message: body.message(),
        },
        Err(e) => DevOpsError::UndecodableErrorBody {
            status,
            reason: e.to_string(),
        },
    }
}

/// Status line in the `401 Unauthorized` form
fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

#[async_trait]
impl WorkItemService for DevOpsClient {
    async fn create_work_item(
        &self,
        kind: WorkItemKind,
        document: &[PatchOperation],
        cancel: &CancellationToken,
    ) -> Result<WorkItemId, DevOpsError> {
        self.settings.ensure_complete()?;

        if cancel.is_cancelled() {
            return Err(DevOpsError::Cancelled);
        }

        tokio::select! {
            result = self.send(kind, document) => result,
            _ = cancel.cancelled() => Err(DevOpsError::Cancelled),
        }
    }
}
