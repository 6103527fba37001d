//! Integration tests for the Azure DevOps client against a mock HTTP server

use ado_batch::adapters::devops::{
    fields, DevOpsClient, PatchOperation, WorkItemService, JSON_PATCH_CONTENT_TYPE,
};
use ado_batch::config::DevOpsConfig;
use ado_batch::domain::{DevOpsError, WorkItemId, WorkItemKind};
use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;
use test_case::test_case;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

const STORY_PATH: &str = "/my-org/my-project/_apis/wit/workitems/$User%20Story";
const TASK_PATH: &str = "/my-org/my-project/_apis/wit/workitems/$Task";

// base64(":test-pat")
const AUTH_HEADER: &str = "Basic OnRlc3QtcGF0";

fn client_for(server_url: &str) -> DevOpsClient {
    let mut settings = DevOpsConfig::new("my-org", "my-project", "test-pat");
    settings.service_url = server_url.to_string();
    DevOpsClient::new(settings).unwrap()
}

/// Server that accepts connections and never answers
async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });
    format!("http://{addr}")
}

fn document() -> Vec<PatchOperation> {
    vec![
        PatchOperation::add(fields::TITLE, "US1"),
        PatchOperation::add(fields::PRIORITY, 2),
    ]
}

fn api_version() -> Matcher {
    Matcher::UrlEncoded("api-version".into(), "7.0".into())
}

#[test_case(200 ; "ok")]
#[test_case(201 ; "created")]
#[tokio::test]
async fn test_create_sends_patch_document(status: usize) {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", STORY_PATH)
        .match_query(api_version())
        .match_header("authorization", AUTH_HEADER)
        .match_header("content-type", JSON_PATCH_CONTENT_TYPE)
        .match_body(Matcher::Json(json!([
            {"op": "add", "path": "/fields/System.Title", "value": "US1"},
            {"op": "add", "path": "/fields/Microsoft.VSTS.Common.Priority", "value": 2}
        ])))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 100, "rev": 1, "fields": {}}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let id = client
        .create_work_item(WorkItemKind::UserStory, &document(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(id, WorkItemId::new(100).unwrap());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_task_uses_task_endpoint() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", TASK_PATH)
        .match_query(api_version())
        .with_status(200)
        .with_body(r#"{"id": 201}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let id = client
        .create_work_item(WorkItemKind::Task, &document(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(id.get(), 201);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rejection_carries_status_and_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", STORY_PATH)
        .match_query(api_version())
        .with_status(401)
        .with_body(r#"{"message": "Access denied"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .create_work_item(WorkItemKind::UserStory, &document(), &CancellationToken::new())
        .await
        .unwrap_err();

    match &err {
        DevOpsError::Rejected { status, message } => {
            assert_eq!(status, "401 Unauthorized");
            assert_eq!(message.as_deref(), Some("Access denied"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("401 Unauthorized"));
    assert!(err.to_string().contains("Access denied"));
}

#[tokio::test]
async fn test_rejection_without_message_field() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", STORY_PATH)
        .match_query(api_version())
        .with_status(400)
        .with_body(r#"{"typeKey": "RuleValidationException"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .create_work_item(WorkItemKind::UserStory, &document(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DevOpsError::Rejected { ref status, message: None } if status == "400 Bad Request"
    ));
}

#[tokio::test]
async fn test_non_json_error_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", STORY_PATH)
        .match_query(api_version())
        .with_status(503)
        .with_body("<html>Service Unavailable</html>")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .create_work_item(WorkItemKind::UserStory, &document(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DevOpsError::UndecodableErrorBody { .. }));
    assert_eq!(err.status(), Some("503 Service Unavailable"));
}

#[test_case(r#"{"rev": 1}"# ; "missing id")]
#[test_case(r#"{"id": null}"# ; "null id")]
#[tokio::test]
async fn test_success_without_id(body: &str) {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", STORY_PATH)
        .match_query(api_version())
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .create_work_item(WorkItemKind::UserStory, &document(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DevOpsError::MissingId));
}

#[tokio::test]
async fn test_success_with_invalid_id() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", STORY_PATH)
        .match_query(api_version())
        .with_status(201)
        .with_body(r#"{"id": "abc"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .create_work_item(WorkItemKind::UserStory, &document(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DevOpsError::InvalidId(_)));
}

#[tokio::test]
async fn test_success_with_undecodable_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", STORY_PATH)
        .match_query(api_version())
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .create_work_item(WorkItemKind::UserStory, &document(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DevOpsError::Decode(_)));
}

#[tokio::test]
async fn test_connection_refused_is_send_error() {
    let client = client_for("http://127.0.0.1:1");
    let err = client
        .create_work_item(WorkItemKind::UserStory, &document(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DevOpsError::Send(_)));
}

#[tokio::test]
async fn test_cancelled_token_sends_nothing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client
        .create_work_item(WorkItemKind::UserStory, &document(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, DevOpsError::Cancelled));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unanswered_request_times_out() {
    let mut settings = DevOpsConfig::new("my-org", "my-project", "test-pat");
    settings.service_url = silent_server().await;
    settings.timeout_seconds = 1;
    let client = DevOpsClient::new(settings).unwrap();

    let err = client
        .create_work_item(WorkItemKind::UserStory, &document(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DevOpsError::Timeout(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_cancel_while_request_in_flight() {
    let client = client_for(&silent_server().await);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let err = tokio::time::timeout(
        Duration::from_secs(10),
        client.create_work_item(WorkItemKind::UserStory, &document(), &cancel),
    )
    .await
    .expect("cancellation did not interrupt the request")
    .unwrap_err();

    assert!(matches!(err, DevOpsError::Cancelled));
}

#[test]
fn test_incomplete_settings_rejected_before_any_request() {
    let settings = DevOpsConfig::new("my-org", "", "test-pat");
    let err = DevOpsClient::new(settings).err().unwrap();

    assert!(matches!(err, DevOpsError::Configuration(_)));
    assert!(err.to_string().contains("devops.project"));
}
