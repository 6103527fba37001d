//! Domain error types
//!
//! This module defines the error hierarchy for ado-batch. Errors are split into
//! two layers: [`ImportError`] for whole-run failures that surface at the process
//! boundary, and [`DevOpsError`] for failures of a single remote create call.
//! Neither exposes third-party HTTP client types.

use thiserror::Error;

/// Main ado-batch error type
///
/// Anything returned as an `ImportError` from the import pipeline is fatal for the
/// run. Per-record failures are carried as [`DevOpsError`] inside import outcomes
/// and never abort the batch.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input file could not be read or parsed
    #[error("Input error: {0}")]
    Input(String),

    /// Azure DevOps errors that escaped the per-record boundary
    #[error("Azure DevOps error: {0}")]
    DevOps(#[from] DevOpsError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised while creating a single work item in Azure DevOps
///
/// Each variant names the step that failed, so a caller can tell a request that
/// never left the process apart from one the service rejected.
#[derive(Debug, Error)]
pub enum DevOpsError {
    /// Organization, project or PAT missing; no request was attempted
    #[error("Missing Azure DevOps configuration: {0}")]
    Configuration(String),

    /// The request could not be built (bad URL, invalid header)
    #[error("Failed to build request: {0}")]
    BuildRequest(String),

    /// The patch document could not be serialized
    #[error("Failed to serialize patch document: {0}")]
    Serialize(String),

    /// Transport failure while sending the request
    #[error("Failed to send request: {0}")]
    Send(String),

    /// The request exceeded the configured timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// The service answered with a non-success status
    #[error("Work item creation rejected, status: {status}{}", message_suffix(.message))]
    Rejected {
        status: String,
        message: Option<String>,
    },

    /// The service answered with a non-success status and a body that is not JSON
    #[error("Work item creation rejected, status: {status}; error body could not be decoded: {reason}")]
    UndecodableErrorBody { status: String, reason: String },

    /// A success response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A success response carried no `id` field
    #[error("Response is missing the work item id")]
    MissingId,

    /// A success response carried an `id` that is not a positive integer
    #[error("Response carries an invalid work item id: {0}")]
    InvalidId(String),

    /// The call was cancelled before it completed
    #[error("Request cancelled")]
    Cancelled,
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(" with message: {m}"),
        None => String::new(),
    }
}

impl DevOpsError {
    /// HTTP status line of a rejected request, if the service answered at all
    pub fn status(&self) -> Option<&str> {
        match self {
            DevOpsError::Rejected { status, .. }
            | DevOpsError::UndecodableErrorBody { status, .. } => Some(status),
            _ => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ImportError {
    fn from(err: toml::de::Error) -> Self {
        ImportError::Configuration(format!("TOML parse error: {err}"))
    }
}
