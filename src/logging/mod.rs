//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output
//! - JSON-formatted log files with rotation
//! - Configurable log levels
//!
//! # Example
//!
//! ```no_run
//! use ado_batch::logging::init_logging;
//! use ado_batch::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log a successfully created work item
///
/// # Example
///
/// ```no_run
/// use ado_batch::log_item_created;
/// use ado_batch::domain::{WorkItemId, WorkItemKind};
///
/// let id = WorkItemId::new(100).unwrap();
/// log_item_created!(WorkItemKind::UserStory, "US1", id);
///
/// let parent = WorkItemId::new(100).unwrap();
/// let child = WorkItemId::new(201).unwrap();
/// log_item_created!(WorkItemKind::Task, "T1", child, parent);
/// ```
#[macro_export]
macro_rules! log_item_created {
    ($kind:expr, $name:expr, $id:expr) => {
        tracing::info!(
            kind = %$kind,
            name = %$name,
            work_item_id = %$id,
            "Work item created successfully"
        );
    };
    ($kind:expr, $name:expr, $id:expr, $parent_id:expr) => {
        tracing::info!(
            kind = %$kind,
            name = %$name,
            work_item_id = %$id,
            parent_id = %$parent_id,
            "Work item created successfully"
        );
    };
}

/// Log a failed work item create call
///
/// # Example
///
/// ```no_run
/// use ado_batch::log_item_failed;
/// use ado_batch::domain::{DevOpsError, WorkItemKind};
///
/// let error = DevOpsError::MissingId;
/// log_item_failed!(WorkItemKind::UserStory, "US1", &error);
/// ```
#[macro_export]
macro_rules! log_item_failed {
    ($kind:expr, $name:expr, $error:expr) => {
        tracing::error!(
            kind = %$kind,
            name = %$name,
            error = %$error,
            "Failed to create work item"
        );
    };
    ($kind:expr, $name:expr, $error:expr, $parent_id:expr) => {
        tracing::error!(
            kind = %$kind,
            name = %$name,
            error = %$error,
            parent_id = %$parent_id,
            "Failed to create work item"
        );
    };
}
