//! Domain models and types for ado-batch.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Backlog records** ([`UserStory`], [`Task`]) as read from the input file
//! - **Work item identity** ([`WorkItemId`], [`WorkItemKind`])
//! - **Error types** ([`ImportError`], [`DevOpsError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Fatal problems are reported as [`ImportError`]; a failed create call for a
//! single record is a [`DevOpsError`] and stays inside that record's outcome:
//!
//! ```rust
//! use ado_batch::domain::{DevOpsError, ImportError, Result};
//!
//! fn example() -> Result<()> {
//!     let err = DevOpsError::MissingId;
//!     Err(ImportError::from(err))
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod records;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{DevOpsError, ImportError};
pub use ids::{WorkItemId, WorkItemKind};
pub use records::{Task, UserStory};
pub use result::Result;
