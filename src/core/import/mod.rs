//! Batch import of user stories and their tasks
//!
//! - [`orchestrator`] - drives the create calls in parent-then-children order
//! - [`summary`] - per-record outcomes and run totals

pub mod orchestrator;
pub mod summary;

pub use orchestrator::{ImportOrchestrator, MAX_CONCURRENCY};
pub use summary::{ImportSummary, ItemStatus, StoryOutcome, TaskOutcome};
