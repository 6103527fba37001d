//! Work item identifiers and kinds
//!
//! [`WorkItemId`] wraps the integer Azure DevOps assigns when a work item is
//! created. It only exists after a successful create call, which is why child
//! tasks are linked to their user story at runtime rather than through a local key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier assigned by Azure DevOps to a created work item
///
/// # Examples
///
/// ```
/// use ado_batch::domain::ids::WorkItemId;
///
/// let id = WorkItemId::new(100).unwrap();
/// assert_eq!(id.get(), 100);
/// assert_eq!(id.to_string(), "100");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkItemId(u64);

impl WorkItemId {
    /// Creates a new WorkItemId
    ///
    /// Azure DevOps ids start at 1, so zero is rejected.
    pub fn new(id: u64) -> Result<Self, String> {
        if id == 0 {
            return Err("Work item id must be a positive integer".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the raw numeric id
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WorkItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("Invalid work item id '{s}': {e}"))?;
        Self::new(id)
    }
}

/// Kind of work item created by the importer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkItemKind {
    /// Top-level backlog item
    UserStory,
    /// Child of a user story
    Task,
}

impl WorkItemKind {
    /// Work item type name as Azure DevOps spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkItemKind::UserStory => "User Story",
            WorkItemKind::Task => "Task",
        }
    }

    /// Path segment used by the create endpoint (`$User Story`, `$Task`)
    ///
    /// Percent-encoding of the space is left to the URL builder.
    pub fn path_segment(&self) -> String {
        format!("${}", self.as_str())
    }
}

impl fmt::Display for WorkItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
