//! Backlog records read from the input file
//!
//! A [`UserStory`] owns its [`Task`]s; tasks have no identity outside their
//! story. Both are plain data: they are decoded once at startup and never
//! mutated during an import run.

use serde::{Deserialize, Serialize};

/// A user story with its child tasks
///
/// Field names follow the input JSON format, including the `iteraction` spelling
/// used by existing backlog files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStory {
    /// Title of the story
    pub name: String,

    /// Free-form type label from the input (informational only)
    #[serde(rename = "type")]
    pub item_type: String,

    /// Description (HTML or plain text)
    pub description: String,

    /// Owner identity (usually an email address)
    pub owner: String,

    /// Workflow state, e.g. "New" or "Active"
    pub state: String,

    /// Priority, 1 (highest) to 4
    pub priority: i32,

    /// Area path; also applied to every child task
    pub area: String,

    /// Iteration path as written by the author of the backlog
    pub path: String,

    /// Child tasks, created in order after the story
    pub tasks: Vec<Task>,

    /// Explicit iteration reference, resolved through an iteration resolver
    #[serde(rename = "iteraction")]
    pub iteration: Option<String>,

    /// Team owning the story, used to look up its next iteration
    pub team: String,
}

impl UserStory {
    /// Creates a story with only a name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the area path
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = area.into();
        self
    }

    /// Appends a child task
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }
}

/// A task belonging to exactly one user story
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    /// Title of the task
    pub name: String,

    /// Free-form type label from the input (informational only)
    #[serde(rename = "type")]
    pub item_type: String,

    /// Description (HTML or plain text)
    pub description: String,

    /// Owner identity
    pub owner: String,

    /// Workflow state
    pub state: String,

    /// Priority, 1 (highest) to 4
    pub priority: i32,

    /// Estimate in hours; carried by the input format but not sent
    pub estimate: i32,
}

impl Task {
    /// Creates a task with only a name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_story() {
        let json = r#"{
            "name": "US1",
            "type": "User Story",
            "description": "As a user...",
            "owner": "dev@example.com",
            "state": "New",
            "priority": 2,
            "area": "Project\\TeamA",
            "path": "Project\\Sprint 1",
            "iteraction": "Sprint 1",
            "team": "TeamA",
            "tasks": [
                {"name": "T1", "type": "Task", "description": "d", "owner": "o", "state": "To Do", "priority": 1, "estimate": 4}
            ]
        }"#;

        let story: UserStory = serde_json::from_str(json).unwrap();
        assert_eq!(story.name, "US1");
        assert_eq!(story.item_type, "User Story");
        assert_eq!(story.priority, 2);
        assert_eq!(story.area, "Project\\TeamA");
        assert_eq!(story.iteration.as_deref(), Some("Sprint 1"));
        assert_eq!(story.tasks.len(), 1);
        assert_eq!(story.tasks[0].estimate, 4);
    }

    #[test]
    fn test_missing_fields_default() {
        let story: UserStory = serde_json::from_str(r#"{"name": "US1", "tasks": [{"name": "T1"}]}"#)
            .unwrap();
        assert_eq!(story.area, "");
        assert_eq!(story.priority, 0);
        assert!(story.iteration.is_none());
        assert_eq!(story.tasks[0], Task::new("T1"));
    }

    #[test]
    fn test_null_iteration() {
        let story: UserStory =
            serde_json::from_str(r#"{"name": "US1", "iteraction": null}"#).unwrap();
        assert!(story.iteration.is_none());
    }

    #[test]
    fn test_builder_helpers() {
        let story = UserStory::new("US1")
            .with_area("TeamA")
            .with_task(Task::new("T1"))
            .with_task(Task::new("T2"));
        assert_eq!(story.area, "TeamA");
        assert_eq!(story.tasks.len(), 2);
        assert_eq!(story.tasks[1].name, "T2");
    }
}
