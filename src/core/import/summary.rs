//! Import outcomes and summary
//!
//! Each user story produces one [`StoryOutcome`] holding the fate of the story
//! and of every task under it. The [`ImportSummary`] folds those outcomes into
//! counts; it is built by a single owner, so no counter is ever shared.

use crate::domain::{DevOpsError, WorkItemId};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// What happened to one work item
#[derive(Debug)]
pub enum ItemStatus {
    /// Created remotely with this id
    Created(WorkItemId),
    /// The create call failed
    Failed(DevOpsError),
    /// The create call was sent but cancelled before it answered; the item may
    /// exist remotely
    Cancelled,
    /// Never attempted (parent failed, or the run was cancelled first)
    Skipped,
}

impl ItemStatus {
    /// Id of the created work item, if any
    pub fn id(&self) -> Option<WorkItemId> {
        match self {
            ItemStatus::Created(id) => Some(*id),
            _ => None,
        }
    }

    /// Error of a failed create call, if any
    pub fn error(&self) -> Option<&DevOpsError> {
        match self {
            ItemStatus::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, ItemStatus::Created(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ItemStatus::Failed(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ItemStatus::Cancelled)
    }
}

/// Outcome of one task
#[derive(Debug)]
pub struct TaskOutcome {
    pub name: String,
    pub status: ItemStatus,
}

/// Outcome of one user story and its tasks
#[derive(Debug)]
pub struct StoryOutcome {
    pub name: String,
    pub status: ItemStatus,
    pub tasks: Vec<TaskOutcome>,
}

impl StoryOutcome {
    /// Story created; `tasks` holds one outcome per input task
    pub fn created(name: impl Into<String>, id: WorkItemId, tasks: Vec<TaskOutcome>) -> Self {
        Self {
            name: name.into(),
            status: ItemStatus::Created(id),
            tasks,
        }
    }

    /// Story failed; its tasks are recorded as skipped
    pub fn failed<'a>(
        name: impl Into<String>,
        error: DevOpsError,
        task_names: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            name: name.into(),
            status: ItemStatus::Failed(error),
            tasks: skipped_tasks(task_names),
        }
    }

    /// Story create call cancelled in flight; its tasks are recorded as skipped
    pub fn cancelled<'a>(
        name: impl Into<String>,
        task_names: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            name: name.into(),
            status: ItemStatus::Cancelled,
            tasks: skipped_tasks(task_names),
        }
    }

    /// Story never attempted; its tasks are recorded as skipped
    pub fn skipped<'a>(
        name: impl Into<String>,
        task_names: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            name: name.into(),
            status: ItemStatus::Skipped,
            tasks: skipped_tasks(task_names),
        }
    }

    /// Number of failed tasks under this story
    pub fn failed_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| t.status.is_failed()).count()
    }
}

fn skipped_tasks<'a>(task_names: impl IntoIterator<Item = &'a str>) -> Vec<TaskOutcome> {
    task_names
        .into_iter()
        .map(|name| TaskOutcome {
            name: name.to_string(),
            status: ItemStatus::Skipped,
        })
        .collect()
}

/// Summary of an import run
#[derive(Debug)]
pub struct ImportSummary {
    /// User stories in the input
    pub total_user_stories: usize,

    /// User stories created
    pub user_stories_created: usize,

    /// User stories whose create call failed
    pub user_stories_failed: usize,

    /// User stories whose create call was cancelled in flight
    pub user_stories_cancelled: usize,

    /// User stories not attempted because the run was cancelled
    pub user_stories_skipped: usize,

    /// Tasks in the input
    pub total_tasks: usize,

    /// Tasks created
    pub tasks_created: usize,

    /// Tasks whose create call failed
    pub tasks_failed: usize,

    /// Tasks whose create call was cancelled in flight
    pub tasks_cancelled: usize,

    /// Tasks not attempted (failed parent or cancellation)
    pub tasks_skipped: usize,

    /// Whether the run was cancelled before it finished
    pub interrupted: bool,

    /// Whether the run used the dry-run service
    pub dry_run: bool,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Duration of the run
    pub duration: Duration,

    /// Per-story outcomes, in input order
    pub outcomes: Vec<StoryOutcome>,
}

impl ImportSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self {
            total_user_stories: 0,
            user_stories_created: 0,
            user_stories_failed: 0,
            user_stories_cancelled: 0,
            user_stories_skipped: 0,
            total_tasks: 0,
            tasks_created: 0,
            tasks_failed: 0,
            tasks_cancelled: 0,
            tasks_skipped: 0,
            interrupted: false,
            dry_run: false,
            started_at: Utc::now(),
            duration: Duration::from_secs(0),
            outcomes: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Fold one story outcome into the counts
    pub fn record(&mut self, outcome: StoryOutcome) {
        self.total_user_stories += 1;
        match outcome.status {
            ItemStatus::Created(_) => self.user_stories_created += 1,
            ItemStatus::Failed(_) => self.user_stories_failed += 1,
            ItemStatus::Cancelled => self.user_stories_cancelled += 1,
            ItemStatus::Skipped => self.user_stories_skipped += 1,
        }

        for task in &outcome.tasks {
            self.total_tasks += 1;
            match task.status {
                ItemStatus::Created(_) => self.tasks_created += 1,
                ItemStatus::Failed(_) => self.tasks_failed += 1,
                ItemStatus::Cancelled => self.tasks_cancelled += 1,
                ItemStatus::Skipped => self.tasks_skipped += 1,
            }
        }

        self.outcomes.push(outcome);
    }

    /// User stories whose create call was issued
    pub fn user_stories_attempted(&self) -> usize {
        self.user_stories_created + self.user_stories_failed + self.user_stories_cancelled
    }

    /// Tasks whose create call was issued
    pub fn tasks_attempted(&self) -> usize {
        self.tasks_created + self.tasks_failed + self.tasks_cancelled
    }

    /// Check if everything in the input was created
    pub fn is_successful(&self) -> bool {
        !self.interrupted
            && self.user_stories_failed == 0
            && self.tasks_failed == 0
            && self.user_stories_cancelled == 0
            && self.tasks_cancelled == 0
            && self.tasks_skipped == 0
            && self.user_stories_skipped == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_user_stories = self.total_user_stories,
            user_stories_created = self.user_stories_created,
            user_stories_failed = self.user_stories_failed,
            user_stories_cancelled = self.user_stories_cancelled,
            total_tasks = self.total_tasks,
            tasks_created = self.tasks_created,
            tasks_failed = self.tasks_failed,
            tasks_cancelled = self.tasks_cancelled,
            tasks_skipped = self.tasks_skipped,
            interrupted = self.interrupted,
            dry_run = self.dry_run,
            started_at = %self.started_at.to_rfc3339(),
            duration_secs = self.duration.as_secs_f64(),
            "Finished import. Processed {} user stories: created {} user stories and {} tasks",
            self.outcomes.len(),
            self.user_stories_created,
            self.tasks_created
        );

        if self.user_stories_failed > 0 || self.tasks_failed > 0 {
            tracing::warn!(
                user_stories_failed = self.user_stories_failed,
                tasks_failed = self.tasks_failed,
                "Import completed with errors"
            );
        }
    }
}

impl Default for ImportSummary {
    fn default() -> Self {
        Self::new()
    }
}
