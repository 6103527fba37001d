//! Import orchestrator - drives the create calls for a batch of user stories
//!
//! Each story is created first; only when that succeeds are its tasks created,
//! one after another, each linked to the story's new id. A failure is confined
//! to the record it belongs to: a failed story skips its own tasks, a failed
//! task affects nothing else, and the batch always moves on to the next story.

use crate::adapters::devops::WorkItemService;
use crate::config::DevOpsConfig;
use crate::core::import::summary::{ImportSummary, ItemStatus, StoryOutcome, TaskOutcome};
use crate::core::iteration::{resolve_iteration, IterationResolver, NoIterationResolver};
use crate::core::mapping::{task_document, user_story_document, CreatedParent};
use crate::domain::{DevOpsError, ImportError, Result, UserStory, WorkItemKind};
use crate::{log_item_created, log_item_failed};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Upper bound on stories processed at the same time
pub const MAX_CONCURRENCY: usize = 16;

/// Import orchestrator
pub struct ImportOrchestrator {
    service: Arc<dyn WorkItemService>,
    iterations: Arc<dyn IterationResolver>,
    max_concurrency: usize,
}

impl ImportOrchestrator {
    /// Create an orchestrator that processes one story at a time and sends no
    /// iteration paths
    pub fn new(service: Arc<dyn WorkItemService>) -> Self {
        Self {
            service,
            iterations: Arc::new(NoIterationResolver),
            max_concurrency: 1,
        }
    }

    /// Use an iteration lookup for stories and their tasks
    pub fn with_iteration_resolver(mut self, resolver: Arc<dyn IterationResolver>) -> Self {
        self.iterations = resolver;
        self
    }

    /// Process up to `n` stories at the same time (clamped to 1..=16)
    ///
    /// Tasks of a single story are always created in order.
    pub fn with_max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = n.clamp(1, MAX_CONCURRENCY);
        self
    }

    /// Import a batch of user stories
    ///
    /// Per-record failures are recorded in the returned summary. The only error
    /// returned is [`ImportError::Configuration`] for incomplete or unusable
    /// connection settings, in which case no create call is made.
    pub async fn run(
        &self,
        stories: &[UserStory],
        settings: &DevOpsConfig,
        cancel: &CancellationToken,
    ) -> Result<ImportSummary> {
        settings
            .ensure_complete()
            .map_err(|e| ImportError::Configuration(e.to_string()))?;

        let organization_url = settings
            .organization_url()
            .map_err(|e| ImportError::Configuration(e.to_string()))?;

        let start_time = Instant::now();
        let mut summary = ImportSummary::new();

        tracing::info!(
            user_stories = stories.len(),
            max_concurrency = self.max_concurrency,
            organization = %settings.organization,
            project = %settings.project,
            "Starting import"
        );

        let mut outcomes = stream::iter(stories)
            .map(|story| self.import_story(story, &organization_url, cancel))
            .buffered(self.max_concurrency);

        while let Some(outcome) = outcomes.next().await {
            summary.record(outcome);
        }

        summary.interrupted = cancel.is_cancelled();
        if summary.interrupted {
            tracing::warn!(
                user_stories_cancelled = summary.user_stories_cancelled,
                tasks_cancelled = summary.tasks_cancelled,
                user_stories_skipped = summary.user_stories_skipped,
                tasks_skipped = summary.tasks_skipped,
                "Import interrupted before all records were processed"
            );
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }

    /// Create one story and then its tasks
    async fn import_story(
        &self,
        story: &UserStory,
        organization_url: &Url,
        cancel: &CancellationToken,
    ) -> StoryOutcome {
        let task_names = story.tasks.iter().map(|t| t.name.as_str());

        if cancel.is_cancelled() {
            return StoryOutcome::skipped(&story.name, task_names);
        }

        let iteration = resolve_iteration(self.iterations.as_ref(), story).await;
        let document = user_story_document(story, iteration.as_deref());

        let id = match self
            .service
            .create_work_item(WorkItemKind::UserStory, &document, cancel)
            .await
        {
            Ok(id) => {
                log_item_created!(WorkItemKind::UserStory, story.name, id);
                id
            }
            Err(DevOpsError::Cancelled) => {
                tracing::warn!(user_story = %story.name, "User story create call cancelled in flight");
                return StoryOutcome::cancelled(&story.name, task_names);
            }
            Err(e) => {
                log_item_failed!(WorkItemKind::UserStory, story.name, e);
                return StoryOutcome::failed(&story.name, e, task_names);
            }
        };

        let parent = CreatedParent {
            story,
            id,
            iteration: iteration.as_deref(),
        };

        let mut tasks = Vec::with_capacity(story.tasks.len());
        for task in &story.tasks {
            let status = if cancel.is_cancelled() {
                ItemStatus::Skipped
            } else {
                let document = task_document(task, &parent, organization_url);
                match self
                    .service
                    .create_work_item(WorkItemKind::Task, &document, cancel)
                    .await
                {
                    Ok(task_id) => {
                        log_item_created!(WorkItemKind::Task, task.name, task_id, id);
                        ItemStatus::Created(task_id)
                    }
                    Err(DevOpsError::Cancelled) => {
                        tracing::warn!(task = %task.name, parent_id = %id, "Task create call cancelled in flight");
                        ItemStatus::Cancelled
                    }
                    Err(e) => {
                        log_item_failed!(WorkItemKind::Task, task.name, e, id);
                        ItemStatus::Failed(e)
                    }
                }
            };

            tasks.push(TaskOutcome {
                name: task.name.clone(),
                status,
            });
        }

        StoryOutcome::created(&story.name, id, tasks)
    }
}
