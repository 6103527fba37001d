//! Import command implementation
//!
//! This module implements the `import` command, which creates the user stories
//! and tasks listed in the items file in Azure DevOps.

use crate::adapters::devops::{DevOpsClient, DryRunService, WorkItemService};
use crate::config::ImporterConfig;
use crate::core::import::{ImportOrchestrator, ImportSummary};
use crate::core::input::load_user_stories;
use crate::domain::Result;
use clap::Args;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Failures listed in the summary before it is cut short
const MAX_LISTED_FAILURES: usize = 10;

/// Arguments for the import command
#[derive(Args, Debug, Default)]
pub struct ImportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - log the patch documents without calling Azure DevOps
    #[arg(long)]
    pub dry_run: bool,

    /// Override the items file path
    #[arg(long, value_name = "PATH")]
    pub items: Option<String>,

    /// Override the number of user stories processed at the same time
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,
}

impl ImportArgs {
    /// Execute the import command with the result of loading its configuration
    pub async fn execute(
        &self,
        loaded: Result<ImporterConfig>,
        cancel: CancellationToken,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting import command");

        let mut config = match loaded {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let stories = match load_user_stories(&config.import.items_path) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load backlog items");
                eprintln!("{e}");
                return Ok(3);
            }
        };

        let task_count: usize = stories.iter().map(|s| s.tasks.len()).sum();
        let dry_run = config.import.dry_run;

        if dry_run {
            tracing::info!("Dry run mode enabled - no work items will be created");
            println!("🔍 DRY RUN MODE - No work items will be created in Azure DevOps");
            println!();
        }

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !dry_run {
            println!("Import Configuration:");
            println!("  Organization: {}", config.devops.organization);
            println!("  Project: {}", config.devops.project);
            println!("  Items file: {}", config.import.items_path);
            println!("  User stories: {}", stories.len());
            println!("  Tasks: {task_count}");
            println!("  Concurrency: {}", config.import.max_concurrency);
            println!();
            print!("Proceed with import? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Import cancelled.");
                return Ok(0);
            }
        }

        let service: Arc<dyn WorkItemService> = if dry_run {
            Arc::new(DryRunService::new())
        } else {
            match DevOpsClient::new(config.devops.clone()) {
                Ok(client) => Arc::new(client),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create Azure DevOps client");
                    eprintln!("Failed to initialize import: {e}");
                    return Ok(4);
                }
            }
        };

        let orchestrator =
            ImportOrchestrator::new(service).with_max_concurrency(config.import.max_concurrency);

        println!("🚀 Starting import...");
        println!();

        let mut summary = match orchestrator.run(&stories, &config.devops, &cancel).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Import failed");
                eprintln!("Import failed: {e}");
                return Ok(5);
            }
        };
        summary.dry_run = dry_run;

        print_summary(&summary);

        Ok(exit_code(&summary))
    }

    fn apply_overrides(&self, config: &mut ImporterConfig) {
        if let Some(items) = &self.items {
            tracing::info!(items_path = %items, "Overriding items path from CLI");
            config.import.items_path = items.clone();
        }

        if let Some(n) = self.concurrency {
            tracing::info!(max_concurrency = n, "Overriding concurrency from CLI");
            config.import.max_concurrency = n;
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.import.dry_run = true;
        }
    }
}

fn print_summary(summary: &ImportSummary) {
    println!();
    println!("📊 Import Summary:");
    println!(
        "  User stories: {} created, {} failed, {} cancelled, {} skipped (of {})",
        summary.user_stories_created,
        summary.user_stories_failed,
        summary.user_stories_cancelled,
        summary.user_stories_skipped,
        summary.total_user_stories
    );
    println!(
        "  Tasks: {} created, {} failed, {} cancelled, {} skipped (of {})",
        summary.tasks_created,
        summary.tasks_failed,
        summary.tasks_cancelled,
        summary.tasks_skipped,
        summary.total_tasks
    );
    println!("  Started: {}", summary.started_at.to_rfc3339());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    if summary.user_stories_cancelled + summary.tasks_cancelled > 0 {
        println!("  Cancelled create calls may still have created work items; check the project.");
    }
    println!();

    let failures: Vec<(String, String)> = summary
        .outcomes
        .iter()
        .flat_map(|story| {
            let own = story
                .status
                .error()
                .map(|e| (story.name.clone(), e.to_string()));
            let tasks = story.tasks.iter().filter_map(move |task| {
                task.status
                    .error()
                    .map(|e| (format!("{} / {}", story.name, task.name), e.to_string()))
            });
            own.into_iter().chain(tasks)
        })
        .collect();

    if !failures.is_empty() {
        println!("⚠️  Failures:");
        for (name, error) in failures.iter().take(MAX_LISTED_FAILURES) {
            println!("  - {name}: {error}");
        }
        if failures.len() > MAX_LISTED_FAILURES {
            println!("  ... and {} more failures", failures.len() - MAX_LISTED_FAILURES);
        }
        println!();
    }
}

/// Exit code for a finished run
fn exit_code(summary: &ImportSummary) -> i32 {
    if summary.interrupted {
        println!("⚠️  Import interrupted. Work items already created were kept.");
        tracing::info!("Import interrupted by user signal");
        130
    } else if summary.is_successful() {
        println!("✅ Import completed successfully!");
        0
    } else {
        println!("⚠️  Import completed with failures");
        1
    }
}
