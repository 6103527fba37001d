// ado-batch - Bulk work item import for Azure DevOps
// Copyright (c) 2025 ado-batch Contributors
// Licensed under the MIT License

use ado_batch::cli::{Cli, Commands};
use ado_batch::config::{load_config, ImporterConfig};
use ado_batch::domain::Result;
use ado_batch::logging::init_logging;
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Import loads its config once here so file logging and the default level
    // follow it; other commands log to the console at info
    let loaded = match &cli.command {
        Commands::Import(_) => Some(load_config(&cli.config)),
        _ => None,
    };
    let config = loaded.as_ref().and_then(|result| result.as_ref().ok());
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = config.map(|c| c.logging.clone()).unwrap_or_default();

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "ado-batch - Bulk work item import for Azure DevOps"
    );

    let cancel = CancellationToken::new();

    // Spawn signal handler task
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create SIGTERM handler");
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), stopping import...");
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, stopping import...");
                }
            }
            println!("\n⚠️  Shutdown signal received, no further work items will be created...");
            signal_token.cancel();
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received SIGINT (Ctrl+C), stopping import...");
                println!("\n⚠️  Shutdown signal received, no further work items will be created...");
                signal_token.cancel();
            }
        }
    });

    let exit_code = match execute_command(&cli, loaded, cancel).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(
    cli: &Cli,
    loaded: Option<Result<ImporterConfig>>,
    cancel: CancellationToken,
) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Import(args) => {
            let config = loaded.unwrap_or_else(|| load_config(&cli.config));
            args.execute(config, cancel).await
        }
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
