// src/main.rs

//! seatwatch CLI
//!
//! Local entry point: validate a config, probe a course, or run the watch
//! loops until interrupted.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use futures::future;

use seatwatch::error::Result;
use seatwatch::models::Config;
use seatwatch::monitor::Monitor;
use seatwatch::notify;
use seatwatch::services::{CatalogClient, CourseSource};

/// seatwatch - course seat availability monitor
#[derive(Parser, Debug)]
#[command(name = "seatwatch", version, about = "Course seat availability monitor")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "seatwatch.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Watch all configured targets and alert when seats open
    Watch,

    /// Fetch one course and print its sections with seat status
    Check {
        /// Course code (e.g. CSC309H1)
        course_code: String,
        /// Semester / section code (e.g. F)
        semester: String,
    },

    /// Validate the configuration and every target against the catalog
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    let source: Arc<dyn CourseSource> = Arc::new(CatalogClient::new(config.catalog.clone())?);

    match cli.command {
        Command::Watch => {
            config.validate()?;
            let notifier = notify::from_config(&config.notifier)?;

            // Fail fast on a bad course/activity before any polling starts
            let mut monitors = Vec::new();
            for target in &config.targets {
                let monitor = Monitor::new(
                    Arc::clone(&source),
                    Arc::clone(&notifier),
                    target.clone(),
                    config.monitor.clone(),
                );
                monitor.validate().await?;
                log::info!("Validated target {}", target);
                monitors.push(monitor);
            }

            let loops =
                future::join_all(monitors.into_iter().map(|m| async move { m.run().await }));

            // Loops run until ctrl-c; cancellation lands at the next await
            tokio::select! {
                _ = loops => {}
                _ = tokio::signal::ctrl_c() => {
                    log::info!("Interrupted, shutting down");
                }
            }
        }

        Command::Check {
            course_code,
            semester,
        } => {
            let course = source.fetch_course(&course_code, &semester).await?;
            println!("{}", course);
            for activity in course.activities() {
                let status = if activity.has_open_seat() {
                    "OPEN"
                } else {
                    "full"
                };
                println!("  {} [{}]", activity, status);
            }
        }

        Command::Validate => {
            config.validate()?;
            log::info!("Configuration OK ({} targets)", config.targets.len());
            for target in &config.targets {
                source
                    .validate_target(&target.course_code, &target.semester, &target.activity)
                    .await?;
                log::info!("✓ {}", target);
            }
            log::info!("All targets valid");
        }
    }

    Ok(())
}
