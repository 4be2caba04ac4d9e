use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod db;
mod export;
mod models;
mod tracker;

use commands::{ConfigCommand, ExportCommand, MonthCommand, TaskCommand, WorkoutCommand};
use config::Config;
use db::{init_db, TaskRepository, WorkoutRepository};
use tracker::Tracker;

#[derive(Parser)]
#[command(name = "gymtask")]
#[command(version)]
#[command(about = "A calendar-indexed workout and task log", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage workout exercises
    Workout(WorkoutCommand),

    /// Manage daily tasks
    Task(TaskCommand),

    /// Show which days in a month have records
    Month(MonthCommand),

    /// Export all records to a backup file
    Export(ExportCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    // Initialize tracing; normal runs stay quiet unless RUST_LOG says otherwise
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gymtask=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Workout(cmd)) => {
            let mut tracker = build_tracker(&config).await?;
            cmd.run(&mut tracker).await?;
        }
        Some(Commands::Task(cmd)) => {
            let mut tracker = build_tracker(&config).await?;
            cmd.run(&mut tracker).await?;
        }
        Some(Commands::Month(cmd)) => {
            let tracker = build_tracker(&config).await?;
            cmd.run(&tracker)?;
        }
        Some(Commands::Export(cmd)) => {
            // Export reads the database directly, no in-memory state needed
            let pool = init_db(&config.database_path).await?;
            let workout_repo = WorkoutRepository::new(pool.clone());
            let task_repo = TaskRepository::new(pool);
            cmd.run(&workout_repo, &task_repo, &config).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// Open the database and load the day-keyed history into memory.
///
/// A failed load degrades to an empty history for this session instead of
/// aborting; the error is reported once.
async fn build_tracker(config: &Config) -> Result<Tracker, Box<dyn std::error::Error>> {
    let pool = init_db(&config.database_path).await?;
    let mut tracker = Tracker::new(
        WorkoutRepository::new(pool.clone()),
        TaskRepository::new(pool),
    );
    if let Err(e) = tracker.load().await {
        tracing::warn!("Continuing with empty history: {}", e);
    }
    Ok(tracker)
}
