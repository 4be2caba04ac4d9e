use chrono::Local;
use clap::Args;
use std::path::PathBuf;

use crate::config::Config;
use crate::db::{TaskRepository, WorkoutRepository};
use crate::export::{export_all, export_file_name, write_snapshot};

#[derive(Args)]
pub struct ExportCommand {
    /// Output file (defaults to <export_dir>/gymtask-backup-<today>.json)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl ExportCommand {
    pub async fn run(
        &self,
        workout_repo: &WorkoutRepository,
        task_repo: &TaskRepository,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let snapshot = export_all(workout_repo, task_repo).await?;

        let path = self.output.clone().unwrap_or_else(|| {
            config
                .export_dir
                .join(export_file_name(Local::now().date_naive()))
        });
        write_snapshot(&snapshot, &path)?;

        tracing::info!("Wrote backup to {}", path.display());
        println!(
            "Exported {} workout day(s) and {} task day(s) to {}",
            snapshot.workouts.len(),
            snapshot.tasks.len(),
            path.display()
        );
        Ok(())
    }
}
