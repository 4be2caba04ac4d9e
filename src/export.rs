//! Backup export: a portable JSON snapshot of every record in the
//! database.
//!
//! The snapshot is built from a direct scan of the database rather than
//! the in-memory maps, so it reflects the last durably committed state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::db::{TaskRepository, WorkoutRepository};
use crate::models::{Exercise, Task};

/// Errors that can occur while building or writing a snapshot.
#[derive(Debug)]
pub enum ExportError {
    /// Scanning the database failed.
    Storage(sqlx::Error),
    /// Serializing the snapshot failed.
    Serialize(serde_json::Error),
    /// Writing the snapshot file failed.
    Io(PathBuf, io::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Storage(e) => write!(f, "Failed to read records for export: {}", e),
            ExportError::Serialize(e) => write!(f, "Failed to serialize export: {}", e),
            ExportError::Io(path, e) => {
                write!(f, "Failed to write export file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Storage(e) => Some(e),
            ExportError::Serialize(e) => Some(e),
            ExportError::Io(_, e) => Some(e),
        }
    }
}

/// One day's workout record in a snapshot. `id` always equals `date`.
#[derive(Debug, Serialize)]
pub struct WorkoutEntry {
    pub id: NaiveDate,
    pub date: NaiveDate,
    pub exercises: Vec<Exercise>,
}

/// One day's task record in a snapshot. `id` always equals `date`.
#[derive(Debug, Serialize)]
pub struct TaskEntry {
    pub id: NaiveDate,
    pub date: NaiveDate,
    #[serde(rename = "taskList")]
    pub task_list: Vec<Task>,
}

/// The full exported state of both collections at a point in time.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub workouts: Vec<WorkoutEntry>,
    pub tasks: Vec<TaskEntry>,
    #[serde(rename = "exportDate")]
    pub export_date: DateTime<Utc>,
}

/// Scan both collections and build a snapshot. An empty store exports as
/// empty sequences, not an error.
pub async fn export_all(
    workout_repo: &WorkoutRepository,
    task_repo: &TaskRepository,
) -> Result<Snapshot, ExportError> {
    let workouts = workout_repo
        .scan_all()
        .await
        .map_err(ExportError::Storage)?
        .into_iter()
        .map(|(date, exercises)| WorkoutEntry {
            id: date,
            date,
            exercises,
        })
        .collect();

    let tasks = task_repo
        .scan_all()
        .await
        .map_err(ExportError::Storage)?
        .into_iter()
        .map(|(date, task_list)| TaskEntry {
            id: date,
            date,
            task_list,
        })
        .collect();

    Ok(Snapshot {
        workouts,
        tasks,
        export_date: Utc::now(),
    })
}

/// Default backup file name for a given day.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("gymtask-backup-{}.json", date)
}

/// Write a snapshot to disk.
///
/// The snapshot is serialized in full before any file is touched, and the
/// bytes go through a temp file + rename, so a failure never leaves a
/// partial export behind.
pub fn write_snapshot(snapshot: &Snapshot, path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(snapshot).map_err(ExportError::Serialize)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ExportError::Io(parent.to_path_buf(), e))?;
        }
    }

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json).map_err(|e| ExportError::Io(temp_path.clone(), e))?;
    fs::rename(&temp_path, path).map_err(|e| ExportError::Io(path.to_path_buf(), e))?;

    Ok(())
}
