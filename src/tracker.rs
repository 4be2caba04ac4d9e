//! In-memory view of the calendar history and the mutations that keep it
//! in sync with durable storage.
//!
//! Every mutation applies to the in-memory maps first, then writes the
//! day's full record through to the database. A day has a row in a
//! collection iff its list is non-empty; removing the last entry deletes
//! the row instead of leaving an empty record. If the durable write fails
//! the in-memory change is kept and the error is returned, so the view
//! runs ahead of storage until the next successful write for that day.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::{TaskRepository, WorkoutRepository};
use crate::models::{Exercise, Task};

/// Errors that can occur while loading or persisting records.
#[derive(Debug)]
pub enum TrackerError {
    /// The initial scan of the database failed.
    Load(sqlx::Error),
    /// Writing a day's record failed after the in-memory state was updated.
    Write(NaiveDate, sqlx::Error),
    /// Deleting a day's record failed after the in-memory state was updated.
    Delete(NaiveDate, sqlx::Error),
}

impl std::fmt::Display for TrackerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerError::Load(e) => write!(f, "Failed to load saved records: {}", e),
            TrackerError::Write(date, e) => {
                write!(f, "Failed to save record for {}: {}", date, e)
            }
            TrackerError::Delete(date, e) => {
                write!(f, "Failed to delete record for {}: {}", date, e)
            }
        }
    }
}

impl std::error::Error for TrackerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackerError::Load(e) | TrackerError::Write(_, e) | TrackerError::Delete(_, e) => {
                Some(e)
            }
        }
    }
}

/// Calendar history of workouts and tasks, cached in memory and written
/// through to the database on every change.
///
/// Mutations take `&mut self`, so writes for a given day can never
/// interleave within a process.
pub struct Tracker {
    workout_repo: WorkoutRepository,
    task_repo: TaskRepository,
    workouts: HashMap<NaiveDate, Vec<Exercise>>,
    tasks: HashMap<NaiveDate, Vec<Task>>,
}

impl Tracker {
    pub fn new(workout_repo: WorkoutRepository, task_repo: TaskRepository) -> Self {
        Self {
            workout_repo,
            task_repo,
            workouts: HashMap::new(),
            tasks: HashMap::new(),
        }
    }

    /// Rehydrate the in-memory maps from the database.
    ///
    /// An empty store yields empty maps. On failure the maps are left
    /// empty so the session can continue without history.
    pub async fn load(&mut self) -> Result<(), TrackerError> {
        let workouts = self.workout_repo.scan_all().await.map_err(TrackerError::Load)?;
        let tasks = self.task_repo.scan_all().await.map_err(TrackerError::Load)?;

        self.workouts = workouts.into_iter().collect();
        self.tasks = tasks.into_iter().collect();

        tracing::info!(
            "Loaded {} workout day(s) and {} task day(s)",
            self.workouts.len(),
            self.tasks.len()
        );
        Ok(())
    }

    /// Exercises logged for a day, in insertion order. Empty if none.
    pub fn workouts_on(&self, date: NaiveDate) -> &[Exercise] {
        self.workouts.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    /// Tasks for a day, in insertion order. Empty if none.
    pub fn tasks_on(&self, date: NaiveDate) -> &[Task] {
        self.tasks.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_workout(&self, date: NaiveDate) -> bool {
        self.workouts.get(&date).is_some_and(|e| !e.is_empty())
    }

    pub fn has_tasks(&self, date: NaiveDate) -> bool {
        self.tasks.get(&date).is_some_and(|t| !t.is_empty())
    }

    /// Append an exercise to a day's workout and persist the full record.
    ///
    /// Returns `Ok(false)` without touching any state if the exercise has
    /// no name or no sets.
    pub async fn add_exercise(
        &mut self,
        date: NaiveDate,
        exercise: Exercise,
    ) -> Result<bool, TrackerError> {
        if !exercise.is_savable() {
            tracing::debug!("Rejected exercise without a name or sets for {}", date);
            return Ok(false);
        }

        let entries = self.workouts.entry(date).or_default();
        entries.push(exercise);
        self.workout_repo
            .put(date, entries)
            .await
            .map_err(|e| TrackerError::Write(date, e))?;
        Ok(true)
    }

    /// Remove an exercise by id. Removing the last one deletes the day's
    /// record entirely.
    ///
    /// Returns `Ok(false)` if no exercise with that id exists for the day,
    /// so deleting the same entry twice is a safe no-op.
    pub async fn delete_exercise(
        &mut self,
        date: NaiveDate,
        id: Uuid,
    ) -> Result<bool, TrackerError> {
        let Some(entries) = self.workouts.get_mut(&date) else {
            return Ok(false);
        };

        let len_before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == len_before {
            return Ok(false);
        }

        if entries.is_empty() {
            self.workouts.remove(&date);
            self.workout_repo
                .delete(date)
                .await
                .map_err(|e| TrackerError::Delete(date, e))?;
        } else {
            self.workout_repo
                .put(date, entries)
                .await
                .map_err(|e| TrackerError::Write(date, e))?;
        }
        Ok(true)
    }

    /// Append a task to a day's list and persist the full record.
    ///
    /// Returns `Ok(false)` without touching any state if the text is
    /// blank.
    pub async fn add_task(
        &mut self,
        date: NaiveDate,
        text: impl Into<String>,
    ) -> Result<bool, TrackerError> {
        let text = text.into();
        if text.trim().is_empty() {
            tracing::debug!("Rejected blank task for {}", date);
            return Ok(false);
        }

        let entries = self.tasks.entry(date).or_default();
        entries.push(Task::new(text));
        self.task_repo
            .put(date, entries)
            .await
            .map_err(|e| TrackerError::Write(date, e))?;
        Ok(true)
    }

    /// Flip a task's completed state and persist the full record.
    ///
    /// Toggling never empties the list, so this never deletes the row.
    pub async fn toggle_task(&mut self, date: NaiveDate, id: Uuid) -> Result<bool, TrackerError> {
        let Some(entries) = self.tasks.get_mut(&date) else {
            return Ok(false);
        };
        let Some(task) = entries.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };

        task.completed = !task.completed;
        self.task_repo
            .put(date, entries)
            .await
            .map_err(|e| TrackerError::Write(date, e))?;
        Ok(true)
    }

    /// Remove a task by id. Removing the last one deletes the day's record
    /// entirely.
    pub async fn delete_task(&mut self, date: NaiveDate, id: Uuid) -> Result<bool, TrackerError> {
        let Some(entries) = self.tasks.get_mut(&date) else {
            return Ok(false);
        };

        let len_before = entries.len();
        entries.retain(|t| t.id != id);
        if entries.len() == len_before {
            return Ok(false);
        }

        if entries.is_empty() {
            self.tasks.remove(&date);
            self.task_repo
                .delete(date)
                .await
                .map_err(|e| TrackerError::Delete(date, e))?;
        } else {
            self.task_repo
                .put(date, entries)
                .await
                .map_err(|e| TrackerError::Write(date, e))?;
        }
        Ok(true)
    }
}
