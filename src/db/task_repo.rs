use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::Task;

/// Durable storage for task records, one row per calendar day.
pub struct TaskRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    date: String,
    task_list: String,
}

impl TaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or replace the full task list for a day.
    pub async fn put(&self, date: NaiveDate, tasks: &[Task]) -> Result<(), sqlx::Error> {
        let date = date.to_string();
        let payload = serde_json::to_string(tasks).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        sqlx::query("INSERT OR REPLACE INTO tasks (date, task_list) VALUES (?, ?)")
            .bind(&date)
            .bind(&payload)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Remove a day's record. Deleting an absent day is a no-op.
    pub async fn delete(&self, date: NaiveDate) -> Result<(), sqlx::Error> {
        let date = date.to_string();
        sqlx::query("DELETE FROM tasks WHERE date = ?")
            .bind(&date)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Read every record, oldest day first.
    pub async fn scan_all(&self) -> Result<Vec<(NaiveDate, Vec<Task>)>, sqlx::Error> {
        let rows: Vec<TaskRow> = sqlx::query_as("SELECT date, task_list FROM tasks ORDER BY date")
            .fetch_all(&self.pool)
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
            let tasks: Vec<Task> = serde_json::from_str(&row.task_list)
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
            records.push((date, tasks));
        }
        Ok(records)
    }
}
