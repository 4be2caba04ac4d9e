use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::Exercise;

/// Durable storage for workout records, one row per calendar day.
///
/// `put` replaces the whole exercise list for a day; callers never write
/// partial updates, so a row is always a complete record.
pub struct WorkoutRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct WorkoutRow {
    date: String,
    exercises: String,
}

impl WorkoutRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or replace the full exercise list for a day.
    pub async fn put(&self, date: NaiveDate, exercises: &[Exercise]) -> Result<(), sqlx::Error> {
        let date = date.to_string();
        let payload =
            serde_json::to_string(exercises).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        sqlx::query("INSERT OR REPLACE INTO workouts (date, exercises) VALUES (?, ?)")
            .bind(&date)
            .bind(&payload)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Remove a day's record. Deleting an absent day is a no-op.
    pub async fn delete(&self, date: NaiveDate) -> Result<(), sqlx::Error> {
        let date = date.to_string();
        sqlx::query("DELETE FROM workouts WHERE date = ?")
            .bind(&date)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Read every record, oldest day first.
    pub async fn scan_all(&self) -> Result<Vec<(NaiveDate, Vec<Exercise>)>, sqlx::Error> {
        let rows: Vec<WorkoutRow> =
            sqlx::query_as("SELECT date, exercises FROM workouts ORDER BY date")
                .fetch_all(&self.pool)
                .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
            let exercises: Vec<Exercise> = serde_json::from_str(&row.exercises)
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
            records.push((date, exercises));
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::models::ExerciseSet;
    use tempfile::TempDir;

    struct TestContext {
        repo: WorkoutRepository,
        _temp_dir: TempDir,
    }

    async fn setup() -> TestContext {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let pool = init_db(&db_path).await.unwrap();
        TestContext {
            repo: WorkoutRepository::new(pool),
            _temp_dir: temp_dir,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_put_and_scan_roundtrip() {
        let ctx = setup().await;
        let day = date("2024-03-01");

        let exercises = vec![
            Exercise::new("Squat").with_sets(vec![ExerciseSet::new("5", "100")]),
            Exercise::new("Bench Press").with_sets(vec![ExerciseSet::new("8", "60")]),
        ];
        ctx.repo.put(day, &exercises).await.unwrap();

        let records = ctx.repo.scan_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, day);
        assert_eq!(records[0].1, exercises);
    }

    #[tokio::test]
    async fn test_put_replaces_existing_record() {
        let ctx = setup().await;
        let day = date("2024-03-01");

        let first = vec![Exercise::new("Squat").with_sets(vec![ExerciseSet::new("5", "100")])];
        ctx.repo.put(day, &first).await.unwrap();

        let second = vec![
            Exercise::new("Deadlift").with_sets(vec![ExerciseSet::new("3", "140")]),
            Exercise::new("Row").with_sets(vec![ExerciseSet::new("10", "50")]),
        ];
        ctx.repo.put(day, &second).await.unwrap();

        let records = ctx.repo.scan_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1, second);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let ctx = setup().await;
        let day = date("2024-03-01");

        let exercises = vec![Exercise::new("Squat").with_sets(vec![ExerciseSet::new("5", "100")])];
        ctx.repo.put(day, &exercises).await.unwrap();

        ctx.repo.delete(day).await.unwrap();

        assert!(ctx.repo.scan_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_record_is_noop() {
        let ctx = setup().await;

        ctx.repo.delete(date("2024-03-01")).await.unwrap();
        ctx.repo.delete(date("2024-03-01")).await.unwrap();

        assert!(ctx.repo.scan_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scan_empty_store() {
        let ctx = setup().await;

        let records = ctx.repo.scan_all().await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_scan_orders_by_date() {
        let ctx = setup().await;

        let exercises = vec![Exercise::new("Squat").with_sets(vec![ExerciseSet::new("5", "100")])];
        ctx.repo.put(date("2024-03-15"), &exercises).await.unwrap();
        ctx.repo.put(date("2024-03-01"), &exercises).await.unwrap();
        ctx.repo.put(date("2024-03-08"), &exercises).await.unwrap();

        let dates: Vec<NaiveDate> = ctx
            .repo
            .scan_all()
            .await
            .unwrap()
            .into_iter()
            .map(|(d, _)| d)
            .collect();
        assert_eq!(
            dates,
            vec![date("2024-03-01"), date("2024-03-08"), date("2024-03-15")]
        );
    }
}
