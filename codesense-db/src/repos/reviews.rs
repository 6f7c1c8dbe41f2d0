//! Repository for review record operations

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::models::ReviewRecord;
use crate::{Error, Result};

/// Default number of records returned by [`ReviewsRepo::list_recent`]
pub const DEFAULT_RECENT_LIMIT: i64 = 50;

const SELECT_COLUMNS: &str = "id, code, language, summary, bugs_json, optimizations_json, \
     readability_json, refactored, explanation, quality_score, created_at";

/// Repository for managing persisted review records
pub struct ReviewsRepo {
    pool: SqlitePool,
}

impl ReviewsRepo {
    /// Create a new repository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a completed review record
    pub async fn insert(&self, record: &ReviewRecord) -> Result<()> {
        sqlx::query(
            "INSERT INTO reviews (
                id, code, language, summary, bugs_json, optimizations_json,
                readability_json, refactored, explanation, quality_score, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.code)
        .bind(&record.language)
        .bind(&record.summary)
        .bind(serde_json::to_string(&record.bugs)?)
        .bind(serde_json::to_string(&record.optimizations)?)
        .bind(serde_json::to_string(&record.readability)?)
        .bind(&record.refactored)
        .bind(&record.explanation)
        .bind(record.quality_score)
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!(id = %record.id, "review persisted");
        Ok(())
    }

    /// Find a review by its external identifier
    pub async fn find_by_id(&self, id: &str) -> Result<Option<ReviewRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM reviews WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Fetch the most recent reviews, newest first
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<ReviewRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM reviews ORDER BY created_at DESC LIMIT ?",
            SELECT_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Count persisted reviews
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as n FROM reviews")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }

    /// Map a database row to a ReviewRecord model
    fn map_row(row: &SqliteRow) -> Result<ReviewRecord> {
        let bugs_json: String = row.try_get("bugs_json")?;
        let optimizations_json: String = row.try_get("optimizations_json")?;
        let readability_json: String = row.try_get("readability_json")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(ReviewRecord {
            id: row.try_get("id")?,
            code: row.try_get("code")?,
            language: row.try_get("language")?,
            summary: row.try_get("summary")?,
            bugs: serde_json::from_str(&bugs_json)?,
            optimizations: serde_json::from_str(&optimizations_json)?,
            readability: serde_json::from_str(&readability_json)?,
            refactored: row.try_get("refactored")?,
            explanation: row.try_get("explanation")?,
            quality_score: row.try_get("quality_score")?,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| Error::Decode(format!("invalid created_at timestamp: {}", e)))?
                .with_timezone(&Utc),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use tempfile::TempDir;
    use uuid::Uuid;

    async fn setup() -> (Database, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::new(temp_dir.path().join("test.db")).await.unwrap();
        (db, temp_dir)
    }

    fn sample_record(created_at: DateTime<Utc>) -> ReviewRecord {
        ReviewRecord {
            id: Uuid::new_v4().to_string(),
            code: "print('hi')".to_string(),
            language: "python".to_string(),
            summary: "Prints a greeting".to_string(),
            bugs: vec!["No input validation".to_string()],
            optimizations: vec![],
            readability: vec!["Add a docstring".to_string()],
            refactored: "print('hi')".to_string(),
            explanation: "Fine as-is.".to_string(),
            quality_score: 8.5,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let (db, _dir) = setup().await;
        let repo = db.reviews();

        let record = sample_record(Utc::now());
        repo.insert(&record).await.unwrap();

        let found = repo.find_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(found, record);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let (db, _dir) = setup().await;
        let repo = db.reviews();

        let found = repo.find_by_id("does-not-exist").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let (db, _dir) = setup().await;
        let repo = db.reviews();

        let record = sample_record(Utc::now());
        repo.insert(&record).await.unwrap();

        let result = repo.insert(&record).await;
        assert!(matches!(result, Err(Error::Sqlx(_))));
    }

    #[tokio::test]
    async fn test_list_recent_orders_newest_first() {
        let (db, _dir) = setup().await;
        let repo = db.reviews();

        let now = Utc::now();
        let oldest = sample_record(now - chrono::Duration::seconds(2));
        let middle = sample_record(now - chrono::Duration::seconds(1));
        let newest = sample_record(now);

        repo.insert(&oldest).await.unwrap();
        repo.insert(&newest).await.unwrap();
        repo.insert(&middle).await.unwrap();

        let listed = repo.list_recent(DEFAULT_RECENT_LIMIT).await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![&newest.id, &middle.id, &oldest.id]);
    }

    #[tokio::test]
    async fn test_list_recent_applies_limit() {
        let (db, _dir) = setup().await;
        let repo = db.reviews();

        let now = Utc::now();
        for i in 0..5 {
            repo.insert(&sample_record(now - chrono::Duration::seconds(i)))
                .await
                .unwrap();
        }

        let listed = repo.list_recent(2).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].created_at, now);
    }

    #[tokio::test]
    async fn test_default_limit_caps_large_tables() {
        let (db, _dir) = setup().await;
        let repo = db.reviews();

        let now = Utc::now();
        for i in 0..55 {
            repo.insert(&sample_record(now - chrono::Duration::seconds(i)))
                .await
                .unwrap();
        }

        let listed = repo.list_recent(DEFAULT_RECENT_LIMIT).await.unwrap();
        assert_eq!(listed.len(), 50);
        // Strictly non-increasing by creation time
        for pair in listed.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn test_count() {
        let (db, _dir) = setup().await;
        let repo = db.reviews();

        assert_eq!(repo.count().await.unwrap(), 0);

        repo.insert(&sample_record(Utc::now())).await.unwrap();
        repo.insert(&sample_record(Utc::now())).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
