//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `ComplaintStore` port from the `core` crate. It handles all interactions
//! with the SQLite database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use complaint_intake_core::domain::{ComplaintRecord, ComplaintStatus, Language, NewComplaint};
use complaint_intake_core::ports::{ComplaintStore, PortError, PortResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

const CREATE_COMPLAINTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS complaints (
    id TEXT PRIMARY KEY,
    complaint_text TEXT NOT NULL,
    transcribed_text TEXT NOT NULL,
    audio_path TEXT,
    language TEXT NOT NULL,
    category TEXT,
    status TEXT NOT NULL DEFAULT 'submitted',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)"#;

const SELECT_COLUMNS: &str = "SELECT id, complaint_text, transcribed_text, audio_path, language, \
     category, status, created_at, updated_at FROM complaints";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `ComplaintStore` port.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a new `SqliteStore`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url`, creating the database file and its parent
    /// directories if they are missing, and brings the schema up to date.
    pub async fn open(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        if let Some(dir) = options
            .clone()
            .get_filename()
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(dir).await?;
        }

        // One connection keeps `sqlite::memory:` a single shared database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let store = Self::new(pool);
        store.run_migrations().await?;
        info!(database_url, "Opened SQLite complaint store");
        Ok(store)
    }

    /// Creates the `complaints` table at startup if it does not exist yet.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_COMPLAINTS_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Fixed-width UTC text so that `ORDER BY created_at` sorts chronologically.
fn encode_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(id: &str, raw: &str) -> PortResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| PortError::Unexpected(format!("Complaint {}: bad timestamp '{}': {}", id, raw, e)))
}

//=========================================================================================
// "Impure" Database Record Struct
//=========================================================================================

#[derive(FromRow)]
struct ComplaintRow {
    id: String,
    complaint_text: String,
    transcribed_text: String,
    audio_path: Option<String>,
    language: String,
    category: Option<String>,
    status: String,
    created_at: String,
    updated_at: String,
}

impl ComplaintRow {
    fn to_domain(self) -> PortResult<ComplaintRecord> {
        let language: Language = self
            .language
            .parse()
            .map_err(|e| PortError::Unexpected(format!("Complaint {}: {}", self.id, e)))?;
        let status: ComplaintStatus = self
            .status
            .parse()
            .map_err(|e| PortError::Unexpected(format!("Complaint {}: {}", self.id, e)))?;
        let category = self
            .category
            .unwrap_or_else(|| language.default_category().to_string());
        Ok(ComplaintRecord {
            created_at: decode_timestamp(&self.id, &self.created_at)?,
            updated_at: decode_timestamp(&self.id, &self.updated_at)?,
            id: self.id,
            complaint_text: self.complaint_text,
            transcribed_text: self.transcribed_text,
            audio_path: self.audio_path,
            language,
            category,
            status,
        })
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// `ComplaintStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ComplaintStore for SqliteStore {
    async fn save(&self, complaint: NewComplaint) -> PortResult<ComplaintRecord> {
        let record = ComplaintRecord::stamped(complaint, Utc::now().trunc_subsecs(6));
        let stamp = encode_timestamp(&record.created_at);

        sqlx::query(
            "INSERT INTO complaints (id, complaint_text, transcribed_text, audio_path, language, category, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.complaint_text)
        .bind(&record.transcribed_text)
        .bind(&record.audio_path)
        .bind(record.language.as_str())
        .bind(&record.category)
        .bind(record.status.as_str())
        .bind(&stamp)
        .bind(&stamp)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                PortError::Conflict(format!("Complaint {}", record.id))
            }
            _ => unexpected(e),
        })?;

        debug!(id = %record.id, "Complaint saved to SQLite store");
        Ok(record)
    }

    async fn get_by_id(&self, id: &str) -> PortResult<Option<ComplaintRecord>> {
        let row = sqlx::query_as::<_, ComplaintRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;
        row.map(ComplaintRow::to_domain).transpose()
    }

    async fn get_all(&self) -> PortResult<Vec<ComplaintRecord>> {
        let rows = sqlx::query_as::<_, ComplaintRow>(&format!(
            "{} ORDER BY created_at DESC, rowid DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        rows.into_iter().map(ComplaintRow::to_domain).collect()
    }

    async fn update_status(&self, id: &str, status: ComplaintStatus) -> PortResult<()> {
        let now = encode_timestamp(&Utc::now().trunc_subsecs(6));
        // MAX keeps updated_at >= created_at even if the clock stepped backwards.
        let result = sqlx::query(
            "UPDATE complaints SET status = ?, updated_at = MAX(?, created_at) WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            debug!(id, "Status update for unknown complaint ignored");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn memory_store() -> SqliteStore {
        SqliteStore::open("sqlite::memory:")
            .await
            .expect("in-memory sqlite")
    }

    fn complaint(id: &str) -> NewComplaint {
        NewComplaint {
            id: id.to_string(),
            complaint_text: "═══ letter ═══".to_string(),
            transcribed_text: "தெரு விளக்கு எரியவில்லை".to_string(),
            audio_path: None,
            language: Language::Ta,
            category: "தெரு விளக்கு".to_string(),
            status: ComplaintStatus::Submitted,
        }
    }

    #[test]
    fn timestamps_are_fixed_width() {
        let at = DateTime::parse_from_rfc3339("2026-10-19T14:30:05Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(encode_timestamp(&at), "2026-10-19T14:30:05.000000Z");
        assert_eq!(decode_timestamp("X", &encode_timestamp(&at)).unwrap(), at);
    }

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let store = memory_store().await;
        let mut input = complaint("1A2B3C4D");
        input.audio_path = Some("uploads/a.webm".to_string());

        let saved = store.save(input.clone()).await.unwrap();
        assert_eq!(saved, ComplaintRecord::stamped(input, saved.created_at));
        assert_eq!(store.get_by_id("1A2B3C4D").await.unwrap(), Some(saved));
        assert_eq!(store.get_by_id("00000000").await.unwrap(), None);
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let store = memory_store().await;
        for id in ["AAAAAAAA", "BBBBBBBB", "CCCCCCCC"] {
            store.save(complaint(id)).await.unwrap();
        }

        let ids: Vec<String> = store
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["CCCCCCCC", "BBBBBBBB", "AAAAAAAA"]);
    }

    #[tokio::test]
    async fn duplicate_id_is_a_conflict() {
        let store = memory_store().await;
        store.save(complaint("DUPLICAT")).await.unwrap();
        assert!(matches!(
            store.save(complaint("DUPLICAT")).await,
            Err(PortError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn status_updates() {
        let store = memory_store().await;
        let saved = store.save(complaint("STATUS01")).await.unwrap();

        store
            .update_status("UNKNOWN1", ComplaintStatus::Resolved)
            .await
            .unwrap();
        assert_eq!(store.get_all().await.unwrap(), vec![saved.clone()]);

        store
            .update_status("STATUS01", ComplaintStatus::Reviewed)
            .await
            .unwrap();
        let updated = store.get_by_id("STATUS01").await.unwrap().unwrap();
        assert_eq!(updated.status, ComplaintStatus::Reviewed);
        assert_eq!(updated.created_at, saved.created_at);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn open_creates_missing_directories() {
        let dir = tempdir().expect("temp dir");
        let db_path = dir.path().join("nested").join("complaints.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());

        let store = SqliteStore::open(&url).await.expect("open file database");
        store.save(complaint("0A1B2C3D")).await.unwrap();
        assert!(db_path.exists());
        drop(store);

        let reopened = SqliteStore::open(&url).await.expect("reopen file database");
        assert!(reopened.get_by_id("0A1B2C3D").await.unwrap().is_some());
    }
}
