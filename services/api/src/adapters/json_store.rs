//! services/api/src/adapters/json_store.rs
//!
//! A `ComplaintStore` backed by a single pretty-printed JSON array file.
//! Every operation re-reads the whole file; writes replace it through a
//! sibling temp file so a crash never leaves a half-written array behind.

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use complaint_intake_core::domain::{ComplaintRecord, ComplaintStatus, Language, NewComplaint};
use complaint_intake_core::ports::{ComplaintStore, PortError, PortResult};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A file adapter that implements the `ComplaintStore` port.
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles issued through this instance.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens (creating if needed) the store at `path`, including missing parent directories.
    pub async fn open(path: impl Into<PathBuf>) -> PortResult<Self> {
        let path = path.into();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| io_error("create store directory", dir, e))?;
        }

        let store = Self {
            path,
            write_lock: Mutex::new(()),
        };
        // Fail at startup rather than on the first request if the file is unreadable.
        let existing = store.read_all().await?;
        info!(path = %store.path.display(), records = existing.len(), "Opened JSON complaint store");
        Ok(store)
    }

    async fn read_all(&self) -> PortResult<Vec<StoredComplaint>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("read", &self.path, e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            PortError::Unexpected(format!(
                "Complaint file {} is not a valid JSON array: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn write_all(&self, records: &[StoredComplaint]) -> PortResult<()> {
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| PortError::Unexpected(format!("Failed to encode complaints: {}", e)))?;

        replace_file(&self.path, &json).await
    }
}

/// Writes `bytes` to a `.tmp` sibling of `path` and renames it over `path`.
/// The temp file is removed again if the rename fails.
async fn replace_file(path: &Path, bytes: &[u8]) -> PortResult<()> {
    let mut tmp = path.to_path_buf().into_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, bytes)
        .await
        .map_err(|e| io_error("write", &tmp, e))?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(io_error("replace", path, e));
    }
    Ok(())
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> PortError {
    PortError::Unexpected(format!("Failed to {} {}: {}", action, path.display(), e))
}

//=========================================================================================
// "Impure" File Record Struct
//=========================================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredComplaint {
    id: String,
    complaint_text: String,
    transcribed_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audio_path: Option<String>,
    language: String,
    category: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoredComplaint {
    fn from_domain(record: &ComplaintRecord) -> Self {
        Self {
            id: record.id.clone(),
            complaint_text: record.complaint_text.clone(),
            transcribed_text: record.transcribed_text.clone(),
            audio_path: record.audio_path.clone(),
            language: record.language.as_str().to_string(),
            category: record.category.clone(),
            status: record.status.as_str().to_string(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn to_domain(self) -> PortResult<ComplaintRecord> {
        let language: Language = self
            .language
            .parse()
            .map_err(|e| PortError::Unexpected(format!("Complaint {}: {}", self.id, e)))?;
        let status: ComplaintStatus = self
            .status
            .parse()
            .map_err(|e| PortError::Unexpected(format!("Complaint {}: {}", self.id, e)))?;
        Ok(ComplaintRecord {
            id: self.id,
            complaint_text: self.complaint_text,
            transcribed_text: self.transcribed_text,
            audio_path: self.audio_path,
            language,
            category: self.category,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

//=========================================================================================
// `ComplaintStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ComplaintStore for JsonFileStore {
    async fn save(&self, complaint: NewComplaint) -> PortResult<ComplaintRecord> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        if records.iter().any(|r| r.id == complaint.id) {
            return Err(PortError::Conflict(format!("Complaint {}", complaint.id)));
        }

        let record = ComplaintRecord::stamped(complaint, Utc::now().trunc_subsecs(6));
        records.push(StoredComplaint::from_domain(&record));
        self.write_all(&records).await?;

        debug!(id = %record.id, "Complaint saved to JSON store");
        Ok(record)
    }

    async fn get_by_id(&self, id: &str) -> PortResult<Option<ComplaintRecord>> {
        self.read_all()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .map(StoredComplaint::to_domain)
            .transpose()
    }

    async fn get_all(&self) -> PortResult<Vec<ComplaintRecord>> {
        let mut records = self.read_all().await?;
        // Reverse first so that equal timestamps keep newest-inserted first under the stable sort.
        records.reverse();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.into_iter().map(StoredComplaint::to_domain).collect()
    }

    async fn update_status(&self, id: &str, status: ComplaintStatus) -> PortResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            debug!(id, "Status update for unknown complaint ignored");
            return Ok(());
        };

        record.status = status.as_str().to_string();
        record.updated_at = Utc::now().trunc_subsecs(6).max(record.created_at);
        self.write_all(&records).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn complaint(id: &str) -> NewComplaint {
        NewComplaint {
            id: id.to_string(),
            complaint_text: format!("letter {}", id),
            transcribed_text: "no water supply in my street for 3 days".to_string(),
            audio_path: None,
            language: Language::En,
            category: "Water Supply".to_string(),
            status: ComplaintStatus::Submitted,
        }
    }

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let dir = tempdir().expect("temp dir");
        let store = JsonFileStore::open(dir.path().join("complaints.json")).await.unwrap();

        let mut input = complaint("A1B2C3D4");
        input.audio_path = Some("uploads/clip.webm".to_string());
        input.language = Language::Ta;
        let saved = store.save(input.clone()).await.unwrap();

        assert_eq!(saved.created_at, saved.updated_at);
        assert_eq!(saved, ComplaintRecord::stamped(input, saved.created_at));
        assert_eq!(store.get_by_id("A1B2C3D4").await.unwrap(), Some(saved));
        assert_eq!(store.get_by_id("MISSING0").await.unwrap(), None);
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let dir = tempdir().expect("temp dir");
        let store = JsonFileStore::open(dir.path().join("complaints.json")).await.unwrap();

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
    async fn updates_status_and_refreshes_timestamp() {
        let dir = tempdir().expect("temp dir");
        let store = JsonFileStore::open(dir.path().join("complaints.json")).await.unwrap();
        let saved = store.save(complaint("DDDDDDDD")).await.unwrap();

        store
            .update_status("DDDDDDDD", ComplaintStatus::Resolved)
            .await
            .unwrap();

        let updated = store.get_by_id("DDDDDDDD").await.unwrap().unwrap();
        assert_eq!(updated.status, ComplaintStatus::Resolved);
        assert_eq!(updated.created_at, saved.created_at);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn unknown_status_update_changes_nothing() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("complaints.json");
        let store = JsonFileStore::open(&path).await.unwrap();
        store.save(complaint("EEEEEEEE")).await.unwrap();
        let before = std::fs::read(&path).unwrap();

        store
            .update_status("NOPE0000", ComplaintStatus::Reviewed)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn rejects_duplicate_ids() {
        let dir = tempdir().expect("temp dir");
        let store = JsonFileStore::open(dir.path().join("complaints.json")).await.unwrap();
        store.save(complaint("FFFFFFFF")).await.unwrap();

        let err = store.save(complaint("FFFFFFFF")).await.unwrap_err();
        assert!(matches!(err, PortError::Conflict(_)));
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn records_survive_reopening() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("data").join("complaints.json");
        {
            let store = JsonFileStore::open(&path).await.unwrap();
            store.save(complaint("GGGGGGGG")).await.unwrap();
        }

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let all = reopened.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "GGGGGGGG");
        assert_eq!(all[0].status, ComplaintStatus::Submitted);
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("complaints.json");
        std::fs::write(&path, "{ not an array").unwrap();

        assert!(matches!(
            JsonFileStore::open(&path).await,
            Err(PortError::Unexpected(_))
        ));
    }

    #[tokio::test]
    async fn failed_replace_leaves_no_temp_file() {
        let dir = tempdir().expect("temp dir");
        // A non-empty directory cannot be replaced by a file.
        let target = dir.path().join("complaints.json");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), b"x").unwrap();

        let err = replace_file(&target, b"[]").await.unwrap_err();
        assert!(matches!(err, PortError::Unexpected(_)));
        assert!(!dir.path().join("complaints.json.tmp").exists());
        assert!(target.join("keep").exists());
    }
}
