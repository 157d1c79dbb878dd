//! Per-user message quota persistence
//!
//! One JSON record under the platform data directory, keyed by the
//! session fingerprint. The record is written back immediately after
//! every mutation so a crash mid-session cannot refund consumed quota.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{FolioError, Result};

/// Messages a user may send before the session is flagged
pub const MAX_USER_MESSAGES: u32 = 5;

/// Fixed storage file name, shared across sessions
const QUOTA_FILE_NAME: &str = "chat_user_status.json";

/// Persisted quota state for one fingerprint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuotaRecord {
    pub fingerprint: String,
    pub message_count: u32,
    pub is_banned: bool,
    pub last_activity: DateTime<Utc>,
}

impl UserQuotaRecord {
    /// Fresh record for a fingerprint with no history
    pub fn new(fingerprint: &str) -> Self {
        Self {
            fingerprint: fingerprint.to_string(),
            message_count: 0,
            is_banned: false,
            last_activity: Utc::now(),
        }
    }

    /// Count one sent message and re-derive the banned flag.
    ///
    /// Invariant: `is_banned` is true exactly when the count has reached
    /// [`MAX_USER_MESSAGES`]. The flag is stored rather than recomputed on
    /// load so a future limit change cannot retroactively unban anyone.
    pub fn record_message(&mut self) {
        self.message_count += 1;
        self.is_banned = self.message_count >= MAX_USER_MESSAGES;
        self.last_activity = Utc::now();
    }

    /// Messages still available this session
    pub fn remaining(&self) -> u32 {
        MAX_USER_MESSAGES.saturating_sub(self.message_count)
    }
}

/// File-backed store for the quota record
pub struct QuotaStore {
    path: PathBuf,
}

impl QuotaStore {
    /// Store at the platform data directory
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "folio", "folio").ok_or_else(|| {
            FolioError::QuotaStoreError("Could not determine data directory".to_string())
        })?;

        let dir = dirs.data_dir();
        fs::create_dir_all(dir)?;

        Ok(Self {
            path: dir.join(QUOTA_FILE_NAME),
        })
    }

    /// Store at an explicit path
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the stored record, if any.
    ///
    /// A missing or unreadable file yields `None`; the caller starts over
    /// with a fresh record. A stored record for a different fingerprint is
    /// also `None`, matching a keyed lookup miss.
    pub fn load(&self, fingerprint: &str) -> Option<UserQuotaRecord> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return None,
        };

        let record: UserQuotaRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!("Corrupt quota record ignored: {}", e);
                return None;
            }
        };

        if record.fingerprint != fingerprint {
            debug!("Quota record belongs to another fingerprint, starting fresh");
            return None;
        }

        Some(record)
    }

    /// Write the record back to disk
    pub fn save(&self, record: &UserQuotaRecord) -> Result<()> {
        let raw = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, raw)
            .map_err(|e| FolioError::QuotaStoreError(format!("Failed to persist quota: {e}")))?;
        debug!(
            "Quota saved: {} messages, banned={}",
            record.message_count, record.is_banned
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, QuotaStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = QuotaStore::at(dir.path().join(QUOTA_FILE_NAME));
        (dir, store)
    }

    #[test]
    fn test_missing_file_yields_none() {
        let (_dir, store) = temp_store();
        assert!(store.load("abc").is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (_dir, store) = temp_store();

        let mut record = UserQuotaRecord::new("abc");
        record.record_message();
        store.save(&record).unwrap();

        let loaded = store.load("abc").unwrap();
        assert_eq!(loaded.message_count, 1);
        assert!(!loaded.is_banned);
    }

    #[test]
    fn test_foreign_fingerprint_is_a_miss() {
        let (_dir, store) = temp_store();

        store.save(&UserQuotaRecord::new("abc")).unwrap();
        assert!(store.load("xyz").is_none());
    }

    #[test]
    fn test_corrupt_file_yields_none() {
        let (_dir, store) = temp_store();

        std::fs::write(&store.path, "{not json").unwrap();
        assert!(store.load("abc").is_none());
    }

    #[test]
    fn test_ban_at_limit() {
        let mut record = UserQuotaRecord::new("abc");
        for _ in 0..MAX_USER_MESSAGES - 1 {
            record.record_message();
        }
        assert!(!record.is_banned);
        assert_eq!(record.remaining(), 1);

        record.record_message();
        assert!(record.is_banned);
        assert_eq!(record.remaining(), 0);
    }
}
