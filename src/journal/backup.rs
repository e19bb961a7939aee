//! Backup manager: timestamped day snapshots with global retention.
//!
//! Every successful day-level persist writes
//! `<root>/backups/<date>_backup_<timestamp>.json`. After each snapshot the
//! archive folder is listed, sorted newest-first by creation time, and every
//! archive beyond `max_backups` is deleted, regardless of which day it holds.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::{join_path, StorageConfig};
use crate::journal::types::{DailyNutritionSummary, FoodEntry};
use crate::storage::{StorageBackend, StoredFile};

/// Format version stamped into every archive and export.
pub const BACKUP_VERSION: &str = "1.0";

const BACKUP_MARKER: &str = "_backup_";

/// Contents of one archive file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
    pub date: NaiveDate,
    pub entries: Vec<FoodEntry>,
    pub summary: DailyNutritionSummary,
    pub backup_timestamp: DateTime<Utc>,
    pub version: String,
}

/// An archive found in the backup folder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackupInfo {
    pub name: String,
    pub path: String,
    /// Day the archive holds, parsed from the file name.
    pub date: Option<NaiveDate>,
    pub created: DateTime<Utc>,
}

impl From<StoredFile> for BackupInfo {
    fn from(file: StoredFile) -> Self {
        let name = file.name().to_string();
        let date = name
            .split_once(BACKUP_MARKER)
            .and_then(|(d, _)| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
        Self {
            name,
            path: file.path,
            date,
            created: file.created,
        }
    }
}

pub struct BackupManager {
    backend: Arc<dyn StorageBackend>,
    dir: String,
    /// 0 disables pruning.
    max_backups: usize,
    last_stamp: Option<DateTime<Utc>>,
}

impl BackupManager {
    pub fn new(backend: Arc<dyn StorageBackend>, config: &StorageConfig) -> Self {
        Self {
            backend,
            dir: config.backup_dir(),
            max_backups: config.max_backups,
            last_stamp: None,
        }
    }

    /// Write a snapshot of one day and enforce retention. Returns the archive path.
    pub async fn snapshot(
        &mut self,
        date: NaiveDate,
        entries: &[FoodEntry],
        summary: &DailyNutritionSummary,
    ) -> Result<String> {
        let snapshot = BackupSnapshot {
            date,
            entries: entries.to_vec(),
            summary: summary.clone(),
            backup_timestamp: self.next_stamp(),
            version: BACKUP_VERSION.to_string(),
        };
        let stamp = snapshot.backup_timestamp.format("%Y-%m-%dT%H-%M-%S%.6fZ");
        let path = join_path(&self.dir, &format!("{date}{BACKUP_MARKER}{stamp}.json"));

        let json = serde_json::to_string_pretty(&snapshot)?;
        self.backend
            .write(&path, &json)
            .await
            .with_context(|| format!("failed to write backup {path}"))?;
        debug!(path = %path, entries = entries.len(), "backup written");

        self.prune().await?;
        Ok(path)
    }

    /// Strictly increasing so two snapshots never share a file name.
    fn next_stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + chrono::Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    /// Archives in the backup folder, newest first.
    pub async fn list(&self) -> Result<Vec<BackupInfo>> {
        let mut backups: Vec<BackupInfo> = self
            .backend
            .list(&self.dir)
            .await?
            .into_iter()
            .filter(|f| f.name().ends_with(".json") && f.name().contains(BACKUP_MARKER))
            .map(BackupInfo::from)
            .collect();
        // File names carry a microsecond timestamp; they break creation-time ties.
        backups.sort_by(|a, b| {
            b.created
                .cmp(&a.created)
                .then_with(|| backup_stamp(&b.name).cmp(&backup_stamp(&a.name)))
        });
        Ok(backups)
    }

    /// Delete every archive beyond the retention count. Returns how many were deleted.
    pub async fn prune(&self) -> Result<usize> {
        if self.max_backups == 0 {
            return Ok(0);
        }
        let backups = self.list().await?;
        let mut deleted = 0;
        for old in backups.iter().skip(self.max_backups) {
            match self.backend.remove(&old.path).await {
                Ok(()) => deleted += 1,
                Err(e) => warn!(path = %old.path, error = %e, "failed to delete old backup"),
            }
        }
        if deleted > 0 {
            debug!(deleted, kept = self.max_backups, "pruned backups");
        }
        Ok(deleted)
    }

    /// Read an archive by file name. `Ok(None)` if it does not exist.
    ///
    /// Only bare file names inside the backup folder are accepted.
    pub async fn load(&self, name: &str) -> Result<Option<BackupSnapshot>> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            bail!("invalid backup name: {name}");
        }
        let path = join_path(&self.dir, name);
        match self.backend.read(&path).await? {
            Some(json) => Ok(Some(
                serde_json::from_str(&json)
                    .with_context(|| format!("failed to parse backup {path}"))?,
            )),
            None => Ok(None),
        }
    }
}

fn backup_stamp(name: &str) -> &str {
    name.split_once(BACKUP_MARKER).map(|(_, s)| s).unwrap_or(name)
}
