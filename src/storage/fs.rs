use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{StorageBackend, StoredFile};
use crate::config::join_path;

/// Filesystem backend rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

#[async_trait]
impl StorageBackend for FsBackend {
    async fn read(&self, path: &str) -> Result<Option<String>> {
        let full = self.resolve(path);
        match tokio::fs::read_to_string(&full).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", full.display())),
        }
    }

    /// Uses atomic write (tmp + rename).
    async fn write(&self, path: &str, contents: &str) -> Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }

        let tmp_path = full.with_extension("tmp");
        tokio::fs::write(&tmp_path, contents)
            .await
            .with_context(|| format!("failed to write temp file: {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &full)
            .await
            .with_context(|| format!("failed to rename temp file to {}", full.display()))?;
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<()> {
        let full = self.resolve(path);
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", full.display())),
        }
    }

    async fn list(&self, dir: &str) -> Result<Vec<StoredFile>> {
        let full = self.resolve(dir);
        let mut read_dir = match tokio::fs::read_dir(&full).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to list {}", full.display()))
            }
        };

        let mut files = Vec::new();
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .with_context(|| format!("failed to list {}", full.display()))?
        {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            // Birth time is not available everywhere; mtime is the closest stand-in.
            let created = metadata.created().or_else(|_| metadata.modified())?;
            let name = entry.file_name().to_string_lossy().into_owned();
            files.push(StoredFile {
                path: join_path(dir, &name),
                created: DateTime::<Utc>::from(created),
            });
        }
        Ok(files)
    }

    async fn remove_dir(&self, dir: &str) -> Result<()> {
        let full = self.resolve(dir);
        match tokio::fs::remove_dir_all(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", full.display())),
        }
    }
}
