//! Persistence backend abstraction.
//!
//! The journal never touches the filesystem directly. It reads and writes
//! `/`-separated paths relative to a backend root through [`StorageBackend`],
//! which the host supplies. [`fs::FsBackend`] is the on-disk implementation;
//! [`memory::MemoryBackend`] keeps everything in process and can inject faults.

pub mod fs;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A file found by [`StorageBackend::list`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    /// Path relative to the backend root, including the listed directory.
    pub path: String,
    /// Creation instant as reported by the backend.
    pub created: DateTime<Utc>,
}

impl StoredFile {
    /// Final path component.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// File/key-value primitives the journal persists through.
///
/// Individual calls are assumed to be serialized by the implementation; the
/// journal performs no locking of its own.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read a whole file. `Ok(None)` when it does not exist.
    async fn read(&self, path: &str) -> Result<Option<String>>;

    /// Create or replace a file, creating parent directories as needed.
    async fn write(&self, path: &str, contents: &str) -> Result<()>;

    /// Delete a file. Deleting a missing file succeeds.
    async fn remove(&self, path: &str) -> Result<()>;

    /// Files directly inside `dir`. A missing directory lists as empty.
    async fn list(&self, dir: &str) -> Result<Vec<StoredFile>>;

    /// Recursively delete `dir`. Deleting a missing directory succeeds.
    async fn remove_dir(&self, dir: &str) -> Result<()>;
}
