use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::Mutex;

use super::{StorageBackend, StoredFile};

#[derive(Debug, Clone)]
struct MemoryFile {
    contents: String,
    created: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    files: BTreeMap<String, MemoryFile>,
    last_created: Option<DateTime<Utc>>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-process backend. Creation stamps are strictly increasing so listing
/// order is deterministic even for writes within the same clock tick.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: Mutex<Inner>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read/list fail until reset.
    pub fn set_fail_reads(&self, fail: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_reads = fail;
        }
    }

    /// Make every subsequent write/remove fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_writes = fail;
        }
    }

    /// All stored paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Synchronous read for assertions.
    pub fn contents(&self, path: &str) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.files.get(path).map(|f| f.contents.clone()))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|e| anyhow!("memory backend lock poisoned: {e}"))
    }
}

fn in_dir(path: &str, dir: &str) -> bool {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        return true;
    }
    path.strip_prefix(dir)
        .is_some_and(|rest| rest.starts_with('/'))
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn read(&self, path: &str) -> Result<Option<String>> {
        let inner = self.lock()?;
        if inner.fail_reads {
            bail!("simulated read failure: {path}");
        }
        Ok(inner.files.get(path).map(|f| f.contents.clone()))
    }

    async fn write(&self, path: &str, contents: &str) -> Result<()> {
        let mut inner = self.lock()?;
        if inner.fail_writes {
            bail!("simulated write failure: {path}");
        }
        let now = Utc::now();
        let created = match inner.last_created {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        inner.last_created = Some(created);
        // Overwrites keep the original creation stamp, like a real file.
        let created = inner.files.get(path).map(|f| f.created).unwrap_or(created);
        inner.files.insert(
            path.to_string(),
            MemoryFile {
                contents: contents.to_string(),
                created,
            },
        );
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<()> {
        let mut inner = self.lock()?;
        if inner.fail_writes {
            bail!("simulated remove failure: {path}");
        }
        inner.files.remove(path);
        Ok(())
    }

    async fn list(&self, dir: &str) -> Result<Vec<StoredFile>> {
        let inner = self.lock()?;
        if inner.fail_reads {
            bail!("simulated list failure: {dir}");
        }
        let prefix_len = dir.trim_end_matches('/').len();
        Ok(inner
            .files
            .iter()
            .filter(|(path, _)| in_dir(path, dir))
            .filter(|(path, _)| {
                let rest = if prefix_len == 0 { path.as_str() } else { &path[prefix_len + 1..] };
                !rest.contains('/')
            })
            .map(|(path, file)| StoredFile {
                path: path.clone(),
                created: file.created,
            })
            .collect())
    }

    async fn remove_dir(&self, dir: &str) -> Result<()> {
        let mut inner = self.lock()?;
        if inner.fail_writes {
            bail!("simulated remove failure: {dir}");
        }
        inner.files.retain(|path, _| !in_dir(path, dir));
        Ok(())
    }
}
