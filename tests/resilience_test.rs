mod helpers;

use anyhow::{bail, Result};
use async_trait::async_trait;
use helpers::{config, date, memory_store, reopen, simple_entry};
use nutrilog::config::StorageMode;
use nutrilog::error::StoreError;
use nutrilog::journal::{DailyNutritionSummary, EntryStore};
use nutrilog::storage::memory::MemoryBackend;
use nutrilog::storage::{StorageBackend, StoredFile};
use std::sync::Arc;

/// Delegates to a memory backend but refuses every write under a backup folder.
struct NoBackups(MemoryBackend);

#[async_trait]
impl StorageBackend for NoBackups {
    async fn read(&self, path: &str) -> Result<Option<String>> {
        self.0.read(path).await
    }

    async fn write(&self, path: &str, contents: &str) -> Result<()> {
        if path.contains("/backups/") {
            bail!("backup volume full");
        }
        self.0.write(path, contents).await
    }

    async fn remove(&self, path: &str) -> Result<()> {
        self.0.remove(path).await
    }

    async fn list(&self, dir: &str) -> Result<Vec<StoredFile>> {
        self.0.list(dir).await
    }

    async fn remove_dir(&self, dir: &str) -> Result<()> {
        self.0.remove_dir(dir).await
    }
}

#[tokio::test]
async fn failed_load_returns_empty_without_caching() {
    let cfg = config(StorageMode::Markdown);
    let (backend, mut writer) = memory_store(cfg.clone()).await;
    let day = date(2026, 8, 1);
    writer.save_entry(simple_entry("a", day)).await.unwrap();

    let mut reader = reopen(&backend, cfg).await;
    backend.set_fail_reads(true);
    assert!(reader.get_entries_for_date(day).await.is_empty());
    assert_eq!(reader.diagnostics().load_failures, 1);

    // The failure was not cached: a later read retries.
    backend.set_fail_reads(false);
    assert_eq!(reader.get_entries_for_date(day).await.len(), 1);
}

#[tokio::test]
async fn failed_load_gives_zero_summary_that_is_not_cached() {
    let cfg = config(StorageMode::Markdown);
    let (backend, mut writer) = memory_store(cfg.clone()).await;
    let day = date(2026, 8, 1);
    writer.save_entry(simple_entry("a", day)).await.unwrap();

    let mut reader = reopen(&backend, cfg).await;
    backend.set_fail_reads(true);
    assert_eq!(
        reader.get_daily_summary(day).await,
        DailyNutritionSummary::empty(day)
    );

    backend.set_fail_reads(false);
    let summary = reader.get_daily_summary(day).await;
    assert_eq!(summary.total_calories, 200.0);
    assert_eq!(summary.entry_count, 1);
}

#[tokio::test]
async fn save_into_unreadable_day_fails_without_clobbering() {
    let cfg = config(StorageMode::Markdown);
    let (backend, mut writer) = memory_store(cfg.clone()).await;
    let day = date(2026, 8, 1);
    writer.save_entry(simple_entry("a", day)).await.unwrap();
    let before = backend.contents("journal/2026-08-01.md").unwrap();

    let mut other = reopen(&backend, cfg).await;
    backend.set_fail_reads(true);
    let err = other.save_entry(simple_entry("b", day)).await.unwrap_err();
    assert!(matches!(err, StoreError::Storage(_)));
    backend.set_fail_reads(false);

    assert_eq!(backend.contents("journal/2026-08-01.md").unwrap(), before);
    assert_eq!(other.get_entries_for_date(day).await.len(), 1);
}

#[tokio::test]
async fn write_failure_surfaces_but_cache_is_ahead_of_disk() {
    let (backend, mut store) = memory_store(config(StorageMode::Both)).await;
    let day = date(2026, 8, 1);

    backend.set_fail_writes(true);
    let err = store.save_entry(simple_entry("a", day)).await.unwrap_err();
    assert!(matches!(err, StoreError::Storage(_)));
    assert!(err.to_string().contains("state.json"), "{err}");

    // Not rolled back.
    assert_eq!(store.get_entries_for_date(day).await.len(), 1);
    assert!(backend.paths().is_empty());
}

#[tokio::test]
async fn backup_failure_does_not_fail_the_save() {
    let backend = Arc::new(NoBackups(MemoryBackend::new()));
    let mut store = EntryStore::open(backend.clone(), config(StorageMode::Both))
        .await
        .unwrap();
    let day = date(2026, 8, 1);

    let saved = store.save_entry(simple_entry("a", day)).await.unwrap();
    assert_eq!(saved.id, "a");
    assert!(backend.0.contents("journal/2026-08-01.md").is_some());
    assert!(store.list_backups().await.unwrap().is_empty());
}

#[tokio::test]
async fn corrupt_state_fails_open() {
    let backend = Arc::new(MemoryBackend::new());
    backend.write("state.json", "{\"dailyEntries\": [").await.unwrap();

    let result = EntryStore::open(backend.clone(), config(StorageMode::Both)).await;
    assert!(result.is_err());
    // Left for the user to repair.
    assert_eq!(
        backend.contents("state.json").as_deref(),
        Some("{\"dailyEntries\": [")
    );
}
