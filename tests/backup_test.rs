mod helpers;

use helpers::{config, date, memory_store, simple_entry};
use nutrilog::config::StorageMode;
use nutrilog::error::StoreError;

#[tokio::test]
async fn retention_keeps_only_the_newest_archives() {
    let mut cfg = config(StorageMode::Both);
    cfg.max_backups = 3;
    let (backend, mut store) = memory_store(cfg).await;

    for d in 1..=5 {
        store
            .save_entry(simple_entry(&format!("e{d}"), date(2026, 9, d)))
            .await
            .unwrap();
    }

    let backups = store.list_backups().await.unwrap();
    let dates: Vec<_> = backups.iter().map(|b| b.date).collect();
    assert_eq!(
        dates,
        vec![
            Some(date(2026, 9, 5)),
            Some(date(2026, 9, 4)),
            Some(date(2026, 9, 3))
        ]
    );
    let archived = backend
        .paths()
        .into_iter()
        .filter(|p| p.starts_with("journal/backups/"))
        .count();
    assert_eq!(archived, 3);
}

#[tokio::test]
async fn backups_can_be_disabled() {
    let mut cfg = config(StorageMode::Both);
    cfg.backups_enabled = false;
    let (backend, mut store) = memory_store(cfg).await;
    store.save_entry(simple_entry("a", date(2026, 9, 1))).await.unwrap();

    assert!(store.list_backups().await.unwrap().is_empty());
    assert!(!backend.paths().iter().any(|p| p.contains("backups")));
}

#[tokio::test]
async fn archive_holds_the_day_after_the_write() {
    let (backend, mut store) = memory_store(config(StorageMode::Both)).await;
    let day = date(2026, 9, 1);
    store.save_entry(simple_entry("a", day)).await.unwrap();
    store.save_entry(simple_entry("b", day)).await.unwrap();

    let newest = &store.list_backups().await.unwrap()[0];
    let raw: serde_json::Value =
        serde_json::from_str(&backend.contents(&newest.path).unwrap()).unwrap();
    assert_eq!(raw["entries"].as_array().unwrap().len(), 2);
    assert_eq!(raw["summary"]["totalCalories"], 400.0);
    assert_eq!(raw["version"], "1.0");
}

#[tokio::test]
async fn restore_replaces_the_day_and_is_itself_backed_up() {
    let (_backend, mut store) = memory_store(config(StorageMode::Both)).await;
    let day = date(2026, 9, 1);
    store.save_entry(simple_entry("a", day)).await.unwrap();
    store.save_entry(simple_entry("b", day)).await.unwrap();
    store.delete_entry("a", Some(day)).await.unwrap();
    assert_eq!(store.get_entries_for_date(day).await.len(), 1);

    // Newest first: [after delete, after b, after a].
    let backups = store.list_backups().await.unwrap();
    assert_eq!(backups.len(), 3);
    let restored = store.restore_backup(&backups[1].name).await.unwrap();
    assert_eq!(restored, 2);

    let ids: Vec<String> = store
        .get_entries_for_date(day)
        .await
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(store.get_daily_summary(day).await.total_calories, 400.0);
    assert_eq!(store.list_backups().await.unwrap().len(), 4);
}

#[tokio::test]
async fn restoring_a_missing_archive_is_an_error() {
    let (_backend, mut store) = memory_store(config(StorageMode::Both)).await;
    let err = store.restore_backup("2026-09-01_backup_x.json").await.unwrap_err();
    assert!(matches!(err, StoreError::BackupNotFound(_)));
}

#[tokio::test]
async fn restore_refuses_names_that_leave_the_backup_folder() {
    let (backend, mut store) = memory_store(config(StorageMode::Both)).await;
    store.save_entry(simple_entry("a", date(2026, 9, 1))).await.unwrap();
    let before = backend.contents("state.json").unwrap();

    let err = store.restore_backup("../../state.json").await.unwrap_err();
    assert!(matches!(err, StoreError::Storage(_)));
    assert!(err.to_string().contains("invalid backup name"), "{err}");
    assert_eq!(backend.contents("state.json").unwrap(), before);
}
