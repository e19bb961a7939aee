mod helpers;

use helpers::{config, date, memory_store, reopen, simple_entry};
use nutrilog::config::StorageMode;
use nutrilog::journal::ImportPayload;

#[tokio::test]
async fn import_is_idempotent_by_id() {
    let (_backend, mut store) = memory_store(config(StorageMode::Both)).await;
    let entries = vec![
        simple_entry("a", date(2026, 4, 1)),
        simple_entry("b", date(2026, 4, 1)),
        simple_entry("c", date(2026, 4, 2)),
    ];

    let first = store.import_entries(entries.clone()).await;
    assert_eq!((first.imported, first.skipped, first.errors), (3, 0, 0));

    let second = store.import_entries(entries).await;
    assert_eq!((second.imported, second.skipped, second.errors), (0, 3, 0));
    assert_eq!(store.get_entries_for_date(date(2026, 4, 1)).await.len(), 2);
}

#[tokio::test]
async fn import_counts_invalid_entries_and_continues() {
    let (_backend, mut store) = memory_store(config(StorageMode::Both)).await;
    let mut bad = simple_entry("bad", date(2026, 4, 1));
    bad.food_item.serving_size = 0.0;
    let unnamed = simple_entry("", date(2026, 4, 1));

    let report = store
        .import_entries(vec![bad, unnamed, simple_entry("ok", date(2026, 4, 1))])
        .await;
    assert_eq!(report.imported, 2);
    assert_eq!(report.errors, 1);

    let entries = store.get_entries_for_date(date(2026, 4, 1)).await;
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| !e.id.is_empty()));
}

#[tokio::test]
async fn export_output_imports_into_a_fresh_journal() {
    let (_backend, mut source) = memory_store(config(StorageMode::Both)).await;
    source.save_entry(simple_entry("a", date(2026, 4, 1))).await.unwrap();
    source.save_entry(simple_entry("b", date(2026, 4, 3))).await.unwrap();
    let json = serde_json::to_string(
        &source
            .export_range(Some(date(2026, 4, 1)), Some(date(2026, 4, 3)))
            .await,
    )
    .unwrap();

    let payload: ImportPayload = serde_json::from_str(&json).unwrap();
    let (_backend, mut target) = memory_store(config(StorageMode::Markdown)).await;
    let report = target.import_entries(payload.entries).await;
    assert_eq!(report.imported, 2);
    assert_eq!(
        target
            .get_entries_for_range(date(2026, 4, 1), date(2026, 4, 3))
            .await
            .len(),
        2
    );
}

#[tokio::test]
async fn clear_all_removes_documents_backups_and_entries() {
    let cfg = config(StorageMode::Both);
    let (backend, mut store) = memory_store(cfg.clone()).await;
    store.save_entry(simple_entry("a", date(2026, 4, 1))).await.unwrap();
    store.save_entry(simple_entry("b", date(2026, 4, 2))).await.unwrap();

    store.clear_all().await.unwrap();

    assert!(store.get_entries_for_date(date(2026, 4, 1)).await.is_empty());
    assert!(store.list_backups().await.unwrap().is_empty());
    assert_eq!(backend.paths(), vec!["state.json".to_string()]);

    let mut reopened = reopen(&backend, cfg).await;
    assert!(reopened.dates_with_entries().is_empty());
    assert!(reopened.get_entries_for_date(date(2026, 4, 2)).await.is_empty());
}

#[tokio::test]
async fn clear_all_with_empty_root_only_touches_journal_files() {
    let mut cfg = config(StorageMode::Both);
    cfg.root = String::new();
    let (backend, mut store) = memory_store(cfg).await;
    store.save_entry(simple_entry("a", date(2026, 4, 1))).await.unwrap();
    nutrilog::storage::StorageBackend::write(backend.as_ref(), "config.toml", "")
        .await
        .unwrap();
    assert!(backend.paths().contains(&"2026-04-01.md".to_string()));

    store.clear_all().await.unwrap();

    assert_eq!(
        backend.paths(),
        vec!["config.toml".to_string(), "state.json".to_string()]
    );
}
