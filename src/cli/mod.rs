pub mod backups;
pub mod day;
pub mod delete;
pub mod export;
pub mod goals;
pub mod import;
pub mod log;
pub mod reset;
pub mod trend;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::sync::Arc;

use nutrilog::config::NutrilogConfig;
use nutrilog::journal::store::today;
use nutrilog::journal::types::parse_date;
use nutrilog::journal::EntryStore;
use nutrilog::storage::fs::FsBackend;

/// Open the journal rooted at the configured data directory.
pub async fn open_store(config: &NutrilogConfig) -> Result<EntryStore> {
    let data_dir = config.resolved_data_dir();
    let backend = Arc::new(FsBackend::new(&data_dir));
    let store = EntryStore::open(backend, config.storage.clone())
        .await
        .with_context(|| format!("failed to open journal at {}", data_dir.display()))?;
    tracing::debug!(data_dir = %data_dir.display(), "journal ready");
    Ok(store)
}

/// Parse an optional ISO date argument, defaulting to today.
pub fn date_or_today(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(today()),
    }
}
