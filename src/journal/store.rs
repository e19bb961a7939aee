//! Entry store: date-keyed cache over dual-format persistence.
//!
//! [`EntryStore`] owns two caches: entries per day and computed summaries per
//! day. Any mutation of a day's entries removes that day's cached summary, then
//! rewrites the whole day to the configured representations (the aggregate
//! `state.json` and/or the per-day Markdown document) and snapshots it through
//! the [`BackupManager`].
//!
//! Writes are not transactional across the two representations. When a persist
//! call fails the cache has already been updated and is not rolled back, so an
//! error from a write means "memory may be ahead of disk".
//!
//! Two overlapping writes to the same day from different callers would race
//! (last writer wins). Callers share the store behind a single mutex; a
//! per-day lock would be needed before allowing concurrent writers.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::backup::{BackupInfo, BackupManager, BACKUP_VERSION};
use super::document::{document_path, parse_day_document, render_day_document};
use super::state::{load_state, save_state, PersistedState};
use super::types::{DailyNutritionSummary, FoodEntry};
use crate::analysis::calculate_summary;
use crate::config::StorageConfig;
use crate::error::StoreError;
use crate::storage::StorageBackend;

/// How far back a delete without an explicit date searches, in days (today included).
pub const DELETE_LOOKBACK_DAYS: i64 = 30;

/// Window used by [`EntryStore::export_range`] when no start is given.
pub const DEFAULT_EXPORT_DAYS: i64 = 365;

/// Counters describing how persisted days were read back.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadDiagnostics {
    /// Day documents read and parsed.
    pub documents_parsed: usize,
    /// Raw-data lines dropped because they did not parse.
    pub lines_skipped: usize,
    /// Day loads that failed and returned an empty list.
    pub load_failures: usize,
}

/// Entries and summaries for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub entries: Vec<FoodEntry>,
    pub summaries: Vec<DailyNutritionSummary>,
    pub export_instant: DateTime<Utc>,
    pub version: String,
}

/// Import file format. Accepts an export payload as well.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportPayload {
    pub entries: Vec<FoodEntry>,
}

/// Outcome of [`EntryStore::import_entries`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub errors: usize,
}

pub struct EntryStore {
    backend: Arc<dyn StorageBackend>,
    config: StorageConfig,
    state: PersistedState,
    entries: HashMap<NaiveDate, Vec<FoodEntry>>,
    summaries: HashMap<NaiveDate, DailyNutritionSummary>,
    backups: BackupManager,
    diagnostics: LoadDiagnostics,
}

/// Today in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Inclusive day range; empty when `start > end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

fn sort_by_timestamp(entries: &mut [FoodEntry]) {
    entries.sort_by_key(|e| e.timestamp);
}

impl EntryStore {
    /// Open the store and eagerly load the aggregate state.
    ///
    /// When the mode maintains the aggregate, every day in it is cached up
    /// front. A corrupt aggregate fails the open rather than being overwritten
    /// by the next write.
    pub async fn open(
        backend: Arc<dyn StorageBackend>,
        config: StorageConfig,
    ) -> Result<Self, StoreError> {
        let state = load_state(backend.as_ref()).await?;

        let mut entries = HashMap::new();
        if config.mode.writes_structured() {
            for (date, day) in &state.daily_entries {
                let mut day = day.clone();
                sort_by_timestamp(&mut day);
                entries.insert(*date, day);
            }
        }

        info!(
            mode = %config.mode,
            root = %config.root,
            cached_days = entries.len(),
            "journal opened"
        );

        Ok(Self {
            backups: BackupManager::new(Arc::clone(&backend), &config),
            backend,
            config,
            state,
            entries,
            summaries: HashMap::new(),
            diagnostics: LoadDiagnostics::default(),
        })
    }

    /// Drop the store. Nothing is flushed; every write already persisted itself.
    pub fn close(self) {
        info!(
            cached_days = self.entries.len(),
            cached_summaries = self.summaries.len(),
            "journal closed"
        );
    }

    pub fn diagnostics(&self) -> &LoadDiagnostics {
        &self.diagnostics
    }

    /// Cached days that currently hold at least one entry, ascending.
    pub fn dates_with_entries(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .entries
            .iter()
            .filter(|(_, day)| !day.is_empty())
            .map(|(date, _)| *date)
            .collect();
        dates.sort();
        dates
    }

    // ── Write path ──────────────────────────────────────────────────────────

    /// Insert or replace (by id) an entry, then persist its day.
    ///
    /// Assigns a UUID v7 when the id is empty. Returns the stored entry.
    pub async fn save_entry(&mut self, mut entry: FoodEntry) -> Result<FoodEntry, StoreError> {
        entry.validate()?;
        if entry.id.trim().is_empty() {
            entry.id = uuid::Uuid::now_v7().to_string();
        }
        let date = entry.date;

        // Saving into a day that was never read would otherwise overwrite it on disk.
        self.ensure_loaded(date).await?;

        let day = self.entries.entry(date).or_default();
        match day.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry.clone(),
            None => day.push(entry.clone()),
        }
        sort_by_timestamp(day);
        self.summaries.remove(&date);

        debug!(id = %entry.id, date = %date, meal = %entry.meal, "entry saved to cache");
        self.persist_day(date).await?;
        Ok(entry)
    }

    /// Replace an entry within its already-cached day.
    ///
    /// Returns `false` without touching anything if the day was never loaded
    /// or holds no entry with that id.
    pub async fn update_entry(&mut self, entry: FoodEntry) -> Result<bool, StoreError> {
        entry.validate()?;
        let date = entry.date;
        let Some(day) = self.entries.get_mut(&date) else {
            return Ok(false);
        };
        let Some(existing) = day.iter_mut().find(|e| e.id == entry.id) else {
            return Ok(false);
        };
        *existing = entry;
        sort_by_timestamp(day);
        self.summaries.remove(&date);

        self.persist_day(date).await?;
        Ok(true)
    }

    /// Remove an entry by id.
    ///
    /// Without `date`, only the last [`DELETE_LOOKBACK_DAYS`] days (today
    /// included) are searched; older entries need their date.
    pub async fn delete_entry(
        &mut self,
        id: &str,
        date: Option<NaiveDate>,
    ) -> Result<bool, StoreError> {
        let candidates: Vec<NaiveDate> = match date {
            Some(d) => vec![d],
            None => {
                let today = today();
                (0..DELETE_LOOKBACK_DAYS)
                    .map(|back| today - Duration::days(back))
                    .collect()
            }
        };

        for date in candidates {
            // Populates the cache for this day.
            self.get_entries_for_date(date).await;
            let Some(day) = self.entries.get_mut(&date) else {
                continue;
            };
            let before = day.len();
            day.retain(|e| e.id != id);
            if day.len() == before {
                continue;
            }

            self.summaries.remove(&date);
            debug!(id, date = %date, "entry deleted from cache");
            self.persist_day(date).await?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Add entries whose id is not already stored for their day.
    ///
    /// A failing entry is counted and the batch continues.
    pub async fn import_entries(&mut self, entries: Vec<FoodEntry>) -> ImportReport {
        let mut report = ImportReport::default();
        for entry in entries {
            if !entry.id.is_empty() {
                let existing = self.get_entries_for_date(entry.date).await;
                if existing.iter().any(|e| e.id == entry.id) {
                    report.skipped += 1;
                    continue;
                }
            }
            let id = entry.id.clone();
            match self.save_entry(entry).await {
                Ok(_) => report.imported += 1,
                Err(e) => {
                    warn!(id = %id, error = %e, "import entry failed");
                    report.errors += 1;
                }
            }
        }
        info!(
            imported = report.imported,
            skipped = report.skipped,
            errors = report.errors,
            "import complete"
        );
        report
    }

    /// Replace a day's entries with the contents of a backup archive.
    ///
    /// Returns the number of restored entries. The restore is itself persisted
    /// and backed up.
    pub async fn restore_backup(&mut self, name: &str) -> Result<usize, StoreError> {
        let snapshot = self
            .backups
            .load(name)
            .await?
            .ok_or_else(|| StoreError::BackupNotFound(name.to_string()))?;
        for entry in &snapshot.entries {
            entry.validate()?;
        }

        let date = snapshot.date;
        let mut day: Vec<FoodEntry> = snapshot
            .entries
            .into_iter()
            .filter(|e| e.date == date)
            .collect();
        sort_by_timestamp(&mut day);
        let count = day.len();
        self.entries.insert(date, day);
        self.summaries.remove(&date);

        self.persist_day(date).await?;
        info!(backup = name, date = %date, entries = count, "backup restored");
        Ok(count)
    }

    /// Drop both caches and delete every persisted day document, backup, and
    /// aggregate entry. Irreversible.
    pub async fn clear_all(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.summaries.clear();
        self.state.daily_entries.clear();
        self.state.summaries.clear();

        if self.config.root.trim_matches('/').is_empty() {
            // Root is the data dir itself: remove only what the journal wrote there.
            self.backend.remove_dir(&self.config.backup_dir()).await?;
            for file in self.backend.list("").await? {
                if file.name().ends_with(".md") {
                    self.backend.remove(&file.path).await?;
                }
            }
        } else {
            self.backend.remove_dir(&self.config.root).await?;
        }
        save_state(self.backend.as_ref(), &self.state).await?;

        info!(root = %self.config.root, "journal cleared");
        Ok(())
    }

    // ── Read path ───────────────────────────────────────────────────────────

    /// Entries for one day, ascending by timestamp.
    ///
    /// Returns a copy of the cache. On a load failure the result is empty and
    /// nothing is cached, so a later call retries.
    pub async fn get_entries_for_date(&mut self, date: NaiveDate) -> Vec<FoodEntry> {
        if let Some(day) = self.entries.get(&date) {
            return day.clone();
        }
        match self.load_day(date).await {
            Ok(day) => {
                debug!(date = %date, entries = day.len(), "day loaded");
                self.entries.insert(date, day.clone());
                day
            }
            Err(e) => {
                self.diagnostics.load_failures += 1;
                warn!(date = %date, error = %format!("{e:#}"), "failed to load day, returning empty");
                Vec::new()
            }
        }
    }

    /// Entries across the inclusive range, ascending by timestamp.
    pub async fn get_entries_for_range(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<FoodEntry> {
        let mut all = Vec::new();
        for date in days_between(start, end) {
            all.extend(self.get_entries_for_date(date).await);
        }
        sort_by_timestamp(&mut all);
        all
    }

    /// Summary for one day, computed once per change.
    pub async fn get_daily_summary(&mut self, date: NaiveDate) -> DailyNutritionSummary {
        if let Some(summary) = self.summaries.get(&date) {
            return summary.clone();
        }
        let entries = self.get_entries_for_date(date).await;
        let summary = calculate_summary(date, &entries);
        // Only cache alongside a cached entry list.
        if self.entries.contains_key(&date) {
            self.summaries.insert(date, summary.clone());
        }
        summary
    }

    /// One summary per day in the inclusive range, including empty days.
    pub async fn get_summaries_for_range(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<DailyNutritionSummary> {
        let mut out = Vec::new();
        for date in days_between(start, end) {
            out.push(self.get_daily_summary(date).await);
        }
        out
    }

    /// Entries and summaries for a range. Defaults to the trailing year through today.
    pub async fn export_range(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> ExportPayload {
        let end = end.unwrap_or_else(today);
        let start = start.unwrap_or(end - Duration::days(DEFAULT_EXPORT_DAYS));
        let entries = self.get_entries_for_range(start, end).await;
        let summaries = self.get_summaries_for_range(start, end).await;
        ExportPayload {
            entries,
            summaries,
            export_instant: Utc::now(),
            version: BACKUP_VERSION.to_string(),
        }
    }

    /// Archives in the backup folder, newest first.
    pub async fn list_backups(&self) -> Result<Vec<BackupInfo>, StoreError> {
        Ok(self.backups.list().await?)
    }

    // ── Persistence ─────────────────────────────────────────────────────────

    async fn ensure_loaded(&mut self, date: NaiveDate) -> Result<(), StoreError> {
        if self.entries.contains_key(&date) {
            return Ok(());
        }
        let day = self.load_day(date).await.map_err(|e| {
            self.diagnostics.load_failures += 1;
            StoreError::Storage(e.context(format!("failed to load {date} before writing")))
        })?;
        self.entries.insert(date, day);
        Ok(())
    }

    /// Read a day from disk: the document first when the mode writes one,
    /// falling back to the aggregate when the document yields nothing.
    async fn load_day(&mut self, date: NaiveDate) -> anyhow::Result<Vec<FoodEntry>> {
        if self.config.mode.writes_document() {
            let path = document_path(&self.config, date);
            if let Some(text) = self.backend.read(&path).await? {
                let parsed = parse_day_document(&text);
                self.diagnostics.documents_parsed += 1;
                if parsed.skipped_lines > 0 {
                    self.diagnostics.lines_skipped += parsed.skipped_lines;
                    warn!(path = %path, skipped = parsed.skipped_lines, "dropped unparseable raw data lines");
                }
                let mut day: Vec<FoodEntry> =
                    parsed.entries.into_iter().filter(|e| e.date == date).collect();
                if !day.is_empty() {
                    sort_by_timestamp(&mut day);
                    return Ok(day);
                }
            }
        }

        let mut day = self
            .state
            .daily_entries
            .get(&date)
            .cloned()
            .unwrap_or_default();
        sort_by_timestamp(&mut day);
        Ok(day)
    }

    /// Write the cached day to every configured representation, then back it up.
    async fn persist_day(&mut self, date: NaiveDate) -> Result<(), StoreError> {
        let entries = self.entries.get(&date).cloned().unwrap_or_default();
        let summary = calculate_summary(date, &entries);

        if self.config.mode.writes_structured() {
            if entries.is_empty() {
                self.state.daily_entries.remove(&date);
                self.state.summaries.remove(&date);
            } else {
                self.state.daily_entries.insert(date, entries.clone());
                self.state.summaries.insert(date, summary.clone());
            }
            self.state.storage = Some(self.config.clone());
            save_state(self.backend.as_ref(), &self.state).await?;
        }

        if self.config.mode.writes_document() {
            let path = document_path(&self.config, date);
            let doc = render_day_document(
                date,
                &entries,
                self.config.include_summary.then_some(&summary),
            );
            self.backend.write(&path, &doc).await?;
        }

        info!(date = %date, entries = entries.len(), mode = %self.config.mode, "day persisted");

        if self.config.backups_enabled {
            if let Err(e) = self.backups.snapshot(date, &entries, &summary).await {
                warn!(date = %date, error = %format!("{e:#}"), "backup failed");
            }
        }
        Ok(())
    }
}
