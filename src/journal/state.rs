//! Aggregate structured store.
//!
//! A single JSON document holding every day's entries keyed by ISO date, a
//! mirror of the computed summaries, the storage settings in effect when it was
//! written, and user-defined catalog foods. Always read and written wholesale.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::StorageConfig;
use crate::journal::types::{DailyNutritionSummary, FoodEntry, FoodItem};
use crate::storage::StorageBackend;

/// Path of the aggregate store relative to the backend root.
pub const STATE_FILE: &str = "state.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedState {
    pub daily_entries: BTreeMap<NaiveDate, Vec<FoodEntry>>,
    pub summaries: BTreeMap<NaiveDate, DailyNutritionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,
    pub custom_foods: Vec<FoodItem>,
}

/// Read the aggregate store. A missing file is an empty state.
pub async fn load_state(backend: &dyn StorageBackend) -> Result<PersistedState> {
    match backend.read(STATE_FILE).await? {
        Some(json) => serde_json::from_str(&json)
            .with_context(|| format!("failed to parse {STATE_FILE}")),
        None => Ok(PersistedState::default()),
    }
}

pub async fn save_state(backend: &dyn StorageBackend, state: &PersistedState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    backend
        .write(STATE_FILE, &json)
        .await
        .with_context(|| format!("failed to write {STATE_FILE}"))
}
