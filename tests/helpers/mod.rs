#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use nutrilog::config::{StorageConfig, StorageMode};
use nutrilog::journal::types::{FoodEntry, FoodItem, MealType, NutritionFacts};
use nutrilog::journal::EntryStore;
use nutrilog::storage::fs::FsBackend;
use nutrilog::storage::memory::MemoryBackend;
use std::sync::Arc;
use tempfile::TempDir;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Storage settings for tests: default layout with the given mode.
pub fn config(mode: StorageMode) -> StorageConfig {
    StorageConfig {
        data_dir: String::new(),
        mode,
        ..StorageConfig::default()
    }
}

/// Open a store over a fresh in-process backend.
pub async fn memory_store(config: StorageConfig) -> (Arc<MemoryBackend>, EntryStore) {
    let backend = Arc::new(MemoryBackend::new());
    let store = reopen(&backend, config).await;
    (backend, store)
}

/// Open another store over an existing in-process backend.
pub async fn reopen(backend: &Arc<MemoryBackend>, config: StorageConfig) -> EntryStore {
    EntryStore::open(backend.clone(), config).await.unwrap()
}

/// Open a store rooted in a temporary directory.
pub async fn fs_store(config: StorageConfig) -> (TempDir, EntryStore) {
    let tmp = TempDir::new().unwrap();
    let backend = Arc::new(FsBackend::new(tmp.path()));
    let store = EntryStore::open(backend, config).await.unwrap();
    (tmp, store)
}

/// A food with a 100 g serving, so one serving contributes exactly the listed values.
pub fn food(name: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> FoodItem {
    FoodItem {
        id: format!("food-{}", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        category: "test".to_string(),
        serving_size: 100.0,
        serving_unit: "g".to_string(),
        nutrition: NutritionFacts {
            calories,
            protein,
            carbs,
            fat,
            ..Default::default()
        },
    }
}

/// An entry logged at `hour:00` UTC on `day`, with an explicit id.
pub fn entry_at(id: &str, day: NaiveDate, hour: u32, item: FoodItem, meal: MealType) -> FoodEntry {
    let mut entry = FoodEntry::new(day, item, 1.0, meal);
    entry.id = id.to_string();
    entry.timestamp = day.and_hms_opt(hour, 0, 0).unwrap().and_utc();
    entry
}

/// A 200 kcal breakfast entry logged now.
pub fn simple_entry(id: &str, day: NaiveDate) -> FoodEntry {
    let mut entry = FoodEntry::new(day, food("Oatmeal", 200.0, 7.0, 35.0, 4.0), 1.0, MealType::Breakfast);
    entry.id = id.to_string();
    entry.timestamp = Utc::now();
    entry
}
