//! The food journal: record types, the two on-disk representations, backups,
//! and the caching [`EntryStore`] that ties them together.

pub mod backup;
pub mod document;
pub mod state;
pub mod store;
pub mod types;

pub use backup::{BackupInfo, BackupSnapshot};
pub use store::{EntryStore, ExportPayload, ImportPayload, ImportReport, LoadDiagnostics};
pub use types::{
    DailyNutritionSummary, FoodEntry, FoodItem, MealType, NutritionFacts, NutritionGoals,
};
