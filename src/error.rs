//! Error taxonomy for the journal.
//!
//! [`ValidationError`] rejects malformed input before any state is touched.
//! [`StoreError`] is what write paths return; read paths degrade instead of
//! failing and never surface these.

/// Input that cannot be logged as-is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("quantity must be a positive number, got {0}")]
    InvalidQuantity(f64),

    #[error("serving size must be a positive number, got {0}")]
    InvalidServingSize(f64),

    #[error("nutrient `{field}` must be a non-negative number, got {value}")]
    NegativeNutrient { field: &'static str, value: f64 },

    #[error("food name must not be empty")]
    EmptyName,

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("goal `{field}` must be a positive number, got {value}")]
    InvalidGoal { field: &'static str, value: f64 },

    #[error(
        "trend window must cover 1 to {max} days, got {0}",
        max = crate::analysis::trends::MAX_TREND_DAYS
    )]
    InvalidWindow(i64),
}

/// Failure of a mutating store operation.
///
/// A `Storage` error from `save_entry`/`update_entry`/`delete_entry` means the
/// in-memory cache may already be ahead of disk.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),

    #[error("backup not found: {0}")]
    BackupNotFound(String),
}
