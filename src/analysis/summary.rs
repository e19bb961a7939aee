//! Summary calculator: folds one day's entries into a [`DailyNutritionSummary`].
//!
//! Rounding policy shared by every analyzer: calorie-like values round to whole
//! units, gram/ml values to one decimal, percentages to whole percent.

use chrono::NaiveDate;

use crate::journal::types::{DailyNutritionSummary, FoodEntry, MealBreakdown, MealType};

/// Round a calorie-like quantity to the nearest whole unit.
pub fn round_calories(value: f64) -> f64 {
    value.round()
}

/// Round a gram/ml quantity to one decimal place.
pub fn round_grams(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round a percentage to the nearest whole percent.
pub fn round_percent(value: f64) -> f64 {
    value.round()
}

/// `part / whole` as a rounded percentage; 0 when `whole` is not positive.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        round_percent(part / whole * 100.0)
    } else {
        0.0
    }
}

/// Fold `entries` into the summary for `date`.
///
/// Entries dated elsewhere are still counted; callers pass one day's bucket.
/// `total_calories` is the sum of the rounded meal buckets so the breakdown
/// always adds up to the total.
pub fn calculate_summary(date: NaiveDate, entries: &[FoodEntry]) -> DailyNutritionSummary {
    let mut protein = 0.0;
    let mut carbs = 0.0;
    let mut fat = 0.0;
    let mut fiber = 0.0;
    let mut sugar = 0.0;
    let mut sodium = 0.0;
    let mut water = 0.0;
    let mut meals = MealBreakdown::default();

    for entry in entries {
        let consumed = entry.consumed();
        protein += consumed.protein;
        carbs += consumed.carbs;
        fat += consumed.fat;
        fiber += consumed.fiber.unwrap_or(0.0);
        sugar += consumed.sugar.unwrap_or(0.0);
        sodium += consumed.sodium.unwrap_or(0.0);
        water += consumed.water.unwrap_or(0.0);
        *meals.get_mut(entry.meal) += consumed.calories;
    }

    for meal in MealType::ALL {
        let bucket = meals.get_mut(meal);
        *bucket = round_calories(*bucket);
    }

    DailyNutritionSummary {
        date,
        total_calories: meals.total(),
        total_protein: round_grams(protein),
        total_carbs: round_grams(carbs),
        total_fat: round_grams(fat),
        total_fiber: round_grams(fiber),
        total_sugar: round_grams(sugar),
        total_sodium: round_calories(sodium),
        total_water: round_grams(water),
        entry_count: entries.len(),
        meal_breakdown: meals,
    }
}
