//! Trend analyzer: multi-day averages, goal attainment, and consistency.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::summary::{percent_of, round_calories, round_grams, round_percent};
use crate::error::ValidationError;
use crate::journal::types::{DailyNutritionSummary, NutritionGoals};

/// Longest window, in days, a trend analysis covers.
pub const MAX_TREND_DAYS: i64 = 366;

/// Tolerance around the calorie and protein targets for a day to count as met.
pub const CALORIE_PROTEIN_TOLERANCE: f64 = 0.10;
/// Tolerance around the carb and fat targets.
pub const CARBS_FAT_TOLERANCE: f64 = 0.15;
/// Band (fraction of target) a day's protein must fall in to count as consistent.
pub const PROTEIN_CONSISTENCY_BAND: (f64, f64) = (0.80, 1.20);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAverages {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

/// Which goals one day met.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyGoalStatus {
    pub date: NaiveDate,
    pub calories_met: bool,
    pub protein_met: bool,
    pub carbs_met: bool,
    pub fat_met: bool,
}

/// Whole-percent share of days on which each goal was met.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalAttainment {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// Population standard deviation of daily calories.
    pub calorie_variance: f64,
    /// Percent of days with protein inside the consistency band.
    pub protein_consistency: f64,
    /// 0-100.
    pub overall_score: f64,
}

impl ConsistencyReport {
    pub fn zero() -> Self {
        Self {
            calorie_variance: 0.0,
            protein_consistency: 0.0,
            overall_score: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub days: usize,
    pub averages: TrendAverages,
    pub daily: Vec<DailyGoalStatus>,
    pub attainment: GoalAttainment,
    pub consistency: ConsistencyReport,
    pub suggestions: Vec<String>,
}

/// Reject windows that are empty or longer than [`MAX_TREND_DAYS`].
pub fn check_window(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    let days = (end - start).num_days() + 1;
    if (1..=MAX_TREND_DAYS).contains(&days) {
        Ok(())
    } else {
        Err(ValidationError::InvalidWindow(days))
    }
}

/// First day of a `days`-long window ending on `end`.
pub fn window_start(end: NaiveDate, days: i64) -> Result<NaiveDate, ValidationError> {
    if !(1..=MAX_TREND_DAYS).contains(&days) {
        return Err(ValidationError::InvalidWindow(days));
    }
    end.checked_sub_signed(Duration::days(days - 1))
        .ok_or(ValidationError::InvalidWindow(days))
}

fn within(actual: f64, target: f64, tolerance: f64) -> bool {
    (actual - target).abs() <= target * tolerance
}

/// Which of the four tracked goals `summary` met.
pub fn classify_day(summary: &DailyNutritionSummary, goals: &NutritionGoals) -> DailyGoalStatus {
    DailyGoalStatus {
        date: summary.date,
        calories_met: within(summary.total_calories, goals.calories, CALORIE_PROTEIN_TOLERANCE),
        protein_met: within(summary.total_protein, goals.protein, CALORIE_PROTEIN_TOLERANCE),
        carbs_met: within(summary.total_carbs, goals.carbs, CARBS_FAT_TOLERANCE),
        fat_met: within(summary.total_fat, goals.fat, CARBS_FAT_TOLERANCE),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Calorie variance, protein consistency, and the combined score.
///
/// Fewer than two days gives a zeroed report.
pub fn consistency(summaries: &[DailyNutritionSummary], goals: &NutritionGoals) -> ConsistencyReport {
    if summaries.len() < 2 {
        return ConsistencyReport::zero();
    }

    let avg = mean(summaries.iter().map(|s| s.total_calories));
    let variance =
        mean(summaries.iter().map(|s| (s.total_calories - avg).powi(2))).sqrt();

    let (low, high) = PROTEIN_CONSISTENCY_BAND;
    let consistent_days = summaries
        .iter()
        .filter(|s| {
            s.total_protein >= goals.protein * low && s.total_protein <= goals.protein * high
        })
        .count();
    let protein_consistency = consistent_days as f64 / summaries.len() as f64 * 100.0;

    let calorie_score = if goals.calories > 0.0 {
        (100.0 - variance / goals.calories * 100.0).max(0.0)
    } else {
        0.0
    };

    ConsistencyReport {
        calorie_variance: round_calories(variance),
        protein_consistency: round_percent(protein_consistency),
        overall_score: round_percent((calorie_score + protein_consistency) / 2.0),
    }
}

/// Analyze a window of daily summaries, one per day, in date order.
pub fn analyze_trends(summaries: &[DailyNutritionSummary], goals: &NutritionGoals) -> TrendAnalysis {
    let averages = TrendAverages {
        calories: round_calories(mean(summaries.iter().map(|s| s.total_calories))),
        protein: round_grams(mean(summaries.iter().map(|s| s.total_protein))),
        carbs: round_grams(mean(summaries.iter().map(|s| s.total_carbs))),
        fat: round_grams(mean(summaries.iter().map(|s| s.total_fat))),
        fiber: round_grams(mean(summaries.iter().map(|s| s.total_fiber))),
    };

    let daily: Vec<DailyGoalStatus> = summaries.iter().map(|s| classify_day(s, goals)).collect();
    let days = daily.len() as f64;
    let share = |met: fn(&DailyGoalStatus) -> bool| {
        percent_of(daily.iter().filter(|d| met(d)).count() as f64, days)
    };
    let attainment = GoalAttainment {
        calories: share(|d| d.calories_met),
        protein: share(|d| d.protein_met),
        carbs: share(|d| d.carbs_met),
        fat: share(|d| d.fat_met),
    };

    let suggestions = if daily.is_empty() {
        Vec::new()
    } else {
        suggestions(&attainment)
    };

    TrendAnalysis {
        days: daily.len(),
        averages,
        daily,
        attainment,
        consistency: consistency(summaries, goals),
        suggestions,
    }
}

fn suggestions(attainment: &GoalAttainment) -> Vec<String> {
    let mut out = Vec::new();
    if attainment.calories < 70.0 {
        out.push(format!(
            "Calorie goal met on {}% of days. Aim for more consistent daily intake, for \
             example by planning meals ahead.",
            attainment.calories
        ));
    }
    if attainment.protein < 70.0 {
        out.push(format!(
            "Protein goal met on {}% of days. Add a protein source to every meal.",
            attainment.protein
        ));
    }
    if attainment.carbs < 60.0 {
        out.push(format!(
            "Carbohydrate goal met on {}% of days. Keep carb portions steadier from day to day.",
            attainment.carbs
        ));
    }
    if attainment.fat < 60.0 {
        out.push(format!(
            "Fat goal met on {}% of days. Watch added oils, dressings, and fried foods.",
            attainment.fat
        ));
    }
    out
}
