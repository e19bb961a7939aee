//! Goal analyzer: compares one day's summary with a goal profile.
//!
//! Pure function of its inputs. Produces per-nutrient progress for targets,
//! under/met/over status for limits, a macro-calorie split, and independent
//! rule-based recommendations and warnings (rules may co-fire).

use serde::{Deserialize, Serialize};

use super::summary::{percent_of, round_calories, round_grams};
use crate::journal::types::{DailyNutritionSummary, NutritionGoals};

/// Calories per gram of protein and carbohydrate.
pub const KCAL_PER_GRAM_PROTEIN_CARBS: f64 = 4.0;
/// Calories per gram of fat.
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Lower edge of the "met" band for limits, in percent.
pub const LIMIT_MET_LOW: f64 = 80.0;
/// Upper edge (inclusive) of the "met" band for limits, in percent.
pub const LIMIT_MET_HIGH: f64 = 110.0;

/// Progress toward a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientProgress {
    pub current: f64,
    pub target: f64,
    /// Whole percent of target reached.
    pub percentage: f64,
    /// Amount still missing; 0 once the target is reached.
    pub remaining: f64,
}

impl NutrientProgress {
    fn new(current: f64, target: f64, round: fn(f64) -> f64) -> Self {
        Self {
            current: round(current),
            target,
            percentage: percent_of(current, target),
            remaining: round((target - current).max(0.0)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitStatus {
    Under,
    Met,
    Over,
}

impl LimitStatus {
    /// Classify a whole-percent value against the 80%..=110% band.
    pub fn classify(percentage: f64) -> Self {
        if percentage < LIMIT_MET_LOW {
            Self::Under
        } else if percentage <= LIMIT_MET_HIGH {
            Self::Met
        } else {
            Self::Over
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Under => "under",
            Self::Met => "met",
            Self::Over => "over",
        }
    }
}

impl std::fmt::Display for LimitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intake measured against a limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientLimit {
    pub current: f64,
    pub limit: f64,
    pub percentage: f64,
    pub status: LimitStatus,
}

impl NutrientLimit {
    fn new(current: f64, limit: f64) -> Self {
        let percentage = percent_of(current, limit);
        Self {
            current,
            limit,
            percentage,
            status: LimitStatus::classify(percentage),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub calories: NutrientProgress,
    pub protein: NutrientProgress,
    pub carbs: NutrientProgress,
    pub fiber: NutrientProgress,
    pub water: NutrientProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitReport {
    pub sugar: NutrientLimit,
    pub sodium: NutrientLimit,
}

/// Calories contributed by each macro and their share of the macro total.
///
/// Shares are relative to the macro calories, not the logged calorie total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub protein_calories: f64,
    pub carbs_calories: f64,
    pub fat_calories: f64,
    pub protein_percent: f64,
    pub carbs_percent: f64,
    pub fat_percent: f64,
}

impl MacroBreakdown {
    pub fn from_summary(summary: &DailyNutritionSummary) -> Self {
        let protein = summary.total_protein * KCAL_PER_GRAM_PROTEIN_CARBS;
        let carbs = summary.total_carbs * KCAL_PER_GRAM_PROTEIN_CARBS;
        let fat = summary.total_fat * KCAL_PER_GRAM_FAT;
        let total = protein + carbs + fat;
        Self {
            protein_calories: round_calories(protein),
            carbs_calories: round_calories(carbs),
            fat_calories: round_calories(fat),
            protein_percent: percent_of(protein, total),
            carbs_percent: percent_of(carbs, total),
            fat_percent: percent_of(fat, total),
        }
    }

    pub fn total_calories(&self) -> f64 {
        self.protein_calories + self.carbs_calories + self.fat_calories
    }
}

/// Full analysis of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalAnalysis {
    pub date: chrono::NaiveDate,
    pub progress: GoalProgress,
    pub limits: LimitReport,
    pub macros: MacroBreakdown,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

/// Analyze `summary` against `goals`.
pub fn analyze_goals(summary: &DailyNutritionSummary, goals: &NutritionGoals) -> GoalAnalysis {
    let progress = GoalProgress {
        calories: NutrientProgress::new(summary.total_calories, goals.calories, round_calories),
        protein: NutrientProgress::new(summary.total_protein, goals.protein, round_grams),
        carbs: NutrientProgress::new(summary.total_carbs, goals.carbs, round_grams),
        fiber: NutrientProgress::new(summary.total_fiber, goals.fiber_target(), round_grams),
        water: NutrientProgress::new(summary.total_water, goals.water_target(), round_grams),
    };
    let limits = LimitReport {
        sugar: NutrientLimit::new(summary.total_sugar, goals.sugar_limit()),
        sodium: NutrientLimit::new(summary.total_sodium, goals.sodium_limit()),
    };
    let macros = MacroBreakdown::from_summary(summary);

    let recommendations = recommendations(&progress, &macros);
    let warnings = warnings(&progress, &limits);

    GoalAnalysis {
        date: summary.date,
        progress,
        limits,
        macros,
        recommendations,
        warnings,
    }
}

fn recommendations(progress: &GoalProgress, macros: &MacroBreakdown) -> Vec<String> {
    let mut out = Vec::new();

    if progress.calories.percentage < 80.0 {
        out.push(
            "You're well under your calorie goal. Add nutrient-dense foods such as nuts, \
             avocado, or whole grains."
                .to_string(),
        );
    }
    if progress.calories.percentage > 110.0 {
        out.push(
            "You're over your calorie goal. Consider smaller portions or lighter options."
                .to_string(),
        );
    }
    if progress.protein.percentage < 80.0 {
        out.push(
            "Protein is below target. Include protein-rich foods like lean meat, fish, eggs, \
             legumes, or dairy."
                .to_string(),
        );
    }
    if progress.fiber.percentage < 60.0 {
        out.push(
            "Fiber intake is low. Eat more whole foods: vegetables, fruit, legumes, and whole \
             grains."
                .to_string(),
        );
    }

    // Share rules are meaningless on a day without any macros.
    if macros.total_calories() > 0.0 {
        if macros.fat_percent > 35.0 {
            out.push(format!(
                "Fat provides {}% of your macro calories. Rebalance toward protein and \
                 carbohydrates.",
                macros.fat_percent
            ));
        }
        if macros.carbs_percent < 45.0 {
            out.push(format!(
                "Carbohydrates provide only {}% of your macro calories. Add complex \
                 carbohydrates such as oats, rice, or potatoes.",
                macros.carbs_percent
            ));
        }
    }

    out
}

fn warnings(progress: &GoalProgress, limits: &LimitReport) -> Vec<String> {
    let mut out = Vec::new();

    if progress.calories.percentage < 50.0 {
        out.push(format!(
            "Very low calorie intake ({}% of goal). Eating this little can affect energy and \
             health.",
            progress.calories.percentage
        ));
    }
    if limits.sodium.status == LimitStatus::Over {
        out.push(format!(
            "Sodium is over your limit ({} of {} mg).",
            limits.sodium.current, limits.sodium.limit
        ));
    }
    if limits.sugar.status == LimitStatus::Over {
        out.push(format!(
            "Sugar is over your limit ({} of {} g).",
            limits.sugar.current, limits.sugar.limit
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn summary() -> DailyNutritionSummary {
        DailyNutritionSummary::empty(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap())
    }

    fn goals() -> NutritionGoals {
        NutritionGoals::new(2000.0, 150.0, 250.0, 65.0)
    }

    #[test]
    fn progress_matches_worked_example() {
        let mut s = summary();
        s.total_calories = 1600.0;
        s.total_protein = 120.0;

        let analysis = analyze_goals(&s, &goals());
        assert_eq!(
            analysis.progress.calories,
            NutrientProgress {
                current: 1600.0,
                target: 2000.0,
                percentage: 80.0,
                remaining: 400.0
            }
        );
        assert_eq!(
            analysis.progress.protein,
            NutrientProgress {
                current: 120.0,
                target: 150.0,
                percentage: 80.0,
                remaining: 30.0
            }
        );
    }

    #[test]
    fn exactly_on_target_has_nothing_remaining() {
        let mut s = summary();
        s.total_calories = 2000.0;
        let p = analyze_goals(&s, &goals()).progress.calories;
        assert_eq!(p.percentage, 100.0);
        assert_eq!(p.remaining, 0.0);

        s.total_calories = 2500.0;
        let p = analyze_goals(&s, &goals()).progress.calories;
        assert_eq!(p.percentage, 125.0);
        assert_eq!(p.remaining, 0.0);
    }

    #[test]
    fn water_progress_keeps_one_decimal() {
        let mut s = summary();
        s.total_water = 1250.5;
        let p = analyze_goals(&s, &goals()).progress.water;
        assert_eq!(p.current, 1250.5);
        assert_eq!(p.remaining, 749.5);
        assert_eq!(p.percentage, 63.0);
    }

    #[test]
    fn limit_band_is_inclusive_at_110_percent() {
        let mut s = summary();
        s.total_sodium = 2530.0; // 110% of 2300
        let limits = analyze_goals(&s, &goals()).limits;
        assert_eq!(limits.sodium.status, LimitStatus::Met);
        assert_eq!(limits.sodium.percentage, 110.0);

        s.total_sodium = 2553.0; // 111%
        let analysis = analyze_goals(&s, &goals());
        assert_eq!(analysis.limits.sodium.status, LimitStatus::Over);
        assert!(analysis.warnings.iter().any(|w| w.contains("Sodium")));

        s.total_sodium = 1800.0; // 78%
        assert_eq!(
            analyze_goals(&s, &goals()).limits.sodium.status,
            LimitStatus::Under
        );
        assert_eq!(LimitStatus::classify(80.0), LimitStatus::Met);
    }

    #[test]
    fn macro_breakdown_uses_macro_calories_only() {
        let mut s = summary();
        s.total_calories = 5000.0; // ignored by the split
        s.total_protein = 100.0; // 400 kcal
        s.total_carbs = 200.0; // 800 kcal
        s.total_fat = 40.0; // 360 kcal
        let m = analyze_goals(&s, &goals()).macros;
        assert_eq!(m.protein_calories, 400.0);
        assert_eq!(m.carbs_calories, 800.0);
        assert_eq!(m.fat_calories, 360.0);
        assert_eq!(m.protein_percent, 26.0);
        assert_eq!(m.carbs_percent, 51.0);
        assert_eq!(m.fat_percent, 23.0);
    }

    #[test]
    fn rules_fire_independently() {
        let mut s = summary();
        s.total_calories = 900.0; // 45%: low-calorie recommendation and warning
        s.total_protein = 30.0;
        s.total_carbs = 20.0;
        s.total_fat = 40.0; // fat share 360 / 560 = 64%
        s.total_sugar = 80.0; // 160% of 50 g

        let a = analyze_goals(&s, &goals());
        assert_eq!(a.recommendations.len(), 5, "{:?}", a.recommendations);
        assert!(a.recommendations.iter().any(|r| r.contains("under your calorie goal")));
        assert!(a.recommendations.iter().any(|r| r.contains("Protein")));
        assert!(a.recommendations.iter().any(|r| r.contains("Fiber")));
        assert!(a.recommendations.iter().any(|r| r.contains("Fat provides 64%")));
        assert!(a.recommendations.iter().any(|r| r.contains("Carbohydrates")));

        assert_eq!(a.warnings.len(), 2, "{:?}", a.warnings);
        assert!(a.warnings.iter().any(|w| w.contains("Very low calorie")));
        assert!(a.warnings.iter().any(|w| w.contains("Sugar")));
    }

    #[test]
    fn empty_day_skips_macro_share_rules() {
        let a = analyze_goals(&summary(), &goals());
        assert_eq!(a.macros.total_calories(), 0.0);
        assert!(!a.recommendations.iter().any(|r| r.contains("macro calories")));
        assert!(a.warnings.iter().any(|w| w.contains("Very low calorie")));
    }

    #[test]
    fn over_calories_suggests_smaller_portions() {
        let mut s = summary();
        s.total_calories = 2300.0;
        s.total_protein = 150.0;
        s.total_carbs = 300.0;
        s.total_fat = 60.0;
        s.total_fiber = 30.0;
        let a = analyze_goals(&s, &goals());
        assert_eq!(a.recommendations.len(), 1, "{:?}", a.recommendations);
        assert!(a.recommendations[0].contains("smaller portions"));
        assert!(a.warnings.is_empty());
    }
}
