//! Record model for the food journal.
//!
//! Defines [`FoodItem`] (a catalog food with per-100-unit [`NutritionFacts`]),
//! [`FoodEntry`] (one logged consumption event), [`MealType`],
//! [`DailyNutritionSummary`] (the derived per-day totals) and
//! [`NutritionGoals`] (targets used by the analyzers).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Fallback fiber target (g) when the goal profile leaves it unset.
pub const DEFAULT_FIBER_G: f64 = 25.0;
/// Fallback sugar limit (g).
pub const DEFAULT_SUGAR_G: f64 = 50.0;
/// Fallback sodium limit (mg).
pub const DEFAULT_SODIUM_MG: f64 = 2300.0;
/// Fallback water target (ml).
pub const DEFAULT_WATER_ML: f64 = 2000.0;

/// Meal bucket an entry is logged under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// All meal buckets in day order.
    pub const ALL: [MealType; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }

    /// Capitalized label for rendered documents.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snack => "Snack",
        }
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" | "snacks" => Ok(Self::Snack),
            _ => Err(format!("unknown meal: {s}")),
        }
    }
}

/// Nutrient values per 100 units of the food's own serving unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionFacts {
    pub calories: f64,
    /// Grams.
    pub protein: f64,
    /// Grams.
    pub carbs: f64,
    /// Grams.
    pub fat: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
    /// Milligrams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    /// Millilitres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water: Option<f64>,
}

impl NutritionFacts {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ];
        let optional = [
            ("fiber", self.fiber),
            ("sugar", self.sugar),
            ("sodium", self.sodium),
            ("water", self.water),
        ];
        let values = required
            .into_iter()
            .chain(optional.into_iter().filter_map(|(f, v)| v.map(|v| (f, v))));
        for (field, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::NegativeNutrient { field, value });
            }
        }
        Ok(())
    }
}

/// A catalog food. Entries embed a snapshot of it at logging time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    /// Free-form tag, e.g. "fruit" or "dairy".
    #[serde(default)]
    pub category: String,
    pub serving_size: f64,
    pub serving_unit: String,
    pub nutrition: NutritionFacts,
}

impl FoodItem {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !self.serving_size.is_finite() || self.serving_size <= 0.0 {
            return Err(ValidationError::InvalidServingSize(self.serving_size));
        }
        self.nutrition.validate()
    }
}

/// One logged consumption event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    /// UUID v7, assigned by the store when empty.
    #[serde(default)]
    pub id: String,
    pub date: NaiveDate,
    /// Creation instant; orders entries within a day.
    pub timestamp: DateTime<Utc>,
    pub food_item: FoodItem,
    /// Number of servings.
    pub quantity: f64,
    pub meal: MealType,
}

impl FoodEntry {
    /// New entry stamped now, without an id.
    pub fn new(date: NaiveDate, food_item: FoodItem, quantity: f64, meal: MealType) -> Self {
        Self {
            id: String::new(),
            date,
            timestamp: Utc::now(),
            food_item,
            quantity,
            meal,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(ValidationError::InvalidQuantity(self.quantity));
        }
        self.food_item.validate()
    }

    /// `(quantity * serving_size) / 100`: scales per-100-unit nutrition to this entry.
    pub fn multiplier(&self) -> f64 {
        self.quantity * self.food_item.serving_size / 100.0
    }

    /// Nutrient amounts actually consumed by this entry (unrounded).
    pub fn consumed(&self) -> NutritionFacts {
        let m = self.multiplier();
        let n = &self.food_item.nutrition;
        NutritionFacts {
            calories: n.calories * m,
            protein: n.protein * m,
            carbs: n.carbs * m,
            fat: n.fat * m,
            fiber: n.fiber.map(|v| v * m),
            sugar: n.sugar.map(|v| v * m),
            sodium: n.sodium.map(|v| v * m),
            water: n.water.map(|v| v * m),
        }
    }

    /// Consumed calories (unrounded).
    pub fn calories(&self) -> f64 {
        self.food_item.nutrition.calories * self.multiplier()
    }
}

/// Calories per meal bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealBreakdown {
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
    pub snack: f64,
}

impl MealBreakdown {
    pub fn get(&self, meal: MealType) -> f64 {
        match meal {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
            MealType::Snack => self.snack,
        }
    }

    pub fn get_mut(&mut self, meal: MealType) -> &mut f64 {
        match meal {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
            MealType::Snack => &mut self.snack,
        }
    }

    pub fn total(&self) -> f64 {
        self.breakfast + self.lunch + self.dinner + self.snack
    }
}

/// Aggregated nutrient totals for one calendar day. Derived, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyNutritionSummary {
    pub date: NaiveDate,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub total_fiber: f64,
    pub total_sugar: f64,
    pub total_sodium: f64,
    pub total_water: f64,
    pub entry_count: usize,
    pub meal_breakdown: MealBreakdown,
}

impl DailyNutritionSummary {
    /// All-zero summary for `date`.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_calories: 0.0,
            total_protein: 0.0,
            total_carbs: 0.0,
            total_fat: 0.0,
            total_fiber: 0.0,
            total_sugar: 0.0,
            total_sodium: 0.0,
            total_water: 0.0,
            entry_count: 0,
            meal_breakdown: MealBreakdown::default(),
        }
    }
}

/// Daily targets and limits.
///
/// The four macro targets are required; the rest fall back to fixed defaults
/// through the accessor methods when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionGoals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub sodium: Option<f64>,
    pub water: Option<f64>,
}

impl Default for NutritionGoals {
    fn default() -> Self {
        Self {
            calories: 2000.0,
            protein: 150.0,
            carbs: 250.0,
            fat: 65.0,
            fiber: None,
            sugar: None,
            sodium: None,
            water: None,
        }
    }
}

impl NutritionGoals {
    /// Goals with the four required targets and every optional one at its fallback.
    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
            ..Self::default()
        }
    }

    pub fn fiber_target(&self) -> f64 {
        self.fiber.unwrap_or(DEFAULT_FIBER_G)
    }

    pub fn sugar_limit(&self) -> f64 {
        self.sugar.unwrap_or(DEFAULT_SUGAR_G)
    }

    pub fn sodium_limit(&self) -> f64 {
        self.sodium.unwrap_or(DEFAULT_SODIUM_MG)
    }

    pub fn water_target(&self) -> f64 {
        self.water.unwrap_or(DEFAULT_WATER_ML)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
            ("fiber", self.fiber_target()),
            ("sugar", self.sugar_limit()),
            ("sodium", self.sodium_limit()),
            ("water", self.water_target()),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::InvalidGoal { field, value });
            }
        }
        Ok(())
    }
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oats() -> FoodItem {
        FoodItem {
            id: "oats".into(),
            name: "Rolled oats".into(),
            category: "grains".into(),
            serving_size: 40.0,
            serving_unit: "g".into(),
            nutrition: NutritionFacts {
                calories: 380.0,
                protein: 13.0,
                carbs: 60.0,
                fat: 7.0,
                fiber: Some(10.0),
                ..Default::default()
            },
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn multiplier_scales_per_hundred_units() {
        let entry = FoodEntry::new(day(), oats(), 1.5, MealType::Breakfast);
        assert!((entry.multiplier() - 0.6).abs() < 1e-9);
        assert!((entry.calories() - 228.0).abs() < 1e-9);

        let consumed = entry.consumed();
        assert!((consumed.protein - 7.8).abs() < 1e-9);
        assert_eq!(consumed.sugar, None);
        assert!((consumed.fiber.unwrap() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn validation_rejects_bad_quantities_and_nutrients() {
        let mut entry = FoodEntry::new(day(), oats(), 0.0, MealType::Lunch);
        assert_eq!(entry.validate(), Err(ValidationError::InvalidQuantity(0.0)));

        entry.quantity = 1.0;
        entry.food_item.serving_size = -5.0;
        assert_eq!(
            entry.validate(),
            Err(ValidationError::InvalidServingSize(-5.0))
        );

        entry.food_item.serving_size = 40.0;
        entry.food_item.nutrition.sodium = Some(-1.0);
        assert_eq!(
            entry.validate(),
            Err(ValidationError::NegativeNutrient {
                field: "sodium",
                value: -1.0
            })
        );

        entry.food_item.nutrition.sodium = None;
        entry.food_item.name = "  ".into();
        assert_eq!(entry.validate(), Err(ValidationError::EmptyName));

        entry.food_item.name = "Oats".into();
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn meal_type_parses_case_insensitively() {
        assert_eq!("Dinner".parse::<MealType>().unwrap(), MealType::Dinner);
        assert_eq!("snacks".parse::<MealType>().unwrap(), MealType::Snack);
        assert!("brunch".parse::<MealType>().is_err());
        assert_eq!(MealType::Lunch.to_string(), "lunch");
    }

    #[test]
    fn entry_serializes_with_camel_case_fields() {
        let mut entry = FoodEntry::new(day(), oats(), 1.0, MealType::Snack);
        entry.id = "e1".into();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2026-03-14");
        assert_eq!(json["meal"], "snack");
        assert_eq!(json["foodItem"]["servingSize"], 40.0);
        assert!(json["foodItem"]["nutrition"].get("sugar").is_none());

        let back: FoodEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn goals_fall_back_for_optional_targets() {
        let goals = NutritionGoals::new(1800.0, 120.0, 200.0, 60.0);
        assert_eq!(goals.fiber_target(), DEFAULT_FIBER_G);
        assert_eq!(goals.sodium_limit(), DEFAULT_SODIUM_MG);
        assert!(goals.validate().is_ok());

        let bad = NutritionGoals {
            protein: 0.0,
            ..NutritionGoals::default()
        };
        assert_eq!(
            bad.validate(),
            Err(ValidationError::InvalidGoal {
                field: "protein",
                value: 0.0
            })
        );
    }

    #[test]
    fn parse_date_accepts_iso_only() {
        assert_eq!(parse_date("2026-03-14").unwrap(), day());
        assert!(matches!(
            parse_date("14/03/2026"),
            Err(ValidationError::InvalidDate(_))
        ));
    }
}
