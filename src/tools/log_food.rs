use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LogFoodParams {
    #[schemars(description = "Food name, e.g. 'Greek yogurt'")]
    pub name: String,

    #[schemars(description = "Meal: 'breakfast', 'lunch', 'dinner', or 'snack'")]
    pub meal: String,

    #[schemars(description = "Number of servings eaten. Defaults to 1.")]
    pub quantity: Option<f64>,

    #[schemars(description = "Size of one serving in serving_unit. Defaults to 100.")]
    pub serving_size: Option<f64>,

    #[schemars(description = "Unit of the serving size, e.g. 'g' or 'ml'. Defaults to 'g'.")]
    pub serving_unit: Option<String>,

    #[schemars(description = "Calories per 100 units")]
    pub calories: f64,

    #[schemars(description = "Protein grams per 100 units")]
    pub protein: Option<f64>,

    #[schemars(description = "Carbohydrate grams per 100 units")]
    pub carbs: Option<f64>,

    #[schemars(description = "Fat grams per 100 units")]
    pub fat: Option<f64>,

    #[schemars(description = "Fiber grams per 100 units")]
    pub fiber: Option<f64>,

    #[schemars(description = "Sugar grams per 100 units")]
    pub sugar: Option<f64>,

    #[schemars(description = "Sodium milligrams per 100 units")]
    pub sodium: Option<f64>,

    #[schemars(description = "Water millilitres per 100 units")]
    pub water: Option<f64>,

    #[schemars(description = "Optional food category, e.g. 'dairy'")]
    pub category: Option<String>,

    #[schemars(description = "ISO date (YYYY-MM-DD). Defaults to today.")]
    pub date: Option<String>,
}
