//! CLI `log` command: record one food entry.

use anyhow::Result;
use clap::Args;

use nutrilog::config::NutrilogConfig;
use nutrilog::journal::types::{FoodEntry, FoodItem, MealType, NutritionFacts};

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Food name
    pub name: String,

    /// Meal: breakfast, lunch, dinner, or snack
    #[arg(long, short)]
    pub meal: MealType,

    /// Number of servings
    #[arg(long, short, default_value_t = 1.0)]
    pub quantity: f64,

    /// Serving size, in `unit`
    #[arg(long, default_value_t = 100.0)]
    pub serving_size: f64,

    /// Serving unit
    #[arg(long, default_value = "g")]
    pub unit: String,

    /// Calories per 100 units
    #[arg(long)]
    pub calories: f64,

    /// Protein (g) per 100 units
    #[arg(long, default_value_t = 0.0)]
    pub protein: f64,

    /// Carbohydrates (g) per 100 units
    #[arg(long, default_value_t = 0.0)]
    pub carbs: f64,

    /// Fat (g) per 100 units
    #[arg(long, default_value_t = 0.0)]
    pub fat: f64,

    #[arg(long)]
    pub fiber: Option<f64>,

    #[arg(long)]
    pub sugar: Option<f64>,

    /// Sodium (mg) per 100 units
    #[arg(long)]
    pub sodium: Option<f64>,

    /// Water (ml) per 100 units
    #[arg(long)]
    pub water: Option<f64>,

    #[arg(long, default_value = "")]
    pub category: String,

    /// ISO date (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
}

impl LogArgs {
    fn into_entry(self) -> Result<FoodEntry> {
        let date = super::date_or_today(self.date.as_deref())?;
        let item = FoodItem {
            id: uuid::Uuid::now_v7().to_string(),
            name: self.name,
            category: self.category,
            serving_size: self.serving_size,
            serving_unit: self.unit,
            nutrition: NutritionFacts {
                calories: self.calories,
                protein: self.protein,
                carbs: self.carbs,
                fat: self.fat,
                fiber: self.fiber,
                sugar: self.sugar,
                sodium: self.sodium,
                water: self.water,
            },
        };
        Ok(FoodEntry::new(date, item, self.quantity, self.meal))
    }
}

/// Log an entry and print its id.
pub async fn log(config: &NutrilogConfig, args: LogArgs) -> Result<()> {
    let entry = args.into_entry()?;
    let mut store = super::open_store(config).await?;

    let saved = store.save_entry(entry).await?;
    let summary = store.get_daily_summary(saved.date).await;

    println!(
        "Logged {} ({} kcal) for {} on {}",
        saved.food_item.name,
        saved.calories().round(),
        saved.meal,
        saved.date
    );
    println!("  id: {}", saved.id);
    println!(
        "  day total: {} kcal over {} entries",
        summary.total_calories, summary.entry_count
    );

    store.close();
    Ok(())
}
