//! CLI `day` command: entries and totals for one day.

use anyhow::Result;
use serde::Serialize;

use nutrilog::config::NutrilogConfig;
use nutrilog::journal::types::{DailyNutritionSummary, FoodEntry, MealType};

#[derive(Debug, Serialize)]
struct DayReport {
    entries: Vec<FoodEntry>,
    summary: DailyNutritionSummary,
}

pub async fn day(config: &NutrilogConfig, date: Option<&str>, json: bool) -> Result<()> {
    let date = super::date_or_today(date)?;
    let mut store = super::open_store(config).await?;

    let entries = store.get_entries_for_date(date).await;
    let summary = store.get_daily_summary(date).await;
    store.close();

    if json {
        let report = DayReport { entries, summary };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Food Log: {date}");
    println!("{}", "=".repeat(40));
    if entries.is_empty() {
        println!("  No entries logged.");
        return Ok(());
    }

    for meal in MealType::ALL {
        let in_meal: Vec<&FoodEntry> = entries.iter().filter(|e| e.meal == meal).collect();
        if in_meal.is_empty() {
            continue;
        }
        println!(
            "{} ({} kcal)",
            meal.label(),
            summary.meal_breakdown.get(meal)
        );
        for e in in_meal {
            println!(
                "  {:<28} {:>6} kcal  {}",
                e.food_item.name,
                e.calories().round(),
                e.id
            );
        }
    }
    println!();
    println!("  Calories:  {} kcal", summary.total_calories);
    println!("  Protein:   {:.1} g", summary.total_protein);
    println!("  Carbs:     {:.1} g", summary.total_carbs);
    println!("  Fat:       {:.1} g", summary.total_fat);
    println!("  Fiber:     {:.1} g", summary.total_fiber);
    println!("  Sugar:     {:.1} g", summary.total_sugar);
    println!("  Sodium:    {} mg", summary.total_sodium);
    println!("  Water:     {:.1} ml", summary.total_water);

    Ok(())
}
