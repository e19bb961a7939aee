//! CLI `goals` command: one day's progress against the configured goals.

use anyhow::Result;

use nutrilog::analysis::analyze_goals;
use nutrilog::analysis::goals::{NutrientLimit, NutrientProgress};
use nutrilog::config::NutrilogConfig;

fn progress_line(label: &str, unit: &str, p: &NutrientProgress) {
    println!(
        "  {:<10} {:>8} / {:<8} {unit:<4} {:>4}%  ({} {unit} to go)",
        label, p.current, p.target, p.percentage, p.remaining
    );
}

fn limit_line(label: &str, unit: &str, l: &NutrientLimit) {
    println!(
        "  {:<10} {:>8} / {:<8} {unit:<4} {:>4}%  [{}]",
        label, l.current, l.limit, l.percentage, l.status
    );
}

pub async fn goals(config: &NutrilogConfig, date: Option<&str>, json: bool) -> Result<()> {
    let date = super::date_or_today(date)?;
    let mut store = super::open_store(config).await?;
    let summary = store.get_daily_summary(date).await;
    store.close();

    let analysis = analyze_goals(&summary, &config.goals);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("Goal Progress: {date}");
    println!("{}", "=".repeat(40));
    progress_line("Calories", "kcal", &analysis.progress.calories);
    progress_line("Protein", "g", &analysis.progress.protein);
    progress_line("Carbs", "g", &analysis.progress.carbs);
    progress_line("Fiber", "g", &analysis.progress.fiber);
    progress_line("Water", "ml", &analysis.progress.water);
    println!();

    println!("Limits:");
    limit_line("Sugar", "g", &analysis.limits.sugar);
    limit_line("Sodium", "mg", &analysis.limits.sodium);
    println!();

    let m = &analysis.macros;
    println!(
        "Macros: protein {}% / carbs {}% / fat {}%",
        m.protein_percent, m.carbs_percent, m.fat_percent
    );

    if !analysis.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for w in &analysis.warnings {
            println!("  ! {w}");
        }
    }
    if !analysis.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for r in &analysis.recommendations {
            println!("  - {r}");
        }
    }

    Ok(())
}
