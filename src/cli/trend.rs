//! CLI `trend` command: attainment and consistency over a trailing window.

use anyhow::Result;

use nutrilog::analysis::analyze_trends;
use nutrilog::analysis::trends::window_start;
use nutrilog::config::NutrilogConfig;
use nutrilog::journal::store::today;

pub async fn trend(config: &NutrilogConfig, days: u32, json: bool) -> Result<()> {
    let end = today();
    let start = window_start(end, i64::from(days))?;

    let mut store = super::open_store(config).await?;
    // Days with nothing logged would drag every average toward zero.
    let summaries: Vec<_> = store
        .get_summaries_for_range(start, end)
        .await
        .into_iter()
        .filter(|s| s.entry_count > 0)
        .collect();
    store.close();

    let analysis = analyze_trends(&summaries, &config.goals);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("Trends: {start} to {end}");
    println!("{}", "=".repeat(40));
    println!("  Days with entries:   {} of {days}", analysis.days);
    if analysis.days == 0 {
        return Ok(());
    }

    let a = &analysis.averages;
    println!("  Avg calories:        {} kcal", a.calories);
    println!("  Avg protein:         {} g", a.protein);
    println!("  Avg carbs:           {} g", a.carbs);
    println!("  Avg fat:             {} g", a.fat);
    println!("  Avg fiber:           {} g", a.fiber);
    println!();

    let g = &analysis.attainment;
    println!("Goal attainment (% of days):");
    println!("  {:<10} {}%", "calories", g.calories);
    println!("  {:<10} {}%", "protein", g.protein);
    println!("  {:<10} {}%", "carbs", g.carbs);
    println!("  {:<10} {}%", "fat", g.fat);
    println!();

    let c = &analysis.consistency;
    println!("Consistency:");
    println!("  Calorie std dev:     {} kcal", c.calorie_variance);
    println!("  Protein in range:    {}% of days", c.protein_consistency);
    println!("  Score:               {}/100", c.overall_score);

    if !analysis.suggestions.is_empty() {
        println!();
        println!("Suggestions:");
        for s in &analysis.suggestions {
            println!("  - {s}");
        }
    }

    Ok(())
}
