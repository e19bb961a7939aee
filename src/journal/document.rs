//! Per-day Markdown document.
//!
//! Layout, in order: a title line, an optional rendered summary with meal
//! breakdown, a "Food Entries" section with one subsection per non-empty meal,
//! and a "Raw Data" section holding one JSON entry per line inside a fenced
//! block. Only the fenced block is read back; the prose above it is output only.

use chrono::NaiveDate;
use std::fmt::Write;

use crate::config::{join_path, StorageConfig};
use crate::journal::types::{DailyNutritionSummary, FoodEntry, MealType};

/// Heading that introduces the machine-readable block.
pub const RAW_DATA_HEADING: &str = "## Raw Data";
/// Opening fence of the machine-readable block.
pub const RAW_DATA_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Result of leniently parsing a day document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentParse {
    pub entries: Vec<FoodEntry>,
    /// Non-blank lines inside the fenced block that did not parse as an entry.
    pub skipped_lines: usize,
}

/// Relative path of the document for `date`.
///
/// Falls back to the ISO date when `file_pattern` is not a valid chrono format.
pub fn document_path(config: &StorageConfig, date: NaiveDate) -> String {
    let mut stem = String::new();
    if write!(stem, "{}", date.format(&config.file_pattern)).is_err() || stem.trim().is_empty() {
        stem = date.format("%Y-%m-%d").to_string();
    }
    join_path(&config.root, &format!("{stem}.md"))
}

fn fmt_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let s = format!("{value:.2}");
        s.trim_end_matches('0').to_string()
    }
}

/// Render the full document for one day.
pub fn render_day_document(
    date: NaiveDate,
    entries: &[FoodEntry],
    summary: Option<&DailyNutritionSummary>,
) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "# Food Log: {date}");
    let _ = writeln!(out);

    if let Some(s) = summary {
        let _ = writeln!(out, "## Daily Summary");
        let _ = writeln!(out);
        let _ = writeln!(out, "- **Calories:** {} kcal", s.total_calories);
        let _ = writeln!(out, "- **Protein:** {:.1} g", s.total_protein);
        let _ = writeln!(out, "- **Carbs:** {:.1} g", s.total_carbs);
        let _ = writeln!(out, "- **Fat:** {:.1} g", s.total_fat);
        let _ = writeln!(out, "- **Fiber:** {:.1} g", s.total_fiber);
        let _ = writeln!(out, "- **Sugar:** {:.1} g", s.total_sugar);
        let _ = writeln!(out, "- **Sodium:** {} mg", s.total_sodium);
        let _ = writeln!(out, "- **Water:** {:.1} ml", s.total_water);
        let _ = writeln!(out, "- **Entries:** {}", s.entry_count);
        let _ = writeln!(out);
        let _ = writeln!(out, "### Meal Breakdown");
        let _ = writeln!(out);
        for meal in MealType::ALL {
            let _ = writeln!(
                out,
                "- {}: {} kcal",
                meal.label(),
                s.meal_breakdown.get(meal)
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "## Food Entries");
    let _ = writeln!(out);
    if entries.is_empty() {
        let _ = writeln!(out, "_No entries logged._");
        let _ = writeln!(out);
    }
    for meal in MealType::ALL {
        let in_meal: Vec<&FoodEntry> = entries.iter().filter(|e| e.meal == meal).collect();
        if in_meal.is_empty() {
            continue;
        }
        let _ = writeln!(out, "### {}", meal.label());
        let _ = writeln!(out);
        for entry in in_meal {
            let item = &entry.food_item;
            let _ = writeln!(
                out,
                "- {}: {} x {} {} ({} kcal)",
                item.name,
                fmt_amount(entry.quantity),
                fmt_amount(item.serving_size),
                item.serving_unit,
                entry.calories().round()
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{RAW_DATA_HEADING}");
    let _ = writeln!(out);
    let _ = writeln!(out, "{RAW_DATA_FENCE}");
    for entry in entries {
        match serde_json::to_string(entry) {
            Ok(line) => {
                let _ = writeln!(out, "{line}");
            }
            Err(e) => tracing::warn!(id = %entry.id, error = %e, "entry not serializable"),
        }
    }
    let _ = writeln!(out, "{FENCE}");
    out
}

/// Extract entries from the fenced raw-data block.
///
/// Lines that fail to parse are counted and dropped; a document without the
/// block yields no entries.
pub fn parse_day_document(text: &str) -> DocumentParse {
    let mut result = DocumentParse::default();
    let mut lines = text.lines().skip_while(|l| l.trim() != RAW_DATA_HEADING);

    if lines.next().is_none() {
        return result;
    }
    if lines.by_ref().find(|l| l.trim_start().starts_with(FENCE)).is_none() {
        return result;
    }

    for line in lines {
        let line = line.trim();
        if line == FENCE {
            break;
        }
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<FoodEntry>(line) {
            Ok(entry) => result.entries.push(entry),
            Err(_) => result.skipped_lines += 1,
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::calculate_summary;
    use crate::journal::types::{FoodItem, NutritionFacts};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 9).unwrap()
    }

    fn entry(id: &str, name: &str, meal: MealType) -> FoodEntry {
        let mut e = FoodEntry::new(
            date(),
            FoodItem {
                id: format!("food-{id}"),
                name: name.into(),
                category: "test".into(),
                serving_size: 150.0,
                serving_unit: "g".into(),
                nutrition: NutritionFacts {
                    calories: 52.0,
                    protein: 0.3,
                    carbs: 14.0,
                    fat: 0.2,
                    fiber: Some(2.4),
                    sugar: Some(10.0),
                    ..Default::default()
                },
            },
            1.5,
            meal,
        );
        e.id = id.into();
        e
    }

    #[test]
    fn render_then_parse_recovers_entries() {
        let entries = vec![
            entry("a", "Apple", MealType::Breakfast),
            entry("b", "Pear", MealType::Snack),
        ];
        let summary = calculate_summary(date(), &entries);
        let doc = render_day_document(date(), &entries, Some(&summary));

        assert!(doc.starts_with("# Food Log: 2026-01-09"));
        assert!(doc.contains("## Daily Summary"));
        assert!(doc.contains("### Breakfast"));
        assert!(doc.contains("- Apple: 1.5 x 150 g (117 kcal)"));
        assert!(!doc.contains("### Lunch"));

        let parsed = parse_day_document(&doc);
        assert_eq!(parsed.skipped_lines, 0);
        assert_eq!(parsed.entries, entries);
    }

    #[test]
    fn summary_block_is_optional() {
        let entries = vec![entry("a", "Apple", MealType::Lunch)];
        let doc = render_day_document(date(), &entries, None);
        assert!(!doc.contains("## Daily Summary"));
        assert_eq!(parse_day_document(&doc).entries.len(), 1);
    }

    #[test]
    fn corrupt_lines_are_skipped_and_counted() {
        let good = serde_json::to_string(&entry("a", "Apple", MealType::Dinner)).unwrap();
        let doc = format!(
            "# Food Log: 2026-01-09\n\n## Food Entries\n\n- {{\"not\": \"parsed\"}}\n\n\
             ## Raw Data\n\n```json\n{good}\n{{broken json\n\n{{\"id\": \"x\"}}\n```\n\
             {good}\n"
        );
        let parsed = parse_day_document(&doc);
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].id, "a");
        assert_eq!(parsed.skipped_lines, 2);
    }

    #[test]
    fn document_without_raw_block_yields_nothing() {
        let parsed = parse_day_document("# Food Log: 2026-01-09\n\n- Apple\n");
        assert_eq!(parsed, DocumentParse::default());

        let parsed = parse_day_document("## Raw Data\n\nno fence here\n");
        assert_eq!(parsed, DocumentParse::default());
    }

    #[test]
    fn empty_day_renders_placeholder() {
        let doc = render_day_document(date(), &[], None);
        assert!(doc.contains("_No entries logged._"));
        assert!(parse_day_document(&doc).entries.is_empty());
    }

    #[test]
    fn document_path_uses_pattern_with_fallback() {
        let mut config = StorageConfig::default();
        assert_eq!(document_path(&config, date()), "journal/2026-01-09.md");

        config.file_pattern = "%Y/%m/%d".into();
        assert_eq!(document_path(&config, date()), "journal/2026/01/09.md");

        config.file_pattern = "%Q".into();
        assert_eq!(document_path(&config, date()), "journal/2026-01-09.md");
    }
}
