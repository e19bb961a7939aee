use anyhow::{Context, Result};
use std::path::Path;

use nutrilog::config::NutrilogConfig;
use nutrilog::journal::ImportPayload;

/// Import entries from a JSON file.
///
/// Accepts the output of `export` or any object with an `entries` array.
/// Entries whose id already exists on their day are skipped.
pub async fn import(config: &NutrilogConfig, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read import file: {}", file.display()))?;

    let data: ImportPayload =
        serde_json::from_str(&json).context("failed to parse import JSON")?;

    println!("Importing {} entries...", data.entries.len());

    let mut store = super::open_store(config).await?;
    let report = store.import_entries(data.entries).await;
    store.close();

    println!("Import complete:");
    println!("  Entries imported: {}", report.imported);
    println!("  Entries skipped:  {} (already exist)", report.skipped);
    if report.errors > 0 {
        println!("  Entries failed:   {}", report.errors);
    }

    Ok(())
}
