use anyhow::Result;

use nutrilog::config::NutrilogConfig;
use nutrilog::journal::types::parse_date;

/// Export entries and summaries in a date range as JSON to stdout.
pub async fn export(config: &NutrilogConfig, start: Option<&str>, end: Option<&str>) -> Result<()> {
    let start = start.map(parse_date).transpose()?;
    let end = end.map(parse_date).transpose()?;

    let mut store = super::open_store(config).await?;
    let payload = store.export_range(start, end).await;
    store.close();

    let json = serde_json::to_string_pretty(&payload)?;
    println!("{json}");

    eprintln!(
        "Exported {} entries and {} daily summaries.",
        payload.entries.len(),
        payload.summaries.len()
    );

    Ok(())
}
