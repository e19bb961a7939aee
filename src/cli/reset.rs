//! CLI `reset` command: delete all journal data after user confirmation.

use anyhow::{bail, Result};
use std::io::Write;

use nutrilog::config::NutrilogConfig;

/// Delete every logged entry, day document, and backup after user confirmation.
pub async fn reset(config: &NutrilogConfig) -> Result<()> {
    let data_dir = config.resolved_data_dir();

    println!("WARNING: This will permanently delete ALL logged entries, day documents, and backups.");
    println!("Data directory: {}", data_dir.display());
    print!("\nType YES to confirm: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    if input.trim() != "YES" {
        bail!("reset cancelled");
    }

    let mut store = super::open_store(config).await?;
    store.clear_all().await?;
    store.close();

    println!("All entries deleted. Journal reset complete.");
    Ok(())
}
