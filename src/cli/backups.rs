//! CLI `backups` and `restore` commands.

use anyhow::Result;

use nutrilog::config::NutrilogConfig;

/// List backup archives, newest first.
pub async fn list(config: &NutrilogConfig) -> Result<()> {
    let store = super::open_store(config).await?;
    let backups = store.list_backups().await?;
    store.close();

    if backups.is_empty() {
        println!("No backups.");
        return Ok(());
    }

    println!("Backups (newest first, keeping {}):", config.storage.max_backups);
    for b in &backups {
        let date = b
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "?".into());
        println!(
            "  {date}  {}  {}",
            b.created.format("%Y-%m-%d %H:%M:%S"),
            b.name
        );
    }
    Ok(())
}

/// Replace a day's entries with the contents of a backup archive.
pub async fn restore(config: &NutrilogConfig, name: &str) -> Result<()> {
    let mut store = super::open_store(config).await?;
    let restored = store.restore_backup(name).await?;
    store.close();

    println!("Restored {restored} entries from {name}.");
    Ok(())
}
