use anyhow::{bail, Result};

use nutrilog::config::NutrilogConfig;
use nutrilog::journal::store::DELETE_LOOKBACK_DAYS;
use nutrilog::journal::types::parse_date;

/// Delete one entry by id.
pub async fn delete(config: &NutrilogConfig, id: &str, date: Option<&str>) -> Result<()> {
    let date = date.map(parse_date).transpose()?;
    let mut store = super::open_store(config).await?;

    let deleted = store.delete_entry(id, date).await?;
    store.close();

    if !deleted {
        match date {
            Some(d) => bail!("no entry {id} on {d}"),
            None => bail!(
                "no entry {id} in the last {DELETE_LOOKBACK_DAYS} days (pass --date for older entries)"
            ),
        }
    }

    println!("Deleted entry {id}.");
    Ok(())
}
