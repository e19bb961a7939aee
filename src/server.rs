//! MCP server initialization for the stdio transport.
//!
//! [`serve_stdio`] opens the journal and wires it into the MCP tool handler.

use anyhow::{Context, Result};
use rmcp::ServiceExt;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::tools::NutrilogTools;
use nutrilog::config::NutrilogConfig;
use nutrilog::journal::EntryStore;
use nutrilog::storage::fs::FsBackend;

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: NutrilogConfig) -> Result<()> {
    tracing::info!("starting nutrilog MCP server on stdio");

    let data_dir = config.resolved_data_dir();
    let backend = Arc::new(FsBackend::new(&data_dir));
    let store = EntryStore::open(backend, config.storage.clone())
        .await
        .with_context(|| format!("failed to open journal at {}", data_dir.display()))?;
    tracing::info!(data_dir = %data_dir.display(), "journal ready");

    let store = Arc::new(Mutex::new(store));
    let tools = NutrilogTools::new(Arc::clone(&store), Arc::new(config));
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    // The handler holds the other reference until the service is dropped.
    if let Ok(store) = Arc::try_unwrap(store) {
        store.into_inner().close();
    }

    Ok(())
}
