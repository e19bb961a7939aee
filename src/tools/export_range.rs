//! MCP `export_range` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExportRangeParams {
    #[schemars(description = "First day (YYYY-MM-DD). Defaults to 365 days before 'end'.")]
    pub start: Option<String>,

    #[schemars(description = "Last day (YYYY-MM-DD). Defaults to today.")]
    pub end: Option<String>,
}
