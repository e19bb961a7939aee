//! MCP `get_day` and `analyze_goals` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for tools that operate on a single day.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DayParams {
    /// ISO date; today when omitted.
    #[schemars(description = "ISO date (YYYY-MM-DD). Defaults to today.")]
    pub date: Option<String>,
}
