//! MCP `analyze_trends` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `analyze_trends` MCP tool.
///
/// Provide either `days` (a window ending today) or explicit `start`/`end`.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeTrendsParams {
    /// Window length ending today (1-366). Defaults to 7.
    #[schemars(description = "Number of days ending today to analyze (1-366). Defaults to 7.")]
    pub days: Option<u32>,

    #[schemars(description = "First day of the window (YYYY-MM-DD). Overrides 'days'.")]
    pub start: Option<String>,

    #[schemars(description = "Last day of the window (YYYY-MM-DD). Defaults to today.")]
    pub end: Option<String>,
}
