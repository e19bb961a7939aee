use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteEntryParams {
    #[schemars(description = "ID of the entry to delete")]
    pub id: String,

    #[schemars(
        description = "ISO date the entry was logged on. Without it only the last 30 days are searched."
    )]
    pub date: Option<String>,
}
