pub mod analyze_trends;
pub mod delete_entry;
pub mod export_range;
pub mod get_day;
pub mod log_food;

use analyze_trends::AnalyzeTrendsParams;
use chrono::NaiveDate;
use delete_entry::DeleteEntryParams;
use export_range::ExportRangeParams;
use get_day::DayParams;
use log_food::LogFoodParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use std::sync::Arc;
use tokio::sync::Mutex;

use nutrilog::analysis::trends::{check_window, window_start};
use nutrilog::analysis::{analyze_goals, analyze_trends};
use nutrilog::config::NutrilogConfig;
use nutrilog::journal::store::today;
use nutrilog::journal::types::{parse_date, FoodEntry, FoodItem, MealType, NutritionFacts};
use nutrilog::journal::EntryStore;

/// The nutrilog MCP tool handler. Holds the shared entry store and config and
/// exposes all MCP tools via the `#[tool_router]` macro.
#[derive(Clone)]
pub struct NutrilogTools {
    tool_router: ToolRouter<Self>,
    store: Arc<Mutex<EntryStore>>,
    config: Arc<NutrilogConfig>,
}

fn optional_date(date: Option<&str>) -> Result<Option<NaiveDate>, String> {
    date.map(parse_date).transpose().map_err(|e| e.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("serialization failed: {e}"))
}

#[tool_router]
impl NutrilogTools {
    pub fn new(store: Arc<Mutex<EntryStore>>, config: Arc<NutrilogConfig>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            store,
            config,
        }
    }

    /// Log a food entry to the journal.
    #[tool(description = "Log a food entry. Nutrition values are per 100 units of the serving unit; quantity is the number of servings eaten.")]
    async fn log_food(
        &self,
        Parameters(params): Parameters<LogFoodParams>,
    ) -> Result<String, String> {
        let meal: MealType = params.meal.parse()?;
        let date = optional_date(params.date.as_deref())?.unwrap_or_else(today);

        let item = FoodItem {
            id: uuid::Uuid::now_v7().to_string(),
            name: params.name,
            category: params.category.unwrap_or_default(),
            serving_size: params.serving_size.unwrap_or(100.0),
            serving_unit: params.serving_unit.unwrap_or_else(|| "g".into()),
            nutrition: NutritionFacts {
                calories: params.calories,
                protein: params.protein.unwrap_or(0.0),
                carbs: params.carbs.unwrap_or(0.0),
                fat: params.fat.unwrap_or(0.0),
                fiber: params.fiber,
                sugar: params.sugar,
                sodium: params.sodium,
                water: params.water,
            },
        };
        let entry = FoodEntry::new(date, item, params.quantity.unwrap_or(1.0), meal);

        tracing::info!(name = %entry.food_item.name, meal = %meal, date = %date, "log_food called");

        let mut store = self.store.lock().await;
        let saved = store
            .save_entry(entry)
            .await
            .map_err(|e| format!("log failed: {e}"))?;
        let summary = store.get_daily_summary(date).await;

        to_json(&serde_json::json!({
            "entry": saved,
            "summary": summary,
        }))
    }

    /// Entries and nutrient totals for one day.
    #[tool(description = "Get all food entries and the nutrition summary for one day.")]
    async fn get_day(&self, Parameters(params): Parameters<DayParams>) -> Result<String, String> {
        let date = optional_date(params.date.as_deref())?.unwrap_or_else(today);
        tracing::info!(date = %date, "get_day called");

        let mut store = self.store.lock().await;
        let entries = store.get_entries_for_date(date).await;
        let summary = store.get_daily_summary(date).await;

        to_json(&serde_json::json!({
            "entries": entries,
            "summary": summary,
        }))
    }

    /// Compare one day with the configured goals.
    #[tool(description = "Analyze one day's intake against nutrition goals: progress, sugar/sodium limits, macro split, recommendations, and warnings.")]
    async fn analyze_goals(
        &self,
        Parameters(params): Parameters<DayParams>,
    ) -> Result<String, String> {
        let date = optional_date(params.date.as_deref())?.unwrap_or_else(today);
        tracing::info!(date = %date, "analyze_goals called");

        let summary = self.store.lock().await.get_daily_summary(date).await;
        to_json(&analyze_goals(&summary, &self.config.goals))
    }

    /// Goal attainment and consistency over a window.
    #[tool(description = "Analyze trends over a window of days: averages, goal attainment rates, consistency score, and suggestions. Days with no entries are excluded.")]
    async fn analyze_trends(
        &self,
        Parameters(params): Parameters<AnalyzeTrendsParams>,
    ) -> Result<String, String> {
        let end = optional_date(params.end.as_deref())?.unwrap_or_else(today);
        let start = match optional_date(params.start.as_deref())? {
            Some(start) => start,
            None => window_start(end, i64::from(params.days.unwrap_or(7)))
                .map_err(|e| e.to_string())?,
        };
        // Explicit ranges are bounded too.
        check_window(start, end).map_err(|e| e.to_string())?;
        tracing::info!(start = %start, end = %end, "analyze_trends called");

        let summaries: Vec<_> = self
            .store
            .lock()
            .await
            .get_summaries_for_range(start, end)
            .await
            .into_iter()
            .filter(|s| s.entry_count > 0)
            .collect();

        to_json(&analyze_trends(&summaries, &self.config.goals))
    }

    /// Delete one entry.
    #[tool(description = "Delete a food entry by ID. Pass the entry's date for entries older than 30 days.")]
    async fn delete_entry(
        &self,
        Parameters(params): Parameters<DeleteEntryParams>,
    ) -> Result<String, String> {
        let date = optional_date(params.date.as_deref())?;
        tracing::info!(id = %params.id, "delete_entry called");

        let deleted = self
            .store
            .lock()
            .await
            .delete_entry(&params.id, date)
            .await
            .map_err(|e| format!("delete failed: {e}"))?;

        to_json(&serde_json::json!({
            "id": params.id,
            "deleted": deleted,
        }))
    }

    /// Entries and summaries over a date range.
    #[tool(description = "Export entries and daily summaries for a date range as JSON. Defaults to the last 365 days.")]
    async fn export_range(
        &self,
        Parameters(params): Parameters<ExportRangeParams>,
    ) -> Result<String, String> {
        let start = optional_date(params.start.as_deref())?;
        let end = optional_date(params.end.as_deref())?;
        tracing::info!(?start, ?end, "export_range called");

        let payload = self.store.lock().await.export_range(start, end).await;
        to_json(&payload)
    }
}

#[tool_handler]
impl ServerHandler for NutrilogTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "nutrilog is a food journal. Use log_food to record what was eaten, get_day \
                 to review a day, analyze_goals and analyze_trends for feedback against \
                 nutrition goals."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
