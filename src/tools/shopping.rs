//! Shopping list MCP Tools
//!
//! Priced, categorized shopping lists for one day or a whole week of a plan.

use std::str::FromStr;

use serde::Serialize;

use crate::catalog::Catalogs;
use crate::context::AppContext;
use crate::db::Database;
use crate::models::{DayOfWeek, PlanRef, PortionMultiplier, ValidationError};
use crate::shopping::{day_title, ShoppingListRequest, ShoppingListView, WEEKLY_TITLE};
use crate::tools::plans::resolve_weekly_plan;

/// Which slots of a plan feed the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShoppingScope {
    Day(DayOfWeek),
    Week,
}

impl FromStr for ShoppingScope {
    type Err = ValidationError;

    /// `week` (or `semana`), otherwise a day name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "semana" => Ok(ShoppingScope::Week),
            day => day.parse().map(ShoppingScope::Day),
        }
    }
}

/// Response for generate_shopping_list
#[derive(Debug, Serialize)]
pub struct ShoppingListResponse {
    pub plan: String,
    pub portions: u32,
    pub include_optionals: bool,
    pub line_count: usize,
    pub total_cost: f64,
    pub list: ShoppingListView,
    /// Ready to paste into a notes app
    pub plain_text: String,
}

/// Aggregate, price and render the list for a plan
pub fn generate_shopping_list(
    db: &Database,
    catalogs: &Catalogs,
    plan: PlanRef,
    scope: ShoppingScope,
    include_optionals: bool,
    portions: PortionMultiplier,
) -> Result<ShoppingListResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let weekly = resolve_weekly_plan(&conn, catalogs, plan)?;
    let ctx = AppContext::load(catalogs, &conn, portions)
        .map_err(|e| format!("Failed to load prices: {}", e))?;

    let (recipe_ids, title) = match scope {
        ShoppingScope::Day(day) => (weekly.recipe_ids_for_day(day), day_title(day)),
        ShoppingScope::Week => (weekly.recipe_ids_for_week(), WEEKLY_TITLE.to_string()),
    };

    let request = ShoppingListRequest::new(recipe_ids, include_optionals);
    let (list, view) = ctx.shopping_list_view(&request, &title);
    tracing::debug!(plan = %plan, lines = list.line_count(), total = list.total_cost, "Shopping list generated");

    Ok(ShoppingListResponse {
        plan: plan.to_string(),
        portions: portions.get(),
        include_optionals,
        line_count: list.line_count(),
        total_cost: list.total_cost,
        plain_text: view.to_plain_text(),
        list: view,
    })
}
