//! Meal Plan MCP Server Implementation
//!
//! Implements the MCP server with all meal planning tools.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::catalog::Catalogs;
use crate::db::Database;
use crate::models::{DayOfWeek, MealSlot, PlanRef, PortionMultiplier, PriceEntry};
use crate::pricing::CanonicalUnit;
use crate::tools::shopping::ShoppingScope;
use crate::tools::status::StatusTracker;
use crate::tools::{planner, plans, prices, recipes, settings, shopping};

/// Meal Plan MCP Service
#[derive(Clone)]
pub struct MealPlanService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    catalogs: Arc<Catalogs>,
    tool_router: ToolRouter<MealPlanService>,
    /// Portion multiplier for this session, shared by every tool
    portions: Arc<std::sync::Mutex<PortionMultiplier>>,
}

impl MealPlanService {
    pub fn new(database_path: PathBuf, data_dir: PathBuf, database: Database, catalogs: Catalogs) -> Self {
        let tracker = StatusTracker::new(database_path, data_dir, catalogs.recipes.len(), catalogs.plans.len());
        Self {
            status_tracker: Arc::new(Mutex::new(tracker)),
            database,
            catalogs: Arc::new(catalogs),
            tool_router: Self::tool_router(),
            portions: Arc::new(std::sync::Mutex::new(PortionMultiplier::default())),
        }
    }

    fn current_portions(&self) -> Result<PortionMultiplier, McpError> {
        self.portions
            .lock()
            .map(|p| *p)
            .map_err(|_| McpError::internal_error("Portion state poisoned", None))
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Parse a user-supplied identifier, reporting failures as invalid params
fn parse_param<T>(value: &str) -> Result<T, McpError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| McpError::invalid_params(e.to_string(), None))
}

fn parse_unit(value: &str) -> Result<CanonicalUnit, McpError> {
    CanonicalUnit::from_str(value).ok_or_else(|| {
        McpError::invalid_params(
            format!("Unknown unit: {} (expected g, kg, ml, l or unidades)", value),
            None,
        )
    })
}

// ============================================================================
// Recipe Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListRecipesParams {
    /// Optional fragment of the recipe name (case-insensitive)
    pub query: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecipeParams {
    /// Recipe ID from the recipe catalog
    pub id: String,
}

// ============================================================================
// Plan Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DayMenuParams {
    /// Plan reference: predefined-<n>, custom-<id> or planner
    pub plan: String,
    /// Day of the week (lunes..domingo or monday..sunday). Defaults to today.
    pub day: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MealPrepParams {
    /// Plan reference: predefined-<n>, custom-<id> or planner
    pub plan: String,
}

// ============================================================================
// Planner Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AssignRecipeParams {
    /// Day of the week (lunes..domingo or monday..sunday)
    pub day: String,
    /// Meal: almuerzo (lunch) or cena (dinner)
    pub meal: String,
    /// Recipe ID from the recipe catalog
    pub recipe_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClearSlotParams {
    /// Day of the week (lunes..domingo or monday..sunday)
    pub day: String,
    /// Meal: almuerzo (lunch) or cena (dinner)
    pub meal: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SavePlannerParams {
    /// Name for the saved plan
    pub name: String,
}

// ============================================================================
// Price Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetPriceParams {
    /// Ingredient name exactly as it appears in recipes
    pub ingredient_name: String,
    /// Price paid for base_quantity (0 clears the price)
    pub price: f64,
    /// Quantity the price buys (e.g., 1 for "1 kg", 500 for "500 g")
    pub base_quantity: f64,
    /// Unit of base_quantity: g, kg, ml, l, unidades
    pub base_unit: String,
}

impl SetPriceParams {
    fn into_entry(self) -> Result<PriceEntry, McpError> {
        let unit = parse_unit(&self.base_unit)?;
        Ok(PriceEntry::new(&self.ingredient_name, self.price, self.base_quantity, unit))
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetPricesParams {
    /// Prices to save; all are saved or none is
    pub prices: Vec<SetPriceParams>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemovePriceParams {
    /// Ingredient name
    pub ingredient_name: String,
}

// ============================================================================
// Settings Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetCurrencyParams {
    /// Currency symbol shown before costs (e.g., "₡", "$", "€")
    pub symbol: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetPortionsParams {
    /// Number of portions, at least 1
    pub portions: i64,
}

// ============================================================================
// Shopping Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ShoppingListParams {
    /// Plan reference: predefined-<n>, custom-<id> or planner
    pub plan: String,
    /// "week" for the whole week, or a day name for a single day
    #[serde(default = "default_scope")]
    pub scope: String,
    /// Include optional ingredients (default false)
    #[serde(default)]
    pub include_optionals: bool,
}

fn default_scope() -> String { "week".to_string() }

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl MealPlanService {
    // --- Status ---

    #[tool(description = "Get the current status of the meal plan service including build info, database status, loaded catalogs and process information")]
    async fn mealplan_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        json_result(&status)
    }

    #[tool(description = "Get instructions for browsing plans, building a custom week and producing priced shopping lists. Call this when starting a meal planning session.")]
    fn planner_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::PLANNER_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(PLANNER_INSTRUCTIONS)]))
    }

    // --- Recipes ---

    #[tool(description = "List catalog recipes, optionally filtered by name")]
    fn list_recipes(&self, Parameters(p): Parameters<ListRecipesParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::list_recipes(&self.catalogs, p.query.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get a recipe with ingredients, instructions and nutrition scaled to the current portions")]
    fn get_recipe(&self, Parameters(p): Parameters<GetRecipeParams>) -> Result<CallToolResult, McpError> {
        let portions = self.current_portions()?;
        let result = recipes::get_recipe(&self.catalogs, &p.id, portions)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(recipe) => json_result(&recipe),
            None => Ok(CallToolResult::success(vec![Content::text(format!(
                r#"{{"error": "Recipe not found", "id": {:?}}}"#,
                p.id
            ))])),
        }
    }

    // --- Plans ---

    #[tool(description = "List predefined and saved weekly plans with the references other tools accept")]
    fn list_plans(&self) -> Result<CallToolResult, McpError> {
        let result = plans::list_plans(&self.database, &self.catalogs)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the current day of the week")]
    fn get_today(&self) -> Result<CallToolResult, McpError> {
        json_result(&plans::get_today())
    }

    #[tool(description = "Get the lunch and dinner of one day of a plan, scaled to the current portions")]
    fn get_day_menu(&self, Parameters(p): Parameters<DayMenuParams>) -> Result<CallToolResult, McpError> {
        let plan: PlanRef = parse_param(&p.plan)?;
        let day = match p.day.as_deref() {
            Some(day) => parse_param(day)?,
            None => DayOfWeek::today(),
        };
        let portions = self.current_portions()?;
        let result = plans::get_day_menu(&self.database, &self.catalogs, plan, day, portions)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the batch-cooking guide of a predefined plan")]
    fn get_meal_prep_guide(&self, Parameters(p): Parameters<MealPrepParams>) -> Result<CallToolResult, McpError> {
        let plan: PlanRef = parse_param(&p.plan)?;
        let result = plans::get_meal_prep_guide(&self.catalogs, plan)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Planner ---

    #[tool(description = "Get the custom planner: lunch and dinner for every day of the week")]
    fn get_planner(&self) -> Result<CallToolResult, McpError> {
        let result = planner::get_planner(&self.database, &self.catalogs)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Assign a catalog recipe to a day and meal of the custom planner")]
    fn assign_recipe(&self, Parameters(p): Parameters<AssignRecipeParams>) -> Result<CallToolResult, McpError> {
        let day: DayOfWeek = parse_param(&p.day)?;
        let slot: MealSlot = parse_param(&p.meal)?;
        let result = planner::assign_recipe(&self.database, &self.catalogs, day, slot, &p.recipe_id)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Remove the recipe from one day and meal of the custom planner")]
    fn clear_planner_slot(&self, Parameters(p): Parameters<ClearSlotParams>) -> Result<CallToolResult, McpError> {
        let day: DayOfWeek = parse_param(&p.day)?;
        let slot: MealSlot = parse_param(&p.meal)?;
        let result = planner::clear_slot(&self.database, &self.catalogs, day, slot)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Empty every slot of the custom planner")]
    fn clear_planner(&self) -> Result<CallToolResult, McpError> {
        let result = planner::clear_planner(&self.database, &self.catalogs)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Save the custom planner as a named plan (referenced as custom-<id>)")]
    fn save_planner(&self, Parameters(p): Parameters<SavePlannerParams>) -> Result<CallToolResult, McpError> {
        let result = planner::save_planner_as(&self.database, &p.name)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Prices ---

    #[tool(description = "List every ingredient used by the recipes with its saved price")]
    fn list_price_catalog(&self) -> Result<CallToolResult, McpError> {
        let result = prices::list_price_catalog(&self.database, &self.catalogs)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Save the price of an ingredient for a base quantity and unit. Replaces any earlier price.")]
    fn set_price(&self, Parameters(p): Parameters<SetPriceParams>) -> Result<CallToolResult, McpError> {
        let entry = p.into_entry()?;
        let result = prices::set_price(&self.database, entry)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Save several ingredient prices at once. Nothing is saved if any entry is invalid.")]
    fn set_prices(&self, Parameters(p): Parameters<SetPricesParams>) -> Result<CallToolResult, McpError> {
        let entries = p
            .prices
            .into_iter()
            .map(SetPriceParams::into_entry)
            .collect::<Result<Vec<_>, _>>()?;
        let result = prices::set_prices(&self.database, entries)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Forget the saved price of an ingredient")]
    fn remove_price(&self, Parameters(p): Parameters<RemovePriceParams>) -> Result<CallToolResult, McpError> {
        let result = prices::remove_price(&self.database, &p.ingredient_name)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Settings ---

    #[tool(description = "Get the currency symbol used for costs")]
    fn get_currency(&self) -> Result<CallToolResult, McpError> {
        let result = settings::get_currency(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Set the currency symbol used for costs")]
    fn set_currency(&self, Parameters(p): Parameters<SetCurrencyParams>) -> Result<CallToolResult, McpError> {
        let result = settings::set_currency(&self.database, &p.symbol)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the number of portions recipes and shopping lists are scaled to")]
    fn get_portions(&self) -> Result<CallToolResult, McpError> {
        let portions = self.current_portions()?;
        json_result(&settings::get_portions(portions))
    }

    #[tool(description = "Set the number of portions (at least 1) for the rest of the session")]
    fn set_portions(&self, Parameters(p): Parameters<SetPortionsParams>) -> Result<CallToolResult, McpError> {
        let mut portions = self
            .portions
            .lock()
            .map_err(|_| McpError::internal_error("Portion state poisoned", None))?;
        let result = settings::set_portions(&mut portions, p.portions)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    // --- Shopping ---

    #[tool(description = "Build the priced, categorized shopping list for a week or one day of a plan. Includes a plain-text version ready to copy.")]
    fn shopping_list(&self, Parameters(p): Parameters<ShoppingListParams>) -> Result<CallToolResult, McpError> {
        let plan: PlanRef = parse_param(&p.plan)?;
        let scope: ShoppingScope = parse_param(&p.scope)?;
        let portions = self.current_portions()?;
        let result = shopping::generate_shopping_list(
            &self.database,
            &self.catalogs,
            plan,
            scope,
            p.include_optionals,
            portions,
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

#[tool_handler]
impl ServerHandler for MealPlanService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mealplan".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Meal Plan Manager".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Meal Plan Manager - Weekly meal plans, a custom planner and priced shopping lists. \
                 IMPORTANT: Call planner_instructions first. \
                 Recipes: list_recipes, get_recipe. \
                 Plans: list_plans, get_today, get_day_menu, get_meal_prep_guide. \
                 Planner: get_planner, assign_recipe, clear_planner_slot, clear_planner, save_planner. \
                 Prices: list_price_catalog, set_price, set_prices, remove_price. \
                 Settings: get/set_currency, get/set_portions. \
                 Shopping: shopping_list (scope week or a day)."
                    .into(),
            ),
        }
    }
}
