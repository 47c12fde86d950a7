//! Custom planner MCP Tools
//!
//! Edit the user's own weekly plan slot by slot and save it under a name.

use serde::Serialize;

use crate::catalog::Catalogs;
use crate::db::Database;
use crate::models::{DayOfWeek, MealSlot, Planner, SavedPlan, WeeklyPlan};

/// Planner contents, with recipe names next to their ids
#[derive(Debug, Serialize)]
pub struct PlannerDay {
    pub day: DayOfWeek,
    pub label: String,
    pub lunch: Option<PlannedRecipe>,
    pub dinner: Option<PlannedRecipe>,
}

#[derive(Debug, Serialize)]
pub struct PlannedRecipe {
    pub id: String,
    pub name: Option<String>,
}

/// Response for get_planner
#[derive(Debug, Serialize)]
pub struct PlannerResponse {
    pub days: Vec<PlannerDay>,
    pub filled_slots: usize,
}

/// Response for save_planner_as
#[derive(Debug, Serialize)]
pub struct SavePlanResponse {
    pub reference: String,
    pub name: String,
    pub description: String,
    pub created_at: String,
}

fn planned(catalogs: &Catalogs, plan: &WeeklyPlan, day: DayOfWeek, slot: MealSlot) -> Option<PlannedRecipe> {
    plan.recipe_id(day, slot).map(|id| PlannedRecipe {
        id: id.to_string(),
        name: catalogs.recipes.get(id).map(|r| r.name.clone()),
    })
}

fn planner_response(catalogs: &Catalogs, plan: &WeeklyPlan) -> PlannerResponse {
    let days = DayOfWeek::ALL
        .iter()
        .map(|&day| PlannerDay {
            day,
            label: day.label(),
            lunch: planned(catalogs, plan, day, MealSlot::Lunch),
            dinner: planned(catalogs, plan, day, MealSlot::Dinner),
        })
        .collect();

    PlannerResponse {
        days,
        filled_slots: plan.recipe_ids_for_week().iter().flatten().count(),
    }
}

// ============================================================================
// Planner Tools
// ============================================================================

/// Current planner contents
pub fn get_planner(db: &Database, catalogs: &Catalogs) -> Result<PlannerResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let plan = Planner::load(&conn).map_err(|e| format!("Failed to load planner: {}", e))?;
    Ok(planner_response(catalogs, &plan))
}

/// Put a catalog recipe into a planner slot
pub fn assign_recipe(
    db: &Database,
    catalogs: &Catalogs,
    day: DayOfWeek,
    slot: MealSlot,
    recipe_id: &str,
) -> Result<PlannerResponse, String> {
    if catalogs.recipes.get(recipe_id).is_none() {
        return Err(format!("Recipe not found: {}", recipe_id));
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    Planner::assign(&conn, day, slot, Some(recipe_id))
        .map_err(|e| format!("Failed to assign recipe: {}", e))?;
    tracing::info!(day = %day, slot = %slot, recipe_id, "Planner slot assigned");

    let plan = Planner::load(&conn).map_err(|e| format!("Failed to load planner: {}", e))?;
    Ok(planner_response(catalogs, &plan))
}

/// Empty one planner slot
pub fn clear_slot(
    db: &Database,
    catalogs: &Catalogs,
    day: DayOfWeek,
    slot: MealSlot,
) -> Result<PlannerResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    Planner::assign(&conn, day, slot, None).map_err(|e| format!("Failed to clear slot: {}", e))?;
    tracing::info!(day = %day, slot = %slot, "Planner slot cleared");

    let plan = Planner::load(&conn).map_err(|e| format!("Failed to load planner: {}", e))?;
    Ok(planner_response(catalogs, &plan))
}

/// Empty every slot of the planner
pub fn clear_planner(db: &Database, catalogs: &Catalogs) -> Result<PlannerResponse, String> {
    let mut conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    Planner::clear(&mut conn).map_err(|e| format!("Failed to clear planner: {}", e))?;
    tracing::info!("Planner cleared");

    let plan = Planner::load(&conn).map_err(|e| format!("Failed to load planner: {}", e))?;
    Ok(planner_response(catalogs, &plan))
}

/// Save the planner as a named plan
pub fn save_planner_as(db: &Database, name: &str) -> Result<SavePlanResponse, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Plan name cannot be empty".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let plan = Planner::load(&conn).map_err(|e| format!("Failed to load planner: {}", e))?;
    let saved = SavedPlan::create(&conn, name, &plan)
        .map_err(|e| format!("Failed to save plan: {}", e))?;
    tracing::info!(id = saved.id, name = %saved.name, "Planner saved");

    Ok(SavePlanResponse {
        reference: saved.reference().to_string(),
        name: saved.name,
        description: saved.description,
        created_at: saved.created_at,
    })
}
