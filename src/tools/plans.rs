//! Plan MCP Tools
//!
//! Predefined and saved weekly plans: listing, day menus and meal-prep guides.

use rusqlite::Connection;
use serde::Serialize;

use crate::catalog::Catalogs;
use crate::db::Database;
use crate::models::{
    DayOfWeek, MealSlot, Planner, PlanRef, PortionMultiplier, RelatedRecipes, SavedPlan,
    WeeklyPlan,
};
use crate::tools::recipes::RecipeView;

const ALL_RECIPES_LABEL: &str = "All recipes of the week";
const NO_RECIPES_LABEL: &str = "N/A";
const NO_MEAL_PREP_MESSAGE: &str =
    "Meal-prep guides are only available for predefined plans that include one.";

/// Plan summary for listing
#[derive(Debug, Serialize)]
pub struct PlanSummary {
    pub reference: String,
    pub name: String,
    pub description: String,
    pub has_meal_prep: bool,
}

/// Response for list_plans
#[derive(Debug, Serialize)]
pub struct ListPlansResponse {
    pub predefined: Vec<PlanSummary>,
    pub saved: Vec<PlanSummary>,
}

/// Response for get_today
#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub day: DayOfWeek,
    pub label: String,
}

/// One slot of a day menu
#[derive(Debug, Serialize)]
pub struct MealView {
    pub slot: MealSlot,
    pub label: String,
    pub recipe: Option<RecipeView>,
}

/// Response for get_day_menu
#[derive(Debug, Serialize)]
pub struct DayMenuResponse {
    pub plan: String,
    pub day: DayOfWeek,
    pub portions: u32,
    pub meals: Vec<MealView>,
}

/// A meal-prep step with recipe names resolved
#[derive(Debug, Serialize)]
pub struct PrepStepView {
    pub description: String,
    pub component: String,
    pub recipes: String,
    pub storage_instructions: String,
}

/// Response for get_meal_prep_guide
#[derive(Debug, Serialize)]
pub struct MealPrepResponse {
    pub plan: String,
    pub steps: Vec<PrepStepView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Weekly plan behind a reference
pub fn resolve_weekly_plan(
    conn: &Connection,
    catalogs: &Catalogs,
    plan: PlanRef,
) -> Result<WeeklyPlan, String> {
    match plan {
        PlanRef::Predefined(index) => catalogs
            .plans
            .get(index)
            .map(|p| p.weekly_plan.clone())
            .ok_or_else(|| format!("Predefined plan not found: {}", plan)),
        PlanRef::Saved(id) => SavedPlan::get_by_id(conn, id)
            .map_err(|e| format!("Failed to get saved plan: {}", e))?
            .map(|p| p.weekly_plan)
            .ok_or_else(|| format!("Saved plan not found: {}", plan)),
        PlanRef::Planner => Planner::load(conn).map_err(|e| format!("Failed to load planner: {}", e)),
    }
}

// ============================================================================
// Plan Tools
// ============================================================================

/// List predefined and saved plans with their references
pub fn list_plans(db: &Database, catalogs: &Catalogs) -> Result<ListPlansResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let predefined = catalogs
        .plans
        .iter()
        .enumerate()
        .map(|(index, plan)| PlanSummary {
            reference: PlanRef::Predefined(index).to_string(),
            name: plan.name.clone(),
            description: plan.description.clone(),
            has_meal_prep: plan.meal_prep.as_ref().is_some_and(|m| !m.steps.is_empty()),
        })
        .collect();

    let saved = SavedPlan::list(&conn)
        .map_err(|e| format!("Failed to list saved plans: {}", e))?
        .into_iter()
        .map(|plan| PlanSummary {
            reference: plan.reference().to_string(),
            name: plan.name,
            description: plan.description,
            has_meal_prep: false,
        })
        .collect();

    Ok(ListPlansResponse { predefined, saved })
}

/// Current day of the week
pub fn get_today() -> TodayResponse {
    let day = DayOfWeek::today();
    TodayResponse {
        day,
        label: day.label(),
    }
}

/// Lunch and dinner of one day, scaled to the portion multiplier
pub fn get_day_menu(
    db: &Database,
    catalogs: &Catalogs,
    plan: PlanRef,
    day: DayOfWeek,
    portions: PortionMultiplier,
) -> Result<DayMenuResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let weekly = resolve_weekly_plan(&conn, catalogs, plan)?;

    let meals = MealSlot::ALL
        .iter()
        .map(|&slot| MealView {
            slot,
            label: slot.label(),
            recipe: weekly
                .recipe_id(day, slot)
                .and_then(|id| catalogs.recipes.get(id))
                .map(|recipe| RecipeView::new(recipe, portions)),
        })
        .collect();

    Ok(DayMenuResponse {
        plan: plan.to_string(),
        day,
        portions: portions.get(),
        meals,
    })
}

/// Batch-cooking guide of a predefined plan
pub fn get_meal_prep_guide(catalogs: &Catalogs, plan: PlanRef) -> Result<MealPrepResponse, String> {
    let guide = match plan {
        PlanRef::Predefined(index) => catalogs
            .plans
            .get(index)
            .ok_or_else(|| format!("Predefined plan not found: {}", plan))?
            .meal_prep
            .as_ref(),
        PlanRef::Saved(_) | PlanRef::Planner => None,
    };

    let Some(guide) = guide.filter(|g| !g.steps.is_empty()) else {
        return Ok(MealPrepResponse {
            plan: plan.to_string(),
            steps: Vec::new(),
            message: Some(NO_MEAL_PREP_MESSAGE.to_string()),
        });
    };

    let steps = guide
        .steps
        .iter()
        .map(|step| PrepStepView {
            description: step.description.clone(),
            component: step.component.clone(),
            recipes: related_recipe_names(catalogs, &step.related_recipes),
            storage_instructions: step.storage_instructions.clone(),
        })
        .collect();

    Ok(MealPrepResponse {
        plan: plan.to_string(),
        steps,
        message: None,
    })
}

fn related_recipe_names(catalogs: &Catalogs, related: &RelatedRecipes) -> String {
    match related {
        RelatedRecipes::All => ALL_RECIPES_LABEL.to_string(),
        RelatedRecipes::Ids(ids) => {
            let names: Vec<&str> = ids
                .iter()
                .filter_map(|id| catalogs.recipes.get(id))
                .map(|r| r.name.as_str())
                .collect();
            if names.is_empty() {
                NO_RECIPES_LABEL.to_string()
            } else {
                names.join(", ")
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::{PlanCatalog, RecipeCatalog};

    pub(crate) fn sample_catalogs() -> Catalogs {
        let recipes = RecipeCatalog::from_json(
            r#"{"recetas": [
                {"id": "pinto", "nombre": "Gallo Pinto", "ingredientes": [
                    {"nombre": "Arroz", "cantidad": "1/2 taza", "cantidadMetrica": 100, "unidadMetrica": "g", "categoria": "Granos"},
                    {"nombre": "Frijoles", "cantidad": "1 taza", "cantidadMetrica": 180, "unidadMetrica": "g", "categoria": "Granos"}
                ], "resumenNutricional": {"caloriasTotales": 400, "proteinasTotales": 12, "grasasTotales": 8, "carbohidratosTotales": 70}},
                {"id": "casado", "nombre": "Casado", "ingredientes": [
                    {"nombre": "Arroz", "cantidad": "3/4 taza", "cantidadMetrica": 150, "unidadMetrica": "g", "categoria": "Granos"},
                    {"nombre": "Leche", "cantidad": "1 taza", "cantidadMetrica": 250, "unidadMetrica": "ml", "categoria": "Lácteos"}
                ], "ingredientesOpcionales": [
                    {"nombre": "Natilla", "cantidad": "2 cucharadas", "cantidadMetrica": 30, "unidadMetrica": "g", "categoria": "Lácteos"}
                ]}
            ]}"#,
        )
        .unwrap();

        let plans = PlanCatalog::from_json(
            r#"{"planesSemanales": [
                {
                    "idPlan": "p1",
                    "nombrePlan": "Semana tica",
                    "descripcion": "Comida casera",
                    "planSemanal": {
                        "lunes": {"almuerzo": "pinto", "cena": "casado"},
                        "martes": {"almuerzo": "fantasma", "cena": null}
                    },
                    "planDePreparacionSemanal": {"pasosDePrepa": [
                        {"descripcion": "Cocinar arroz", "componente": "Arroz", "recetasRelacionadas": ["pinto", "fantasma", "casado"], "instruccionesAlmacenamiento": "Refrigerar"},
                        {"descripcion": "Picar verduras", "componente": "Verduras", "recetasRelacionadas": ["todas"], "instruccionesAlmacenamiento": "Tupper"},
                        {"descripcion": "Lavar", "componente": "Frutas", "recetasRelacionadas": ["fantasma"], "instruccionesAlmacenamiento": ""}
                    ]}
                }
            ]}"#,
        )
        .unwrap();

        Catalogs::new(recipes, plans)
    }

    #[test]
    fn test_list_plans_includes_saved() {
        let catalogs = sample_catalogs();
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| {
            SavedPlan::create(conn, "Mi plan", &WeeklyPlan::empty())?;
            Ok(())
        })
        .unwrap();

        let response = list_plans(&db, &catalogs).unwrap();
        assert_eq!(response.predefined.len(), 1);
        assert_eq!(response.predefined[0].reference, "predefined-0");
        assert!(response.predefined[0].has_meal_prep);
        assert_eq!(response.saved.len(), 1);
        assert!(response.saved[0].reference.starts_with("custom-"));
    }

    #[test]
    fn test_day_menu_skips_unknown_recipes() {
        let catalogs = sample_catalogs();
        let db = Database::in_memory().unwrap();

        let monday = get_day_menu(&db, &catalogs, PlanRef::Predefined(0), DayOfWeek::Monday, PortionMultiplier::ONE)
            .unwrap();
        assert_eq!(monday.meals.len(), 2);
        assert_eq!(monday.meals[0].recipe.as_ref().unwrap().name, "Gallo Pinto");

        let tuesday = get_day_menu(&db, &catalogs, PlanRef::Predefined(0), DayOfWeek::Tuesday, PortionMultiplier::ONE)
            .unwrap();
        assert!(tuesday.meals.iter().all(|m| m.recipe.is_none()));
    }

    #[test]
    fn test_unknown_plan_is_an_error() {
        let catalogs = sample_catalogs();
        let db = Database::in_memory().unwrap();
        assert!(get_day_menu(&db, &catalogs, PlanRef::Predefined(7), DayOfWeek::Monday, PortionMultiplier::ONE).is_err());
        assert!(get_day_menu(&db, &catalogs, PlanRef::Saved(42), DayOfWeek::Monday, PortionMultiplier::ONE).is_err());
    }

    #[test]
    fn test_meal_prep_guide_resolves_names() {
        let catalogs = sample_catalogs();
        let guide = get_meal_prep_guide(&catalogs, PlanRef::Predefined(0)).unwrap();

        assert!(guide.message.is_none());
        assert_eq!(guide.steps[0].recipes, "Gallo Pinto, Casado");
        assert_eq!(guide.steps[1].recipes, ALL_RECIPES_LABEL);
        assert_eq!(guide.steps[2].recipes, NO_RECIPES_LABEL);
    }

    #[test]
    fn test_meal_prep_guide_for_custom_plans() {
        let catalogs = sample_catalogs();
        let guide = get_meal_prep_guide(&catalogs, PlanRef::Planner).unwrap();
        assert!(guide.steps.is_empty());
        assert_eq!(guide.message.as_deref(), Some(NO_MEAL_PREP_MESSAGE));
    }
}
