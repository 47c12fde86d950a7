//! Recipe MCP Tools
//!
//! Browse the recipe catalog, with quantities and nutrition scaled to the
//! active portion multiplier.

use serde::Serialize;

use crate::catalog::Catalogs;
use crate::models::{Ingredient, PortionMultiplier, Recipe};
use crate::pricing::CanonicalUnit;

/// Recipe summary for listing
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub meal_type: Option<String>,
    pub calories: f64,
    pub ingredient_count: usize,
}

/// Response for list_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub count: usize,
    pub total: usize,
}

/// Ingredient as shown to the cook
#[derive(Debug, Serialize, PartialEq)]
pub struct IngredientView {
    pub name: String,
    pub quantity: String,
    pub metric_quantity: f64,
    pub metric_unit: CanonicalUnit,
    pub category: String,
}

/// Nutrition for the whole scaled recipe
#[derive(Debug, Serialize, PartialEq)]
pub struct NutritionView {
    pub calories_kcal: i64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
}

/// Full recipe detail scaled to the portion multiplier
#[derive(Debug, Serialize)]
pub struct RecipeView {
    pub id: String,
    pub name: String,
    pub meal_type: Option<String>,
    pub difficulty: Option<String>,
    pub prep_time: Option<String>,
    pub portions: u32,
    pub ingredients: Vec<IngredientView>,
    pub optional_ingredients: Vec<IngredientView>,
    pub instructions: Vec<String>,
    pub chef_tips: Vec<String>,
    pub nutrition: NutritionView,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn ingredient_view(ingredient: &Ingredient, portions: PortionMultiplier) -> IngredientView {
    IngredientView {
        name: ingredient.name.clone(),
        quantity: ingredient.quantity.scaled(portions),
        metric_quantity: ingredient.metric_quantity * portions.as_f64(),
        metric_unit: ingredient.metric_unit,
        category: ingredient.category().to_string(),
    }
}

impl RecipeView {
    pub fn new(recipe: &Recipe, portions: PortionMultiplier) -> Self {
        let nutrition = recipe.nutrition * portions.as_f64();
        Self {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            meal_type: recipe.meal_type.clone(),
            difficulty: recipe.difficulty.clone(),
            prep_time: recipe.prep_time.clone(),
            portions: portions.get(),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|i| ingredient_view(i, portions))
                .collect(),
            optional_ingredients: recipe
                .optional_ingredients
                .iter()
                .map(|i| ingredient_view(i, portions))
                .collect(),
            instructions: recipe.instructions.clone(),
            chef_tips: recipe.chef_tips.clone(),
            nutrition: NutritionView {
                calories_kcal: nutrition.calories.round() as i64,
                protein_g: round_to(nutrition.protein, 1),
                fat_g: round_to(nutrition.fat, 1),
                carbs_g: round_to(nutrition.carbs, 1),
            },
        }
    }
}

// ============================================================================
// Recipe Tools
// ============================================================================

/// List recipes, optionally filtered by a name fragment
pub fn list_recipes(catalogs: &Catalogs, query: Option<&str>) -> Result<ListRecipesResponse, String> {
    let recipes: Vec<RecipeSummary> = catalogs
        .recipes
        .search(query.unwrap_or(""))
        .map(|recipe| RecipeSummary {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            meal_type: recipe.meal_type.clone(),
            calories: recipe.nutrition.calories,
            ingredient_count: recipe.ingredients.len(),
        })
        .collect();

    Ok(ListRecipesResponse {
        count: recipes.len(),
        total: catalogs.recipes.len(),
        recipes,
    })
}

/// Get a recipe scaled to the portion multiplier
pub fn get_recipe(
    catalogs: &Catalogs,
    id: &str,
    portions: PortionMultiplier,
) -> Result<Option<RecipeView>, String> {
    Ok(catalogs.recipes.get(id).map(|recipe| RecipeView::new(recipe, portions)))
}
