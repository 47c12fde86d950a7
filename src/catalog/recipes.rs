//! Recipe catalog

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::models::{Ingredient, Recipe};
use super::{read_catalog, CatalogError};

#[derive(Deserialize)]
struct RecipeDatabase {
    #[serde(rename = "recetas", alias = "recipes")]
    recipes: Vec<Recipe>,
}

/// Read-only recipe lookup
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
    by_id: HashMap<String, usize>,
}

impl RecipeCatalog {
    pub fn from_recipes(recipes: Vec<Recipe>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(recipes.len());
        for (index, recipe) in recipes.iter().enumerate() {
            if by_id.insert(recipe.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateRecipe(recipe.id.clone()));
            }
        }
        Ok(Self { recipes, by_id })
    }

    /// Parse a `{"recetas": [...]}` document
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let database: RecipeDatabase =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                name: super::RECIPES_FILE.to_string(),
                source,
            })?;
        Self::from_recipes(database.recipes)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        Self::from_json(&read_catalog(path)?)
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.by_id.get(id).map(|&index| &self.recipes[index])
    }

    /// Recipes in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipes whose name contains `query`, ignoring case
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Recipe> + 'a {
        let needle = query.trim().to_lowercase();
        self.recipes
            .iter()
            .filter(move |r| needle.is_empty() || r.name.to_lowercase().contains(&needle))
    }

    /// One ingredient per distinct name across every recipe, required and
    /// optional, first occurrence wins. Sorted by name, ignoring case.
    pub fn unique_ingredients(&self) -> Vec<&Ingredient> {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for recipe in &self.recipes {
            for ingredient in recipe.shopping_ingredients(true) {
                if seen.insert(ingredient.name.as_str()) {
                    unique.push(ingredient);
                }
            }
        }
        unique.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        unique
    }
}
