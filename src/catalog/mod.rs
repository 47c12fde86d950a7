//! Static catalogs
//!
//! The recipe database and the predefined weekly plans, loaded once at
//! startup and shared read-only afterwards.

pub mod plans;
pub mod recipes;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use plans::PlanCatalog;
pub use recipes::RecipeCatalog;

/// File name of the recipe database inside the data directory
pub const RECIPES_FILE: &str = "BD_RECETAS.json";
/// File name of the predefined plans inside the data directory
pub const PLANS_FILE: &str = "PLANES_SEMANALES.json";

/// Catalog loading errors. Any of these is fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate recipe id in catalog: {0}")]
    DuplicateRecipe(String),
}

/// Both catalogs, as loaded together at startup
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub recipes: RecipeCatalog,
    pub plans: PlanCatalog,
}

impl Catalogs {
    pub fn new(recipes: RecipeCatalog, plans: PlanCatalog) -> Self {
        Self { recipes, plans }
    }

    /// Load both catalog files from `dir`; failing either fails the whole load
    pub fn load_from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let recipes = RecipeCatalog::load(&dir.join(RECIPES_FILE))?;
        let plans = PlanCatalog::load(&dir.join(PLANS_FILE))?;
        tracing::info!(
            recipes = recipes.len(),
            plans = plans.len(),
            dir = %dir.display(),
            "Catalogs loaded"
        );
        Ok(Self { recipes, plans })
    }
}

pub(crate) fn read_catalog(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_is_an_error() {
        let err = Catalogs::load_from_dir(Path::new("/nonexistent/mealplan-data")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains(RECIPES_FILE));
    }

    #[test]
    fn test_shipped_catalogs_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let catalogs = Catalogs::load_from_dir(&dir).unwrap();
        assert!(!catalogs.recipes.is_empty());

        for plan in catalogs.plans.iter() {
            for id in plan.weekly_plan.recipe_ids_for_week().iter().flatten() {
                assert!(catalogs.recipes.get(id).is_some(), "{} references unknown recipe {}", plan.name, id);
            }
        }
    }
}
