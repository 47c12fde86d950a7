//! Predefined weekly plan catalog

use std::path::Path;

use serde::Deserialize;

use crate::models::PredefinedPlan;
use super::{read_catalog, CatalogError};

#[derive(Deserialize)]
struct PlanDatabase {
    #[serde(rename = "planesSemanales", alias = "plans")]
    plans: Vec<PredefinedPlan>,
}

/// Read-only list of predefined plans, addressed by position
#[derive(Debug, Clone, Default)]
pub struct PlanCatalog {
    plans: Vec<PredefinedPlan>,
}

impl PlanCatalog {
    pub fn from_plans(plans: Vec<PredefinedPlan>) -> Self {
        Self { plans }
    }

    /// Parse a `{"planesSemanales": [...]}` document
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let database: PlanDatabase =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                name: super::PLANS_FILE.to_string(),
                source,
            })?;
        Ok(Self::from_plans(database.plans))
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        Self::from_json(&read_catalog(path)?)
    }

    pub fn get(&self, index: usize) -> Option<&PredefinedPlan> {
        self.plans.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PredefinedPlan> {
        self.plans.iter()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}
