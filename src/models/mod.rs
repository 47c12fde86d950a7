//! Data models
//!
//! Catalog records, persisted user data and the values passed between them.

mod error;
mod ingredient;
mod plan;
mod planner;
mod price;
mod recipe;
mod saved_plan;
mod settings;

pub use error::ValidationError;
pub use ingredient::{Ingredient, DEFAULT_CATEGORY};
pub use plan::{
    DayOfWeek, DayPlan, MealPrepGuide, MealSlot, PlanRef, PredefinedPlan, PrepStep,
    RelatedRecipes, WeeklyPlan,
};
pub use planner::Planner;
pub use price::{PriceCatalog, PriceEntry};
pub use recipe::{NutritionSummary, Recipe};
pub use saved_plan::{SavedPlan, SAVED_PLAN_DESCRIPTION};
pub use settings::{PortionMultiplier, Settings, DEFAULT_CURRENCY};
