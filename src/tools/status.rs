//! Status Tool
//!
//! Runtime status of the service and the usage guide for assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Meal planning instructions for AI assistants
pub const PLANNER_INSTRUCTIONS: &str = r#"
# Meal Plan Manager Instructions

This guide explains how to browse weekly meal plans, build a custom week and
produce a priced shopping list.

## Plan References

Every plan tool takes a `plan` reference:

| Reference | Meaning |
|-----------|---------|
| `predefined-<n>` | The n-th plan of the plan catalog (0-based) |
| `custom-<id>` | A plan saved from the planner |
| `planner` | The custom planner currently being edited |

Call `list_plans` to see the available references.

## Days and Meals

- Days: `lunes`, `martes`, `miercoles`, `jueves`, `viernes`, `sabado`, `domingo`
  (English names are accepted too)
- Meals: `almuerzo` (lunch) and `cena` (dinner)
- `get_today` returns the current day, use it instead of guessing

## Typical Workflow

1. `list_plans` to pick a plan
2. `get_day_menu` with the plan and a day to see lunch and dinner
3. `shopping_list` with `scope: "week"` or a day name
4. Share the `plain_text` field when the user wants to copy the list

## Building a Custom Week

1. `assign_recipe` for each (day, meal); only catalog recipe ids are accepted
2. `clear_planner_slot` or `clear_planner` to start over
3. `save_planner` with a name to keep a copy as `custom-<id>`

## Portions

`set_portions` multiplies every quantity, calorie and macro figure, and the
shopping list amounts. It must be a whole number of at least 1 and lasts until
the server restarts.

## Prices and Costs

- `list_price_catalog` lists every ingredient with its saved price
- `set_price` / `set_prices` store the price paid for a base quantity in one
  of `g`, `kg`, `ml`, `l`, `unidades`
- Costs only apply when the price unit measures the same thing as the recipe
  unit: grams and kilograms are interchangeable, as are milliliters and
  liters; `unidades` only matches `unidades`
- A price of 0 means unset; the line shows no cost and the total ignores it
- `set_currency` changes the symbol used in costs (default ₡)

## Meal Prep

`get_meal_prep_guide` returns the batch-cooking steps of predefined plans that
include one. Saved plans and the planner have no guide.
"#;

/// Runtime status of the service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Catalog information
    pub data_dir: String,
    pub recipes_loaded: usize,
    pub plans_loaded: usize,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    data_dir: PathBuf,
    recipes_loaded: usize,
    plans_loaded: usize,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf, data_dir: PathBuf, recipes_loaded: usize, plans_loaded: usize) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
            data_dir,
            recipes_loaded,
            plans_loaded,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> ServiceStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            data_dir: self.data_dir.display().to_string(),
            recipes_loaded: self.recipes_loaded,
            plans_loaded: self.plans_loaded,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_catalog_counts() {
        let tracker = StatusTracker::new(
            PathBuf::from("/nonexistent/mealplan.db"),
            PathBuf::from("/nonexistent"),
            12,
            3,
        );
        let status = tracker.get_status();
        assert_eq!(status.recipes_loaded, 12);
        assert_eq!(status.plans_loaded, 3);
        assert!(status.database_size_bytes.is_none());
        assert_eq!(status.process_id, std::process::id());
    }
}
