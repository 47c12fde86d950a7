//! Weekly plan models
//!
//! Days, meal slots and the weekly plans built from them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Day of the week, keyed as in the plan catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    #[serde(rename = "lunes", alias = "monday")]
    Monday,
    #[serde(rename = "martes", alias = "tuesday")]
    Tuesday,
    #[serde(rename = "miercoles", alias = "wednesday")]
    Wednesday,
    #[serde(rename = "jueves", alias = "thursday")]
    Thursday,
    #[serde(rename = "viernes", alias = "friday")]
    Friday,
    #[serde(rename = "sabado", alias = "saturday")]
    Saturday,
    #[serde(rename = "domingo", alias = "sunday")]
    Sunday,
}

impl DayOfWeek {
    /// Week order, Monday first
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "lunes",
            DayOfWeek::Tuesday => "martes",
            DayOfWeek::Wednesday => "miercoles",
            DayOfWeek::Thursday => "jueves",
            DayOfWeek::Friday => "viernes",
            DayOfWeek::Saturday => "sabado",
            DayOfWeek::Sunday => "domingo",
        }
    }

    /// Capitalized key for titles ("Lunes")
    pub fn label(&self) -> String {
        capitalize(self.as_str())
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }

    /// Today, from the local clock
    pub fn today() -> Self {
        Self::from_weekday(chrono::Local::now().weekday())
    }
}

impl FromStr for DayOfWeek {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lunes" | "monday" | "mon" => Ok(DayOfWeek::Monday),
            "martes" | "tuesday" | "tue" => Ok(DayOfWeek::Tuesday),
            "miercoles" | "miércoles" | "wednesday" | "wed" => Ok(DayOfWeek::Wednesday),
            "jueves" | "thursday" | "thu" => Ok(DayOfWeek::Thursday),
            "viernes" | "friday" | "fri" => Ok(DayOfWeek::Friday),
            "sabado" | "sábado" | "saturday" | "sat" => Ok(DayOfWeek::Saturday),
            "domingo" | "sunday" | "sun" => Ok(DayOfWeek::Sunday),
            _ => Err(ValidationError::UnknownDay(s.to_string())),
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MealSlot {
    #[serde(rename = "almuerzo", alias = "lunch")]
    Lunch,
    #[serde(rename = "cena", alias = "dinner")]
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 2] = [MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Lunch => "almuerzo",
            MealSlot::Dinner => "cena",
        }
    }

    pub fn label(&self) -> String {
        capitalize(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "almuerzo" | "lunch" => Ok(MealSlot::Lunch),
            "cena" | "dinner" => Ok(MealSlot::Dinner),
            _ => Err(ValidationError::UnknownMealSlot(s.to_string())),
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recipe ids chosen for one day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(rename = "almuerzo", alias = "lunch", default)]
    pub lunch: Option<String>,
    #[serde(rename = "cena", alias = "dinner", default)]
    pub dinner: Option<String>,
}

impl DayPlan {
    pub fn get(&self, slot: MealSlot) -> Option<&str> {
        match slot {
            MealSlot::Lunch => self.lunch.as_deref(),
            MealSlot::Dinner => self.dinner.as_deref(),
        }
    }

    pub fn set(&mut self, slot: MealSlot, recipe_id: Option<String>) {
        match slot {
            MealSlot::Lunch => self.lunch = recipe_id,
            MealSlot::Dinner => self.dinner = recipe_id,
        }
    }

    /// Slot contents in slot order
    pub fn recipe_ids(&self) -> Vec<Option<String>> {
        MealSlot::ALL
            .iter()
            .map(|slot| self.get(*slot).map(str::to_string))
            .collect()
    }
}

/// A week of day plans
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyPlan(BTreeMap<DayOfWeek, DayPlan>);

impl WeeklyPlan {
    /// Every day present, every slot empty
    pub fn empty() -> Self {
        Self(DayOfWeek::ALL.iter().map(|d| (*d, DayPlan::default())).collect())
    }

    pub fn day(&self, day: DayOfWeek) -> Option<&DayPlan> {
        self.0.get(&day)
    }

    pub fn recipe_id(&self, day: DayOfWeek, slot: MealSlot) -> Option<&str> {
        self.day(day).and_then(|d| d.get(slot))
    }

    pub fn assign(&mut self, day: DayOfWeek, slot: MealSlot, recipe_id: Option<String>) {
        self.0.entry(day).or_default().set(slot, recipe_id);
    }

    /// Lunch and dinner of one day; both `None` when the day is missing
    pub fn recipe_ids_for_day(&self, day: DayOfWeek) -> Vec<Option<String>> {
        self.day(day)
            .map(DayPlan::recipe_ids)
            .unwrap_or_else(|| vec![None; MealSlot::ALL.len()])
    }

    /// Every slot of every day, in week order
    pub fn recipe_ids_for_week(&self) -> Vec<Option<String>> {
        self.0.values().flat_map(DayPlan::recipe_ids).collect()
    }
}

/// Which recipes a meal-prep step applies to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum RelatedRecipes {
    /// Marked `todas` in the catalog
    All,
    Ids(Vec<String>),
}

const ALL_RECIPES_MARKER: &str = "todas";

impl From<Vec<String>> for RelatedRecipes {
    fn from(ids: Vec<String>) -> Self {
        if ids.first().map(String::as_str) == Some(ALL_RECIPES_MARKER) {
            RelatedRecipes::All
        } else {
            RelatedRecipes::Ids(ids)
        }
    }
}

impl From<RelatedRecipes> for Vec<String> {
    fn from(related: RelatedRecipes) -> Self {
        match related {
            RelatedRecipes::All => vec![ALL_RECIPES_MARKER.to_string()],
            RelatedRecipes::Ids(ids) => ids,
        }
    }
}

impl Default for RelatedRecipes {
    fn default() -> Self {
        RelatedRecipes::Ids(Vec::new())
    }
}

/// One batch-cooking step of a weekly meal-prep guide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepStep {
    #[serde(rename = "descripcion", alias = "description")]
    pub description: String,
    #[serde(rename = "componente", alias = "component", default)]
    pub component: String,
    #[serde(rename = "recetasRelacionadas", alias = "related_recipes", default)]
    pub related_recipes: RelatedRecipes,
    #[serde(rename = "instruccionesAlmacenamiento", alias = "storage_instructions", default)]
    pub storage_instructions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealPrepGuide {
    #[serde(rename = "pasosDePrepa", alias = "steps", default)]
    pub steps: Vec<PrepStep>,
}

/// A plan shipped with the plan catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredefinedPlan {
    #[serde(rename = "idPlan", alias = "id", default)]
    pub id: String,
    #[serde(rename = "nombrePlan", alias = "name")]
    pub name: String,
    #[serde(rename = "descripcion", alias = "description", default)]
    pub description: String,
    #[serde(rename = "planSemanal", alias = "weekly_plan")]
    pub weekly_plan: WeeklyPlan,
    #[serde(rename = "planDePreparacionSemanal", alias = "meal_prep", default)]
    pub meal_prep: Option<MealPrepGuide>,
}

/// Where a weekly plan comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanRef {
    /// Index into the plan catalog
    Predefined(usize),
    /// Id of a saved plan
    Saved(i64),
    /// The custom planner being edited
    Planner,
}

impl FromStr for PlanRef {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("planner") {
            return Ok(PlanRef::Planner);
        }
        let invalid = || ValidationError::InvalidPlanRef(s.to_string());
        match trimmed.split_once('-') {
            Some(("predefined", index)) => index.parse().map(PlanRef::Predefined).map_err(|_| invalid()),
            Some(("custom", id)) => id.parse().map(PlanRef::Saved).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for PlanRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanRef::Predefined(index) => write!(f, "predefined-{}", index),
            PlanRef::Saved(id) => write!(f, "custom-{}", id),
            PlanRef::Planner => f.write_str("planner"),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_parsing_and_labels() {
        assert_eq!("miércoles".parse::<DayOfWeek>(), Ok(DayOfWeek::Wednesday));
        assert_eq!("Sunday".parse::<DayOfWeek>(), Ok(DayOfWeek::Sunday));
        assert!("someday".parse::<DayOfWeek>().is_err());
        assert_eq!(DayOfWeek::Saturday.label(), "Sabado");
        assert_eq!(DayOfWeek::from_weekday(Weekday::Sun), DayOfWeek::Sunday);
    }

    #[test]
    fn test_weekly_plan_from_catalog_json() {
        let json = r#"{
            "martes": {"almuerzo": "r2", "cena": null},
            "lunes": {"almuerzo": "r1", "cena": "r3"}
        }"#;
        let plan: WeeklyPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.recipe_id(DayOfWeek::Monday, MealSlot::Dinner), Some("r3"));
        assert_eq!(
            plan.recipe_ids_for_day(DayOfWeek::Tuesday),
            vec![Some("r2".to_string()), None]
        );
        assert_eq!(plan.recipe_ids_for_day(DayOfWeek::Friday), vec![None, None]);
        assert_eq!(
            plan.recipe_ids_for_week(),
            vec![Some("r1".to_string()), Some("r3".to_string()), Some("r2".to_string()), None]
        );
    }

    #[test]
    fn test_empty_plan_has_every_slot() {
        let mut plan = WeeklyPlan::empty();
        assert_eq!(plan.recipe_ids_for_week().len(), 14);
        assert!(plan.recipe_ids_for_week().iter().all(Option::is_none));

        plan.assign(DayOfWeek::Friday, MealSlot::Lunch, Some("r9".to_string()));
        assert_eq!(plan.recipe_id(DayOfWeek::Friday, MealSlot::Lunch), Some("r9"));
    }

    #[test]
    fn test_related_recipes_marker() {
        let all: RelatedRecipes = serde_json::from_str(r#"["todas"]"#).unwrap();
        assert_eq!(all, RelatedRecipes::All);
        let some: RelatedRecipes = serde_json::from_str(r#"["r1", "r2"]"#).unwrap();
        assert_eq!(some, RelatedRecipes::Ids(vec!["r1".into(), "r2".into()]));
    }

    #[test]
    fn test_plan_ref() {
        assert_eq!("predefined-2".parse::<PlanRef>(), Ok(PlanRef::Predefined(2)));
        assert_eq!("custom-17".parse::<PlanRef>(), Ok(PlanRef::Saved(17)));
        assert_eq!("planner".parse::<PlanRef>(), Ok(PlanRef::Planner));
        assert!("predefined-x".parse::<PlanRef>().is_err());
        assert!("weekly".parse::<PlanRef>().is_err());
        assert_eq!(PlanRef::Saved(4).to_string(), "custom-4");
    }
}
