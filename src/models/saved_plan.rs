//! Saved plan model
//!
//! Named snapshots of the custom planner.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use super::{PlanRef, WeeklyPlan};

/// Description given to every plan saved from the planner
pub const SAVED_PLAN_DESCRIPTION: &str = "A custom plan created by me.";

/// A user-saved weekly plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlan {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub weekly_plan: WeeklyPlan,
    pub created_at: String,
}

impl SavedPlan {
    fn from_row(row: &Row) -> rusqlite::Result<(i64, String, String, String, String)> {
        Ok((
            row.get("id")?,
            row.get("name")?,
            row.get("description")?,
            row.get("plan_json")?,
            row.get("created_at")?,
        ))
    }

    fn hydrate(raw: (i64, String, String, String, String)) -> DbResult<Self> {
        let (id, name, description, plan_json, created_at) = raw;
        Ok(Self {
            id,
            name,
            description,
            weekly_plan: serde_json::from_str(&plan_json)?,
            created_at,
        })
    }

    pub fn reference(&self) -> PlanRef {
        PlanRef::Saved(self.id)
    }

    /// Store a copy of `plan` under `name`
    pub fn create(conn: &Connection, name: &str, plan: &WeeklyPlan) -> DbResult<Self> {
        let plan_json = serde_json::to_string(plan)?;
        conn.execute(
            "INSERT INTO saved_plans (name, description, plan_json) VALUES (?1, ?2, ?3)",
            params![name, SAVED_PLAN_DESCRIPTION, plan_json],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM saved_plans WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(raw) => Ok(Some(Self::hydrate(raw)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All saved plans, oldest first
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM saved_plans ORDER BY id")?;

        let rows = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(Self::hydrate).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{DayOfWeek, MealSlot};

    #[test]
    fn test_create_and_list() {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| {
            let mut plan = WeeklyPlan::empty();
            plan.assign(DayOfWeek::Tuesday, MealSlot::Dinner, Some("r5".to_string()));

            let saved = SavedPlan::create(conn, "Semana ligera", &plan)?;
            assert_eq!(saved.name, "Semana ligera");
            assert_eq!(saved.description, SAVED_PLAN_DESCRIPTION);
            assert_eq!(saved.weekly_plan, plan);
            assert_eq!(saved.reference(), PlanRef::Saved(saved.id));

            SavedPlan::create(conn, "Otra", &WeeklyPlan::empty())?;
            let all = SavedPlan::list(conn)?;
            assert_eq!(all.len(), 2);
            assert_eq!(all[0].id, saved.id);

            assert!(SavedPlan::get_by_id(conn, 999)?.is_none());
            Ok(())
        })
        .unwrap();
    }
}
