//! Custom planner storage
//!
//! The weekly plan the user is assembling, one row per (day, slot).

use rusqlite::{params, Connection};

use crate::db::DbResult;
use super::{DayOfWeek, MealSlot, WeeklyPlan};

pub struct Planner;

impl Planner {
    /// Current planner contents; days never touched come back empty
    pub fn load(conn: &Connection) -> DbResult<WeeklyPlan> {
        let mut plan = WeeklyPlan::empty();

        let mut stmt = conn.prepare("SELECT day, meal, recipe_id FROM planner_slots")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>("day")?,
                    row.get::<_, String>("meal")?,
                    row.get::<_, Option<String>>("recipe_id")?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        for (day, meal, recipe_id) in rows {
            match (day.parse::<DayOfWeek>(), meal.parse::<MealSlot>()) {
                (Ok(day), Ok(slot)) => plan.assign(day, slot, recipe_id),
                _ => tracing::warn!(day = %day, meal = %meal, "Ignoring unknown planner slot"),
            }
        }

        Ok(plan)
    }

    /// Put a recipe in a slot, or empty it with `None`
    pub fn assign(
        conn: &Connection,
        day: DayOfWeek,
        slot: MealSlot,
        recipe_id: Option<&str>,
    ) -> DbResult<()> {
        conn.execute(
            r#"
            INSERT INTO planner_slots (day, meal, recipe_id) VALUES (?1, ?2, ?3)
            ON CONFLICT(day, meal) DO UPDATE SET recipe_id = excluded.recipe_id, updated_at = datetime('now')
            "#,
            params![day.as_str(), slot.as_str(), recipe_id],
        )?;
        Ok(())
    }

    /// Empty every slot of every day
    pub fn clear(conn: &mut Connection) -> DbResult<()> {
        let tx = conn.transaction()?;
        for day in DayOfWeek::ALL {
            for slot in MealSlot::ALL {
                Self::assign(&tx, day, slot, None)?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[test]
    fn test_assign_and_clear() {
        let db = Database::in_memory().unwrap();
        db.with_conn_mut(|conn| {
            assert_eq!(Planner::load(conn)?, WeeklyPlan::empty());

            Planner::assign(conn, DayOfWeek::Monday, MealSlot::Lunch, Some("r1"))?;
            Planner::assign(conn, DayOfWeek::Monday, MealSlot::Lunch, Some("r2"))?;
            Planner::assign(conn, DayOfWeek::Sunday, MealSlot::Dinner, Some("r3"))?;

            let plan = Planner::load(conn)?;
            assert_eq!(plan.recipe_id(DayOfWeek::Monday, MealSlot::Lunch), Some("r2"));
            assert_eq!(plan.recipe_id(DayOfWeek::Sunday, MealSlot::Dinner), Some("r3"));

            Planner::clear(conn)?;
            assert_eq!(Planner::load(conn)?, WeeklyPlan::empty());
            Ok(())
        })
        .unwrap();
    }
}
