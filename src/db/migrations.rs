//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        tracing::info!("Applied schema migration v1");
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- PRICES
        -- Price paid per base quantity, keyed by ingredient name
        -- ============================================
        CREATE TABLE prices (
            ingredient_name TEXT PRIMARY KEY,
            price REAL NOT NULL DEFAULT 0,
            base_quantity REAL NOT NULL DEFAULT 0,
            base_unit TEXT NOT NULL DEFAULT 'g'
                CHECK(base_unit IN ('g', 'kg', 'ml', 'l', 'unidades')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- SETTINGS
        -- Key/value user preferences (currency symbol)
        -- ============================================
        CREATE TABLE settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- PLANNER SLOTS
        -- The custom weekly plan under construction
        -- ============================================
        CREATE TABLE planner_slots (
            day TEXT NOT NULL,
            meal TEXT NOT NULL,
            recipe_id TEXT,                      -- null = empty slot
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (day, meal)
        );

        -- ============================================
        -- SAVED PLANS
        -- Named snapshots of the planner
        -- ============================================
        CREATE TABLE saved_plans (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            plan_json TEXT NOT NULL,             -- day -> {almuerzo, cena}
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 1);
    }
}
