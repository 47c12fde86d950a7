//! User settings
//!
//! Persisted key/value settings and the session portion multiplier.

use std::num::NonZeroU32;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use super::ValidationError;

/// Currency used until the user picks one
pub const DEFAULT_CURRENCY: &str = "₡";

const CURRENCY_KEY: &str = "currency_symbol";

/// Number of portions every recipe quantity is scaled by.
///
/// Always at least 1; zero and negative values are rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct PortionMultiplier(NonZeroU32);

impl PortionMultiplier {
    pub const ONE: Self = Self(NonZeroU32::MIN);

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(ValidationError::InvalidPortions(value))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0.get())
    }
}

impl Default for PortionMultiplier {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<i64> for PortionMultiplier {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PortionMultiplier> for u32 {
    fn from(value: PortionMultiplier) -> Self {
        value.get()
    }
}

/// Key/value settings table access
pub struct Settings;

impl Settings {
    pub fn get(conn: &Connection, key: &str) -> DbResult<Option<String>> {
        let result = conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            [key],
            |row| row.get(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> DbResult<()> {
        conn.execute(
            r#"
            INSERT INTO settings (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// Currency symbol, falling back to the default when never saved
    pub fn currency(conn: &Connection) -> DbResult<String> {
        Ok(Self::get(conn, CURRENCY_KEY)?.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
    }

    pub fn set_currency(conn: &Connection, symbol: &str) -> DbResult<()> {
        Self::set(conn, CURRENCY_KEY, symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[test]
    fn test_portion_multiplier_rejects_non_positive() {
        assert_eq!(PortionMultiplier::new(0), Err(ValidationError::InvalidPortions(0)));
        assert_eq!(PortionMultiplier::new(-3), Err(ValidationError::InvalidPortions(-3)));
        assert_eq!(PortionMultiplier::new(4).map(PortionMultiplier::get), Ok(4));
        assert_eq!(PortionMultiplier::default(), PortionMultiplier::ONE);
    }

    #[test]
    fn test_currency_defaults_then_persists() {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| {
            assert_eq!(Settings::currency(conn)?, DEFAULT_CURRENCY);
            Settings::set_currency(conn, "$")?;
            Settings::set_currency(conn, "€")?;
            assert_eq!(Settings::currency(conn)?, "€");
            Ok(())
        })
        .unwrap();
    }
}
