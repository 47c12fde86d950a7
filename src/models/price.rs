//! Price entry model
//!
//! User-entered ingredient prices, keyed by ingredient name.

use std::collections::HashMap;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::pricing::CanonicalUnit;
use super::ValidationError;

/// Price paid for `base_quantity` of `base_unit` of an ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub ingredient_name: String,
    pub price: f64,
    pub base_quantity: f64,
    pub base_unit: CanonicalUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl PriceEntry {
    pub fn new(ingredient_name: &str, price: f64, base_quantity: f64, base_unit: CanonicalUnit) -> Self {
        Self {
            ingredient_name: ingredient_name.to_string(),
            price,
            base_quantity,
            base_unit,
            updated_at: None,
        }
    }

    /// A price can only be applied when both price and base quantity are positive
    pub fn is_usable(&self) -> bool {
        self.price > 0.0 && self.base_quantity > 0.0
    }

    /// Reject values a user could not have meant; zero is allowed and means "unset"
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ingredient_name.trim().is_empty() {
            return Err(ValidationError::Empty("Ingredient name"));
        }
        for (field, value) in [("price", self.price), ("base_quantity", self.base_quantity)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidPriceValue { field, value });
            }
        }
        Ok(())
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            ingredient_name: row.get("ingredient_name")?,
            price: row.get("price")?,
            base_quantity: row.get("base_quantity")?,
            base_unit: row.get("base_unit")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get the price saved for an ingredient
    pub fn get_by_name(conn: &Connection, name: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM prices WHERE ingredient_name = ?1")?;

        let result = stmt.query_row([name], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All saved prices, ordered by ingredient name
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM prices ORDER BY ingredient_name")?;

        let entries = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Insert or replace the price for an ingredient
    pub fn upsert(conn: &Connection, entry: &PriceEntry) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO prices (ingredient_name, price, base_quantity, base_unit)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(ingredient_name) DO UPDATE SET
                price = excluded.price,
                base_quantity = excluded.base_quantity,
                base_unit = excluded.base_unit,
                updated_at = datetime('now')
            "#,
            params![
                entry.ingredient_name,
                entry.price,
                entry.base_quantity,
                entry.base_unit,
            ],
        )?;

        Self::get_by_name(conn, &entry.ingredient_name)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Remove a saved price. Returns whether one existed.
    pub fn delete(conn: &Connection, name: &str) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM prices WHERE ingredient_name = ?1", [name])?;
        Ok(rows > 0)
    }
}

impl FromSql for CanonicalUnit {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let label = value.as_str()?;
        CanonicalUnit::from_str(label).ok_or_else(|| {
            FromSqlError::Other(Box::new(ValidationError::UnknownUnit(label.to_string())))
        })
    }
}

impl ToSql for CanonicalUnit {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

/// In-memory price lookup used during one aggregation
#[derive(Debug, Clone, Default)]
pub struct PriceCatalog {
    entries: HashMap<String, PriceEntry>,
}

impl PriceCatalog {
    pub fn from_entries(entries: impl IntoIterator<Item = PriceEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|e| (e.ingredient_name.clone(), e))
                .collect(),
        }
    }

    /// Snapshot of every saved price
    pub fn load(conn: &Connection) -> DbResult<Self> {
        Ok(Self::from_entries(PriceEntry::list(conn)?))
    }

    pub fn get(&self, ingredient_name: &str) -> Option<&PriceEntry> {
        self.entries.get(ingredient_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[test]
    fn test_usable() {
        assert!(PriceEntry::new("Arroz", 1200.0, 1.0, CanonicalUnit::Kilogram).is_usable());
        assert!(!PriceEntry::new("Arroz", 0.0, 1.0, CanonicalUnit::Kilogram).is_usable());
        assert!(!PriceEntry::new("Arroz", 1200.0, 0.0, CanonicalUnit::Kilogram).is_usable());
    }

    #[test]
    fn test_validate() {
        assert!(PriceEntry::new("Arroz", 0.0, 0.0, CanonicalUnit::Gram).validate().is_ok());
        assert_eq!(
            PriceEntry::new("Arroz", -1.0, 1.0, CanonicalUnit::Gram).validate(),
            Err(ValidationError::InvalidPriceValue { field: "price", value: -1.0 })
        );
        assert!(PriceEntry::new("Arroz", 1.0, f64::NAN, CanonicalUnit::Gram).validate().is_err());
        assert!(PriceEntry::new(" ", 1.0, 1.0, CanonicalUnit::Gram).validate().is_err());
    }

    #[test]
    fn test_upsert_last_write_wins() {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| {
            PriceEntry::upsert(conn, &PriceEntry::new("Arroz", 1000.0, 1.0, CanonicalUnit::Kilogram))?;
            let saved = PriceEntry::upsert(conn, &PriceEntry::new("Arroz", 1200.0, 1000.0, CanonicalUnit::Gram))?;
            assert_eq!(saved.price, 1200.0);
            assert_eq!(saved.base_unit, CanonicalUnit::Gram);
            assert!(saved.updated_at.is_some());

            let catalog = PriceCatalog::load(conn)?;
            assert_eq!(catalog.len(), 1);
            assert_eq!(catalog.get("Arroz").map(|p| p.base_quantity), Some(1000.0));
            assert!(catalog.get("Frijoles").is_none());

            assert!(PriceEntry::delete(conn, "Arroz")?);
            assert!(!PriceEntry::delete(conn, "Arroz")?);
            Ok(())
        })
        .unwrap();
    }
}
