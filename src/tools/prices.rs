//! Price catalog MCP Tools
//!
//! The ingredients a user can price and the prices they have saved.

use serde::Serialize;

use crate::catalog::Catalogs;
use crate::db::Database;
use crate::models::{PriceCatalog, PriceEntry};
use crate::pricing::CanonicalUnit;

/// One priceable ingredient
#[derive(Debug, Serialize)]
pub struct PriceCatalogItem {
    pub name: String,
    pub category: String,
    /// Unit the recipes measure it in, a hint for the base unit
    pub recipe_unit: CanonicalUnit,
    pub price: Option<PriceEntry>,
}

/// Response for list_price_catalog
#[derive(Debug, Serialize)]
pub struct PriceCatalogResponse {
    pub ingredients: Vec<PriceCatalogItem>,
    pub count: usize,
    pub priced_count: usize,
}

/// Response for set_prices
#[derive(Debug, Serialize)]
pub struct SetPricesResponse {
    pub saved: Vec<PriceEntry>,
    pub count: usize,
}

/// Response for remove_price
#[derive(Debug, Serialize)]
pub struct RemovePriceResponse {
    pub success: bool,
    pub ingredient_name: String,
}

// ============================================================================
// Price Tools
// ============================================================================

/// Every ingredient in the recipe catalog with its saved price
pub fn list_price_catalog(db: &Database, catalogs: &Catalogs) -> Result<PriceCatalogResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let prices = PriceCatalog::load(&conn).map_err(|e| format!("Failed to load prices: {}", e))?;

    let ingredients: Vec<PriceCatalogItem> = catalogs
        .recipes
        .unique_ingredients()
        .into_iter()
        .map(|ingredient| PriceCatalogItem {
            name: ingredient.name.clone(),
            category: ingredient.category().to_string(),
            recipe_unit: ingredient.metric_unit,
            price: prices.get(&ingredient.name).cloned(),
        })
        .collect();

    let priced_count = ingredients
        .iter()
        .filter(|i| i.price.as_ref().is_some_and(PriceEntry::is_usable))
        .count();

    Ok(PriceCatalogResponse {
        count: ingredients.len(),
        priced_count,
        ingredients,
    })
}

/// Save one price, replacing any earlier one
pub fn set_price(db: &Database, entry: PriceEntry) -> Result<PriceEntry, String> {
    entry.validate().map_err(|e| e.to_string())?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let saved = PriceEntry::upsert(&conn, &entry).map_err(|e| format!("Failed to save price: {}", e))?;
    tracing::info!(ingredient = %saved.ingredient_name, price = saved.price, "Price saved");
    Ok(saved)
}

/// Save many prices at once; nothing is written if any entry is invalid
pub fn set_prices(db: &Database, entries: Vec<PriceEntry>) -> Result<SetPricesResponse, String> {
    for entry in &entries {
        entry
            .validate()
            .map_err(|e| format!("{}: {}", entry.ingredient_name, e))?;
    }

    let saved = db
        .with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let saved = entries
                .iter()
                .map(|entry| PriceEntry::upsert(&tx, entry))
                .collect::<Result<Vec<_>, _>>()?;
            tx.commit()?;
            Ok(saved)
        })
        .map_err(|e| format!("Failed to save prices: {}", e))?;

    tracing::info!(count = saved.len(), "Prices saved");
    Ok(SetPricesResponse {
        count: saved.len(),
        saved,
    })
}

/// Forget the saved price of an ingredient
pub fn remove_price(db: &Database, ingredient_name: &str) -> Result<RemovePriceResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let removed = PriceEntry::delete(&conn, ingredient_name)
        .map_err(|e| format!("Failed to remove price: {}", e))?;

    Ok(RemovePriceResponse {
        success: removed,
        ingredient_name: ingredient_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::plans::tests::sample_catalogs;

    #[test]
    fn test_list_price_catalog() {
        let catalogs = sample_catalogs();
        let db = Database::in_memory().unwrap();
        set_price(&db, PriceEntry::new("Leche", 900.0, 1.0, CanonicalUnit::Liter)).unwrap();

        let response = list_price_catalog(&db, &catalogs).unwrap();
        let names: Vec<&str> = response.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Arroz", "Frijoles", "Leche", "Natilla"]);
        assert_eq!(response.priced_count, 1);
        assert_eq!(response.ingredients[2].price.as_ref().unwrap().price, 900.0);
        assert_eq!(response.ingredients[2].recipe_unit, CanonicalUnit::Milliliter);
    }

    #[test]
    fn test_set_prices_is_all_or_nothing() {
        let db = Database::in_memory().unwrap();
        let err = set_prices(
            &db,
            vec![
                PriceEntry::new("Arroz", 1200.0, 1.0, CanonicalUnit::Kilogram),
                PriceEntry::new("Leche", -5.0, 1.0, CanonicalUnit::Liter),
            ],
        )
        .unwrap_err();
        assert!(err.starts_with("Leche"));

        let conn = db.get_conn().unwrap();
        assert!(PriceCatalog::load(&conn).unwrap().is_empty());
        drop(conn);

        let response = set_prices(
            &db,
            vec![
                PriceEntry::new("Arroz", 1200.0, 1.0, CanonicalUnit::Kilogram),
                PriceEntry::new("Leche", 0.0, 0.0, CanonicalUnit::Liter),
            ],
        )
        .unwrap();
        assert_eq!(response.count, 2);
    }

    #[test]
    fn test_remove_price() {
        let db = Database::in_memory().unwrap();
        set_price(&db, PriceEntry::new("Arroz", 1200.0, 1.0, CanonicalUnit::Kilogram)).unwrap();
        assert!(remove_price(&db, "Arroz").unwrap().success);
        assert!(!remove_price(&db, "Arroz").unwrap().success);
    }
}
