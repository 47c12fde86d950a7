//! Application context
//!
//! Everything one request needs: the shared catalogs, a snapshot of the
//! user's prices and settings, and the active portion multiplier.

use rusqlite::Connection;

use crate::catalog::{Catalogs, PlanCatalog, RecipeCatalog};
use crate::db::DbResult;
use crate::models::{PortionMultiplier, PriceCatalog, Settings};
use crate::quantity::Quantity;
use crate::shopping::{self, ShoppingList, ShoppingListRequest, ShoppingListView};

pub struct AppContext<'a> {
    pub recipes: &'a RecipeCatalog,
    pub plans: &'a PlanCatalog,
    pub prices: PriceCatalog,
    pub portions: PortionMultiplier,
    pub currency: String,
}

impl<'a> AppContext<'a> {
    pub fn new(
        catalogs: &'a Catalogs,
        prices: PriceCatalog,
        portions: PortionMultiplier,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            recipes: &catalogs.recipes,
            plans: &catalogs.plans,
            prices,
            portions,
            currency: currency.into(),
        }
    }

    /// Read prices and currency from storage
    pub fn load(catalogs: &'a Catalogs, conn: &Connection, portions: PortionMultiplier) -> DbResult<Self> {
        let prices = PriceCatalog::load(conn)?;
        let currency = Settings::currency(conn)?;
        Ok(Self::new(catalogs, prices, portions, currency))
    }

    pub fn shopping_list(&self, request: &ShoppingListRequest) -> ShoppingList {
        shopping::generate(self.recipes, &self.prices, request, self.portions)
    }

    /// Aggregate and render under `title` in the user's currency
    pub fn shopping_list_view(&self, request: &ShoppingListRequest, title: &str) -> (ShoppingList, ShoppingListView) {
        let list = self.shopping_list(request);
        let view = shopping::render(&list, title, &self.currency);
        (list, view)
    }

    /// Display quantity scaled to the active portions
    pub fn format_quantity(&self, quantity: &Quantity) -> String {
        quantity.scaled(self.portions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::PriceEntry;
    use crate::pricing::CanonicalUnit;

    fn catalogs() -> Catalogs {
        let recipes = RecipeCatalog::from_json(
            r#"{"recetas": [
                {"id": "a", "nombre": "Arroz blanco", "ingredientes": [
                    {"nombre": "Arroz", "cantidad": "1/2 taza", "cantidadMetrica": 100, "unidadMetrica": "g", "categoria": "Granos"}
                ]},
                {"id": "b", "nombre": "Arroz con pollo", "ingredientes": [
                    {"nombre": "Arroz", "cantidad": "3/4 taza", "cantidadMetrica": 150, "unidadMetrica": "g", "categoria": "Granos"}
                ]}
            ]}"#,
        )
        .unwrap();
        Catalogs::new(recipes, PlanCatalog::default())
    }

    #[test]
    fn test_context_from_storage() {
        let catalogs = catalogs();
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| {
            PriceEntry::upsert(conn, &PriceEntry::new("Arroz", 1200.0, 1000.0, CanonicalUnit::Gram))?;
            Settings::set_currency(conn, "$")?;

            let ctx = AppContext::load(&catalogs, conn, PortionMultiplier::ONE)?;
            let request = ShoppingListRequest::new(vec![Some("a".into()), Some("b".into())], false);
            let (list, view) = ctx.shopping_list_view(&request, "Lista");

            assert_eq!(list.line_count(), 1);
            assert_eq!(list.total_cost, 300.0);
            assert_eq!(view.categories[0].items[0].label, "Arroz - 250 g");
            assert_eq!(view.categories[0].items[0].cost, "$300.00");
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_format_quantity_uses_portions() {
        let catalogs = catalogs();
        let ctx = AppContext::new(
            &catalogs,
            PriceCatalog::default(),
            PortionMultiplier::new(4).unwrap(),
            "₡",
        );
        let recipe = ctx.recipes.get("a").unwrap();
        assert_eq!(ctx.format_quantity(&recipe.ingredients[0].quantity), "2 taza");
    }
}
