//! Ingredient model
//!
//! One ingredient line of a recipe, as found in the recipe catalog.

use serde::{Deserialize, Serialize};

use crate::pricing::CanonicalUnit;
use crate::quantity::Quantity;

/// Category for ingredients the catalog leaves uncategorized
pub const DEFAULT_CATEGORY: &str = "Other";

/// A recipe ingredient.
///
/// `quantity` is display text ("1/2 taza"); `metric_quantity` in
/// `metric_unit` is what the shopping list adds up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    #[serde(rename = "cantidad", alias = "quantity", default)]
    pub quantity: Quantity,
    #[serde(rename = "cantidadMetrica", alias = "metric_quantity")]
    pub metric_quantity: f64,
    #[serde(rename = "unidadMetrica", alias = "metric_unit")]
    pub metric_unit: CanonicalUnit,
    #[serde(rename = "categoria", alias = "category", default)]
    pub category: Option<String>,
}

impl Ingredient {
    pub fn new(name: &str, quantity: &str, metric_quantity: f64, metric_unit: CanonicalUnit) -> Self {
        Self {
            name: name.to_string(),
            quantity: Quantity::parse(quantity),
            metric_quantity,
            metric_unit,
            category: None,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// Category, or "Other" when missing or blank
    pub fn category(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_entry() {
        let json = r#"{
            "nombre": "Arroz",
            "cantidad": "1/2 taza",
            "cantidadMetrica": 100,
            "unidadMetrica": "g",
            "categoria": "Granos"
        }"#;
        let ing: Ingredient = serde_json::from_str(json).unwrap();
        assert_eq!(ing.name, "Arroz");
        assert_eq!(ing.quantity.as_str(), "1/2 taza");
        assert_eq!(ing.metric_quantity, 100.0);
        assert_eq!(ing.metric_unit, CanonicalUnit::Gram);
        assert_eq!(ing.category(), "Granos");
    }

    #[test]
    fn test_category_defaults() {
        let ing = Ingredient::new("Sal", "al gusto", 5.0, CanonicalUnit::Gram);
        assert_eq!(ing.category(), DEFAULT_CATEGORY);
        assert_eq!(ing.with_category("  ").category(), DEFAULT_CATEGORY);
    }
}
