//! Shopping list aggregator
//!
//! Expands recipe ids into ingredients, consolidates by (name, unit), prices
//! each line and totals the cost. Pure: the catalogs are only read.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::catalog::RecipeCatalog;
use crate::models::{PortionMultiplier, PriceCatalog};
use crate::pricing::{line_cost, CanonicalUnit};

/// Which recipes to shop for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListRequest {
    /// Empty plan slots show up as `None`
    pub recipe_ids: Vec<Option<String>>,
    #[serde(default)]
    pub include_optionals: bool,
}

impl ShoppingListRequest {
    pub fn new(recipe_ids: Vec<Option<String>>, include_optionals: bool) -> Self {
        Self {
            recipe_ids,
            include_optionals,
        }
    }
}

/// One consolidated ingredient
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: f64,
    pub unit: CanonicalUnit,
    pub category: String,
    /// `None` when no usable, compatible price exists
    pub cost: Option<f64>,
}

/// Lines grouped by category, categories in alphabetical order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShoppingList {
    pub categories: BTreeMap<String, Vec<LineItem>>,
    pub total_cost: f64,
}

impl ShoppingList {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Every line, category by category
    pub fn lines(&self) -> impl Iterator<Item = &LineItem> {
        self.categories.values().flatten()
    }

    pub fn line_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn find(&self, name: &str, unit: CanonicalUnit) -> Option<&LineItem> {
        self.lines().find(|l| l.name == name && l.unit == unit)
    }
}

/// Build the shopping list for `request`
pub fn generate(
    recipes: &RecipeCatalog,
    prices: &PriceCatalog,
    request: &ShoppingListRequest,
    portions: PortionMultiplier,
) -> ShoppingList {
    let multiplier = portions.as_f64();

    let mut lines: Vec<LineItem> = Vec::new();
    let mut positions: HashMap<(&str, CanonicalUnit), usize> = HashMap::new();

    for id in request.recipe_ids.iter().flatten() {
        let Some(recipe) = recipes.get(id) else {
            tracing::debug!(recipe_id = %id, "Skipping unknown recipe id");
            continue;
        };

        for ingredient in recipe.shopping_ingredients(request.include_optionals) {
            let key = (ingredient.name.as_str(), ingredient.metric_unit);
            let position = *positions.entry(key).or_insert_with(|| {
                lines.push(LineItem {
                    name: ingredient.name.clone(),
                    quantity: 0.0,
                    unit: ingredient.metric_unit,
                    category: ingredient.category().to_string(),
                    cost: None,
                });
                lines.len() - 1
            });
            lines[position].quantity += ingredient.metric_quantity * multiplier;
        }
    }

    let mut categories: BTreeMap<String, Vec<LineItem>> = BTreeMap::new();
    for mut line in lines {
        line.cost = prices
            .get(&line.name)
            .and_then(|price| line_cost(line.quantity, line.unit, price));
        categories.entry(line.category.clone()).or_default().push(line);
    }

    let total_cost = categories
        .values()
        .flatten()
        .filter_map(|line| line.cost)
        .sum();

    ShoppingList {
        categories,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, NutritionSummary, PriceEntry, Recipe};

    fn recipe(id: &str, ingredients: Vec<Ingredient>, optional: Vec<Ingredient>) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: format!("Receta {}", id),
            meal_type: None,
            difficulty: None,
            prep_time: None,
            ingredients,
            optional_ingredients: optional,
            instructions: Vec::new(),
            chef_tips: Vec::new(),
            nutrition: NutritionSummary::default(),
        }
    }

    fn catalog() -> RecipeCatalog {
        RecipeCatalog::from_recipes(vec![
            recipe(
                "r1",
                vec![
                    Ingredient::new("Arroz", "1/2 taza", 100.0, CanonicalUnit::Gram).with_category("Granos"),
                    Ingredient::new("Huevos", "2", 2.0, CanonicalUnit::Unit).with_category("Lácteos y huevos"),
                ],
                vec![Ingredient::new("Natilla", "2 cucharadas", 30.0, CanonicalUnit::Gram)],
            ),
            recipe(
                "r2",
                vec![
                    Ingredient::new("Arroz", "3/4 taza", 150.0, CanonicalUnit::Gram).with_category("Cereales"),
                    Ingredient::new("Leche", "1 taza", 250.0, CanonicalUnit::Milliliter).with_category("Lácteos y huevos"),
                    Ingredient::new("Arroz", "1 bolsa", 1.0, CanonicalUnit::Kilogram),
                ],
                vec![],
            ),
        ])
        .unwrap()
    }

    fn ids(ids: &[&str]) -> Vec<Option<String>> {
        ids.iter().map(|s| Some(s.to_string())).collect()
    }

    #[test]
    fn test_consolidates_same_name_and_unit() {
        let request = ShoppingListRequest::new(ids(&["r1", "r2"]), false);
        let list = generate(&catalog(), &PriceCatalog::default(), &request, PortionMultiplier::ONE);

        let arroz = list.find("Arroz", CanonicalUnit::Gram).unwrap();
        assert_eq!(arroz.quantity, 250.0);
        // first-seen category wins
        assert_eq!(arroz.category, "Granos");

        // same name, different unit stays separate
        let bag = list.find("Arroz", CanonicalUnit::Kilogram).unwrap();
        assert_eq!(bag.quantity, 1.0);
        assert_eq!(bag.category, "Other");

        assert!(list.find("Natilla", CanonicalUnit::Gram).is_none());
        assert_eq!(list.line_count(), 4);
    }

    #[test]
    fn test_portions_and_optionals() {
        let request = ShoppingListRequest::new(ids(&["r1"]), true);
        let portions = PortionMultiplier::new(3).unwrap();
        let list = generate(&catalog(), &PriceCatalog::default(), &request, portions);

        assert_eq!(list.find("Arroz", CanonicalUnit::Gram).unwrap().quantity, 300.0);
        assert_eq!(list.find("Huevos", CanonicalUnit::Unit).unwrap().quantity, 6.0);
        assert_eq!(list.find("Natilla", CanonicalUnit::Gram).unwrap().quantity, 90.0);
    }

    #[test]
    fn test_unknown_and_empty_ids_are_skipped() {
        let request = ShoppingListRequest::new(
            vec![None, Some("missing".to_string()), Some("r1".to_string()), None],
            false,
        );
        let list = generate(&catalog(), &PriceCatalog::default(), &request, PortionMultiplier::ONE);
        assert_eq!(list.line_count(), 2);

        let nothing = ShoppingListRequest::new(vec![None, Some("missing".to_string())], true);
        let empty = generate(&catalog(), &PriceCatalog::default(), &nothing, PortionMultiplier::ONE);
        assert!(empty.is_empty());
        assert_eq!(empty.total_cost, 0.0);
    }

    #[test]
    fn test_pricing_and_total() {
        let prices = PriceCatalog::from_entries(vec![
            PriceEntry::new("Arroz", 1200.0, 1000.0, CanonicalUnit::Gram),
            PriceEntry::new("Leche", 900.0, 1.0, CanonicalUnit::Liter),
            PriceEntry::new("Huevos", 1500.0, 1.0, CanonicalUnit::Kilogram),
        ]);
        let request = ShoppingListRequest::new(ids(&["r1", "r2"]), false);
        let list = generate(&catalog(), &prices, &request, PortionMultiplier::ONE);

        assert_eq!(list.find("Arroz", CanonicalUnit::Gram).unwrap().cost, Some(300.0));
        assert_eq!(list.find("Arroz", CanonicalUnit::Kilogram).unwrap().cost, Some(1200.0));
        assert_eq!(list.find("Leche", CanonicalUnit::Milliliter).unwrap().cost, Some(225.0));
        // eggs are counted, priced by weight
        assert_eq!(list.find("Huevos", CanonicalUnit::Unit).unwrap().cost, None);

        let sum: f64 = list.lines().filter_map(|l| l.cost).sum();
        assert_eq!(list.total_cost, sum);
        assert_eq!(list.total_cost, 1725.0);
    }

    #[test]
    fn test_incompatible_price_leaves_total_untouched() {
        let prices = PriceCatalog::from_entries(vec![PriceEntry::new(
            "Arroz",
            1200.0,
            1.0,
            CanonicalUnit::Liter,
        )]);
        let request = ShoppingListRequest::new(ids(&["r1"]), false);
        let list = generate(&catalog(), &prices, &request, PortionMultiplier::ONE);
        assert_eq!(list.find("Arroz", CanonicalUnit::Gram).unwrap().cost, None);
        assert_eq!(list.total_cost, 0.0);
    }

    #[test]
    fn test_categories_sorted_and_first_encounter_order_kept() {
        let request = ShoppingListRequest::new(ids(&["r2", "r1"]), true);
        let list = generate(&catalog(), &PriceCatalog::default(), &request, PortionMultiplier::ONE);

        let categories: Vec<_> = list.categories.keys().map(String::as_str).collect();
        assert_eq!(categories, vec!["Cereales", "Lácteos y huevos", "Other"]);

        let dairy: Vec<_> = list.categories["Lácteos y huevos"].iter().map(|l| l.name.as_str()).collect();
        assert_eq!(dairy, vec!["Leche", "Huevos"]);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let prices = PriceCatalog::from_entries(vec![PriceEntry::new("Arroz", 1200.0, 1.0, CanonicalUnit::Kilogram)]);
        let request = ShoppingListRequest::new(ids(&["r1", "r2", "r1"]), true);
        let recipes = catalog();
        let first = generate(&recipes, &prices, &request, PortionMultiplier::ONE);
        let second = generate(&recipes, &prices, &request, PortionMultiplier::ONE);
        assert_eq!(first, second);
        assert_eq!(first.find("Arroz", CanonicalUnit::Gram).unwrap().quantity, 350.0);
    }
}
