//! Shopping list presentation
//!
//! Turns an aggregated list into display strings and the plain-text export.

use serde::Serialize;

use crate::models::DayOfWeek;
use super::ShoppingList;

pub const WEEKLY_TITLE: &str = "Weekly Shopping List";
pub const EMPTY_LIST_MESSAGE: &str =
    "No ingredients to show. Add recipes to your plan to get started.";
const TOTAL_LABEL: &str = "Estimated total cost";

pub fn day_title(day: DayOfWeek) -> String {
    format!("Shopping List - {}", day.label())
}

/// Integers unadorned, anything else with 2 decimals
pub fn format_line_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{:.0}", quantity)
    } else {
        format!("{:.2}", quantity)
    }
}

/// `<currency><cost>` with 2 decimals, blank when the cost is unknown
pub fn format_cost(cost: Option<f64>, currency: &str) -> String {
    cost.map(|c| format!("{}{:.2}", currency, c)).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineView {
    /// `<name> - <quantity> <unit>`
    pub label: String,
    pub cost: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub name: String,
    pub items: Vec<LineView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListView {
    pub title: String,
    pub categories: Vec<CategoryView>,
    /// Present only when something was priced
    pub total: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn render(list: &ShoppingList, title: &str, currency: &str) -> ShoppingListView {
    let categories = list
        .categories
        .iter()
        .map(|(name, lines)| CategoryView {
            name: name.clone(),
            items: lines
                .iter()
                .map(|line| LineView {
                    label: format!(
                        "{} - {} {}",
                        line.name,
                        format_line_quantity(line.quantity),
                        line.unit
                    ),
                    cost: format_cost(line.cost, currency),
                })
                .collect(),
        })
        .collect();

    let total = (list.total_cost > 0.0)
        .then(|| format!("{}: {}", TOTAL_LABEL, format_cost(Some(list.total_cost), currency)));

    ShoppingListView {
        title: title.to_string(),
        categories,
        total,
        message: list.is_empty().then(|| EMPTY_LIST_MESSAGE.to_string()),
    }
}

impl ShoppingListView {
    /// Text suitable for pasting into a notes app
    pub fn to_plain_text(&self) -> String {
        let mut text = format!("{}\n\n", self.title);
        if let Some(message) = &self.message {
            text.push_str(message);
            text.push('\n');
            return text;
        }
        for category in &self.categories {
            text.push_str(&format!("--- {} ---\n", category.name.to_uppercase()));
            for item in &category.items {
                text.push_str(&format!("- {}\n", item.label));
            }
            text.push('\n');
        }
        if let Some(total) = &self.total {
            text.push_str(total);
            text.push('\n');
        }
        text
    }
}
