//! Shopping list generation
//!
//! Aggregation of selected recipes into priced, categorized line items, and
//! the display contract for the result.

pub mod aggregator;
pub mod render;

pub use aggregator::{generate, LineItem, ShoppingList, ShoppingListRequest};
pub use render::{
    day_title, format_cost, format_line_quantity, render, CategoryView, LineView,
    ShoppingListView, EMPTY_LIST_MESSAGE, WEEKLY_TITLE,
};
