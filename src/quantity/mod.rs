//! Ingredient quantity handling
//!
//! Display quantities such as `"1/2 taza"` are parsed once, when the recipe
//! catalog is loaded, and rendered scaled by the portion multiplier.

pub mod format;
pub mod parse;

pub use format::{format_number, format_scaled, gcd};
pub use parse::{Amount, Quantity};
