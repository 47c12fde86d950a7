//! Unit compatibility and cost model
//!
//! Decides whether a consumed quantity and a priced quantity are measured in
//! the same family and, if so, what the consumed quantity costs.

pub mod cost;
pub mod units;

pub use cost::{line_cost, normalized_quantity};
pub use units::{are_compatible, CanonicalUnit, MeasurementFamily, G_PER_KG, ML_PER_LITER};
