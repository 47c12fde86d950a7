//! Cost of a consolidated quantity against a price entry

use crate::models::PriceEntry;
use super::units::{are_compatible, CanonicalUnit};

/// Express a quantity in the smallest unit of its family (g, ml or units)
pub fn normalized_quantity(quantity: f64, unit: CanonicalUnit) -> f64 {
    quantity * unit.factor_to_smallest()
}

/// Cost of `quantity` of `unit` at the given price.
///
/// `None` when the price is unusable or measured in another family.
pub fn line_cost(quantity: f64, unit: CanonicalUnit, price: &PriceEntry) -> Option<f64> {
    if !price.is_usable() || !are_compatible(unit, price.base_unit) {
        return None;
    }

    let consumed = normalized_quantity(quantity, unit);
    let priced = normalized_quantity(price.base_quantity, price.base_unit);
    Some(consumed / priced * price.price)
}
