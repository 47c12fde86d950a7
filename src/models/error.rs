//! Validation errors for user-supplied values

use thiserror::Error;

/// Rejected input at the edge of the domain (tool parameters, CLI arguments)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Portion multiplier must be a positive integer, got {0}")]
    InvalidPortions(i64),

    #[error("Unknown measurement unit: {0}")]
    UnknownUnit(String),

    #[error("Unknown day of week: {0}")]
    UnknownDay(String),

    #[error("Unknown meal slot: {0}")]
    UnknownMealSlot(String),

    #[error("Invalid plan reference: {0} (expected predefined-<n>, custom-<id> or planner)")]
    InvalidPlanRef(String),

    #[error("{field} must be a finite, non-negative number, got {value}")]
    InvalidPriceValue { field: &'static str, value: f64 },

    #[error("{0} cannot be empty")]
    Empty(&'static str),
}
