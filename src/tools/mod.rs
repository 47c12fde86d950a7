//! Meal Plan Tools module
//!
//! MCP tool implementations for the Meal Plan Manager.

pub mod planner;
pub mod plans;
pub mod prices;
pub mod recipes;
pub mod settings;
pub mod shopping;
pub mod status;
