//! MCP server
//!
//! Exposes the meal planning tools over the Model Context Protocol.

pub mod server;

pub use server::MealPlanService;
