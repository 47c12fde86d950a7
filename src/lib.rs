//! Meal Plan Manager Library
//!
//! Weekly meal plans, portion-scaled recipes and priced shopping lists.

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod context;
pub mod db;
pub mod mcp;
pub mod models;
pub mod pricing;
pub mod quantity;
pub mod shopping;
pub mod tools;
