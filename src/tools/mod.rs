//! Tools module
//!
//! MCP tool implementations for the meal planner.

pub mod conversion;
pub mod grocery;
pub mod meal_plan;
pub mod recipes;
pub mod status;
