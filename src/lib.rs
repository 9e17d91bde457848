//! Meal Planner Library
//!
//! Unit conversion, cost normalization, recipe scaling and grocery list
//! aggregation, with SQLite-backed recipes and meal plans.

pub mod build_info;
pub mod conversion;
pub mod db;
pub mod grocery;
pub mod mcp;
pub mod models;
pub mod tools;
