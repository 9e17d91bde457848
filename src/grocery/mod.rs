//! Grocery module
//!
//! Recipe scaling and shopping list aggregation.

pub mod aggregate;
pub mod scale;

pub use aggregate::{aggregate, aggregate_ingredients, total_cost, GroceryListItem};
pub use scale::{scale_ingredients, servings_multiplier};
