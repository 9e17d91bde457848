//! Data models
//!
//! Ingredient types shared with the engines, and the SQLite-backed entities.

mod grocery_item;
mod ingredient;
mod meal_plan;
mod recipe;

pub use grocery_item::GroceryItem;
pub use ingredient::{Category, IngredientQuantity};
pub use meal_plan::{parse_date, MealPlanEntry, MealPlanEntryCreate, MealType};
pub use recipe::{Recipe, RecipeCreate, RecipeSummary};
