//! Grocery list MCP Tools
//!
//! Builds the shopping list from the meal plan and tracks checked items.

use serde::Serialize;

use crate::db::Database;
use crate::grocery::{aggregate, total_cost, GroceryListItem};
use crate::models::{GroceryItem, MealPlanEntry, Recipe};

/// Response for generate_grocery_list
#[derive(Debug, Serialize)]
pub struct GenerateGroceryListResponse {
    pub items: Vec<GroceryListItem>,
    pub item_count: usize,
    pub recipe_count: usize,
    pub total_cost: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Response for get_grocery_list
#[derive(Debug, Serialize)]
pub struct GroceryListResponse {
    pub items: Vec<GroceryItem>,
    pub item_count: usize,
    pub checked_count: usize,
    pub total_cost: f64,
    /// Cost of the items not yet checked off
    pub remaining_cost: f64,
}

/// Response for check_grocery_item
#[derive(Debug, Serialize)]
pub struct CheckGroceryItemResponse {
    pub success: bool,
    pub item_id: String,
    pub checked: bool,
}

/// Response for clear_grocery_list
#[derive(Debug, Serialize)]
pub struct ClearGroceryListResponse {
    pub success: bool,
    pub removed: usize,
}

/// Rebuild the grocery list from the planned meals in a date range.
///
/// Each planned recipe is scaled to its entry's servings, then everything is
/// merged. The stored list is replaced wholesale and checked state is reset.
pub fn generate_grocery_list(
    db: &Database,
    start_date: Option<String>,
    end_date: Option<String>,
) -> Result<GenerateGroceryListResponse, String> {
    let (items, recipe_count) = db
        .with_transaction(|tx| {
            let entries = MealPlanEntry::list(tx, start_date.as_deref(), end_date.as_deref())?;
            let recipes = entries
                .iter()
                .map(|entry| entry.planned_recipe(tx))
                .collect::<Result<Vec<Recipe>, _>>()?;

            let items = aggregate(&recipes);
            GroceryItem::replace_all(tx, &items)?;
            Ok((items, recipes.len()))
        })
        .map_err(|e| format!("Failed to generate grocery list: {}", e))?;

    tracing::info!(items = items.len(), recipes = recipe_count, "Generated grocery list");

    Ok(GenerateGroceryListResponse {
        item_count: items.len(),
        total_cost: total_cost(&items),
        items,
        recipe_count,
        start_date,
        end_date,
    })
}

/// The stored grocery list
pub fn get_grocery_list(db: &Database) -> Result<GroceryListResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let items = GroceryItem::list(&conn)
        .map_err(|e| format!("Failed to get grocery list: {}", e))?;

    let total_cost = items.iter().map(|i| i.item.cost).sum();
    let remaining_cost = items
        .iter()
        .filter(|i| !i.checked)
        .map(|i| i.item.cost)
        .sum();

    Ok(GroceryListResponse {
        item_count: items.len(),
        checked_count: items.iter().filter(|i| i.checked).count(),
        total_cost,
        remaining_cost,
        items,
    })
}

/// Check or uncheck one item
pub fn check_grocery_item(
    db: &Database,
    item_id: &str,
    checked: bool,
) -> Result<CheckGroceryItemResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let updated = GroceryItem::set_checked(&conn, item_id, checked)
        .map_err(|e| format!("Failed to update grocery item: {}", e))?;

    if !updated {
        return Err(format!("Grocery item '{}' is not on the list", item_id));
    }

    Ok(CheckGroceryItemResponse {
        success: true,
        item_id: item_id.to_string(),
        checked,
    })
}

/// Empty the grocery list
pub fn clear_grocery_list(db: &Database) -> Result<ClearGroceryListResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let removed = GroceryItem::clear(&conn)
        .map_err(|e| format!("Failed to clear grocery list: {}", e))?;

    Ok(ClearGroceryListResponse {
        success: true,
        removed,
    })
}
