//! Meal plan MCP Tools

use serde::Serialize;

use crate::db::{Database, DbError};
use crate::models::{MealPlanEntry, MealPlanEntryCreate, MealType};

/// Response for list_meal_plan
#[derive(Debug, Serialize)]
pub struct ListMealPlanResponse {
    pub entries: Vec<MealPlanEntry>,
    pub count: usize,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Response for remove_meal_plan_entry
#[derive(Debug, Serialize)]
pub struct RemoveMealPlanEntryResponse {
    pub success: bool,
    pub deleted_id: i64,
}

/// Place a recipe on the plan
pub fn plan_meal(
    db: &Database,
    date: &str,
    meal_type: &str,
    recipe_id: i64,
    servings: Option<u32>,
    notes: Option<String>,
) -> Result<MealPlanEntry, String> {
    let data = MealPlanEntryCreate {
        date: date.to_string(),
        meal_type: MealType::from_str(meal_type),
        recipe_id,
        servings,
        notes,
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    MealPlanEntry::create(&conn, &data).map_err(|e| match e {
        DbError::Invalid(msg) => msg,
        DbError::NotFound { .. } => format!("Recipe {} not found", recipe_id),
        other => format!("Failed to plan meal: {}", other),
    })
}

/// Planned meals, optionally limited to a date range
pub fn list_meal_plan(
    db: &Database,
    start_date: Option<String>,
    end_date: Option<String>,
) -> Result<ListMealPlanResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let entries = MealPlanEntry::list(&conn, start_date.as_deref(), end_date.as_deref())
        .map_err(|e| format!("Failed to list meal plan: {}", e))?;

    Ok(ListMealPlanResponse {
        count: entries.len(),
        entries,
        start_date,
        end_date,
    })
}

/// Remove a planned meal
pub fn remove_meal_plan_entry(db: &Database, id: i64) -> Result<RemoveMealPlanEntryResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = MealPlanEntry::delete(&conn, id)
        .map_err(|e| format!("Failed to remove meal plan entry: {}", e))?;

    Ok(RemoveMealPlanEntryResponse {
        success: deleted,
        deleted_id: id,
    })
}
