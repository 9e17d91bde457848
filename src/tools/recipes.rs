//! Recipe MCP Tools
//!
//! Tools for managing recipes and their ingredient lines.

use serde::Serialize;

use crate::db::Database;
use crate::models::{IngredientQuantity, Recipe, RecipeCreate, RecipeSummary};

/// Response for create_recipe
#[derive(Debug, Serialize)]
pub struct CreateRecipeResponse {
    pub id: i64,
    pub name: String,
    pub servings: u32,
    pub ingredient_count: usize,
    pub created_at: String,
}

/// Full recipe with its cost
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub total_cost: f64,
    pub cost_per_serving: f64,
}

/// Response for list_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Response for scale_recipe
#[derive(Debug, Serialize)]
pub struct ScaleRecipeResponse {
    pub recipe_id: i64,
    pub name: String,
    pub original_servings: u32,
    pub servings: u32,
    pub multiplier: f64,
    pub ingredients: Vec<IngredientQuantity>,
    pub total_cost: f64,
}

/// Response for ingredient edits and deletes
#[derive(Debug, Serialize)]
pub struct RecipeChangeResponse {
    pub success: bool,
    pub recipe_id: i64,
    pub message: String,
}

/// Trim name and unit, then check the line is usable
fn validate_ingredient(mut ingredient: IngredientQuantity) -> Result<IngredientQuantity, String> {
    ingredient.name = ingredient.name.trim().to_string();
    ingredient.unit = ingredient.unit.trim().to_string();

    if ingredient.name.is_empty() {
        return Err("Ingredient name cannot be empty".to_string());
    }
    if ingredient.unit.is_empty() {
        return Err(format!("Ingredient '{}' needs a unit", ingredient.name));
    }
    if !ingredient.amount.is_finite() || ingredient.amount <= 0.0 {
        return Err(format!("Ingredient '{}' amount must be greater than 0", ingredient.name));
    }
    if !ingredient.cost.is_finite() || ingredient.cost < 0.0 {
        return Err(format!("Ingredient '{}' cost cannot be negative", ingredient.name));
    }
    Ok(ingredient)
}

fn detail(recipe: Recipe) -> RecipeDetail {
    let total_cost = recipe.total_cost();
    let cost_per_serving = total_cost / f64::from(recipe.servings.max(1));
    RecipeDetail {
        recipe,
        total_cost,
        cost_per_serving,
    }
}

/// Create a recipe with its ingredients
pub fn create_recipe(db: &Database, data: RecipeCreate) -> Result<CreateRecipeResponse, String> {
    let name = data.name.trim().to_string();
    if name.is_empty() {
        return Err("Recipe name cannot be empty".to_string());
    }
    if data.servings == 0 {
        return Err("servings must be greater than 0".to_string());
    }
    let ingredients = data
        .ingredients
        .into_iter()
        .map(validate_ingredient)
        .collect::<Result<Vec<_>, _>>()?;

    let data = RecipeCreate {
        name,
        servings: data.servings,
        ingredients,
        notes: data.notes,
    };

    let recipe = db
        .with_transaction(|tx| Recipe::create(tx, &data))
        .map_err(|e| format!("Failed to create recipe: {}", e))?;

    tracing::info!(id = recipe.id, name = %recipe.name, "Created recipe");

    Ok(CreateRecipeResponse {
        id: recipe.id,
        name: recipe.name,
        servings: recipe.servings,
        ingredient_count: recipe.ingredients.len(),
        created_at: recipe.created_at,
    })
}

/// Get a recipe with its ingredients
pub fn get_recipe(db: &Database, id: i64) -> Result<Option<RecipeDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipe = Recipe::get_by_id(&conn, id)
        .map_err(|e| format!("Failed to get recipe: {}", e))?;

    Ok(recipe.map(detail))
}

/// List recipes with an optional name search
pub fn list_recipes(
    db: &Database,
    query: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<ListRecipesResponse, String> {
    let limit = limit.clamp(1, 200);
    let offset = offset.max(0);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipes = Recipe::list(&conn, query, limit, offset)
        .map_err(|e| format!("Failed to list recipes: {}", e))?;
    let total = Recipe::count(&conn).map_err(|e| format!("Failed to count recipes: {}", e))?;

    Ok(ListRecipesResponse {
        recipes,
        total,
        limit,
        offset,
    })
}

/// Delete a recipe (planned meals using it are removed too)
pub fn delete_recipe(db: &Database, id: i64) -> Result<RecipeChangeResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = Recipe::delete(&conn, id)
        .map_err(|e| format!("Failed to delete recipe: {}", e))?;

    Ok(RecipeChangeResponse {
        success: deleted,
        recipe_id: id,
        message: if deleted {
            "Recipe deleted".to_string()
        } else {
            "Recipe not found".to_string()
        },
    })
}

/// Append an ingredient line to a recipe
pub fn add_recipe_ingredient(
    db: &Database,
    recipe_id: i64,
    ingredient: IngredientQuantity,
) -> Result<RecipeChangeResponse, String> {
    let ingredient = validate_ingredient(ingredient)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    if Recipe::get_by_id(&conn, recipe_id)
        .map_err(|e| format!("Failed to get recipe: {}", e))?
        .is_none()
    {
        return Err(format!("Recipe {} not found", recipe_id));
    }

    Recipe::add_ingredient(&conn, recipe_id, &ingredient)
        .map_err(|e| format!("Failed to add ingredient: {}", e))?;

    Ok(RecipeChangeResponse {
        success: true,
        recipe_id,
        message: format!("Added {}", ingredient.name),
    })
}

/// Remove an ingredient from a recipe by name
pub fn remove_recipe_ingredient(
    db: &Database,
    recipe_id: i64,
    name: &str,
) -> Result<RecipeChangeResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let removed = Recipe::remove_ingredient(&conn, recipe_id, name)
        .map_err(|e| format!("Failed to remove ingredient: {}", e))?;

    Ok(RecipeChangeResponse {
        success: removed > 0,
        recipe_id,
        message: format!("Removed {} line(s) named '{}'", removed, name.trim()),
    })
}

/// Scaled view of a recipe; the stored recipe is unchanged
pub fn scale_recipe(db: &Database, id: i64, servings: u32) -> Result<ScaleRecipeResponse, String> {
    if servings == 0 {
        return Err("servings must be greater than 0".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipe = Recipe::get_by_id(&conn, id)
        .map_err(|e| format!("Failed to get recipe: {}", e))?
        .ok_or_else(|| format!("Recipe {} not found", id))?;

    let scaled = recipe.scaled(servings);
    let total_cost = scaled.total_cost();

    Ok(ScaleRecipeResponse {
        recipe_id: recipe.id,
        name: recipe.name,
        original_servings: recipe.servings,
        servings,
        multiplier: crate::grocery::servings_multiplier(recipe.servings, servings),
        ingredients: scaled.ingredients,
        total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_validate_ingredient() {
        let ok = IngredientQuantity::new("rice", 1.0, "cup", 0.5, Category::Pantry);
        assert_eq!(validate_ingredient(ok.clone()), Ok(ok.clone()));

        let padded = IngredientQuantity::new(" rice ", 1.0, "cup ", 0.5, Category::Pantry);
        assert_eq!(validate_ingredient(padded), Ok(ok.clone()));

        let zero = IngredientQuantity { amount: 0.0, ..ok.clone() };
        assert!(validate_ingredient(zero).is_err());

        let nan = IngredientQuantity { amount: f64::NAN, ..ok.clone() };
        assert!(validate_ingredient(nan).is_err());

        let negative_cost = IngredientQuantity { cost: -1.0, ..ok.clone() };
        assert!(validate_ingredient(negative_cost).is_err());

        let no_unit = IngredientQuantity { unit: " ".to_string(), ..ok };
        assert!(validate_ingredient(no_unit).is_err());
    }

    #[test]
    fn test_detail_cost_per_serving() {
        let recipe = Recipe {
            servings: 4,
            ingredients: vec![IngredientQuantity::new("rice", 2.0, "cup", 2.0, Category::Pantry)],
            ..Recipe::default()
        };
        let d = detail(recipe);
        assert_eq!(d.total_cost, 2.0);
        assert_eq!(d.cost_per_serving, 0.5);
    }
}
