//! Recipe model
//!
//! A recipe with its ingredient lines. Ingredient amounts and costs are for
//! the recipe's own serving count.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::grocery::scale_ingredients;
use super::{Category, IngredientQuantity};

/// A recipe with its ingredients
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub servings: u32,
    #[serde(default)]
    pub ingredients: Vec<IngredientQuantity>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Data for creating a new recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub name: String,
    pub servings: u32,
    #[serde(default)]
    pub ingredients: Vec<IngredientQuantity>,
    pub notes: Option<String>,
}

/// Recipe summary for listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub servings: u32,
    pub ingredient_count: i64,
    pub total_cost: f64,
}

impl Recipe {
    /// Create from a database row (ingredients loaded separately)
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            servings: row.get("servings")?,
            ingredients: Vec::new(),
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Copy of this recipe scaled to another serving count
    pub fn scaled(&self, target_servings: u32) -> Self {
        Self {
            servings: target_servings,
            ingredients: scale_ingredients(&self.ingredients, self.servings, target_servings),
            ..self.clone()
        }
    }

    /// Total cost of every ingredient line
    pub fn total_cost(&self) -> f64 {
        self.ingredients.iter().map(|i| i.cost).sum()
    }

    /// Insert a recipe and its ingredients
    pub fn create(conn: &Connection, data: &RecipeCreate) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO recipes (name, servings, notes) VALUES (?1, ?2, ?3)",
            params![data.name, data.servings, data.notes],
        )?;

        let id = conn.last_insert_rowid();
        for ingredient in &data.ingredients {
            Self::add_ingredient(conn, id, ingredient)?;
        }

        Self::get_by_id(conn, id)?.ok_or(DbError::NotFound { entity: "Recipe", id })
    }

    /// Get a recipe with its ingredients
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM recipes WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(mut recipe) => {
                recipe.ingredients = Self::get_ingredients(conn, id)?;
                Ok(Some(recipe))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Ingredient lines of a recipe, in authored order
    pub fn get_ingredients(conn: &Connection, recipe_id: i64) -> DbResult<Vec<IngredientQuantity>> {
        let mut stmt = conn.prepare(
            "SELECT name, amount, unit, cost, category FROM recipe_ingredients
             WHERE recipe_id = ?1 ORDER BY position, id",
        )?;

        let ingredients = stmt
            .query_map([recipe_id], |row| {
                let category: String = row.get("category")?;
                Ok(IngredientQuantity {
                    name: row.get("name")?,
                    amount: row.get("amount")?,
                    unit: row.get("unit")?,
                    cost: row.get("cost")?,
                    category: Category::from_str(&category),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ingredients)
    }

    /// Append an ingredient line to a recipe
    pub fn add_ingredient(conn: &Connection, recipe_id: i64, ingredient: &IngredientQuantity) -> DbResult<()> {
        let position: i64 = conn.query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM recipe_ingredients WHERE recipe_id = ?1",
            [recipe_id],
            |row| row.get(0),
        )?;

        conn.execute(
            r#"
            INSERT INTO recipe_ingredients (recipe_id, position, name, amount, unit, cost, category)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                recipe_id,
                position,
                ingredient.name,
                ingredient.amount,
                ingredient.unit,
                ingredient.cost,
                ingredient.category.as_str(),
            ],
        )?;

        conn.execute(
            "UPDATE recipes SET updated_at = datetime('now') WHERE id = ?1",
            [recipe_id],
        )?;
        Ok(())
    }

    /// Remove every line of an ingredient (matched case-insensitively by name)
    pub fn remove_ingredient(conn: &Connection, recipe_id: i64, name: &str) -> DbResult<usize> {
        let rows = conn.execute(
            "DELETE FROM recipe_ingredients WHERE recipe_id = ?1 AND lower(name) = lower(?2)",
            params![recipe_id, name.trim()],
        )?;
        Ok(rows)
    }

    /// List recipes with an optional name filter
    pub fn list(conn: &Connection, query: Option<&str>, limit: i64, offset: i64) -> DbResult<Vec<RecipeSummary>> {
        let pattern = format!("%{}%", query.unwrap_or("").trim());

        let mut stmt = conn.prepare(
            r#"
            SELECT r.id, r.name, r.servings,
                   COUNT(ri.id) AS ingredient_count,
                   COALESCE(SUM(ri.cost), 0) AS total_cost
            FROM recipes r
            LEFT JOIN recipe_ingredients ri ON ri.recipe_id = r.id
            WHERE r.name LIKE ?1
            GROUP BY r.id
            ORDER BY r.name
            LIMIT ?2 OFFSET ?3
            "#,
        )?;

        let recipes = stmt
            .query_map(params![pattern, limit, offset], |row| {
                Ok(RecipeSummary {
                    id: row.get("id")?,
                    name: row.get("name")?,
                    servings: row.get("servings")?,
                    ingredient_count: row.get("ingredient_count")?,
                    total_cost: row.get("total_cost")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// Count recipes
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete a recipe; ingredients and meal plan entries cascade
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM recipes WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::test_connection;

    fn pasta() -> RecipeCreate {
        RecipeCreate {
            name: "Garlic Pasta".to_string(),
            servings: 4,
            ingredients: vec![
                IngredientQuantity::new("spaghetti", 1.0, "lb", 1.5, Category::Pantry),
                IngredientQuantity::new("garlic", 4.0, "cloves", 0.4, Category::Produce),
            ],
            notes: None,
        }
    }

    #[test]
    fn test_create_and_get() {
        let conn = test_connection();
        let recipe = Recipe::create(&conn, &pasta()).unwrap();

        assert_eq!(recipe.name, "Garlic Pasta");
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[0].name, "spaghetti");
        assert_eq!(recipe.ingredients[1].category, Category::Produce);
    }

    #[test]
    fn test_add_and_remove_ingredient() {
        let conn = test_connection();
        let recipe = Recipe::create(&conn, &pasta()).unwrap();

        let oil = IngredientQuantity::new("Olive Oil", 2.0, "tbsp", 0.3, Category::Pantry);
        Recipe::add_ingredient(&conn, recipe.id, &oil).unwrap();
        let loaded = Recipe::get_by_id(&conn, recipe.id).unwrap().unwrap();
        assert_eq!(loaded.ingredients.last().unwrap().name, "Olive Oil");

        assert_eq!(Recipe::remove_ingredient(&conn, recipe.id, "olive oil").unwrap(), 1);
        let loaded = Recipe::get_by_id(&conn, recipe.id).unwrap().unwrap();
        assert_eq!(loaded.ingredients.len(), 2);
    }

    #[test]
    fn test_list_and_delete() {
        let conn = test_connection();
        let recipe = Recipe::create(&conn, &pasta()).unwrap();

        let summaries = Recipe::list(&conn, Some("garlic"), 10, 0).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].ingredient_count, 2);
        assert!((summaries[0].total_cost - 1.9).abs() < 1e-9);

        assert!(Recipe::delete(&conn, recipe.id).unwrap());
        assert!(Recipe::get_by_id(&conn, recipe.id).unwrap().is_none());
        assert_eq!(Recipe::count(&conn).unwrap(), 0);
    }

    #[test]
    fn test_scaled_copy() {
        let conn = test_connection();
        let recipe = Recipe::create(&conn, &pasta()).unwrap();
        let doubled = recipe.scaled(8);

        assert_eq!(doubled.servings, 8);
        assert_eq!(doubled.ingredients[1].amount, 8.0);
        assert_eq!(recipe.ingredients[1].amount, 4.0);
    }
}
