//! Meal plan model
//!
//! A recipe placed on a date and meal slot, optionally at a different serving
//! count than the recipe makes.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use super::Recipe;

/// Meal slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Unspecified,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
            MealType::Unspecified => "unspecified",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" => MealType::Dinner,
            "snack" => MealType::Snack,
            _ => MealType::Unspecified,
        }
    }
}

/// A planned meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanEntry {
    pub id: i64,
    pub date: String,
    pub meal_type: MealType,
    pub recipe_id: i64,
    pub recipe_name: String,
    /// Servings to cook; `None` means the recipe's own servings
    pub servings: Option<u32>,
    pub notes: Option<String>,
    pub created_at: String,
}

/// Data for planning a meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanEntryCreate {
    pub date: String,
    pub meal_type: MealType,
    pub recipe_id: i64,
    pub servings: Option<u32>,
    pub notes: Option<String>,
}

/// Parse and normalize an ISO date
pub fn parse_date(date: &str) -> DbResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| DbError::Invalid(format!("date '{}' is not YYYY-MM-DD: {}", date, e)))
}

const SELECT_ENTRY: &str = r#"
    SELECT m.id, m.date, m.meal_type, m.recipe_id, r.name AS recipe_name,
           m.servings, m.notes, m.created_at
    FROM meal_plan_entries m
    INNER JOIN recipes r ON r.id = m.recipe_id
"#;

impl MealPlanEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let meal_type: String = row.get("meal_type")?;
        Ok(Self {
            id: row.get("id")?,
            date: row.get("date")?,
            meal_type: MealType::from_str(&meal_type),
            recipe_id: row.get("recipe_id")?,
            recipe_name: row.get("recipe_name")?,
            servings: row.get("servings")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Place a recipe on the plan
    pub fn create(conn: &Connection, data: &MealPlanEntryCreate) -> DbResult<Self> {
        let date = parse_date(&data.date)?;

        if data.servings == Some(0) {
            return Err(DbError::Invalid("servings must be greater than 0".to_string()));
        }

        if Recipe::get_by_id(conn, data.recipe_id)?.is_none() {
            return Err(DbError::NotFound { entity: "Recipe", id: data.recipe_id });
        }

        conn.execute(
            r#"
            INSERT INTO meal_plan_entries (date, meal_type, recipe_id, servings, notes)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                date.format("%Y-%m-%d").to_string(),
                data.meal_type.as_str(),
                data.recipe_id,
                data.servings,
                data.notes,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or(DbError::NotFound { entity: "Meal plan entry", id })
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let sql = format!("{} WHERE m.id = ?1", SELECT_ENTRY);
        let mut stmt = conn.prepare(&sql)?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Entries between two dates (inclusive), or the whole plan
    pub fn list(conn: &Connection, start_date: Option<&str>, end_date: Option<&str>) -> DbResult<Vec<Self>> {
        let start = match start_date {
            Some(d) => parse_date(d)?.format("%Y-%m-%d").to_string(),
            None => "0000-01-01".to_string(),
        };
        let end = match end_date {
            Some(d) => parse_date(d)?.format("%Y-%m-%d").to_string(),
            None => "9999-12-31".to_string(),
        };

        let sql = format!(
            "{} WHERE m.date >= ?1 AND m.date <= ?2 ORDER BY m.date, m.id",
            SELECT_ENTRY
        );
        let mut stmt = conn.prepare(&sql)?;

        let entries = stmt
            .query_map(params![start, end], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM meal_plan_entries WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    /// The planned recipe, scaled to this entry's servings
    pub fn planned_recipe(&self, conn: &Connection) -> DbResult<Recipe> {
        let recipe = Recipe::get_by_id(conn, self.recipe_id)?
            .ok_or(DbError::NotFound { entity: "Recipe", id: self.recipe_id })?;

        Ok(match self.servings {
            Some(servings) if servings != recipe.servings => recipe.scaled(servings),
            _ => recipe,
        })
    }
}
