//! Persisted grocery list
//!
//! The stored list is always the snapshot of the last aggregation. Replacing
//! it drops every row, checked state included, because item ids can change
//! between runs.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::grocery::GroceryListItem;
use super::Category;

/// A grocery list line with its checked state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryItem {
    #[serde(flatten)]
    pub item: GroceryListItem,
    pub checked: bool,
    pub generated_at: String,
}

impl GroceryItem {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let category: String = row.get("category")?;
        Ok(Self {
            item: GroceryListItem {
                id: row.get("item_id")?,
                name: row.get("name")?,
                amount: row.get("amount")?,
                unit: row.get("unit")?,
                cost: row.get("cost")?,
                category: Category::from_str(&category),
            },
            checked: row.get::<_, i32>("checked")? != 0,
            generated_at: row.get("generated_at")?,
        })
    }

    /// Replace the whole list with a new snapshot.
    ///
    /// Run inside a transaction so readers never see a half-written list.
    pub fn replace_all(conn: &Connection, items: &[GroceryListItem]) -> DbResult<usize> {
        conn.execute("DELETE FROM grocery_items", [])?;

        let mut stmt = conn.prepare(
            r#"
            INSERT INTO grocery_items (item_id, position, name, amount, unit, cost, category)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )?;

        for (position, item) in items.iter().enumerate() {
            stmt.execute(params![
                item.id,
                position as i64,
                item.name,
                item.amount,
                item.unit,
                item.cost,
                item.category.as_str(),
            ])?;
        }

        Ok(items.len())
    }

    /// The stored list in aggregation order
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM grocery_items ORDER BY position")?;
        let items = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Set the checked flag; returns false if the item is not on the list
    pub fn set_checked(conn: &Connection, item_id: &str, checked: bool) -> DbResult<bool> {
        let rows = conn.execute(
            "UPDATE grocery_items SET checked = ?1 WHERE item_id = ?2",
            params![checked as i32, item_id],
        )?;
        Ok(rows > 0)
    }

    /// Remove every item
    pub fn clear(conn: &Connection) -> DbResult<usize> {
        let rows = conn.execute("DELETE FROM grocery_items", [])?;
        Ok(rows)
    }
}
