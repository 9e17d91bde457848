//! Grocery list aggregation
//!
//! Merges ingredients from every planned recipe on `(lowercase name, unit)`.
//! Different units of the same ingredient stay on separate lines; no unit
//! conversion happens here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Category, IngredientQuantity, Recipe};

/// One consolidated line of the shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryListItem {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub cost: f64,
    #[serde(default)]
    pub category: Category,
}

impl GroceryListItem {
    /// Merge identity for an ingredient line
    pub fn merge_key(name: &str, unit: &str) -> String {
        format!("{}-{}", name.to_lowercase(), unit)
    }

    fn start(key: String, ingredient: &IngredientQuantity) -> Self {
        Self {
            id: key,
            name: ingredient.name.clone(),
            amount: ingredient.amount,
            unit: ingredient.unit.clone(),
            cost: ingredient.cost,
            category: ingredient.category,
        }
    }
}

/// Build the grocery list for a set of recipes.
///
/// The result is a full rebuild: callers replace any previous list and reset
/// checked state, since item ids can disappear between runs.
pub fn aggregate(recipes: &[Recipe]) -> Vec<GroceryListItem> {
    aggregate_ingredients(recipes.iter().flat_map(|recipe| recipe.ingredients.iter()))
}

/// Merge an arbitrary sequence of ingredient lines into a grocery list
pub fn aggregate_ingredients<'a, I>(ingredients: I) -> Vec<GroceryListItem>
where
    I: IntoIterator<Item = &'a IngredientQuantity>,
{
    let mut items: Vec<GroceryListItem> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut lines = 0usize;

    for ingredient in ingredients {
        lines += 1;
        let key = GroceryListItem::merge_key(&ingredient.name, &ingredient.unit);

        match index.get(&key) {
            Some(&i) => {
                let item = &mut items[i];
                item.amount += ingredient.amount;
                item.cost += ingredient.cost;
            }
            None => {
                index.insert(key.clone(), items.len());
                items.push(GroceryListItem::start(key, ingredient));
            }
        }
    }

    // Stable: first-seen order survives within a category
    items.sort_by_key(|item| item.category.rank());

    tracing::debug!(lines, items = items.len(), "Aggregated grocery list");
    items
}

/// Sum of every item's cost
pub fn total_cost(items: &[GroceryListItem]) -> f64 {
    items.iter().map(|item| item.cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: i64, ingredients: Vec<IngredientQuantity>) -> Recipe {
        Recipe {
            id,
            name: format!("Recipe {}", id),
            servings: 4,
            ingredients,
            ..Recipe::default()
        }
    }

    fn garlic() -> IngredientQuantity {
        IngredientQuantity::new("garlic", 2.0, "cloves", 0.20, Category::Produce)
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_merges_same_name_and_unit() {
        let recipes = vec![recipe(1, vec![garlic()]), recipe(2, vec![garlic()])];
        let list = aggregate(&recipes);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "garlic-cloves");
        assert_eq!(list[0].amount, 4.0);
        assert!((list[0].cost - 0.40).abs() < 1e-9);
    }

    #[test]
    fn test_name_case_is_normalized() {
        let mut upper = garlic();
        upper.name = "Garlic".to_string();
        let recipes = vec![recipe(1, vec![upper]), recipe(2, vec![garlic()])];
        let list = aggregate(&recipes);

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Garlic");
        assert_eq!(list[0].id, "garlic-cloves");
    }

    #[test]
    fn test_merge_key_is_lowercase_name_and_unit() {
        assert_eq!(GroceryListItem::merge_key("Olive Oil", "tbsp"), "olive oil-tbsp");
        assert_eq!(GroceryListItem::merge_key(" Garlic", "cloves"), " garlic-cloves");
        assert_eq!(GroceryListItem::merge_key("garlic", "Cloves"), "garlic-Cloves");
    }

    #[test]
    fn test_different_units_stay_separate() {
        let recipes = vec![
            recipe(1, vec![IngredientQuantity::new("onion", 1.0, "whole", 0.5, Category::Produce)]),
            recipe(2, vec![IngredientQuantity::new("onion", 100.0, "g", 0.3, Category::Produce)]),
        ];
        let list = aggregate(&recipes);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "onion-whole");
        assert_eq!(list[1].id, "onion-g");
    }

    #[test]
    fn test_category_ordering() {
        let recipes = vec![recipe(
            1,
            vec![
                IngredientQuantity::new("peas", 1.0, "bag", 2.0, Category::Frozen),
                IngredientQuantity::new("carrot", 2.0, "whole", 0.5, Category::Produce),
                IngredientQuantity::new("milk", 1.0, "cup", 0.3, Category::Dairy),
            ],
        )];
        let categories: Vec<Category> = aggregate(&recipes).iter().map(|i| i.category).collect();

        assert_eq!(categories, vec![Category::Produce, Category::Dairy, Category::Frozen]);
    }

    #[test]
    fn test_order_insensitive_totals() {
        let r1 = recipe(
            1,
            vec![
                garlic(),
                IngredientQuantity::new("olive oil", 2.0, "tbsp", 0.3, Category::Pantry),
            ],
        );
        let r2 = recipe(
            2,
            vec![
                IngredientQuantity::new("olive oil", 1.0, "tbsp", 0.15, Category::Pantry),
                garlic(),
            ],
        );

        let forward = aggregate(&[r1.clone(), r2.clone()]);
        let backward = aggregate(&[r2, r1]);
        assert_eq!(forward.len(), backward.len());

        for item in &forward {
            let other = backward.iter().find(|b| b.id == item.id).unwrap();
            assert!((item.amount - other.amount).abs() < 1e-9);
            assert!((item.cost - other.cost).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_amounts_are_kept() {
        let recipes = vec![recipe(
            1,
            vec![IngredientQuantity::new("salt", 0.0, "pinch", 0.0, Category::Spices)],
        )];
        assert_eq!(aggregate(&recipes).len(), 1);
    }

    #[test]
    fn test_total_cost() {
        let recipes = vec![recipe(1, vec![garlic(), garlic()])];
        let list = aggregate(&recipes);
        assert!((total_cost(&list) - 0.40).abs() < 1e-9);
    }
}
