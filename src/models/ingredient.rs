//! Ingredient quantity and grocery category
//!
//! Shared by recipes, scaling, conversion and grocery aggregation.

use serde::{Deserialize, Serialize};

/// Grocery category, in aisle priority order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Produce,
    Meat,
    Seafood,
    Dairy,
    Pantry,
    Spices,
    Baking,
    Frozen,
    Snacks,
    Breakfast,
    Drinks,
    /// Also the bucket for any unrecognized category string
    #[serde(other)]
    #[default]
    Other,
}

impl Category {
    /// All categories in list order
    pub const ORDER: [Category; 12] = [
        Category::Produce,
        Category::Meat,
        Category::Seafood,
        Category::Dairy,
        Category::Pantry,
        Category::Spices,
        Category::Baking,
        Category::Frozen,
        Category::Snacks,
        Category::Breakfast,
        Category::Drinks,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Produce => "produce",
            Category::Meat => "meat",
            Category::Seafood => "seafood",
            Category::Dairy => "dairy",
            Category::Pantry => "pantry",
            Category::Spices => "spices",
            Category::Baking => "baking",
            Category::Frozen => "frozen",
            Category::Snacks => "snacks",
            Category::Breakfast => "breakfast",
            Category::Drinks => "drinks",
            Category::Other => "other",
        }
    }

    /// Parse from string; anything unrecognized lands in `Other`
    pub fn from_str(s: &str) -> Self {
        let lower = s.trim().to_lowercase();
        Self::ORDER
            .iter()
            .copied()
            .find(|c| c.as_str() == lower)
            .unwrap_or(Category::Other)
    }

    /// Position in the grocery list ordering
    pub fn rank(&self) -> usize {
        *self as usize
    }
}

/// An amount of a named ingredient with its total cost in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientQuantity {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub category: Category,
}

impl IngredientQuantity {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        unit: impl Into<String>,
        cost: f64,
        category: Category,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
            cost,
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_matches_rank() {
        for (i, category) in Category::ORDER.iter().enumerate() {
            assert_eq!(category.rank(), i);
        }
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(Category::from_str("Produce"), Category::Produce);
        assert_eq!(Category::from_str("drinks"), Category::Drinks);
        assert_eq!(Category::from_str("deli"), Category::Other);
    }

    #[test]
    fn test_unknown_category_deserializes_to_other() {
        let json = r#"{"name":"salami","amount":1,"unit":"package","cost":4.5,"category":"deli"}"#;
        let ingredient: IngredientQuantity = serde_json::from_str(json).unwrap();
        assert_eq!(ingredient.category, Category::Other);
    }

    #[test]
    fn test_missing_category_defaults_to_other() {
        let json = r#"{"name":"water","amount":1,"unit":"cup"}"#;
        let ingredient: IngredientQuantity = serde_json::from_str(json).unwrap();
        assert_eq!(ingredient.category, Category::Other);
        assert_eq!(ingredient.cost, 0.0);
    }
}
