//! Serving-size scaling
//!
//! Produces scaled copies of ingredient lists; the source list is never touched.

use crate::conversion::round_to;
use crate::models::IngredientQuantity;

/// Multiplier taking a recipe from `original_servings` to `target_servings`
pub fn servings_multiplier(original_servings: u32, target_servings: u32) -> f64 {
    f64::from(target_servings) / f64::from(original_servings)
}

/// Scale amounts and costs proportionally, rounded to 2 decimals.
///
/// `original_servings` must be non-zero; guarding that is the caller's job.
pub fn scale_ingredients(
    ingredients: &[IngredientQuantity],
    original_servings: u32,
    target_servings: u32,
) -> Vec<IngredientQuantity> {
    let multiplier = servings_multiplier(original_servings, target_servings);

    ingredients
        .iter()
        .map(|ingredient| IngredientQuantity {
            amount: round_to(ingredient.amount * multiplier, 2),
            cost: round_to(ingredient.cost * multiplier, 2),
            ..ingredient.clone()
        })
        .collect()
}
