//! Conversion factors between units
//!
//! A factor `f` converts an amount: `new_amount = old_amount * f`. Every
//! function here returns `None` when the pair is not convertible; callers keep
//! the original amount and unit in that case.

use super::density::grams_per_cup;
use super::units::{
    canonical_unit, get_unit_type, grams_per_unit, ml_per_unit, UnitFamily, ML_PER_CUP,
};
use crate::models::IngredientQuantity;

/// Factor converting an amount in `from_unit` into `to_unit`.
///
/// Weight and volume convert within their family. Crossing between weight and
/// volume needs the ingredient name for its density and pivots through cups.
/// Countable and unknown units only convert to themselves.
pub fn get_conversion_factor(
    from_unit: &str,
    to_unit: &str,
    ingredient_name: Option<&str>,
) -> Option<f64> {
    if from_unit == to_unit {
        return Some(1.0);
    }

    let from = canonical_unit(from_unit)?;
    let to = canonical_unit(to_unit)?;
    if from == to {
        return Some(1.0);
    }

    match (get_unit_type(from), get_unit_type(to)) {
        (UnitFamily::Weight, UnitFamily::Weight) => Some(grams_per_unit(from)? / grams_per_unit(to)?),
        (UnitFamily::Volume, UnitFamily::Volume) => Some(ml_per_unit(from)? / ml_per_unit(to)?),
        (UnitFamily::Volume, UnitFamily::Weight) => {
            let density = grams_per_cup(named(ingredient_name)?);
            let cups = ml_per_unit(from)? / ML_PER_CUP;
            Some(cups * density / grams_per_unit(to)?)
        }
        (UnitFamily::Weight, UnitFamily::Volume) => {
            let density = grams_per_cup(named(ingredient_name)?);
            let cups = grams_per_unit(from)? / density;
            Some(cups * ML_PER_CUP / ml_per_unit(to)?)
        }
        _ => None,
    }
}

fn named(ingredient_name: Option<&str>) -> Option<&str> {
    ingredient_name.filter(|name| !name.trim().is_empty())
}

/// Convert an amount between units
pub fn convert_amount(
    amount: f64,
    from_unit: &str,
    to_unit: &str,
    ingredient_name: Option<&str>,
) -> Option<f64> {
    get_conversion_factor(from_unit, to_unit, ingredient_name).map(|factor| amount * factor)
}

/// Total cost of a quantity after re-expressing it in another unit.
///
/// The physical quantity is unchanged, so the cost is too: this returns
/// `cost` whenever the units convert and `None` otherwise. The amount does
/// not affect the result.
pub fn convert_cost_for_unit(
    cost: f64,
    _amount: f64,
    from_unit: &str,
    to_unit: &str,
    ingredient_name: Option<&str>,
) -> Option<f64> {
    get_conversion_factor(from_unit, to_unit, ingredient_name).map(|_| cost)
}

/// Price of one `to_unit`, given the price of one `from_unit`
pub fn get_cost_per_unit_converted(
    cost_per_unit: f64,
    from_unit: &str,
    to_unit: &str,
    ingredient_name: Option<&str>,
) -> Option<f64> {
    get_conversion_factor(from_unit, to_unit, ingredient_name).map(|factor| cost_per_unit / factor)
}

/// Re-express an ingredient in another unit, keeping its total cost.
///
/// Returns `None` when the units do not convert; the original is untouched.
pub fn convert_quantity(ingredient: &IngredientQuantity, to_unit: &str) -> Option<IngredientQuantity> {
    let amount = convert_amount(ingredient.amount, &ingredient.unit, to_unit, Some(&ingredient.name))?;
    let cost = convert_cost_for_unit(
        ingredient.cost,
        ingredient.amount,
        &ingredient.unit,
        to_unit,
        Some(&ingredient.name),
    )?;

    Some(IngredientQuantity {
        name: ingredient.name.clone(),
        amount,
        unit: to_unit.to_string(),
        cost,
        category: ingredient.category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::density::DEFAULT_GRAMS_PER_CUP;
    use crate::conversion::units::{units_for_family, G_PER_LB, G_PER_OZ, ML_PER_TBSP};
    use crate::models::Category;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identity() {
        assert_eq!(get_conversion_factor("cup", "cup", None), Some(1.0));
        assert_eq!(get_conversion_factor("whole", "whole", None), Some(1.0));
        assert_eq!(get_conversion_factor("handful", "handful", None), Some(1.0));
        assert_eq!(get_conversion_factor("Cups", "cup", None), Some(1.0));
        assert_eq!(get_conversion_factor("clove", "cloves", None), Some(1.0));
    }

    #[test]
    fn test_every_unit_converts_to_itself() {
        for family in [UnitFamily::Weight, UnitFamily::Volume, UnitFamily::Countable] {
            for unit in units_for_family(family) {
                assert_eq!(get_conversion_factor(unit, unit, None), Some(1.0), "{}", unit);
            }
        }
    }

    #[test]
    fn test_family_pairs_are_inverse() {
        for family in [UnitFamily::Weight, UnitFamily::Volume] {
            let units = units_for_family(family);
            for a in &units {
                for b in &units {
                    let ab = get_conversion_factor(a, b, None).unwrap();
                    let ba = get_conversion_factor(b, a, None).unwrap();
                    assert!(approx(ab * ba, 1.0), "{} <-> {}", a, b);

                    let per_b = get_cost_per_unit_converted(3.75, a, b, None).unwrap();
                    let back = get_cost_per_unit_converted(per_b, b, a, None).unwrap();
                    assert!(approx(back, 3.75), "{} -> {} -> {}", a, b, a);
                }
            }
        }
    }

    #[test]
    fn test_distinct_countables_never_convert() {
        let units = units_for_family(UnitFamily::Countable);
        for a in &units {
            for b in units.iter().filter(|b| *b != a) {
                assert_eq!(get_conversion_factor(a, b, Some("garlic")), None, "{} -> {}", a, b);
            }
        }
    }

    #[test]
    fn test_weight_to_weight() {
        let factor = get_conversion_factor("lb", "oz", None).unwrap();
        assert!(approx(factor, G_PER_LB / G_PER_OZ));
        assert!((factor - 16.0).abs() < 0.001);

        let factor = get_conversion_factor("kg", "g", None).unwrap();
        assert!(approx(factor, 1000.0));
    }

    #[test]
    fn test_volume_to_volume() {
        let factor = get_conversion_factor("cup", "tbsp", None).unwrap();
        assert!((factor - 16.0).abs() < 0.001);

        let factor = get_conversion_factor("tbsp", "ml", None).unwrap();
        assert!(approx(factor, ML_PER_TBSP));
    }

    #[test]
    fn test_volume_to_weight_uses_density() {
        let factor = get_conversion_factor("cup", "g", Some("Butter")).unwrap();
        assert!(approx(factor, 227.0));

        let factor = get_conversion_factor("tbsp", "g", Some("butter")).unwrap();
        assert!(approx(factor, ML_PER_TBSP / ML_PER_CUP * 227.0));
    }

    #[test]
    fn test_weight_to_volume_uses_density() {
        let factor = get_conversion_factor("g", "cup", Some("all-purpose flour")).unwrap();
        assert!(approx(factor, 1.0 / 125.0));
    }

    #[test]
    fn test_cross_family_default_density() {
        let factor = get_conversion_factor("cup", "g", Some("mystery sauce")).unwrap();
        assert!(approx(factor, DEFAULT_GRAMS_PER_CUP));
    }

    #[test]
    fn test_cross_family_requires_name() {
        assert_eq!(get_conversion_factor("cup", "g", None), None);
        assert_eq!(get_conversion_factor("g", "cup", Some("  ")), None);
    }

    #[test]
    fn test_countable_never_converts() {
        assert_eq!(get_conversion_factor("whole", "cloves", None), None);
        assert_eq!(get_conversion_factor("whole", "g", Some("onion")), None);
        assert_eq!(get_conversion_factor("cup", "can", Some("tomatoes")), None);
    }

    #[test]
    fn test_unknown_units() {
        assert_eq!(get_conversion_factor("handful", "g", Some("spinach")), None);
        assert_eq!(get_conversion_factor("g", "smidge", None), None);
    }

    #[test]
    fn test_inverse_consistency() {
        let pairs = [("g", "lb"), ("oz", "kg"), ("tsp", "cup"), ("l", "fl oz"), ("gallon", "ml")];
        for (a, b) in pairs {
            let there = get_conversion_factor(a, b, None).unwrap();
            let back = get_conversion_factor(b, a, None).unwrap();
            assert!(approx(there * back, 1.0), "{} <-> {}", a, b);
        }
    }

    #[test]
    fn test_cross_family_inverse_consistency() {
        let there = get_conversion_factor("cup", "oz", Some("honey")).unwrap();
        let back = get_conversion_factor("oz", "cup", Some("honey")).unwrap();
        assert!(approx(there * back, 1.0));
    }

    #[test]
    fn test_convert_amount() {
        let oz = convert_amount(1.0, "lb", "oz", None).unwrap();
        assert!((oz - 16.0).abs() < 0.001);
        assert_eq!(convert_amount(3.0, "whole", "g", Some("onion")), None);
    }

    #[test]
    fn test_convert_cost_is_invariant() {
        assert_eq!(convert_cost_for_unit(4.99, 1.0, "lb", "oz", None), Some(4.99));
        assert_eq!(convert_cost_for_unit(2.50, 2.0, "cup", "g", Some("rice")), Some(2.50));
        assert_eq!(convert_cost_for_unit(1.0, 3.0, "whole", "cloves", None), None);
    }

    #[test]
    fn test_cost_per_unit_converted() {
        // $8 per lb is $0.50 per oz
        let per_oz = get_cost_per_unit_converted(8.0, "lb", "oz", None).unwrap();
        assert!((per_oz - 0.5).abs() < 0.001);

        let back = get_cost_per_unit_converted(per_oz, "oz", "lb", None).unwrap();
        assert!(approx(back, 8.0));

        assert_eq!(get_cost_per_unit_converted(1.0, "can", "g", Some("beans")), None);
    }

    #[test]
    fn test_convert_quantity() {
        let butter = IngredientQuantity::new("butter", 0.5, "cup", 1.25, Category::Dairy);
        let grams = convert_quantity(&butter, "g").unwrap();
        assert!(approx(grams.amount, 113.5));
        assert_eq!(grams.unit, "g");
        assert_eq!(grams.cost, 1.25);
        assert_eq!(grams.category, Category::Dairy);

        let garlic = IngredientQuantity::new("garlic", 2.0, "cloves", 0.2, Category::Produce);
        assert!(convert_quantity(&garlic, "g").is_none());
    }
}
