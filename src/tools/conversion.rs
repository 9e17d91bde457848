//! Unit conversion tools
//!
//! Stateless wrappers over the conversion engine for the display layer.

use serde::Serialize;

use crate::conversion::{
    canonical_unit, convert_quantity, find_density, format_amount, get_conversion_factor,
    get_cost_per_unit_converted, get_unit_type, round_for_display, units_for_family, UnitFamily,
    DEFAULT_GRAMS_PER_CUP,
};
use crate::models::{Category, IngredientQuantity};

/// Response for unit_info
#[derive(Debug, Serialize)]
pub struct UnitInfoResponse {
    pub unit: String,
    pub canonical: Option<&'static str>,
    pub family: UnitFamily,
    /// Base unit the family converts through (g or ml)
    pub base_unit: Option<&'static str>,
    /// Units this one converts to without an ingredient name
    pub convertible_to: Vec<&'static str>,
}

/// Response for list_units
#[derive(Debug, Serialize)]
pub struct ListUnitsResponse {
    pub weight: Vec<&'static str>,
    pub volume: Vec<&'static str>,
    pub countable: Vec<&'static str>,
}

/// Response for convert_unit
#[derive(Debug, Serialize)]
pub struct ConvertUnitResponse {
    /// False when the units do not convert; amount and unit are then the originals
    pub converted: bool,
    pub amount: f64,
    pub unit: String,
    pub display: String,
    pub cost: Option<f64>,
    pub factor: Option<f64>,
    /// Grams per cup used for a weight/volume crossing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_grams_per_cup: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_is_default: Option<bool>,
}

/// Response for convert_cost_per_unit
#[derive(Debug, Serialize)]
pub struct CostPerUnitResponse {
    pub converted: bool,
    pub cost_per_unit: f64,
    pub unit: String,
}

/// Classify a unit
pub fn unit_info(unit: &str) -> UnitInfoResponse {
    let family = get_unit_type(unit);
    let convertible_to = match family {
        UnitFamily::Weight | UnitFamily::Volume => units_for_family(family),
        UnitFamily::Countable | UnitFamily::Unknown => Vec::new(),
    };

    UnitInfoResponse {
        unit: unit.to_string(),
        canonical: canonical_unit(unit),
        family,
        base_unit: family.base_unit(),
        convertible_to,
    }
}

/// Every recognized unit by family
pub fn list_units() -> ListUnitsResponse {
    ListUnitsResponse {
        weight: units_for_family(UnitFamily::Weight),
        volume: units_for_family(UnitFamily::Volume),
        countable: units_for_family(UnitFamily::Countable),
    }
}

/// Re-express an amount (and its total cost) in another unit
pub fn convert_unit(
    amount: f64,
    from_unit: &str,
    to_unit: &str,
    cost: Option<f64>,
    ingredient_name: Option<&str>,
) -> Result<ConvertUnitResponse, String> {
    if !amount.is_finite() || amount < 0.0 {
        return Err("amount must be a non-negative number".to_string());
    }

    let crosses = matches!(
        (get_unit_type(from_unit), get_unit_type(to_unit)),
        (UnitFamily::Weight, UnitFamily::Volume) | (UnitFamily::Volume, UnitFamily::Weight)
    );

    let quantity = IngredientQuantity::new(
        ingredient_name.unwrap_or_default(),
        amount,
        from_unit,
        cost.unwrap_or_default(),
        Category::Other,
    );

    let Some(converted) = convert_quantity(&quantity, to_unit) else {
        tracing::debug!(from_unit, to_unit, "No conversion, keeping original unit");
        return Ok(ConvertUnitResponse {
            converted: false,
            amount,
            unit: from_unit.to_string(),
            display: format_amount(amount, from_unit),
            cost,
            factor: None,
            density_grams_per_cup: None,
            density_is_default: None,
        });
    };

    let (density_grams_per_cup, density_is_default) = match (crosses, ingredient_name) {
        (true, Some(name)) => match find_density(name) {
            Some(density) => (Some(density), Some(false)),
            None => (Some(DEFAULT_GRAMS_PER_CUP), Some(true)),
        },
        _ => (None, None),
    };

    Ok(ConvertUnitResponse {
        converted: true,
        amount: round_for_display(converted.amount),
        display: format_amount(converted.amount, &converted.unit),
        unit: converted.unit,
        cost: cost.map(|_| converted.cost),
        factor: get_conversion_factor(from_unit, to_unit, ingredient_name),
        density_grams_per_cup,
        density_is_default,
    })
}

/// Convert a per-unit price into another unit
pub fn convert_cost_per_unit(
    cost_per_unit: f64,
    from_unit: &str,
    to_unit: &str,
    ingredient_name: Option<&str>,
) -> CostPerUnitResponse {
    match get_cost_per_unit_converted(cost_per_unit, from_unit, to_unit, ingredient_name) {
        Some(converted) => CostPerUnitResponse {
            converted: true,
            cost_per_unit: converted,
            unit: to_unit.to_string(),
        },
        None => CostPerUnitResponse {
            converted: false,
            cost_per_unit,
            unit: from_unit.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_info() {
        let info = unit_info("Cups");
        assert_eq!(info.canonical, Some("cup"));
        assert_eq!(info.family, UnitFamily::Volume);
        assert_eq!(info.base_unit, Some("ml"));
        assert!(info.convertible_to.contains(&"tbsp"));

        let info = unit_info("cloves");
        assert_eq!(info.family, UnitFamily::Countable);
        assert!(info.convertible_to.is_empty());
        assert_eq!(info.base_unit, None);
    }

    #[test]
    fn test_convert_unit_success() {
        let resp = convert_unit(1.0, "lb", "oz", Some(4.99), None).unwrap();
        assert!(resp.converted);
        assert_eq!(resp.amount, 16.0);
        assert_eq!(resp.unit, "oz");
        assert_eq!(resp.cost, Some(4.99));
        assert_eq!(resp.density_grams_per_cup, None);

        let resp = convert_unit(2.0, "cup", "tbsp", None, None).unwrap();
        assert_eq!(resp.amount, 32.0);
        assert_eq!(resp.cost, None);
    }

    #[test]
    fn test_convert_unit_falls_back_to_original() {
        let resp = convert_unit(2.0, "cloves", "g", Some(0.2), Some("garlic")).unwrap();
        assert!(!resp.converted);
        assert_eq!(resp.amount, 2.0);
        assert_eq!(resp.unit, "cloves");
        assert_eq!(resp.display, "2 cloves");
    }

    #[test]
    fn test_convert_unit_reports_density() {
        let resp = convert_unit(1.0, "cup", "g", None, Some("butter")).unwrap();
        assert_eq!(resp.amount, 227.0);
        assert_eq!(resp.density_is_default, Some(false));

        let resp = convert_unit(1.0, "cup", "g", None, Some("kimchi")).unwrap();
        assert_eq!(resp.density_is_default, Some(true));
    }

    #[test]
    fn test_convert_unit_rejects_negative() {
        assert!(convert_unit(-1.0, "g", "oz", None, None).is_err());
    }

    #[test]
    fn test_convert_cost_per_unit() {
        let resp = convert_cost_per_unit(8.0, "lb", "oz", None);
        assert!(resp.converted);
        assert!((resp.cost_per_unit - 0.5).abs() < 0.001);

        let resp = convert_cost_per_unit(0.5, "can", "g", Some("beans"));
        assert!(!resp.converted);
        assert_eq!(resp.unit, "can");
    }
}
