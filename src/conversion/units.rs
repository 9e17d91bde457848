//! Unit families and conversion constants
//!
//! Every recognized unit token belongs to exactly one family. Weight units
//! carry a grams-per-unit factor, volume units a milliliters-per-unit factor.
//! Countable units carry no factor and never convert.

use serde::{Deserialize, Serialize};

/// Family a measurement unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    /// Mass units, canonical base grams
    Weight,
    /// Volume units, canonical base milliliters
    Volume,
    /// Discrete units (whole, cloves, can, ...)
    Countable,
    /// Not in any table
    Unknown,
}

impl UnitFamily {
    /// Canonical base unit of the family, if it has one
    pub fn base_unit(&self) -> Option<&'static str> {
        match self {
            UnitFamily::Weight => Some("g"),
            UnitFamily::Volume => Some("ml"),
            UnitFamily::Countable | UnitFamily::Unknown => None,
        }
    }
}

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per teaspoon
pub const ML_PER_TSP: f64 = 4.92892;
/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 14.7868;
/// Milliliters per fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;
/// Milliliters per cup (US)
pub const ML_PER_CUP: f64 = 236.588;
/// Milliliters per pint (US)
pub const ML_PER_PINT: f64 = 473.176;
/// Milliliters per quart (US)
pub const ML_PER_QUART: f64 = 946.353;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;
/// Milliliters per gallon (US)
pub const ML_PER_GALLON: f64 = 3785.41;

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

pub const G_PER_MG: f64 = 0.001;
pub const G_PER_KG: f64 = 1000.0;
pub const G_PER_OZ: f64 = 28.3495;
pub const G_PER_LB: f64 = 453.592;

/// A recognized unit: canonical token, family, and factor to the family base
struct UnitDef {
    token: &'static str,
    family: UnitFamily,
    base: f64,
}

const fn weight(token: &'static str, grams: f64) -> UnitDef {
    UnitDef { token, family: UnitFamily::Weight, base: grams }
}

const fn volume(token: &'static str, ml: f64) -> UnitDef {
    UnitDef { token, family: UnitFamily::Volume, base: ml }
}

const fn countable(token: &'static str) -> UnitDef {
    UnitDef { token, family: UnitFamily::Countable, base: 1.0 }
}

static UNITS: &[UnitDef] = &[
    weight("g", 1.0),
    weight("mg", G_PER_MG),
    weight("kg", G_PER_KG),
    weight("oz", G_PER_OZ),
    weight("lb", G_PER_LB),
    volume("ml", 1.0),
    volume("l", ML_PER_LITER),
    volume("tsp", ML_PER_TSP),
    volume("tbsp", ML_PER_TBSP),
    volume("fl oz", ML_PER_FL_OZ),
    volume("cup", ML_PER_CUP),
    volume("pint", ML_PER_PINT),
    volume("quart", ML_PER_QUART),
    volume("gallon", ML_PER_GALLON),
    countable("whole"),
    countable("each"),
    countable("piece"),
    countable("cloves"),
    countable("head"),
    countable("bunch"),
    countable("can"),
    countable("jar"),
    countable("bottle"),
    countable("package"),
    countable("bag"),
    countable("box"),
    countable("slice"),
    countable("stalk"),
    countable("sprig"),
    countable("loaf"),
    countable("dozen"),
    countable("pinch"),
    countable("dash"),
];

/// Resolve a unit token (any case, plural or long form) to its canonical token
pub fn canonical_unit(unit: &str) -> Option<&'static str> {
    let lower = unit.trim().to_lowercase();

    let canonical = match lower.as_str() {
        "g" | "gram" | "grams" | "gr" => "g",
        "mg" | "milligram" | "milligrams" => "mg",
        "kg" | "kilogram" | "kilograms" | "kilo" | "kilos" => "kg",
        "oz" | "ounce" | "ounces" => "oz",
        "lb" | "lbs" | "pound" | "pounds" => "lb",
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => "ml",
        "l" | "liter" | "liters" | "litre" | "litres" => "l",
        "tsp" | "teaspoon" | "teaspoons" => "tsp",
        "tbsp" | "tablespoon" | "tablespoons" => "tbsp",
        "fl oz" | "floz" | "fl. oz" | "fluid ounce" | "fluid ounces" => "fl oz",
        "cup" | "cups" | "c" => "cup",
        "pint" | "pints" | "pt" => "pint",
        "quart" | "quarts" | "qt" => "quart",
        "gallon" | "gallons" | "gal" => "gallon",
        "whole" => "whole",
        "each" | "ea" | "count" => "each",
        "piece" | "pieces" | "pc" | "pcs" => "piece",
        "clove" | "cloves" => "cloves",
        "head" | "heads" => "head",
        "bunch" | "bunches" => "bunch",
        "can" | "cans" => "can",
        "jar" | "jars" => "jar",
        "bottle" | "bottles" => "bottle",
        "package" | "packages" | "pkg" => "package",
        "bag" | "bags" => "bag",
        "box" | "boxes" => "box",
        "slice" | "slices" => "slice",
        "stalk" | "stalks" => "stalk",
        "sprig" | "sprigs" => "sprig",
        "loaf" | "loaves" => "loaf",
        "dozen" => "dozen",
        "pinch" | "pinches" => "pinch",
        "dash" | "dashes" => "dash",
        _ => return None,
    };

    Some(canonical)
}

fn lookup(unit: &str) -> Option<&'static UnitDef> {
    let token = canonical_unit(unit)?;
    UNITS.iter().find(|def| def.token == token)
}

/// Classify a unit token into its family
pub fn get_unit_type(unit: &str) -> UnitFamily {
    lookup(unit).map_or(UnitFamily::Unknown, |def| def.family)
}

/// Grams in one of the given weight unit
pub fn grams_per_unit(unit: &str) -> Option<f64> {
    lookup(unit)
        .filter(|def| def.family == UnitFamily::Weight)
        .map(|def| def.base)
}

/// Milliliters in one of the given volume unit
pub fn ml_per_unit(unit: &str) -> Option<f64> {
    lookup(unit)
        .filter(|def| def.family == UnitFamily::Volume)
        .map(|def| def.base)
}

/// Canonical tokens of every unit in a family, in table order
pub fn units_for_family(family: UnitFamily) -> Vec<&'static str> {
    UNITS
        .iter()
        .filter(|def| def.family == family)
        .map(|def| def.token)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_type_weight() {
        assert_eq!(get_unit_type("g"), UnitFamily::Weight);
        assert_eq!(get_unit_type("Grams"), UnitFamily::Weight);
        assert_eq!(get_unit_type("oz"), UnitFamily::Weight);
        assert_eq!(get_unit_type("lbs"), UnitFamily::Weight);
        assert_eq!(get_unit_type("kg"), UnitFamily::Weight);
    }

    #[test]
    fn test_unit_type_volume() {
        assert_eq!(get_unit_type("ml"), UnitFamily::Volume);
        assert_eq!(get_unit_type("tbsp"), UnitFamily::Volume);
        assert_eq!(get_unit_type(" cups "), UnitFamily::Volume);
        assert_eq!(get_unit_type("fl oz"), UnitFamily::Volume);
    }

    #[test]
    fn test_unit_type_countable() {
        assert_eq!(get_unit_type("whole"), UnitFamily::Countable);
        assert_eq!(get_unit_type("clove"), UnitFamily::Countable);
        assert_eq!(get_unit_type("cans"), UnitFamily::Countable);
    }

    #[test]
    fn test_unit_type_unknown() {
        assert_eq!(get_unit_type("handful"), UnitFamily::Unknown);
        assert_eq!(get_unit_type(""), UnitFamily::Unknown);
    }

    #[test]
    fn test_families_are_exclusive() {
        for def in UNITS {
            let matches = UNITS.iter().filter(|other| other.token == def.token).count();
            assert_eq!(matches, 1, "{} listed more than once", def.token);
            assert_eq!(canonical_unit(def.token), Some(def.token));
        }
    }

    #[test]
    fn test_grams_per_unit() {
        assert_eq!(grams_per_unit("g"), Some(1.0));
        assert_eq!(grams_per_unit("oz"), Some(G_PER_OZ));
        assert_eq!(grams_per_unit("lb"), Some(G_PER_LB));
        assert_eq!(grams_per_unit("tbsp"), None);
        assert_eq!(grams_per_unit("whole"), None);
    }

    #[test]
    fn test_ml_per_unit() {
        assert_eq!(ml_per_unit("ml"), Some(1.0));
        assert_eq!(ml_per_unit("tbsp"), Some(ML_PER_TBSP));
        assert_eq!(ml_per_unit("cup"), Some(ML_PER_CUP));
        assert_eq!(ml_per_unit("g"), None);
    }

    #[test]
    fn test_units_for_family() {
        let weights = units_for_family(UnitFamily::Weight);
        assert_eq!(weights, vec!["g", "mg", "kg", "oz", "lb"]);
        assert!(units_for_family(UnitFamily::Unknown).is_empty());
    }
}
