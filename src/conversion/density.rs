//! Ingredient densities for crossing the weight/volume boundary
//!
//! Densities are grams per US cup. Ingredients without an entry fall back to
//! [`DEFAULT_GRAMS_PER_CUP`], so a cross-family conversion is always possible
//! but only approximate for unlisted ingredients.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::units::ML_PER_CUP;

/// Density used when an ingredient has no entry (water, 1 g/ml)
pub const DEFAULT_GRAMS_PER_CUP: f64 = ML_PER_CUP;

/// Canonical ingredient name -> grams per cup
static DENSITY_DATA: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Flours and starches
    m.insert("all-purpose flour", 125.0);
    m.insert("bread flour", 127.0);
    m.insert("cake flour", 114.0);
    m.insert("whole wheat flour", 120.0);
    m.insert("almond flour", 96.0);
    m.insert("cornstarch", 128.0);
    m.insert("cornmeal", 138.0);

    // Sugars and syrups
    m.insert("granulated sugar", 200.0);
    m.insert("brown sugar", 220.0);
    m.insert("powdered sugar", 120.0);
    m.insert("honey", 340.0);
    m.insert("maple syrup", 315.0);

    // Dairy
    m.insert("butter", 227.0);
    m.insert("milk", 245.0);
    m.insert("buttermilk", 245.0);
    m.insert("heavy cream", 238.0);
    m.insert("sour cream", 242.0);
    m.insert("yogurt", 245.0);
    m.insert("cream cheese", 232.0);
    m.insert("shredded cheese", 113.0);
    m.insert("parmesan", 100.0);

    // Fats and oils
    m.insert("vegetable oil", 218.0);
    m.insert("olive oil", 216.0);
    m.insert("coconut oil", 218.0);

    // Grains and legumes
    m.insert("rice", 185.0);
    m.insert("rolled oats", 80.0);
    m.insert("quinoa", 170.0);
    m.insert("lentils", 192.0);
    m.insert("breadcrumbs", 108.0);

    // Pantry
    m.insert("water", 236.6);
    m.insert("broth", 240.0);
    m.insert("salt", 288.0);
    m.insert("cocoa powder", 86.0);
    m.insert("peanut butter", 258.0);
    m.insert("chocolate chips", 170.0);
    m.insert("walnuts", 117.0);
    m.insert("almonds", 143.0);

    m
});

/// Common ingredient names mapped to canonical names in the density table
static INGREDIENT_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("flour", "all-purpose flour");
    m.insert("ap flour", "all-purpose flour");
    m.insert("plain flour", "all-purpose flour");
    m.insert("sugar", "granulated sugar");
    m.insert("white sugar", "granulated sugar");
    m.insert("confectioners sugar", "powdered sugar");
    m.insert("icing sugar", "powdered sugar");
    m.insert("oats", "rolled oats");
    m.insert("cream", "heavy cream");
    m.insert("whipping cream", "heavy cream");
    m.insert("stock", "broth");
    m.insert("chicken stock", "broth");
    m.insert("corn starch", "cornstarch");
    m.insert("bread crumbs", "breadcrumbs");
    m.insert("canola oil", "vegetable oil");
    m
});

/// Density keys ordered longest first so the most specific name wins
static KEYS_BY_LENGTH: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut keys: Vec<&'static str> = DENSITY_DATA.keys().copied().collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    keys
});

/// Look up a listed density for an ingredient name.
///
/// Tries an exact match, then the alias table, then the longest listed name
/// contained in the query ("unsalted butter" finds "butter").
pub fn find_density(name: &str) -> Option<f64> {
    let lower = name.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    if let Some(&density) = DENSITY_DATA.get(lower.as_str()) {
        return Some(density);
    }

    if let Some(canonical) = INGREDIENT_ALIASES.get(lower.as_str()) {
        return DENSITY_DATA.get(canonical).copied();
    }

    KEYS_BY_LENGTH
        .iter()
        .find(|key| lower.contains(**key))
        .and_then(|key| DENSITY_DATA.get(key).copied())
}

/// Grams per cup for an ingredient, falling back to the default density
pub fn grams_per_cup(name: &str) -> f64 {
    find_density(name).unwrap_or_else(|| {
        tracing::debug!(ingredient = name, "No density entry, using default");
        DEFAULT_GRAMS_PER_CUP
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive() {
        assert_eq!(find_density("Butter"), Some(227.0));
        assert_eq!(find_density("  HONEY "), Some(340.0));
    }

    #[test]
    fn test_alias() {
        assert_eq!(find_density("flour"), Some(125.0));
        assert_eq!(find_density("Sugar"), Some(200.0));
    }

    #[test]
    fn test_longest_contained_name_wins() {
        assert_eq!(find_density("unsalted butter"), Some(227.0));
        assert_eq!(find_density("creamy peanut butter"), Some(258.0));
        assert_eq!(find_density("low-fat buttermilk"), Some(245.0));
    }

    #[test]
    fn test_default_density() {
        assert_eq!(find_density("dragon fruit"), None);
        assert_eq!(grams_per_cup("dragon fruit"), DEFAULT_GRAMS_PER_CUP);
        assert_eq!(find_density(""), None);
    }
}
