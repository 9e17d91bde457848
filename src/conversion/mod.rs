//! Unit conversion module
//!
//! Classifies units, converts amounts and prices between them, and bridges
//! weight and volume through ingredient densities.

pub mod converter;
pub mod density;
pub mod display;
pub mod units;

pub use converter::{
    convert_amount, convert_cost_for_unit, convert_quantity, get_conversion_factor,
    get_cost_per_unit_converted,
};
pub use density::{find_density, grams_per_cup, DEFAULT_GRAMS_PER_CUP};
pub use display::{format_amount, round_for_display, round_to};
pub use units::{
    canonical_unit, get_unit_type, grams_per_unit, ml_per_unit, units_for_family, UnitFamily,
};
