//! Display rounding for amounts
//!
//! Precision shrinks as magnitude grows. The conversion engine never rounds;
//! these helpers are for callers that render amounts.

/// Round a value to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Decimal places used to display an amount of this magnitude
pub fn display_decimals(amount: f64) -> i32 {
    let magnitude = amount.abs();
    if magnitude >= 100.0 {
        0
    } else if magnitude >= 10.0 {
        1
    } else if magnitude >= 1.0 {
        2
    } else {
        3
    }
}

/// Round an amount for display
pub fn round_for_display(amount: f64) -> f64 {
    round_to(amount, display_decimals(amount))
}

/// Render an amount and unit, e.g. "1.33 cup"
pub fn format_amount(amount: f64, unit: &str) -> String {
    let rounded = round_for_display(amount);
    let decimals = display_decimals(amount) as usize;
    let text = format!("{:.*}", decimals, rounded);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    };

    if unit.is_empty() {
        text
    } else {
        format!("{} {}", text, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_for_display() {
        assert_eq!(round_for_display(453.592), 454.0);
        assert_eq!(round_for_display(28.3495), 28.3);
        assert_eq!(round_for_display(1.23456), 1.23);
        assert_eq!(round_for_display(0.123456), 0.123);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.005_1, 2), 1.01);
        assert_eq!(round_to(2.5, 0), 3.0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(16.0, "oz"), "16 oz");
        assert_eq!(format_amount(1.3333, "cup"), "1.33 cup");
        assert_eq!(format_amount(0.0625, "cup"), "0.063 cup");
        assert_eq!(format_amount(250.4, ""), "250");
    }
}
