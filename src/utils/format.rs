//! Display formatting for prices and percentage changes

/// Format a USD price with precision scaled to its magnitude.
///
/// Large prices get 2 decimals, sub-dollar prices 4 and sub-cent prices 6,
/// so small-cap token prices stay readable.
pub fn format_price(price: f64) -> String {
    if price >= 1.0 {
        format!("{:.2}", price)
    } else if price >= 0.01 {
        format!("{:.4}", price)
    } else {
        format!("{:.6}", price)
    }
}

/// Format a percentage change with an explicit sign
pub fn format_percentage_change(percentage: f64) -> String {
    let sign = if percentage >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, percentage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_tiers() {
        assert_eq!(format_price(1234.5), "1234.50");
        assert_eq!(format_price(1.0), "1.00");
        assert_eq!(format_price(0.5432), "0.5432");
        assert_eq!(format_price(0.01), "0.0100");
        assert_eq!(format_price(0.00123456), "0.001235");
    }

    #[test]
    fn test_format_percentage_change_signs() {
        assert_eq!(format_percentage_change(2.5), "+2.50%");
        assert_eq!(format_percentage_change(0.0), "+0.00%");
        assert_eq!(format_percentage_change(-3.333), "-3.33%");
    }
}
