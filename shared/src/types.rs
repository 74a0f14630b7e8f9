//! Common types used across the platform

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as whole currency units with thousands separators,
/// e.g. `PKR 12,500`.
pub fn format_money(currency: &str, amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{} {}{}", currency, sign, grouped)
}

/// Format a quantity without a fractional part
pub fn format_quantity(quantity: Decimal) -> String {
    quantity
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .normalize()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_groups_thousands() {
        assert_eq!(format_money("PKR", Decimal::from(0)), "PKR 0");
        assert_eq!(format_money("PKR", Decimal::from(900)), "PKR 900");
        assert_eq!(format_money("PKR", Decimal::from(1000)), "PKR 1,000");
        assert_eq!(format_money("PKR", Decimal::new(123456789, 2)), "PKR 1,234,568");
        assert_eq!(format_money("PKR", Decimal::from(-25000)), "PKR -25,000");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(Decimal::new(90, 1)), "9");
        assert_eq!(format_quantity(Decimal::from(12)), "12");
    }
}
