//! Currency rounding and display conventions.
//!
//! All monetary amounts in the workspace are `rust_decimal::Decimal` values
//! rounded to two decimal places, half away from zero (the convention of the
//! currency formatting the presentation layer uses). Rounding happens at each
//! aggregation boundary, not only at output, so displayed intermediate sums
//! never drift from the figures they were summed from.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places carried by monetary amounts.
pub const CURRENCY_DP: u32 = 2;

/// Round a monetary amount to 2 decimal places, half away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a monetary amount for display: thousands separators, always two
/// decimals, leading minus for negative amounts (e.g. `1,234.56`).
///
/// No locale machinery; the separators match the source system's display.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_currency(amount);
    let negative = rounded < Decimal::ZERO;
    let abs = rounded.abs();

    let text = format!("{abs:.2}");
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    if negative {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push('.');
    grouped.push_str(frac_part);
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_currency(dec!(2.345)), dec!(2.35));
        assert_eq!(round_currency(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round_currency(dec!(2.344)), dec!(2.34));
        assert_eq!(round_currency(dec!(0.005)), dec!(0.01));
    }

    #[test]
    fn formats_with_thousands_separators() {
        assert_eq!(format_currency(dec!(0)), "0.00");
        assert_eq!(format_currency(dec!(5.5)), "5.50");
        assert_eq!(format_currency(dec!(1234.5)), "1,234.50");
        assert_eq!(format_currency(dec!(1234567.891)), "1,234,567.89");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_currency(dec!(-1250.345)), "-1,250.35");
        assert_eq!(format_currency(dec!(-0.001)), "0.00");
    }

    #[test]
    fn rounds_before_grouping() {
        assert_eq!(format_currency(dec!(999.999)), "1,000.00");
    }
}
