//! Rounding and unit conversion for wire payloads.
//!
//! All rounding uses round-half-away-from-zero. Validated amounts and rates
//! are never negative, so for payload values this is plain half-up:
//! `1000.005` becomes `1000.01`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for currency amounts.
pub const CURRENCY_DECIMALS: u32 = 2;

/// Decimal places kept for rates expressed as unit fractions.
pub const RATE_DECIMALS: u32 = 6;

/// Tie-break rule used for every payload rounding.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Rounds a currency amount to cents.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_DECIMALS, ROUNDING)
}

/// Converts a percentage (8.5) to a unit fraction (0.085), rounded to 6 dp.
#[must_use]
pub fn percent_to_fraction(percent: Decimal) -> Decimal {
    (percent / Decimal::ONE_HUNDRED).round_dp_with_strategy(RATE_DECIMALS, ROUNDING)
}

/// Converts a unit fraction back to a percentage.
///
/// Trailing zeros are dropped so a round trip through the server shows
/// `8` rather than `8.000000`. Returns `None` if the percentage does not
/// fit in a `Decimal`.
#[must_use]
pub fn fraction_to_percent(fraction: Decimal) -> Option<Decimal> {
    fraction
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|percent| percent.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_half_up() {
        assert_eq!(round_currency(dec!(1000.005)), dec!(1000.01));
        assert_eq!(round_currency(dec!(1000.004)), dec!(1000.00));
        assert_eq!(round_currency(dec!(0.125)), dec!(0.13));
        assert_eq!(round_currency(dec!(999)), dec!(999));
    }

    #[test]
    fn test_percent_to_fraction() {
        assert_eq!(percent_to_fraction(dec!(8)), dec!(0.08));
        assert_eq!(percent_to_fraction(dec!(7.25)), dec!(0.0725));
        // 0.00012345% -> 0.0000012345 -> 0.000001
        assert_eq!(percent_to_fraction(dec!(0.00012345)), dec!(0.000001));
        // exact midpoint at the 7th place
        assert_eq!(percent_to_fraction(dec!(12.34565)), dec!(0.123457));
    }

    #[test]
    fn test_fraction_to_percent() {
        assert_eq!(fraction_to_percent(dec!(0.080000)).unwrap().to_string(), "8");
        assert_eq!(fraction_to_percent(dec!(0.0725)), Some(dec!(7.25)));
    }

    #[test]
    fn test_fraction_to_percent_overflow() {
        assert_eq!(fraction_to_percent(Decimal::MAX), None);
        assert_eq!(fraction_to_percent(Decimal::MIN), None);
    }
}
