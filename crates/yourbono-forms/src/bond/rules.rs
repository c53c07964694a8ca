//! Bounds and thresholds for bond inputs.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use yourbono_core::FieldId;

/// Largest accepted nominal or market value.
pub const MAX_AMOUNT: i64 = 1_000_000_000;

/// Term bounds, years.
pub const DURATION_RANGE: (i32, i32) = (1, 100);

/// Payment frequency bounds, payments per year.
pub const FREQUENCY_RANGE: (i32, i32) = (1, 365);

/// Compounding bounds, periods per year.
pub const CAPITALIZATION_RANGE: (i32, i32) = (0, 365);

/// How far in the future an emission date may lie.
pub const MAX_EMISSION_YEARS_AHEAD: u32 = 10;

/// Accepted market/nominal ratio band before a warning is raised.
pub const MARKET_RATIO_BAND: (i64, i64) = (50, 150); // percent

/// Coupon rate above which a warning is raised, percent.
pub const HIGH_INTEREST_RATE: i64 = 50;

/// Terms above this many years raise a warning.
pub const LONG_DURATION_YEARS: i32 = 50;

/// Compounding above `frequency * this` raises a warning.
pub const CAPITALIZATION_FREQUENCY_FACTOR: i64 = 4;

/// Coupon rate below which a warning is raised, percent (0.01%).
#[must_use]
pub fn low_interest_rate() -> Decimal {
    Decimal::new(1, 2)
}

/// Upper bound for a percentage field.
///
/// Returns `None` for fields that are not rates.
#[must_use]
pub fn rate_ceiling(field: FieldId) -> Option<Decimal> {
    let ceiling = match field {
        FieldId::InterestRate => 100,
        FieldId::DiscountRate => 50,
        FieldId::PrimeRate
        | FieldId::StructuredRate
        | FieldId::PlacementRate
        | FieldId::FloatingRate
        | FieldId::CavaliRate => 20,
        _ => return None,
    };
    Some(Decimal::from(ceiling))
}

/// Latest emission date accepted on `today`.
///
/// `None` only when the calendar overflows, in which case no upper bound
/// applies.
#[must_use]
pub fn latest_emission_date(today: NaiveDate) -> Option<NaiveDate> {
    today.checked_add_months(Months::new(MAX_EMISSION_YEARS_AHEAD * 12))
}
