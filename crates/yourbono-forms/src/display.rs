//! Formatting of stored bond values for listings.
//!
//! Stored rates are unit fractions and amounts are plain decimals; these
//! helpers render them the way the bond list shows them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use yourbono_core::rounding::{round_currency, ROUNDING};
use yourbono_core::types::{parse_emission_day, CurrencyType, GracePeriodType, InterestRateType};

/// Renders a unit fraction as a percentage with two decimals (`0.08` -> `8.00%`).
///
/// A fraction too large to scale is shown as stored, without the `%`.
#[must_use]
pub fn format_percentage(fraction: Decimal) -> String {
    match fraction.checked_mul(Decimal::ONE_HUNDRED) {
        Some(percent) => format!("{:.2}%", percent.round_dp_with_strategy(2, ROUNDING)),
        None => fraction.to_string(),
    }
}

/// Renders an amount with its currency symbol and thousands grouping
/// (`1000` in PEN -> `S/ 1,000.00`).
#[must_use]
pub fn format_currency(amount: Decimal, currency: CurrencyType) -> String {
    let rounded = round_currency(amount);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{} {}.{frac_part}",
        currency.symbol(),
        group_thousands(int_part)
    )
}

/// Renders a date as `dd/mm/yyyy`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Renders the day part of a stored ISO timestamp as `dd/mm/yyyy`.
///
/// Unparseable input is returned unchanged.
#[must_use]
pub fn format_timestamp_date(timestamp: &str) -> String {
    parse_emission_day(timestamp).map_or_else(|_| timestamp.to_string(), format_date)
}

/// Label for a stored interest-rate type id; unknown ids read as fixed.
#[must_use]
pub fn interest_rate_type_label(id: i32) -> &'static str {
    InterestRateType::from_id_or_default(id).label()
}

/// Label for a stored grace-period type id; unknown ids read as partial.
#[must_use]
pub fn grace_period_type_label(id: i32) -> &'static str {
    GracePeriodType::from_id_or_default(id).label()
}

/// Code for a stored currency id; unknown ids read as PEN.
#[must_use]
pub fn currency_label(id: i32) -> &'static str {
    CurrencyType::from_id_or_default(id).code()
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
