//! Conversion of a validated draft into the wire payload.

use rust_decimal::Decimal;
use yourbono_core::rounding::{percent_to_fraction, round_currency};
use yourbono_core::types::emission_timestamp;
use yourbono_core::{BondDraft, BondPayload};

use crate::error::{NormalizationError, NormalizationResult};

/// Builds the submission payload from a draft that passed field validation.
///
/// - the name is trimmed
/// - currency amounts are rounded to 2 dp
/// - rates are divided by 100 and rounded to 6 dp
/// - the emission date gets a midnight-UTC time suffix
/// - ids, counts and `user_id` pass through
///
/// # Errors
///
/// Returns `NormalizationError::InterestRateOutOfRange` when the normalized
/// coupon rate is not in `(0, 1]`. This happens for a coupon so small that
/// it rounds to zero at 6 dp.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use yourbono_core::BondDraft;
/// use yourbono_forms::bond::normalize;
///
/// let mut draft = BondDraft::new(1, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
/// draft.name = " Bono A ".into();
/// draft.interest_rate = dec!(8);
/// let payload = normalize(&draft).unwrap();
/// assert_eq!(payload.name, "Bono A");
/// assert_eq!(payload.interest_rate, dec!(0.08));
/// assert_eq!(payload.emission_date, "2025-01-01T00:00:00.000Z");
/// ```
pub fn normalize(draft: &BondDraft) -> NormalizationResult<BondPayload> {
    let payload = BondPayload {
        user_id: draft.user_id,
        name: draft.name.trim().to_string(),
        nominal_value: round_currency(draft.nominal_value),
        market_value: round_currency(draft.market_value),
        duration: draft.duration,
        frequency: draft.frequency,
        interest_rate_type_id: draft.interest_rate_type_id,
        interest_rate: percent_to_fraction(draft.interest_rate),
        capitalization: draft.capitalization,
        discount_rate: percent_to_fraction(draft.discount_rate),
        emission_date: emission_timestamp(draft.emission_date),
        grace_period_type_id: draft.grace_period_type_id,
        grace_period_duration: draft.grace_period_duration,
        currency_type_id: draft.currency_type_id,
        prime_rate: percent_to_fraction(draft.prime_rate),
        structured_rate: percent_to_fraction(draft.structured_rate),
        placement_rate: percent_to_fraction(draft.placement_rate),
        floating_rate: percent_to_fraction(draft.floating_rate),
        cavali_rate: percent_to_fraction(draft.cavali_rate),
    };

    if payload.interest_rate <= Decimal::ZERO || payload.interest_rate > Decimal::ONE {
        log::warn!(
            "normalized interest rate {} failed the (0, 1] check",
            payload.interest_rate
        );
        return Err(NormalizationError::InterestRateOutOfRange {
            value: payload.interest_rate,
        });
    }

    Ok(payload)
}
