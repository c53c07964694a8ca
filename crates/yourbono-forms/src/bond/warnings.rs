//! Non-blocking business-rule warnings.
//!
//! Warnings flag values that are individually valid but jointly
//! suspicious. They never prevent submission.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use yourbono_core::{BondDraft, FieldId};

use super::rules::{
    low_interest_rate, CAPITALIZATION_FREQUENCY_FACTOR, HIGH_INTEREST_RATE, LONG_DURATION_YEARS,
    MARKET_RATIO_BAND,
};

/// Which business rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "rule")]
pub enum WarningKind {
    /// Market/nominal ratio outside `[0.5, 1.5]`.
    MarketRatioOutOfBand {
        /// The observed ratio.
        ratio: Decimal,
    },
    /// Coupon rate above 50%.
    InterestRateVeryHigh,
    /// Coupon rate below 0.01%.
    InterestRateVeryLow,
    /// More than four compoundings per payment period.
    CapitalizationExceedsFrequency,
    /// Grace period as long as the bond itself.
    GraceNotBelowDuration,
    /// Discount rate above the coupon rate.
    DiscountAboveCoupon,
    /// Auxiliary costs add up to more than the coupon rate.
    AuxiliaryRatesAboveCoupon {
        /// Sum of the five cost rates, percent.
        sum: Decimal,
    },
    /// Term beyond 50 years.
    LongDuration,
}

impl WarningKind {
    /// The field the warning is shown against.
    #[must_use]
    pub fn field(&self) -> FieldId {
        match self {
            WarningKind::MarketRatioOutOfBand { .. } => FieldId::MarketValue,
            WarningKind::InterestRateVeryHigh | WarningKind::InterestRateVeryLow => {
                FieldId::InterestRate
            }
            WarningKind::CapitalizationExceedsFrequency => FieldId::Capitalization,
            WarningKind::GraceNotBelowDuration => FieldId::GracePeriodDuration,
            WarningKind::DiscountAboveCoupon => FieldId::DiscountRate,
            WarningKind::AuxiliaryRatesAboveCoupon { .. } => FieldId::PrimeRate,
            WarningKind::LongDuration => FieldId::Duration,
        }
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            WarningKind::MarketRatioOutOfBand { ratio } => format!(
                "El valor de mercado difiere significativamente del valor nominal (ratio {:.2})",
                two_decimals(*ratio)
            ),
            WarningKind::InterestRateVeryHigh => {
                "La tasa de interés es inusualmente alta (mayor a 50%)".to_string()
            }
            WarningKind::InterestRateVeryLow => {
                "La tasa de interés es inusualmente baja (menor a 0.01%)".to_string()
            }
            WarningKind::CapitalizationExceedsFrequency => {
                "La capitalización supera cuatro veces la frecuencia de pago".to_string()
            }
            WarningKind::GraceNotBelowDuration => {
                "El período de gracia es igual o mayor que la duración del bono".to_string()
            }
            WarningKind::DiscountAboveCoupon => {
                "La tasa de descuento es mayor que la tasa de interés".to_string()
            }
            WarningKind::AuxiliaryRatesAboveCoupon { sum } => format!(
                "La suma de costos adicionales ({:.2}%) supera la tasa de interés",
                two_decimals(*sum)
            ),
            WarningKind::LongDuration => {
                "La duración del bono supera los 50 años".to_string()
            }
        }
    }
}

/// A non-blocking advisory tied to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessWarning {
    /// Field the warning is shown against.
    pub field: FieldId,
    /// Rule that fired.
    pub kind: WarningKind,
    /// Human-readable message.
    pub message: String,
}

impl BusinessWarning {
    /// Creates a warning for `kind` on its field.
    #[must_use]
    pub fn new(kind: WarningKind) -> Self {
        Self {
            field: kind.field(),
            message: kind.message(),
            kind,
        }
    }
}

/// Evaluates every business rule against `draft`.
///
/// Rules are independent and all applicable warnings are returned, in rule
/// order: market ratio, coupon level, capitalization, grace period,
/// discount rate, auxiliary costs, duration.
#[must_use]
pub fn evaluate_warnings(draft: &BondDraft) -> Vec<BusinessWarning> {
    let mut kinds = Vec::new();

    if draft.nominal_value > Decimal::ZERO {
        if let Some(ratio) = draft.market_value.checked_div(draft.nominal_value) {
            let (low, high) = MARKET_RATIO_BAND;
            if ratio < Decimal::new(low, 2) || ratio > Decimal::new(high, 2) {
                kinds.push(WarningKind::MarketRatioOutOfBand { ratio });
            }
        }
    }

    if draft.interest_rate > Decimal::from(HIGH_INTEREST_RATE) {
        kinds.push(WarningKind::InterestRateVeryHigh);
    } else if draft.interest_rate < low_interest_rate() {
        kinds.push(WarningKind::InterestRateVeryLow);
    }

    if draft.capitalization > 0
        && draft.frequency > 0
        && i64::from(draft.capitalization)
            > i64::from(draft.frequency) * CAPITALIZATION_FREQUENCY_FACTOR
    {
        kinds.push(WarningKind::CapitalizationExceedsFrequency);
    }

    if draft.grace_period_duration >= draft.duration {
        kinds.push(WarningKind::GraceNotBelowDuration);
    }

    if draft.discount_rate > draft.interest_rate {
        kinds.push(WarningKind::DiscountAboveCoupon);
    }

    let sum = draft.auxiliary_rate_sum();
    if sum > draft.interest_rate {
        kinds.push(WarningKind::AuxiliaryRatesAboveCoupon { sum });
    }

    if draft.duration > LONG_DURATION_YEARS {
        kinds.push(WarningKind::LongDuration);
    }

    log::debug!("business rules raised {} warning(s)", kinds.len());
    kinds.into_iter().map(BusinessWarning::new).collect()
}

fn two_decimals(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
