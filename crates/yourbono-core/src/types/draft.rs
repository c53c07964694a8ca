//! The editable bond form record.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::bond::Bond;
use super::field::FieldId;
use crate::error::{YourBonoError, YourBonoResult};
use crate::rounding::fraction_to_percent;

/// An in-progress, not-yet-submitted bond.
///
/// Rates are held as percentages (`8.5` means 8.5%), exactly as typed on
/// the form. Enumeration selectors are held as raw backend ids so that an
/// out-of-range selection can be reported as a field error instead of
/// being unrepresentable.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use yourbono_core::types::{BondDraft, FieldUpdate};
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let mut draft = BondDraft::new(7, today);
/// draft.apply(FieldUpdate::InterestRate(dec!(8)));
/// assert_eq!(draft.interest_rate, dec!(8));
/// assert_eq!(draft.user_id, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BondDraft {
    /// Bond name, trimmed on submission.
    pub name: String,
    /// Face value.
    pub nominal_value: Decimal,
    /// Market value.
    pub market_value: Decimal,
    /// Term in years.
    pub duration: i32,
    /// Coupon payments per year.
    pub frequency: i32,
    /// Compounding periods per year (0 = none).
    pub capitalization: i32,
    /// Fixed/variable selector id.
    pub interest_rate_type_id: i32,
    /// Coupon rate, percent.
    pub interest_rate: Decimal,
    /// Discount rate, percent.
    pub discount_rate: Decimal,
    /// Issue date.
    pub emission_date: NaiveDate,
    /// Partial/total selector id.
    pub grace_period_type_id: i32,
    /// Grace period in years.
    pub grace_period_duration: i32,
    /// Currency selector id.
    pub currency_type_id: i32,
    /// Premium rate, percent.
    pub prime_rate: Decimal,
    /// Structuring cost, percent.
    pub structured_rate: Decimal,
    /// Placement cost, percent.
    pub placement_rate: Decimal,
    /// Flotation cost, percent.
    pub floating_rate: Decimal,
    /// CAVALI fee, percent.
    pub cavali_rate: Decimal,
    /// Submitting user; never edited on the form.
    pub user_id: i64,
}

impl Default for BondDraft {
    fn default() -> Self {
        Self::new(0, Utc::now().date_naive())
    }
}

impl BondDraft {
    /// Creates a draft with form defaults for `user_id`, issued `today`.
    #[must_use]
    pub fn new(user_id: i64, today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            nominal_value: Decimal::ZERO,
            market_value: Decimal::ZERO,
            duration: 1,
            frequency: 1,
            capitalization: 0,
            interest_rate_type_id: 1,
            interest_rate: Decimal::ZERO,
            discount_rate: Decimal::ZERO,
            emission_date: today,
            grace_period_type_id: 1,
            grace_period_duration: 0,
            currency_type_id: 1,
            prime_rate: Decimal::ZERO,
            structured_rate: Decimal::ZERO,
            placement_rate: Decimal::ZERO,
            floating_rate: Decimal::ZERO,
            cavali_rate: Decimal::ZERO,
            user_id,
        }
    }

    /// Rebuilds a draft from a stored bond so it can be edited.
    ///
    /// Rates come back from the server as unit fractions and are turned
    /// back into percentages; the emission timestamp is cut to its date.
    ///
    /// # Errors
    ///
    /// Returns `YourBonoError::InvalidDate` if the stored emission date does
    /// not start with a `YYYY-MM-DD` date, and `YourBonoError::MathError` if
    /// a stored rate is too large to scale back to a percentage.
    pub fn from_bond(bond: &Bond) -> YourBonoResult<Self> {
        let percent = |field: FieldId, fraction: Decimal| {
            fraction_to_percent(fraction).ok_or_else(|| {
                YourBonoError::math_error(format!(
                    "stored {field} {fraction} cannot be shown as a percentage"
                ))
            })
        };
        Ok(Self {
            name: bond.name.clone(),
            nominal_value: bond.nominal_value,
            market_value: bond.market_value,
            duration: bond.duration,
            frequency: bond.frequency,
            capitalization: bond.capitalization,
            interest_rate_type_id: bond.interest_rate_type_id,
            interest_rate: percent(FieldId::InterestRate, bond.interest_rate)?,
            discount_rate: percent(FieldId::DiscountRate, bond.discount_rate)?,
            emission_date: bond.emission_day()?,
            grace_period_type_id: bond.grace_period_type_id,
            grace_period_duration: bond.grace_period_duration,
            currency_type_id: bond.currency_type_id,
            prime_rate: percent(FieldId::PrimeRate, bond.prime_rate)?,
            structured_rate: percent(FieldId::StructuredRate, bond.structured_rate)?,
            placement_rate: percent(FieldId::PlacementRate, bond.placement_rate)?,
            floating_rate: percent(FieldId::FloatingRate, bond.floating_rate)?,
            cavali_rate: percent(FieldId::CavaliRate, bond.cavali_rate)?,
            user_id: bond.user_id,
        })
    }

    /// Applies a single field edit.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Name(v) => self.name = v,
            FieldUpdate::NominalValue(v) => self.nominal_value = v,
            FieldUpdate::MarketValue(v) => self.market_value = v,
            FieldUpdate::Duration(v) => self.duration = v,
            FieldUpdate::Frequency(v) => self.frequency = v,
            FieldUpdate::Capitalization(v) => self.capitalization = v,
            FieldUpdate::InterestRateTypeId(v) => self.interest_rate_type_id = v,
            FieldUpdate::InterestRate(v) => self.interest_rate = v,
            FieldUpdate::DiscountRate(v) => self.discount_rate = v,
            FieldUpdate::EmissionDate(v) => self.emission_date = v,
            FieldUpdate::GracePeriodTypeId(v) => self.grace_period_type_id = v,
            FieldUpdate::GracePeriodDuration(v) => self.grace_period_duration = v,
            FieldUpdate::CurrencyTypeId(v) => self.currency_type_id = v,
            FieldUpdate::PrimeRate(v) => self.prime_rate = v,
            FieldUpdate::StructuredRate(v) => self.structured_rate = v,
            FieldUpdate::PlacementRate(v) => self.placement_rate = v,
            FieldUpdate::FloatingRate(v) => self.floating_rate = v,
            FieldUpdate::CavaliRate(v) => self.cavali_rate = v,
        }
    }

    /// Sum of the five auxiliary cost rates, percent.
    ///
    /// Saturates at `Decimal::MAX`/`Decimal::MIN`: unvalidated input may hold
    /// rates large enough to overflow.
    #[must_use]
    pub fn auxiliary_rate_sum(&self) -> Decimal {
        FieldId::AUXILIARY_RATES
            .iter()
            .filter_map(|field| self.rate(*field))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Returns the value of a percentage field, or `None` for non-rate fields.
    #[must_use]
    pub fn rate(&self, field: FieldId) -> Option<Decimal> {
        match field {
            FieldId::InterestRate => Some(self.interest_rate),
            FieldId::DiscountRate => Some(self.discount_rate),
            FieldId::PrimeRate => Some(self.prime_rate),
            FieldId::StructuredRate => Some(self.structured_rate),
            FieldId::PlacementRate => Some(self.placement_rate),
            FieldId::FloatingRate => Some(self.floating_rate),
            FieldId::CavaliRate => Some(self.cavali_rate),
            _ => None,
        }
    }
}

/// A single edit to one field of a [`BondDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// New name
    Name(String),
    /// New face value
    NominalValue(Decimal),
    /// New market value
    MarketValue(Decimal),
    /// New term
    Duration(i32),
    /// New payment frequency
    Frequency(i32),
    /// New compounding frequency
    Capitalization(i32),
    /// New rate-type selector
    InterestRateTypeId(i32),
    /// New coupon rate, percent
    InterestRate(Decimal),
    /// New discount rate, percent
    DiscountRate(Decimal),
    /// New issue date
    EmissionDate(NaiveDate),
    /// New grace-type selector
    GracePeriodTypeId(i32),
    /// New grace duration
    GracePeriodDuration(i32),
    /// New currency selector
    CurrencyTypeId(i32),
    /// New premium rate, percent
    PrimeRate(Decimal),
    /// New structuring rate, percent
    StructuredRate(Decimal),
    /// New placement rate, percent
    PlacementRate(Decimal),
    /// New flotation rate, percent
    FloatingRate(Decimal),
    /// New CAVALI rate, percent
    CavaliRate(Decimal),
}

impl FieldUpdate {
    /// The field this update writes.
    #[must_use]
    pub fn field(&self) -> FieldId {
        match self {
            FieldUpdate::Name(_) => FieldId::Name,
            FieldUpdate::NominalValue(_) => FieldId::NominalValue,
            FieldUpdate::MarketValue(_) => FieldId::MarketValue,
            FieldUpdate::Duration(_) => FieldId::Duration,
            FieldUpdate::Frequency(_) => FieldId::Frequency,
            FieldUpdate::Capitalization(_) => FieldId::Capitalization,
            FieldUpdate::InterestRateTypeId(_) => FieldId::InterestRateTypeId,
            FieldUpdate::InterestRate(_) => FieldId::InterestRate,
            FieldUpdate::DiscountRate(_) => FieldId::DiscountRate,
            FieldUpdate::EmissionDate(_) => FieldId::EmissionDate,
            FieldUpdate::GracePeriodTypeId(_) => FieldId::GracePeriodTypeId,
            FieldUpdate::GracePeriodDuration(_) => FieldId::GracePeriodDuration,
            FieldUpdate::CurrencyTypeId(_) => FieldId::CurrencyTypeId,
            FieldUpdate::PrimeRate(_) => FieldId::PrimeRate,
            FieldUpdate::StructuredRate(_) => FieldId::StructuredRate,
            FieldUpdate::PlacementRate(_) => FieldId::PlacementRate,
            FieldUpdate::FloatingRate(_) => FieldId::FloatingRate,
            FieldUpdate::CavaliRate(_) => FieldId::CavaliRate,
        }
    }

    /// Parses raw input text for `field`, the way a form input would.
    ///
    /// # Errors
    ///
    /// Returns `YourBonoError::InvalidFieldValue` if the text is not a number
    /// (or a `YYYY-MM-DD` date for the emission date).
    pub fn parse(field: FieldId, raw: &str) -> YourBonoResult<Self> {
        let text = raw.trim();
        let invalid = || YourBonoError::InvalidFieldValue {
            field: field.as_str(),
            value: raw.to_string(),
        };
        let decimal = || Decimal::from_str(text).map_err(|_| invalid());
        let integer = || text.parse::<i32>().map_err(|_| invalid());

        let update = match field {
            FieldId::Name => FieldUpdate::Name(raw.to_string()),
            FieldId::NominalValue => FieldUpdate::NominalValue(decimal()?),
            FieldId::MarketValue => FieldUpdate::MarketValue(decimal()?),
            FieldId::Duration => FieldUpdate::Duration(integer()?),
            FieldId::Frequency => FieldUpdate::Frequency(integer()?),
            FieldId::Capitalization => FieldUpdate::Capitalization(integer()?),
            FieldId::InterestRateTypeId => FieldUpdate::InterestRateTypeId(integer()?),
            FieldId::InterestRate => FieldUpdate::InterestRate(decimal()?),
            FieldId::DiscountRate => FieldUpdate::DiscountRate(decimal()?),
            FieldId::EmissionDate => FieldUpdate::EmissionDate(
                NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| invalid())?,
            ),
            FieldId::GracePeriodTypeId => FieldUpdate::GracePeriodTypeId(integer()?),
            FieldId::GracePeriodDuration => FieldUpdate::GracePeriodDuration(integer()?),
            FieldId::CurrencyTypeId => FieldUpdate::CurrencyTypeId(integer()?),
            FieldId::PrimeRate => FieldUpdate::PrimeRate(decimal()?),
            FieldId::StructuredRate => FieldUpdate::StructuredRate(decimal()?),
            FieldId::PlacementRate => FieldUpdate::PlacementRate(decimal()?),
            FieldId::FloatingRate => FieldUpdate::FloatingRate(decimal()?),
            FieldId::CavaliRate => FieldUpdate::CavaliRate(decimal()?),
        };
        Ok(update)
    }
}
