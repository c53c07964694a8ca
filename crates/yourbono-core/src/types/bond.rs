//! Server-side bond records and the creation payload.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::CurrencyType;
use super::rate_kind::{GracePeriodType, InterestRateType};
use crate::error::{YourBonoError, YourBonoResult};

/// Suffix appended to an emission date to form the wire timestamp.
pub const MIDNIGHT_UTC_SUFFIX: &str = "T00:00:00.000Z";

/// Formats a date as the midnight-UTC timestamp the backend expects.
#[must_use]
pub fn emission_timestamp(date: NaiveDate) -> String {
    format!("{}{}", date.format("%Y-%m-%d"), MIDNIGHT_UTC_SUFFIX)
}

/// Extracts the calendar date from an ISO date or timestamp string.
///
/// # Errors
///
/// Returns `YourBonoError::InvalidDate` if the string does not begin with
/// a `YYYY-MM-DD` date.
pub fn parse_emission_day(value: &str) -> YourBonoResult<NaiveDate> {
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|_| YourBonoError::invalid_date(format!("Cannot parse: {value}")))
}

/// The normalized body sent to create or update a bond.
///
/// Currency amounts carry 2 decimal places, rates are unit fractions with 6
/// decimal places, and `emission_date` is a midnight-UTC timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondPayload {
    /// Owner of the bond.
    pub user_id: i64,
    /// Trimmed name.
    pub name: String,
    /// Face value.
    pub nominal_value: Decimal,
    /// Market value.
    pub market_value: Decimal,
    /// Term in years.
    pub duration: i32,
    /// Payments per year.
    pub frequency: i32,
    /// Rate-type id.
    pub interest_rate_type_id: i32,
    /// Coupon rate, unit fraction.
    pub interest_rate: Decimal,
    /// Compounding periods per year.
    pub capitalization: i32,
    /// Discount rate, unit fraction.
    pub discount_rate: Decimal,
    /// Issue timestamp.
    pub emission_date: String,
    /// Grace-type id.
    pub grace_period_type_id: i32,
    /// Grace period in years.
    pub grace_period_duration: i32,
    /// Currency id.
    pub currency_type_id: i32,
    /// Premium rate, unit fraction.
    pub prime_rate: Decimal,
    /// Structuring rate, unit fraction.
    pub structured_rate: Decimal,
    /// Placement rate, unit fraction.
    pub placement_rate: Decimal,
    /// Flotation rate, unit fraction.
    pub floating_rate: Decimal,
    /// CAVALI rate, unit fraction.
    pub cavali_rate: Decimal,
}

/// A bond as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bond {
    /// Server id.
    pub id: i64,
    /// Owner of the bond.
    pub user_id: i64,
    /// Name.
    pub name: String,
    /// Face value.
    pub nominal_value: Decimal,
    /// Market value.
    pub market_value: Decimal,
    /// Term in years.
    pub duration: i32,
    /// Payments per year.
    pub frequency: i32,
    /// Rate-type id.
    pub interest_rate_type_id: i32,
    /// Coupon rate, unit fraction.
    pub interest_rate: Decimal,
    /// Compounding periods per year.
    pub capitalization: i32,
    /// Discount rate, unit fraction.
    pub discount_rate: Decimal,
    /// Issue timestamp.
    pub emission_date: String,
    /// Grace-type id.
    pub grace_period_type_id: i32,
    /// Grace period in years.
    pub grace_period_duration: i32,
    /// Currency id.
    pub currency_type_id: i32,
    /// Premium rate, unit fraction.
    #[serde(default)]
    pub prime_rate: Decimal,
    /// Structuring rate, unit fraction.
    #[serde(default)]
    pub structured_rate: Decimal,
    /// Placement rate, unit fraction.
    #[serde(default)]
    pub placement_rate: Decimal,
    /// Flotation rate, unit fraction.
    #[serde(default)]
    pub floating_rate: Decimal,
    /// CAVALI rate, unit fraction.
    #[serde(default)]
    pub cavali_rate: Decimal,
}

impl Bond {
    /// Combines a server id with a normalized payload.
    #[must_use]
    pub fn from_payload(id: i64, payload: BondPayload) -> Self {
        Self {
            id,
            user_id: payload.user_id,
            name: payload.name,
            nominal_value: payload.nominal_value,
            market_value: payload.market_value,
            duration: payload.duration,
            frequency: payload.frequency,
            interest_rate_type_id: payload.interest_rate_type_id,
            interest_rate: payload.interest_rate,
            capitalization: payload.capitalization,
            discount_rate: payload.discount_rate,
            emission_date: payload.emission_date,
            grace_period_type_id: payload.grace_period_type_id,
            grace_period_duration: payload.grace_period_duration,
            currency_type_id: payload.currency_type_id,
            prime_rate: payload.prime_rate,
            structured_rate: payload.structured_rate,
            placement_rate: payload.placement_rate,
            floating_rate: payload.floating_rate,
            cavali_rate: payload.cavali_rate,
        }
    }

    /// Issue date without the time part.
    ///
    /// # Errors
    ///
    /// Returns `YourBonoError::InvalidDate` for a malformed timestamp.
    pub fn emission_day(&self) -> YourBonoResult<NaiveDate> {
        parse_emission_day(&self.emission_date)
    }

    /// Currency, falling back to PEN for unknown ids.
    #[must_use]
    pub fn currency(&self) -> CurrencyType {
        CurrencyType::from_id_or_default(self.currency_type_id)
    }

    /// Rate type, falling back to fixed for unknown ids.
    #[must_use]
    pub fn interest_rate_type(&self) -> InterestRateType {
        InterestRateType::from_id_or_default(self.interest_rate_type_id)
    }

    /// Grace type, falling back to partial for unknown ids.
    #[must_use]
    pub fn grace_period_type(&self) -> GracePeriodType {
        GracePeriodType::from_id_or_default(self.grace_period_type_id)
    }
}
