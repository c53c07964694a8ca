//! Identifiers for the editable fields of a bond draft.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::YourBonoError;

/// One field of a [`BondDraft`](super::BondDraft).
///
/// Field errors and business warnings are keyed by this enum rather than by
/// free-form strings. The declaration order is the order fields appear on
/// the bond form, and is the iteration order of error maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    /// Bond name
    Name,
    /// Face value
    NominalValue,
    /// Market (commercial) value
    MarketValue,
    /// Term in years
    Duration,
    /// Coupon payments per year
    Frequency,
    /// Compounding periods per year
    Capitalization,
    /// Fixed/variable selector
    InterestRateTypeId,
    /// Coupon rate, percent
    InterestRate,
    /// Discount (COK) rate, percent
    DiscountRate,
    /// Issue date
    EmissionDate,
    /// Partial/total selector
    GracePeriodTypeId,
    /// Grace period in years
    GracePeriodDuration,
    /// Issue currency selector
    CurrencyTypeId,
    /// Premium (prima) rate, percent
    PrimeRate,
    /// Structuring cost, percent
    StructuredRate,
    /// Placement cost, percent
    PlacementRate,
    /// Flotation cost, percent
    FloatingRate,
    /// CAVALI fee, percent
    CavaliRate,
}

impl FieldId {
    /// Every field, in form order.
    pub const ALL: [FieldId; 18] = [
        FieldId::Name,
        FieldId::NominalValue,
        FieldId::MarketValue,
        FieldId::Duration,
        FieldId::Frequency,
        FieldId::Capitalization,
        FieldId::InterestRateTypeId,
        FieldId::InterestRate,
        FieldId::DiscountRate,
        FieldId::EmissionDate,
        FieldId::GracePeriodTypeId,
        FieldId::GracePeriodDuration,
        FieldId::CurrencyTypeId,
        FieldId::PrimeRate,
        FieldId::StructuredRate,
        FieldId::PlacementRate,
        FieldId::FloatingRate,
        FieldId::CavaliRate,
    ];

    /// The five cost rates that are summed against the coupon rate.
    pub const AUXILIARY_RATES: [FieldId; 5] = [
        FieldId::PrimeRate,
        FieldId::StructuredRate,
        FieldId::PlacementRate,
        FieldId::FloatingRate,
        FieldId::CavaliRate,
    ];

    /// Returns the wire (camelCase) name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::NominalValue => "nominalValue",
            FieldId::MarketValue => "marketValue",
            FieldId::Duration => "duration",
            FieldId::Frequency => "frequency",
            FieldId::Capitalization => "capitalization",
            FieldId::InterestRateTypeId => "interestRateTypeId",
            FieldId::InterestRate => "interestRate",
            FieldId::DiscountRate => "discountRate",
            FieldId::EmissionDate => "emissionDate",
            FieldId::GracePeriodTypeId => "gracePeriodTypeId",
            FieldId::GracePeriodDuration => "gracePeriodDuration",
            FieldId::CurrencyTypeId => "currencyTypeId",
            FieldId::PrimeRate => "primeRate",
            FieldId::StructuredRate => "structuredRate",
            FieldId::PlacementRate => "placementRate",
            FieldId::FloatingRate => "floatingRate",
            FieldId::CavaliRate => "cavaliRate",
        }
    }

    /// Returns the label shown next to the input.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::Name => "Nombre del bono",
            FieldId::NominalValue => "Valor nominal",
            FieldId::MarketValue => "Valor de mercado",
            FieldId::Duration => "Duración (años)",
            FieldId::Frequency => "Frecuencia de pago",
            FieldId::Capitalization => "Capitalización",
            FieldId::InterestRateTypeId => "Tipo de tasa",
            FieldId::InterestRate => "Tasa de interés (%)",
            FieldId::DiscountRate => "Tasa de descuento (%)",
            FieldId::EmissionDate => "Fecha de emisión",
            FieldId::GracePeriodTypeId => "Tipo de período de gracia",
            FieldId::GracePeriodDuration => "Período de gracia (años)",
            FieldId::CurrencyTypeId => "Moneda",
            FieldId::PrimeRate => "Prima (%)",
            FieldId::StructuredRate => "Estructuración (%)",
            FieldId::PlacementRate => "Colocación (%)",
            FieldId::FloatingRate => "Flotación (%)",
            FieldId::CavaliRate => "CAVALI (%)",
        }
    }

    /// Returns true for percentage-valued fields.
    #[must_use]
    pub fn is_rate(&self) -> bool {
        matches!(
            self,
            FieldId::InterestRate
                | FieldId::DiscountRate
                | FieldId::PrimeRate
                | FieldId::StructuredRate
                | FieldId::PlacementRate
                | FieldId::FloatingRate
                | FieldId::CavaliRate
        )
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = YourBonoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .iter()
            .copied()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| YourBonoError::UnknownField {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for field in FieldId::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("interestRate".parse::<FieldId>().unwrap(), FieldId::InterestRate);
        assert_eq!("CAVALIRATE".parse::<FieldId>().unwrap(), FieldId::CavaliRate);
        assert!("coupon".parse::<FieldId>().is_err());
    }

    #[test]
    fn test_rate_fields() {
        let rates: Vec<_> = FieldId::ALL.iter().filter(|f| f.is_rate()).collect();
        assert_eq!(rates.len(), 7);
        assert!(FieldId::AUXILIARY_RATES.iter().all(FieldId::is_rate));
    }

    #[test]
    fn test_order_follows_form() {
        assert!(FieldId::Name < FieldId::NominalValue);
        assert!(FieldId::GracePeriodDuration < FieldId::PrimeRate);
    }
}
