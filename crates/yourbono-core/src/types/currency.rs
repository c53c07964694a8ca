//! Currencies a bond can be issued in.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{YourBonoError, YourBonoResult};

/// Issue currency of a bond, keyed by the backend's `currencyTypeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyType {
    /// Peruvian Sol (id 1)
    #[default]
    PEN,
    /// United States Dollar (id 2)
    USD,
    /// Euro (id 3)
    EUR,
}

impl CurrencyType {
    /// All supported currencies, in id order.
    pub const ALL: [CurrencyType; 3] = [CurrencyType::PEN, CurrencyType::USD, CurrencyType::EUR];

    /// Returns the backend id.
    #[must_use]
    pub fn id(&self) -> i32 {
        match self {
            CurrencyType::PEN => 1,
            CurrencyType::USD => 2,
            CurrencyType::EUR => 3,
        }
    }

    /// Converts a backend id.
    ///
    /// # Errors
    ///
    /// Returns `YourBonoError::InvalidTypeId` for ids outside `1..=3`.
    pub fn from_id(id: i32) -> YourBonoResult<Self> {
        match id {
            1 => Ok(CurrencyType::PEN),
            2 => Ok(CurrencyType::USD),
            3 => Ok(CurrencyType::EUR),
            _ => Err(YourBonoError::invalid_type_id("currency", id)),
        }
    }

    /// Converts a backend id, falling back to PEN for unknown ids.
    ///
    /// Used for display of records coming back from the server.
    #[must_use]
    pub fn from_id_or_default(id: i32) -> Self {
        Self::from_id(id).unwrap_or_default()
    }

    /// Returns the ISO 4217 3-letter code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            CurrencyType::PEN => "PEN",
            CurrencyType::USD => "USD",
            CurrencyType::EUR => "EUR",
        }
    }

    /// Returns the currency symbol.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyType::PEN => "S/",
            CurrencyType::USD => "US$",
            CurrencyType::EUR => "€",
        }
    }

    /// Parses a currency from a string code.
    ///
    /// # Errors
    ///
    /// Returns `YourBonoError::UnsupportedCurrency` for anything but PEN/USD/EUR.
    pub fn from_code(code: &str) -> YourBonoResult<Self> {
        match code.trim().to_uppercase().as_str() {
            "PEN" => Ok(CurrencyType::PEN),
            "USD" => Ok(CurrencyType::USD),
            "EUR" => Ok(CurrencyType::EUR),
            _ => Err(YourBonoError::UnsupportedCurrency {
                code: code.to_string(),
            }),
        }
    }
}

impl fmt::Display for CurrencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
