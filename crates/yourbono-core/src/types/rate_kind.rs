//! Interest-rate and grace-period kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{YourBonoError, YourBonoResult};

/// Whether the coupon rate is fixed or floats, keyed by `interestRateTypeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InterestRateType {
    /// Fixed rate (id 1)
    #[default]
    Fixed,
    /// Variable rate (id 2)
    Variable,
}

impl InterestRateType {
    /// Returns the backend id.
    #[must_use]
    pub fn id(&self) -> i32 {
        match self {
            InterestRateType::Fixed => 1,
            InterestRateType::Variable => 2,
        }
    }

    /// Converts a backend id.
    ///
    /// # Errors
    ///
    /// Returns `YourBonoError::InvalidTypeId` for ids other than 1 and 2.
    pub fn from_id(id: i32) -> YourBonoResult<Self> {
        match id {
            1 => Ok(InterestRateType::Fixed),
            2 => Ok(InterestRateType::Variable),
            _ => Err(YourBonoError::invalid_type_id("interest rate type", id)),
        }
    }

    /// Converts a backend id, falling back to fixed for unknown ids.
    #[must_use]
    pub fn from_id_or_default(id: i32) -> Self {
        Self::from_id(id).unwrap_or_default()
    }

    /// Returns the label shown to users.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            InterestRateType::Fixed => "Fija",
            InterestRateType::Variable => "Variable",
        }
    }
}

impl fmt::Display for InterestRateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How interest is handled during the grace period, keyed by `gracePeriodTypeId`.
///
/// During a partial grace period only interest is paid; during a total grace
/// period nothing is paid and interest capitalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GracePeriodType {
    /// Partial grace (id 1)
    #[default]
    Partial,
    /// Total grace (id 2)
    Total,
}

impl GracePeriodType {
    /// Returns the backend id.
    #[must_use]
    pub fn id(&self) -> i32 {
        match self {
            GracePeriodType::Partial => 1,
            GracePeriodType::Total => 2,
        }
    }

    /// Converts a backend id.
    ///
    /// # Errors
    ///
    /// Returns `YourBonoError::InvalidTypeId` for ids other than 1 and 2.
    pub fn from_id(id: i32) -> YourBonoResult<Self> {
        match id {
            1 => Ok(GracePeriodType::Partial),
            2 => Ok(GracePeriodType::Total),
            _ => Err(YourBonoError::invalid_type_id("grace period type", id)),
        }
    }

    /// Converts a backend id, falling back to partial for unknown ids.
    #[must_use]
    pub fn from_id_or_default(id: i32) -> Self {
        Self::from_id(id).unwrap_or_default()
    }

    /// Returns the label shown to users.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            GracePeriodType::Partial => "Parcial",
            GracePeriodType::Total => "Total",
        }
    }
}

impl fmt::Display for GracePeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
