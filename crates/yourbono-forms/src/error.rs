//! Error types for form validation and normalization.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::bond::FieldErrors;

/// Normalization result type.
pub type NormalizationResult<T> = Result<T, NormalizationError>;

/// A normalized payload failed its post-condition check.
///
/// Distinct from field errors: the draft passed field validation, but the
/// value produced for the wire is not acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    /// The coupon rate, as a unit fraction, is outside `(0, 1]`.
    #[error("Normalized interest rate {value} is outside (0, 1]")]
    InterestRateOutOfRange {
        /// The normalized value.
        value: Decimal,
    },
}

impl NormalizationError {
    /// Message shown to the user in place of a submission.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            NormalizationError::InterestRateOutOfRange { .. } => {
                "La tasa de interés debe estar entre 0% y 100%".to_string()
            }
        }
    }
}

/// Why a submission did not start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    /// A previous submission has not resolved yet.
    #[error("A submission is already in progress")]
    Busy,

    /// One or more fields are invalid.
    #[error("{} field(s) failed validation", .0.len())]
    InvalidFields(FieldErrors),

    /// The payload failed its post-condition check.
    #[error(transparent)]
    Normalization(#[from] NormalizationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use yourbono_core::FieldId;

    #[test]
    fn test_rejection_display() {
        let mut errors = FieldErrors::new();
        errors.insert(FieldId::Name, "x");
        errors.insert(FieldId::Duration, "y");
        assert_eq!(
            SubmitRejection::InvalidFields(errors).to_string(),
            "2 field(s) failed validation"
        );
    }

    #[test]
    fn test_normalization_display() {
        let err = NormalizationError::InterestRateOutOfRange {
            value: Decimal::ZERO,
        };
        assert!(err.to_string().contains("outside (0, 1]"));
        assert!(SubmitRejection::from(err).to_string().contains("outside"));
    }
}
