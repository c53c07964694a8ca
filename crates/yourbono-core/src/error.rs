//! Error types for YourBono domain types.
//!
//! These errors cover conversions between the raw values a form holds and
//! the typed domain values (enumeration ids, dates). Validation of a whole
//! draft does not go through this type; it reports per-field messages.

use thiserror::Error;

/// A specialized Result type for YourBono domain operations.
pub type YourBonoResult<T> = Result<T, YourBonoError>;

/// The main error type for domain conversions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum YourBonoError {
    /// Error parsing or constructing a date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// An enumeration id outside its allowed set.
    #[error("Invalid {kind} id: {id}")]
    InvalidTypeId {
        /// Which enumeration was being converted.
        kind: &'static str,
        /// The offending id.
        id: i32,
    },

    /// A currency code that is not supported.
    #[error("Unsupported currency: {code}")]
    UnsupportedCurrency {
        /// The offending code.
        code: String,
    },

    /// A raw form value that cannot be parsed for its field.
    #[error("Invalid value for {field}: '{value}'")]
    InvalidFieldValue {
        /// Wire name of the field.
        field: &'static str,
        /// The raw text that failed to parse.
        value: String,
    },

    /// Unknown field name.
    #[error("Unknown field: {name}")]
    UnknownField {
        /// The offending name.
        name: String,
    },

    /// Mathematical error (overflow and similar).
    #[error("Mathematical error: {reason}")]
    MathError {
        /// Description of the error.
        reason: String,
    },
}

impl YourBonoError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid enumeration id error.
    #[must_use]
    pub fn invalid_type_id(kind: &'static str, id: i32) -> Self {
        Self::InvalidTypeId { kind, id }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math_error(reason: impl Into<String>) -> Self {
        Self::MathError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = YourBonoError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_type_id_error() {
        let err = YourBonoError::invalid_type_id("currency", 7);
        assert_eq!(err.to_string(), "Invalid currency id: 7");
    }
}
