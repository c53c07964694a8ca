//! The full bond-input pipeline: field checks, warnings, normalization.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use yourbono_core::{BondDraft, BondPayload};

use super::fields::{validate_fields, FieldErrors};
use super::normalize::normalize;
use super::warnings::{evaluate_warnings, BusinessWarning};
use crate::error::SubmitRejection;

/// Errors and warnings for one pass over a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Blocking errors.
    pub errors: FieldErrors,
    /// Non-blocking advisories, in rule order.
    pub warnings: Vec<BusinessWarning>,
}

impl ValidationReport {
    /// True when the draft may be submitted.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A payload ready to send, plus the warnings shown alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSubmission {
    /// Normalized wire body.
    pub payload: BondPayload,
    /// Warnings from the same validation pass.
    pub warnings: Vec<BusinessWarning>,
}

/// Stateless validator anchored to a reference date.
///
/// The reference date bounds the emission date ("no more than ten years
/// ahead"); everything else depends only on the draft.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use yourbono_core::BondDraft;
/// use yourbono_forms::bond::BondInputValidator;
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let validator = BondInputValidator::new(today);
///
/// let mut draft = BondDraft::new(1, today);
/// draft.name = "Bono A".into();
/// draft.nominal_value = dec!(1000);
/// draft.market_value = dec!(950);
/// draft.duration = 5;
/// draft.frequency = 2;
/// draft.interest_rate = dec!(8);
/// draft.discount_rate = dec!(7);
///
/// let report = validator.validate(&draft);
/// assert!(report.is_submittable());
/// assert!(report.warnings.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BondInputValidator {
    today: NaiveDate,
}

impl BondInputValidator {
    /// Creates a validator for the given reference date.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Creates a validator anchored to the current UTC date.
    #[must_use]
    pub fn for_today() -> Self {
        Self::new(Utc::now().date_naive())
    }

    /// The reference date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Runs field validation and the business rules.
    #[must_use]
    pub fn validate(&self, draft: &BondDraft) -> ValidationReport {
        ValidationReport {
            errors: validate_fields(draft, self.today),
            warnings: evaluate_warnings(draft),
        }
    }

    /// Validates and, if clean, normalizes `draft` into a payload.
    ///
    /// # Errors
    ///
    /// - `SubmitRejection::InvalidFields` when any field is invalid
    /// - `SubmitRejection::Normalization` when the payload fails its
    ///   post-condition check
    pub fn prepare(&self, draft: &BondDraft) -> Result<PreparedSubmission, SubmitRejection> {
        let report = self.validate(draft);
        if !report.is_submittable() {
            return Err(SubmitRejection::InvalidFields(report.errors));
        }
        let payload = normalize(draft)?;
        Ok(PreparedSubmission {
            payload,
            warnings: report.warnings,
        })
    }
}
