//! State machine around the bond-creation form.
//!
//! ```text
//! Editing -> Validating -> Invalid ----------------------> Editing (errors shown)
//!                       -> Submitting -> Succeeded -----> Editing (draft reset)
//!                                     -> Failed --------> Editing (message shown)
//! ```
//!
//! `Validating`, `Invalid`, `Succeeded` and `Failed` are transient: the form
//! rests in either `Editing` or `Submitting`, and remembers how the last
//! submit attempt ended in [`BondForm::last_outcome`].

use chrono::NaiveDate;
use yourbono_core::{BondDraft, BondPayload, FieldId, FieldUpdate};

use super::fields::FieldErrors;
use super::normalize::normalize;
use super::validator::BondInputValidator;
use super::warnings::BusinessWarning;
use crate::error::SubmitRejection;

/// Where the form rests between user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Accepting edits; submit enabled.
    Editing,
    /// A request is in flight; submit disabled.
    Submitting,
}

/// How the most recent submit attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    /// Field validation failed.
    Invalid,
    /// The backend accepted the bond.
    Succeeded,
    /// Normalization or the request failed.
    Failed,
}

/// The bond form: draft, feedback and busy flag.
#[derive(Debug, Clone)]
pub struct BondForm {
    draft: BondDraft,
    errors: FieldErrors,
    warnings: Vec<BusinessWarning>,
    submission_error: Option<String>,
    state: FormState,
    last_outcome: Option<FormOutcome>,
    today: NaiveDate,
}

impl BondForm {
    /// Mounts a form with default values for `user_id`.
    #[must_use]
    pub fn new(user_id: i64, today: NaiveDate) -> Self {
        Self::with_draft(BondDraft::new(user_id, today), today)
    }

    /// Mounts a form pre-filled with `draft` (used for editing).
    #[must_use]
    pub fn with_draft(draft: BondDraft, today: NaiveDate) -> Self {
        Self {
            draft,
            errors: FieldErrors::new(),
            warnings: Vec::new(),
            submission_error: None,
            state: FormState::Editing,
            last_outcome: None,
            today,
        }
    }

    /// Current draft.
    #[must_use]
    pub fn draft(&self) -> &BondDraft {
        &self.draft
    }

    /// Field errors from the last submit attempt, minus fields edited since.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Warnings from the last submit attempt, minus fields edited since.
    #[must_use]
    pub fn warnings(&self) -> &[BusinessWarning] {
        &self.warnings
    }

    /// Top-level message from a failed submission.
    #[must_use]
    pub fn submission_error(&self) -> Option<&str> {
        self.submission_error.as_deref()
    }

    /// Resting state.
    #[must_use]
    pub fn state(&self) -> FormState {
        self.state
    }

    /// True while a submission is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// How the last submit attempt ended.
    #[must_use]
    pub fn last_outcome(&self) -> Option<FormOutcome> {
        self.last_outcome
    }

    /// Applies a user edit and clears that field's error and warnings.
    ///
    /// Edits are ignored while a submission is in flight; returns whether
    /// the edit was applied.
    pub fn update(&mut self, update: FieldUpdate) -> bool {
        if self.is_busy() {
            log::debug!("ignoring edit to {} while submitting", update.field());
            return false;
        }
        let field = update.field();
        self.draft.apply(update);
        self.clear_feedback_for(field);
        true
    }

    /// Validates the draft and, if it is clean, moves to `Submitting`.
    ///
    /// On success the caller sends the returned payload and reports back
    /// through [`finish_submit`](Self::finish_submit).
    ///
    /// # Errors
    ///
    /// - `SubmitRejection::Busy` while a previous submission is in flight
    /// - `SubmitRejection::InvalidFields` when validation fails; the errors
    ///   are also kept on the form
    /// - `SubmitRejection::Normalization` when the payload fails its
    ///   post-condition; the message is kept as the submission error
    pub fn begin_submit(&mut self, today: NaiveDate) -> Result<BondPayload, SubmitRejection> {
        if self.is_busy() {
            return Err(SubmitRejection::Busy);
        }
        self.today = today;
        self.submission_error = None;

        let validator = BondInputValidator::new(today);
        let report = validator.validate(&self.draft);
        self.errors = report.errors.clone();
        self.warnings = report.warnings;

        if !report.errors.is_empty() {
            self.last_outcome = Some(FormOutcome::Invalid);
            return Err(SubmitRejection::InvalidFields(report.errors));
        }

        match normalize(&self.draft) {
            Ok(payload) => {
                self.state = FormState::Submitting;
                self.last_outcome = None;
                Ok(payload)
            }
            Err(err) => {
                self.submission_error = Some(err.user_message());
                self.last_outcome = Some(FormOutcome::Failed);
                Err(SubmitRejection::Normalization(err))
            }
        }
    }

    /// Records how the in-flight submission resolved.
    ///
    /// Success resets the draft to defaults; failure keeps the draft and
    /// surfaces `message`. Calls made while not submitting are ignored.
    pub fn finish_submit(&mut self, result: Result<(), String>) {
        if !self.is_busy() {
            log::debug!("finish_submit called with no submission in flight");
            return;
        }
        self.state = FormState::Editing;
        match result {
            Ok(()) => {
                self.reset();
                self.last_outcome = Some(FormOutcome::Succeeded);
            }
            Err(message) => {
                self.submission_error = Some(message);
                self.last_outcome = Some(FormOutcome::Failed);
            }
        }
    }

    /// Discards the draft and all feedback. No effect while submitting.
    pub fn cancel(&mut self) {
        if self.is_busy() {
            return;
        }
        self.reset();
        self.last_outcome = None;
    }

    fn reset(&mut self) {
        self.draft = BondDraft::new(self.draft.user_id, self.today);
        self.errors = FieldErrors::new();
        self.warnings.clear();
        self.submission_error = None;
    }

    fn clear_feedback_for(&mut self, field: FieldId) {
        self.errors.remove(field);
        self.warnings.retain(|warning| warning.field != field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn filled_form() -> BondForm {
        let mut form = BondForm::new(9, today());
        for update in [
            FieldUpdate::Name("Bono A".into()),
            FieldUpdate::NominalValue(dec!(1000)),
            FieldUpdate::MarketValue(dec!(950)),
            FieldUpdate::Duration(5),
            FieldUpdate::Frequency(2),
            FieldUpdate::InterestRate(dec!(8)),
            FieldUpdate::DiscountRate(dec!(7)),
        ] {
            assert!(form.update(update));
        }
        form
    }

    #[test]
    fn test_invalid_submit_returns_to_editing_with_errors() {
        let mut form = BondForm::new(9, today());
        let err = form.begin_submit(today()).unwrap_err();
        assert!(matches!(err, SubmitRejection::InvalidFields(_)));
        assert_eq!(form.state(), FormState::Editing);
        assert_eq!(form.last_outcome(), Some(FormOutcome::Invalid));
        assert!(form.errors().contains(FieldId::Name));
    }

    #[test]
    fn test_edit_clears_field_feedback() {
        let mut form = BondForm::new(9, today());
        form.update(FieldUpdate::GracePeriodDuration(3));
        let _ = form.begin_submit(today());
        assert!(form.errors().contains(FieldId::GracePeriodDuration));
        assert!(form
            .warnings()
            .iter()
            .any(|w| w.field == FieldId::GracePeriodDuration));

        form.update(FieldUpdate::GracePeriodDuration(0));
        assert!(!form.errors().contains(FieldId::GracePeriodDuration));
        assert!(form
            .warnings()
            .iter()
            .all(|w| w.field != FieldId::GracePeriodDuration));
        assert!(form.errors().contains(FieldId::Name));
    }

    #[test]
    fn test_successful_submission_resets_draft() {
        let mut form = filled_form();
        let payload = form.begin_submit(today()).unwrap();
        assert_eq!(payload.user_id, 9);
        assert!(form.is_busy());

        form.finish_submit(Ok(()));
        assert_eq!(form.state(), FormState::Editing);
        assert_eq!(form.last_outcome(), Some(FormOutcome::Succeeded));
        assert_eq!(form.draft(), &BondDraft::new(9, today()));
    }

    #[test]
    fn test_failed_submission_keeps_draft_and_message() {
        let mut form = filled_form();
        form.begin_submit(today()).unwrap();
        form.finish_submit(Err("Error de conexión".into()));
        assert_eq!(form.last_outcome(), Some(FormOutcome::Failed));
        assert_eq!(form.submission_error(), Some("Error de conexión"));
        assert_eq!(form.draft().name, "Bono A");
    }

    #[test]
    fn test_busy_blocks_resubmit_edits_and_cancel() {
        let mut form = filled_form();
        form.begin_submit(today()).unwrap();
        assert_eq!(form.begin_submit(today()), Err(SubmitRejection::Busy));
        assert!(!form.update(FieldUpdate::Name("Otro".into())));
        form.cancel();
        assert!(form.is_busy());
        assert_eq!(form.draft().name, "Bono A");
    }

    #[test]
    fn test_normalization_failure_surfaces_message() {
        let mut form = filled_form();
        form.update(FieldUpdate::InterestRate(dec!(0.00001)));
        let err = form.begin_submit(today()).unwrap_err();
        assert!(matches!(err, SubmitRejection::Normalization(_)));
        assert!(!form.is_busy());
        assert_eq!(form.last_outcome(), Some(FormOutcome::Failed));
        assert!(form.submission_error().is_some());
    }

    #[test]
    fn test_cancel_resets() {
        let mut form = filled_form();
        form.cancel();
        assert_eq!(form.draft(), &BondDraft::new(9, today()));
        assert!(form.errors().is_empty());
    }
}
