//! Guarded bond submission: form validation, then one request at a time.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info};
use yourbono_core::Bond;
use yourbono_forms::bond::{BondForm, BusinessWarning};

use crate::api::BondBackend;
use crate::credentials::Credentials;
use crate::error::{ClientError, ClientResult};
use crate::guard::SubmissionGuard;

/// Where a submitted draft goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    /// Create a new bond.
    Create,
    /// Replace the stored bond with this id.
    Update(i64),
}

/// Outcome of an accepted submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submitted {
    /// Backend description of the bond (`Null` for updates or empty bodies).
    pub response: Value,
    /// Warnings raised by the validation pass that preceded the request.
    pub warnings: Vec<BusinessWarning>,
}

/// Sends bond forms to a backend, one at a time.
#[derive(Debug)]
pub struct BondSubmitter<B> {
    backend: B,
    guard: SubmissionGuard,
}

impl<B: BondBackend> BondSubmitter<B> {
    /// Wraps a backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            guard: SubmissionGuard::new(),
        }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// True while a submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Validates `form`, sends the normalized payload and records the
    /// result on the form.
    ///
    /// The payload's `userId` is taken from `credentials`. No request is
    /// made when validation or normalization fails.
    ///
    /// # Errors
    ///
    /// - `ClientError::Busy` if another submission is in flight
    /// - `ClientError::Rejected` if the form refused to submit
    /// - any transport, status or decode error from the backend
    pub async fn submit(
        &self,
        credentials: &Credentials,
        form: &mut BondForm,
        today: NaiveDate,
        target: SubmitTarget,
    ) -> ClientResult<Submitted> {
        let Some(_permit) = self.guard.try_acquire() else {
            debug!("submission rejected: another one is in flight");
            return Err(ClientError::Busy);
        };

        let mut payload = form.begin_submit(today)?;
        payload.user_id = credentials.user_id();
        let warnings = form.warnings().to_vec();
        let in_flight = InFlight { form: Some(form) };

        let result = match target {
            SubmitTarget::Create => self.backend.create_bond(credentials, &payload).await,
            SubmitTarget::Update(id) => self
                .backend
                .update_bond(credentials, &Bond::from_payload(id, payload))
                .await
                .map(|()| Value::Null),
        };

        match result {
            Ok(response) => {
                in_flight.finish(Ok(()));
                info!(?target, warnings = warnings.len(), "bond submitted");
                Ok(Submitted { response, warnings })
            }
            Err(err) => {
                in_flight.finish(Err(err.user_message()));
                Err(err)
            }
        }
    }
}

/// Message left on the form when a submission is abandoned mid-request.
pub const ABANDONED_MESSAGE: &str =
    "El envío se interrumpió antes de recibir respuesta. Verifica la lista de bonos antes de reintentar.";

/// Returns the form to `Editing` if the submit future is dropped while the
/// request is in flight.
struct InFlight<'a> {
    form: Option<&'a mut BondForm>,
}

impl InFlight<'_> {
    fn finish(mut self, result: Result<(), String>) {
        if let Some(form) = self.form.take() {
            form.finish_submit(result);
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(form) = self.form.take() {
            debug!("submission dropped while in flight");
            form.finish_submit(Err(ABANDONED_MESSAGE.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::tests::token_with;
    use crate::credentials::USER_ID_CLAIM;
    use crate::error::Operation;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;
    use yourbono_core::{BondPayload, FieldUpdate};
    use yourbono_forms::bond::FormOutcome;
    use yourbono_forms::SubmitRejection;

    #[derive(Default)]
    struct FakeBackend {
        created: Mutex<Vec<BondPayload>>,
        updated: Mutex<Vec<Bond>>,
        hold: Option<Arc<Notify>>,
        fail_status: Option<u16>,
    }

    #[async_trait]
    impl BondBackend for FakeBackend {
        async fn create_bond(
            &self,
            _credentials: &Credentials,
            payload: &BondPayload,
        ) -> ClientResult<Value> {
            if let Some(gate) = &self.hold {
                gate.notified().await;
            }
            if let Some(status) = self.fail_status {
                return Err(ClientError::Status {
                    operation: Operation::CreateBond,
                    status,
                    reason: "Internal Server Error".into(),
                    body: "System.DivideByZeroException".into(),
                });
            }
            self.created.lock().unwrap().push(payload.clone());
            Ok(serde_json::json!({ "id": 11 }))
        }

        async fn update_bond(&self, _credentials: &Credentials, bond: &Bond) -> ClientResult<()> {
            self.updated.lock().unwrap().push(bond.clone());
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn credentials() -> Credentials {
        Credentials::from_token(token_with(&format!(r#"{{"{USER_ID_CLAIM}":"42"}}"#))).unwrap()
    }

    fn filled_form() -> BondForm {
        let mut form = BondForm::new(1, today());
        for update in [
            FieldUpdate::Name("Bono A".into()),
            FieldUpdate::NominalValue(dec!(1000)),
            FieldUpdate::MarketValue(dec!(950)),
            FieldUpdate::Duration(5),
            FieldUpdate::Frequency(2),
            FieldUpdate::InterestRate(dec!(8)),
            FieldUpdate::DiscountRate(dec!(7)),
        ] {
            form.update(update);
        }
        form
    }

    #[tokio::test]
    async fn test_create_injects_user_and_resets_form() {
        let submitter = BondSubmitter::new(FakeBackend::default());
        let mut form = filled_form();
        let submitted = submitter
            .submit(&credentials(), &mut form, today(), SubmitTarget::Create)
            .await
            .unwrap();

        assert_eq!(submitted.response["id"], 11);
        assert!(submitted.warnings.is_empty());
        let created = submitter.backend().created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].user_id, 42);
        assert_eq!(created[0].interest_rate, dec!(0.08));
        assert_eq!(form.last_outcome(), Some(FormOutcome::Succeeded));
        assert!(!submitter.is_busy());
    }

    #[tokio::test]
    async fn test_update_sends_bond_with_id() {
        let submitter = BondSubmitter::new(FakeBackend::default());
        let mut form = filled_form();
        form.update(FieldUpdate::MarketValue(dec!(2000)));
        let submitted = submitter
            .submit(&credentials(), &mut form, today(), SubmitTarget::Update(9))
            .await
            .unwrap();

        assert_eq!(submitted.response, Value::Null);
        assert_eq!(submitted.warnings.len(), 1);
        let updated = submitter.backend().updated.lock().unwrap();
        assert_eq!(updated[0].id, 9);
        assert_eq!(updated[0].market_value, dec!(2000));
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_request() {
        let submitter = BondSubmitter::new(FakeBackend::default());
        let mut form = BondForm::new(1, today());
        let err = submitter
            .submit(&credentials(), &mut form, today(), SubmitTarget::Create)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::Rejected(SubmitRejection::InvalidFields(_))
        ));
        assert!(submitter.backend().created.lock().unwrap().is_empty());
        assert!(!submitter.is_busy());
    }

    #[tokio::test]
    async fn test_backend_failure_surfaces_on_form() {
        let submitter = BondSubmitter::new(FakeBackend {
            fail_status: Some(500),
            ..FakeBackend::default()
        });
        let mut form = filled_form();
        let err = submitter
            .submit(&credentials(), &mut form, today(), SubmitTarget::Create)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(form.last_outcome(), Some(FormOutcome::Failed));
        assert_eq!(form.submission_error(), Some(err.user_message().as_str()));
        assert!(err.user_message().contains("división por cero"));
        assert_eq!(form.draft().name, "Bono A");
        assert!(!submitter.is_busy());
    }

    #[tokio::test]
    async fn test_dropped_submission_releases_form() {
        let gate = Arc::new(Notify::new());
        let submitter = BondSubmitter::new(FakeBackend {
            hold: Some(gate),
            ..FakeBackend::default()
        });
        let mut form = filled_form();

        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            submitter.submit(&credentials(), &mut form, today(), SubmitTarget::Create),
        )
        .await;
        assert!(pending.is_err());

        assert!(!form.is_busy());
        assert!(!submitter.is_busy());
        assert_eq!(form.last_outcome(), Some(FormOutcome::Failed));
        assert_eq!(form.submission_error(), Some(ABANDONED_MESSAGE));
        assert_eq!(form.draft().name, "Bono A");
        assert!(form.update(FieldUpdate::MarketValue(dec!(990))));
    }

    #[tokio::test]
    async fn test_concurrent_submission_is_busy() {
        let gate = Arc::new(Notify::new());
        let submitter = BondSubmitter::new(FakeBackend {
            hold: Some(gate.clone()),
            ..FakeBackend::default()
        });
        let creds = credentials();
        let mut first = filled_form();
        let mut second = filled_form();

        let first_call = submitter.submit(&creds, &mut first, today(), SubmitTarget::Create);
        let second_call = async {
            tokio::task::yield_now().await;
            let result = submitter
                .submit(&creds, &mut second, today(), SubmitTarget::Create)
                .await;
            gate.notify_one();
            result
        };
        let (first_result, second_result) = tokio::join!(first_call, second_call);

        assert!(first_result.is_ok());
        assert!(matches!(second_result, Err(ClientError::Busy)));
        assert_eq!(second.last_outcome(), None);
        assert_eq!(submitter.backend().created.lock().unwrap().len(), 1);
    }
}
