//! Integration tests for the REST client against an in-process stub backend.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use yourbono_client::{
    ApiClient, BondSubmitter, ClientError, Credentials, Operation, SubmitTarget, USER_ID_CLAIM,
};
use yourbono_config::ClientConfig;
use yourbono_core::FieldUpdate;
use yourbono_forms::profile::UsernameUpdate;
use yourbono_forms::sign_in::SignInForm;
use yourbono_forms::BondForm;

// =============================================================================
// HELPERS
// =============================================================================

/// Start a stub backend on a random port and return a client for it.
async fn start_stub(router: Router) -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    client_for(addr)
}

fn client_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(ClientConfig {
        api_base_url: format!("http://{addr}"),
        timeout_secs: 5,
        ..ClientConfig::default()
    })
    .unwrap()
}

fn token_for(user_id: i64) -> String {
    let payload = json!({ USER_ID_CLAIM: user_id.to_string(), "exp": 4_102_444_800_i64 });
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
        URL_SAFE_NO_PAD.encode(payload.to_string())
    )
}

fn credentials() -> Credentials {
    Credentials::from_token(token_for(42)).unwrap()
}

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", token_for(42)))
}

fn stored_bond(id: i64) -> Value {
    json!({
        "id": id,
        "userId": 42,
        "name": format!("Bono {id}"),
        "nominalValue": 1000.0,
        "marketValue": 950.0,
        "duration": 5,
        "frequency": 2,
        "interestRateTypeId": 1,
        "interestRate": 0.08,
        "capitalization": 0,
        "discountRate": 0.07,
        "emissionDate": "2025-01-01T00:00:00.000Z",
        "gracePeriodTypeId": 1,
        "gracePeriodDuration": 0,
        "currencyTypeId": 1
    })
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

// =============================================================================
// SIGN-IN
// =============================================================================

#[tokio::test]
async fn test_sign_in_returns_usable_credentials() {
    let router = Router::new().route(
        "/api/v1/authentication/sign-in",
        post(|Json(body): Json<Value>| async move {
            if body["email"] == "ana@bonos.pe" && body["password"] == "secreto" {
                (
                    StatusCode::OK,
                    Json(json!({
                        "token": token_for(42),
                        "user": { "id": "42", "email": "ana@bonos.pe" }
                    })),
                )
            } else {
                (StatusCode::UNAUTHORIZED, Json(json!({})))
            }
        }),
    );
    let client = start_stub(router).await;

    let response = client
        .sign_in(&SignInForm::new("ana@bonos.pe", "secreto"))
        .await
        .unwrap();
    assert_eq!(response.user.id, "42");
    assert_eq!(response.credentials().unwrap().user_id(), 42);

    let err = client
        .sign_in(&SignInForm::new("ana@bonos.pe", "otra-clave"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(
        err.user_message(),
        "Credenciales incorrectas. Verifica tu email y contraseña."
    );
}

#[tokio::test]
async fn test_sign_in_bad_request_uses_body_message() {
    let router = Router::new().route(
        "/api/v1/authentication/sign-in",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "El usuario no existe" })),
            )
        }),
    );
    let client = start_stub(router).await;
    let err = client
        .sign_in(&SignInForm::new("x@y.z", "123456"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "El usuario no existe");
}

#[tokio::test]
async fn test_unreachable_backend() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let err = client
        .sign_in(&SignInForm::new("ana@bonos.pe", "secreto"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Transport {
            operation: Operation::SignIn,
            ..
        }
    ));
    assert!(err.user_message().ends_with(&format!("http://{addr}")));
}

// =============================================================================
// BONDS
// =============================================================================

#[tokio::test]
async fn test_list_bonds_sends_bearer_token() {
    let router = Router::new().route(
        "/api/bonds/user-id/{id}",
        get(|Path(id): Path<i64>, headers: HeaderMap| async move {
            if !is_authorized(&headers) || id != 42 {
                return (StatusCode::UNAUTHORIZED, Json(json!(null)));
            }
            (StatusCode::OK, Json(json!([stored_bond(1), stored_bond(2)])))
        }),
    );
    let client = start_stub(router).await;

    let bonds = client.list_bonds(&credentials()).await.unwrap();
    assert_eq!(bonds.len(), 2);
    assert_eq!(bonds[1].name, "Bono 2");
    assert_eq!(bonds[0].interest_rate, dec!(0.08));
    assert_eq!(bonds[0].prime_rate, dec!(0));
}

#[tokio::test]
async fn test_list_bonds_empty_cases() {
    let router = Router::new()
        .route(
            "/api/bonds/user-id/42",
            get(|| async { (StatusCode::NOT_FOUND, "no bonds") }),
        )
        .route(
            "/api/bonds/user-id/7",
            get(|| async { Json(json!({ "bonds": [] })) }),
        );
    let client = start_stub(router).await;

    assert!(client.list_bonds(&credentials()).await.unwrap().is_empty());
    let seven = Credentials::from_token(token_for(7)).unwrap();
    assert!(client.list_bonds(&seven).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_bonds_failure_message() {
    let router = Router::new().route(
        "/api/bonds/user-id/{id}",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let client = start_stub(router).await;
    let err = client.list_bonds(&credentials()).await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "Error al cargar los bonos. Verifica la conexión con la API."
    );
}

#[tokio::test]
async fn test_submit_form_posts_normalized_payload() {
    let received: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let sink = received.clone();
    let router = Router::new().route(
        "/api/bonds",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some(body);
                (StatusCode::CREATED, Json(stored_bond(99)))
            }
        }),
    );
    let submitter = BondSubmitter::new(start_stub(router).await);

    let mut form = BondForm::new(42, today());
    for update in [
        FieldUpdate::Name("  Bono A ".into()),
        FieldUpdate::NominalValue(dec!(1000.005)),
        FieldUpdate::MarketValue(dec!(950)),
        FieldUpdate::Duration(5),
        FieldUpdate::Frequency(2),
        FieldUpdate::InterestRate(dec!(8)),
        FieldUpdate::DiscountRate(dec!(7)),
    ] {
        form.update(update);
    }

    let submitted = submitter
        .submit(&credentials(), &mut form, today(), SubmitTarget::Create)
        .await
        .unwrap();
    assert_eq!(submitted.response["id"], 99);

    let body = received.lock().unwrap().clone().unwrap();
    assert_eq!(body["name"], "Bono A");
    assert_eq!(body["userId"], 42);
    assert_eq!(body["nominalValue"], json!(1000.01));
    assert_eq!(body["interestRate"], json!(0.08));
    assert_eq!(body["discountRate"], json!(0.07));
    assert_eq!(body["emissionDate"], "2025-01-01T00:00:00.000Z");
}

#[tokio::test]
async fn test_create_failure_is_classified() {
    let router = Router::new().route(
        "/api/bonds",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "System.OverflowException: Value was either too large or too small",
            )
        }),
    );
    let submitter = BondSubmitter::new(start_stub(router).await);
    let mut form = BondForm::new(42, today());
    form.update(FieldUpdate::Name("Bono".into()));
    form.update(FieldUpdate::NominalValue(dec!(1000)));
    form.update(FieldUpdate::MarketValue(dec!(1000)));
    form.update(FieldUpdate::InterestRate(dec!(5)));

    let err = submitter
        .submit(&credentials(), &mut form, today(), SubmitTarget::Create)
        .await
        .unwrap_err();
    assert!(err.user_message().contains("demasiado grandes"));
    assert_eq!(form.submission_error(), Some(err.user_message().as_str()));
}

#[tokio::test]
async fn test_update_and_delete() {
    let router = Router::new().route(
        "/api/bonds/{id}",
        put(|Path(id): Path<i64>, Json(body): Json<Value>| async move {
            if body["id"] == id {
                StatusCode::NO_CONTENT
            } else {
                StatusCode::BAD_REQUEST
            }
        })
        .delete(|Path(id): Path<i64>| async move {
            if id == 1 {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }),
    );
    let submitter = BondSubmitter::new(start_stub(router).await);
    let client = submitter.backend();

    let bond: yourbono_core::Bond = serde_json::from_value(stored_bond(3)).unwrap();
    let draft = yourbono_core::BondDraft::from_bond(&bond).unwrap();
    let mut form = BondForm::with_draft(draft, today());
    form.update(FieldUpdate::MarketValue(dec!(990)));
    submitter
        .submit(&credentials(), &mut form, today(), SubmitTarget::Update(3))
        .await
        .unwrap();

    client.delete_bond(&credentials(), 1).await.unwrap();
    let err = client.delete_bond(&credentials(), 2).await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "Error al eliminar el bono. Verifica la conexión con la API."
    );
}

// =============================================================================
// PROFILE
// =============================================================================

#[tokio::test]
async fn test_profile_round_trip() {
    let router = Router::new().route(
        "/api/v1/users/{id}",
        get(|Path(id): Path<i64>| async move { Json(json!({ "id": id, "username": "ana" })) })
            .put(|Json(body): Json<Value>| async move {
                if body["username"] == "ana.bonos" {
                    StatusCode::OK
                } else {
                    StatusCode::UNAUTHORIZED
                }
            }),
    );
    let client = start_stub(router).await;

    let user = client.get_user(&credentials()).await.unwrap();
    assert_eq!(user.id, 42);
    assert_eq!(user.username, "ana");

    let rename = UsernameUpdate::new("  ana.bonos ").unwrap();
    client.update_username(&credentials(), &rename).await.unwrap();

    let other = UsernameUpdate::new("otro").unwrap();
    let err = client.update_username(&credentials(), &other).await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "Token de autenticación inválido o expirado. Por favor, inicia sesión nuevamente."
    );
}
