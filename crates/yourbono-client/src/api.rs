//! HTTP calls against the bond backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use yourbono_config::ClientConfig;
use yourbono_core::{Bond, BondPayload};
use yourbono_forms::profile::UsernameUpdate;
use yourbono_forms::sign_in::SignInForm;

use crate::credentials::Credentials;
use crate::error::{ClientError, ClientResult, Operation};

/// Successful sign-in body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInResponse {
    /// Bearer token for later calls.
    pub token: String,
    /// The signed-in account.
    pub user: SignedInUser,
}

impl SignInResponse {
    /// Builds the credential context from the returned token.
    pub fn credentials(&self) -> ClientResult<Credentials> {
        Credentials::from_token(self.token.clone())
    }
}

/// Account summary returned by sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignedInUser {
    /// Account id (the backend sends it as text or as a number).
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    /// Login email.
    pub email: String,
    /// Display name, if set.
    #[serde(default)]
    pub name: Option<String>,
}

/// Profile record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account id.
    pub id: i64,
    /// Public username.
    pub username: String,
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(n) => n.to_string(),
    })
}

/// Writes bonds to the backend.
///
/// Implemented by [`ApiClient`]; the submitter only needs this much, which
/// keeps it testable without a server.
#[async_trait]
pub trait BondBackend: Send + Sync {
    /// Creates a bond; returns the backend's description of it.
    async fn create_bond(&self, credentials: &Credentials, payload: &BondPayload)
        -> ClientResult<Value>;

    /// Replaces a stored bond.
    async fn update_bond(&self, credentials: &Credentials, bond: &Bond) -> ClientResult<()>;
}

/// REST client for the bond backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Builds a client with the configured timeout, certificate policy and
    /// user agent. Requests are never retried.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Exchanges email and password for a token.
    pub async fn sign_in(&self, form: &SignInForm) -> ClientResult<SignInResponse> {
        let url = self.config.endpoint("/api/v1/authentication/sign-in");
        let response = self
            .send(Operation::SignIn, self.http.post(&url).json(form))
            .await?;
        let signed_in: SignInResponse = decode(Operation::SignIn, response).await?;
        info!(email = %signed_in.user.email, "signed in");
        Ok(signed_in)
    }

    /// Lists the user's bonds.
    ///
    /// A 404 or a body that is not a JSON array both mean "no bonds".
    pub async fn list_bonds(&self, credentials: &Credentials) -> ClientResult<Vec<Bond>> {
        let url = self
            .config
            .endpoint(&format!("/api/bonds/user-id/{}", credentials.user_id()));
        let request = self.authorized(self.http.get(&url), credentials);
        let response = match self.send(Operation::ListBonds, request).await {
            Ok(response) => response,
            Err(err) if err.status() == Some(404) => {
                debug!(user_id = credentials.user_id(), "no bonds (404)");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        let body: Value = decode(Operation::ListBonds, response).await?;
        if !body.is_array() {
            warn!("bond list body is not an array; treating as empty");
            return Ok(Vec::new());
        }
        let bonds: Vec<Bond> = serde_json::from_value(body).map_err(|e| ClientError::Decode {
            operation: Operation::ListBonds,
            message: e.to_string(),
        })?;
        debug!(count = bonds.len(), "loaded bonds");
        Ok(bonds)
    }

    /// Deletes a bond by id.
    pub async fn delete_bond(&self, credentials: &Credentials, bond_id: i64) -> ClientResult<()> {
        let url = self.config.endpoint(&format!("/api/bonds/{bond_id}"));
        let request = self.authorized(self.http.delete(&url), credentials);
        self.send(Operation::DeleteBond, request).await?;
        info!(bond_id, "bond deleted");
        Ok(())
    }

    /// Fetches the signed-in user's profile.
    pub async fn get_user(&self, credentials: &Credentials) -> ClientResult<User> {
        let url = self
            .config
            .endpoint(&format!("/api/v1/users/{}", credentials.user_id()));
        let request = self.authorized(self.http.get(&url), credentials);
        let response = self.send(Operation::GetUser, request).await?;
        decode(Operation::GetUser, response).await
    }

    /// Renames the signed-in user.
    pub async fn update_username(
        &self,
        credentials: &Credentials,
        update: &UsernameUpdate,
    ) -> ClientResult<()> {
        let url = self
            .config
            .endpoint(&format!("/api/v1/users/{}", credentials.user_id()));
        let request = self.authorized(self.http.put(&url).json(update), credentials);
        self.send(Operation::UpdateUser, request).await?;
        info!(username = %update.username, "username updated");
        Ok(())
    }

    fn authorized(&self, request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        request
            .bearer_auth(credentials.token())
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send(&self, operation: Operation, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(%operation, error = %e, "request failed");
            ClientError::Transport {
                operation,
                base_url: self.config.api_base_url.clone(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(%operation, status = status.as_u16(), "request succeeded");
            return Ok(response);
        }

        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = response.text().await.unwrap_or_default();
        warn!(%operation, status = status.as_u16(), "backend returned an error");
        Err(ClientError::Status {
            operation,
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

#[async_trait]
impl BondBackend for ApiClient {
    async fn create_bond(
        &self,
        credentials: &Credentials,
        payload: &BondPayload,
    ) -> ClientResult<Value> {
        let url = self.config.endpoint("/api/bonds");
        let request = self.authorized(self.http.post(&url).json(payload), credentials);
        let response = self.send(Operation::CreateBond, request).await?;
        let text = response.text().await.unwrap_or_default();
        info!(name = %payload.name, "bond created");
        Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
    }

    async fn update_bond(&self, credentials: &Credentials, bond: &Bond) -> ClientResult<()> {
        let url = self.config.endpoint(&format!("/api/bonds/{}", bond.id));
        let request = self.authorized(self.http.put(&url).json(bond), credentials);
        self.send(Operation::UpdateBond, request).await?;
        info!(bond_id = bond.id, "bond updated");
        Ok(())
    }
}

async fn decode<T>(operation: Operation, response: Response) -> ClientResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    response.json::<T>().await.map_err(|e| ClientError::Decode {
        operation,
        message: e.to_string(),
    })
}
