//! Explicit credential context for authenticated calls.

use std::fmt;

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// JWT claim holding the numeric user id.
pub const USER_ID_CLAIM: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/sid";

/// A bearer token and the user it identifies.
///
/// Built once from the token and passed into every authenticated call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    user_id: i64,
}

impl Credentials {
    /// Reads the user id from the token's `sid` claim.
    ///
    /// The signature is not verified; the backend does that on every call.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidToken` if the token is not a three-part
    /// JWT, its payload is not base64url JSON, or the `sid` claim is missing
    /// or not a positive integer.
    pub fn from_token(token: impl Into<String>) -> ClientResult<Self> {
        let token = token.into().trim().to_string();
        let user_id = user_id_from_token(&token)?;
        Ok(Self { token, user_id })
    }

    /// The raw bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The authenticated user's id.
    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.user_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

fn user_id_from_token(token: &str) -> ClientResult<i64> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ClientError::invalid_token("expected three dot-separated parts"));
    };

    let payload = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload))
        .map_err(|e| ClientError::invalid_token(format!("payload is not base64: {e}")))?;
    let claims: Value = serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::invalid_token(format!("payload is not JSON: {e}")))?;

    let user_id = match claims.get(USER_ID_CLAIM) {
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(Value::Number(n)) => n.as_i64(),
        _ => return Err(ClientError::invalid_token("missing sid claim")),
    };
    match user_id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ClientError::invalid_token("sid claim is not a positive integer")),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds an unsigned token with the given JSON payload.
    pub(crate) fn token_with(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_string_sid() {
        let token = token_with(&format!(r#"{{"{USER_ID_CLAIM}":"42","exp":1}}"#));
        let creds = Credentials::from_token(&token).unwrap();
        assert_eq!(creds.user_id(), 42);
        assert_eq!(creds.token(), token);
    }

    #[test]
    fn test_numeric_sid_and_padding() {
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"{USER_ID_CLAIM}":7}}"#));
        let token = format!("h.{payload}==.s");
        assert_eq!(Credentials::from_token(token).unwrap().user_id(), 7);
    }

    #[test]
    fn test_missing_sid_is_rejected() {
        let token = token_with(r#"{"sub":"ana"}"#);
        let err = Credentials::from_token(token).unwrap_err();
        assert!(err.to_string().contains("missing sid"));
    }

    #[test]
    fn test_malformed_tokens() {
        for bad in ["", "abc", "a.b", "a.b.c.d", "a.!!!.c"] {
            assert!(
                matches!(Credentials::from_token(bad), Err(ClientError::InvalidToken { .. })),
                "{bad}"
            );
        }
        let zero = token_with(&format!(r#"{{"{USER_ID_CLAIM}":"0"}}"#));
        assert!(Credentials::from_token(zero).is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = token_with(&format!(r#"{{"{USER_ID_CLAIM}":"3"}}"#));
        let shown = format!("{:?}", Credentials::from_token(token).unwrap());
        assert!(shown.contains("<redacted>"));
        assert!(!shown.contains("signature"));
    }
}
