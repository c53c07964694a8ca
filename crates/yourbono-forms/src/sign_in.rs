//! Sign-in form validation.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Fields of the sign-in form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SignInField {
    /// Email address
    Email,
    /// Password
    Password,
}

/// Credentials as typed; serialized as the sign-in request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInForm {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl SignInForm {
    /// Creates a form with the given values.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks both fields; an empty map means the form can be sent.
    #[must_use]
    pub fn validate(&self) -> BTreeMap<SignInField, &'static str> {
        let mut errors = BTreeMap::new();

        if self.email.is_empty() {
            errors.insert(SignInField::Email, "El correo electrónico es obligatorio");
        } else if !EMAIL_PATTERN.is_match(&self.email) {
            errors.insert(
                SignInField::Email,
                "El formato del correo electrónico no es válido",
            );
        }

        if self.password.is_empty() {
            errors.insert(SignInField::Password, "La contraseña es obligatoria");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(
                SignInField::Password,
                "La contraseña debe tener al menos 6 caracteres",
            );
        }

        errors
    }
}
