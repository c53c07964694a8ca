//! Profile (username) edit.

use serde::Serialize;

/// Body of a username update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsernameUpdate {
    /// Trimmed, non-empty username.
    pub username: String,
}

impl UsernameUpdate {
    /// Message shown when the username is blank.
    pub const EMPTY_MESSAGE: &'static str = "El nombre de usuario no puede estar vacío";

    /// Trims `raw`; `None` if nothing is left.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let username = raw.trim();
        (!username.is_empty()).then(|| Self {
            username: username.to_string(),
        })
    }
}
