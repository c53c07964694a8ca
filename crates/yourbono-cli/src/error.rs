//! CLI error types.

use thiserror::Error;
use yourbono_client::ClientError;
use yourbono_config::ConfigError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A backend call failed; shows the user-facing message.
    #[error("{}", .0.user_message())]
    Client(#[from] ClientError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No bearer token was given.
    #[error("No hay sesión activa. Ejecuta `yourbono sign-in` o usa --token.")]
    MissingToken,

    /// The bond draft has blocking field errors.
    #[error("El bono tiene {0} campo(s) con errores")]
    InvalidDraft(usize),

    /// The bond draft was refused before sending.
    #[error("{0}")]
    NotSubmitted(String),

    /// The sign-in form failed validation.
    #[error("Revisa el correo electrónico y la contraseña")]
    InvalidSignIn,

    /// An argument could not be parsed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested bond is not in the user's list.
    #[error("No se encontró el bono {0}")]
    BondNotFound(i64),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
