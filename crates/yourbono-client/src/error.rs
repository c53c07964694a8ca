//! Error types for backend calls.
//!
//! Every failure carries the [`Operation`] it happened in, so the message
//! shown to the user can be chosen per screen.

use std::fmt;

use thiserror::Error;
use yourbono_forms::SubmitRejection;

/// Client operation result type.
pub type ClientResult<T> = Result<T, ClientError>;

/// The backend call a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `POST /api/v1/authentication/sign-in`
    SignIn,
    /// `GET /api/bonds/user-id/{id}`
    ListBonds,
    /// `POST /api/bonds`
    CreateBond,
    /// `PUT /api/bonds/{id}`
    UpdateBond,
    /// `DELETE /api/bonds/{id}`
    DeleteBond,
    /// `GET /api/v1/users/{id}`
    GetUser,
    /// `PUT /api/v1/users/{id}`
    UpdateUser,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::SignIn => "sign-in",
            Operation::ListBonds => "list bonds",
            Operation::CreateBond => "create bond",
            Operation::UpdateBond => "update bond",
            Operation::DeleteBond => "delete bond",
            Operation::GetUser => "get user",
            Operation::UpdateUser => "update user",
        };
        f.write_str(name)
    }
}

/// Known failure signatures in a bond-creation error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Arithmetic overflow while computing the bond schedule.
    Overflow,
    /// The backend rejected an argument.
    InvalidArgument,
    /// Division by zero while computing the bond schedule.
    DivideByZero,
    /// Anything else.
    Other,
}

impl FailureKind {
    /// Classifies a raw response body.
    ///
    /// Matching is case-insensitive and looks for exception names as well as
    /// plain wording; the first signature found wins, in declaration order.
    #[must_use]
    pub fn classify(body: &str) -> Self {
        let body = body.to_ascii_lowercase();
        if body.contains("overflow") {
            FailureKind::Overflow
        } else if body.contains("argumentexception")
            || body.contains("invalid argument")
            || body.contains("invalidargument")
            || body.contains("argumentoutofrange")
        {
            FailureKind::InvalidArgument
        } else if body.contains("dividebyzero")
            || body.contains("divide by zero")
            || body.contains("division by zero")
        {
            FailureKind::DivideByZero
        } else {
            FailureKind::Other
        }
    }

    /// Message shown in place of the created bond.
    #[must_use]
    pub fn user_message(self) -> &'static str {
        match self {
            FailureKind::Overflow => {
                "Los valores ingresados son demasiado grandes para calcular el bono. Revisa montos y tasas."
            }
            FailureKind::InvalidArgument => {
                "Alguno de los valores ingresados no es válido para el cálculo del bono. Revisa los datos."
            }
            FailureKind::DivideByZero => {
                "El cálculo del bono produjo una división por cero. Revisa la frecuencia, la capitalización y las tasas."
            }
            FailureKind::Other => "Error al crear el bono. Intenta nuevamente.",
        }
    }
}

/// Errors raised by the REST client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A bond submission is already in flight.
    #[error("A bond submission is already in progress")]
    Busy,

    /// The bearer token cannot be used.
    #[error("Invalid token: {reason}")]
    InvalidToken {
        /// Why the token was rejected.
        reason: String,
    },

    /// The draft never reached the network.
    #[error("Bond not sent: {0}")]
    Rejected(#[from] SubmitRejection),

    /// No response was received.
    #[error("{operation} failed: cannot reach {base_url}: {message}")]
    Transport {
        /// Failing call.
        operation: Operation,
        /// Configured API base URL.
        base_url: String,
        /// Transport error text.
        message: String,
    },

    /// The backend answered with a non-2xx status.
    #[error("{operation} failed with HTTP {status}")]
    Status {
        /// Failing call.
        operation: Operation,
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("{operation} returned an unreadable body: {message}")]
    Decode {
        /// Failing call.
        operation: Operation,
        /// Decoder error text.
        message: String,
    },

    /// The HTTP client could not be built.
    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

impl ClientError {
    /// Creates an invalid token error.
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }

    /// HTTP status of the failure, if the backend answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The single message shown to the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Busy => "Ya hay un envío en curso. Espera a que termine.".to_string(),
            ClientError::InvalidToken { .. } => {
                "No hay sesión activa. Por favor, inicia sesión nuevamente.".to_string()
            }
            ClientError::Rejected(rejection) => match rejection {
                SubmitRejection::Busy => ClientError::Busy.user_message(),
                SubmitRejection::InvalidFields(_) => {
                    "Corrige los campos marcados antes de guardar el bono.".to_string()
                }
                SubmitRejection::Normalization(err) => err.user_message(),
            },
            ClientError::Transport {
                operation,
                base_url,
                ..
            } => transport_message(*operation, base_url),
            ClientError::Status {
                operation,
                status,
                reason,
                body,
            } => status_message(*operation, *status, reason, body),
            ClientError::Decode { operation, .. } => match operation {
                Operation::SignIn => "Respuesta inesperada del servidor. Intenta más tarde.".to_string(),
                other => generic_message(*other),
            },
            ClientError::Setup(_) => {
                "No se pudo inicializar el cliente HTTP. Revisa la configuración.".to_string()
            }
        }
    }
}

fn transport_message(operation: Operation, base_url: &str) -> String {
    match operation {
        Operation::SignIn | Operation::CreateBond => format!(
            "Error de conexión. Verifica que la API esté ejecutándose en {base_url}"
        ),
        other => generic_message(other),
    }
}

fn status_message(operation: Operation, status: u16, reason: &str, body: &str) -> String {
    match (operation, status) {
        (Operation::SignIn, 401) => {
            "Credenciales incorrectas. Verifica tu email y contraseña.".to_string()
        }
        (Operation::SignIn, 400) => body_message(body)
            .unwrap_or_else(|| "Datos de entrada inválidos".to_string()),
        (Operation::SignIn, 500) => "Error interno del servidor. Intenta más tarde.".to_string(),
        (Operation::SignIn, _) => {
            "Error de conexión. Verifica tu conexión a internet.".to_string()
        }
        (Operation::GetUser | Operation::UpdateUser, 401) => {
            "Token de autenticación inválido o expirado. Por favor, inicia sesión nuevamente."
                .to_string()
        }
        (Operation::GetUser, _) => {
            format!("Error al obtener los datos del usuario: {status} - {reason}")
        }
        (Operation::UpdateUser, _) => {
            format!("Error al actualizar el usuario: {status} - {reason}")
        }
        (Operation::CreateBond, _) => FailureKind::classify(body).user_message().to_string(),
        (other, _) => generic_message(other),
    }
}

fn generic_message(operation: Operation) -> String {
    match operation {
        Operation::SignIn => "Error de conexión. Verifica tu conexión a internet.",
        Operation::ListBonds => "Error al cargar los bonos. Verifica la conexión con la API.",
        Operation::CreateBond => FailureKind::Other.user_message(),
        Operation::UpdateBond => "Error al actualizar el bono. Verifica la conexión con la API.",
        Operation::DeleteBond => "Error al eliminar el bono. Verifica la conexión con la API.",
        Operation::GetUser => "Error al obtener los datos del usuario.",
        Operation::UpdateUser => "Error al actualizar el usuario.",
    }
    .to_string()
}

/// Extracts a non-empty `message` string from a JSON error body.
fn body_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}
