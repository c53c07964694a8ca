//! # YourBono Client
//!
//! Async REST client for the YourBono bond backend.
//!
//! - [`ApiClient`]: sign-in, bond listing / creation / update / deletion and
//!   profile calls, each mapped to one user-facing failure message
//! - [`Credentials`]: the bearer token plus the user id read from its `sid`
//!   claim, passed explicitly into every authenticated call
//! - [`BondSubmitter`]: runs a [`BondForm`](yourbono_forms::BondForm)
//!   through validation and sends it, one submission at a time
//!
//! Requests use the configured timeout and are never retried.
//!
//! ## Example
//!
//! ```rust,no_run
//! use yourbono_client::{ApiClient, Credentials};
//! use yourbono_config::ClientConfig;
//!
//! # async fn run(token: String) -> yourbono_client::ClientResult<()> {
//! let client = ApiClient::new(ClientConfig::default())?;
//! let credentials = Credentials::from_token(token)?;
//! for bond in client.list_bonds(&credentials).await? {
//!     println!("{} {}", bond.id, bond.name);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod api;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod submitter;

pub use api::{ApiClient, BondBackend, SignInResponse, SignedInUser, User};
pub use credentials::{Credentials, USER_ID_CLAIM};
pub use error::{ClientError, ClientResult, FailureKind, Operation};
pub use guard::{SubmissionGuard, SubmissionPermit};
pub use submitter::{BondSubmitter, SubmitTarget, Submitted, ABANDONED_MESSAGE};
