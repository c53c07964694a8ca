//! # YourBono Config
//!
//! Client configuration: where the backend lives, how long to wait for it,
//! and how many bonds to show per page.
//!
//! Values come from, in increasing priority: built-in defaults, a TOML file
//! (`<config dir>/yourbono/config.toml` unless a path is given), and the
//! `YOURBONO_*` environment variables.
//!
//! # Example
//!
//! ```rust
//! use yourbono_config::{ClientConfig, Validate};
//!
//! let config = ClientConfig::from_toml("timeout_secs = 10").unwrap();
//! assert_eq!(config.timeout_secs, 10);
//! assert_eq!(config.api_base_url, "https://localhost:7049");
//! assert!(config.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod client;
pub mod error;

pub use client::{ClientConfig, ENV_ACCEPT_INVALID_CERTS, ENV_API_URL, ENV_TIMEOUT_SECS};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
