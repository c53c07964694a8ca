//! REST client configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Environment variable overriding [`ClientConfig::api_base_url`].
pub const ENV_API_URL: &str = "YOURBONO_API_URL";
/// Environment variable overriding [`ClientConfig::timeout_secs`].
pub const ENV_TIMEOUT_SECS: &str = "YOURBONO_TIMEOUT_SECS";
/// Environment variable overriding [`ClientConfig::accept_invalid_certs`].
pub const ENV_ACCEPT_INVALID_CERTS: &str = "YOURBONO_ACCEPT_INVALID_CERTS";

const MAX_TIMEOUT_SECS: u64 = 300;
const MAX_PAGE_SIZE: usize = 100;

/// Settings for talking to the bond backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API, without a trailing slash
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Accept self-signed certificates (the development backend uses one)
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Bonds per listing page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_base_url() -> String {
    "https://localhost:7049".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> usize {
    5
}

fn default_user_agent() -> String {
    concat!("yourbono/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: false,
            page_size: default_page_size(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Default file location: `<config dir>/yourbono/config.toml`.
    pub fn default_path() -> ConfigResult<PathBuf> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("yourbono").join("config.toml"))
    }

    /// Resolves the effective configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// read if present and built-in defaults are used otherwise. Environment
    /// overrides are applied last and the result is validated.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Ok(default) if default.exists() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate_or_error()?;
        log::debug!("using API at {}", config.api_base_url);
        Ok(config)
    }

    /// Applies overrides looked up by environment-variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| invalid_override(ENV_TIMEOUT_SECS, &raw))?;
        }
        if let Some(raw) = lookup(ENV_ACCEPT_INVALID_CERTS) {
            self.accept_invalid_certs = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(invalid_override(ENV_ACCEPT_INVALID_CERTS, &raw)),
            };
        }
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        Ok(())
    }

    /// Joins `path` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn invalid_override(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidOverride {
        key: key.to_string(),
        value: value.to_string(),
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let url = self.api_base_url.as_str();
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        match rest {
            None => errors.push(ValidationError::with_rule(
                "api_base_url",
                format!("'{url}' must start with http:// or https://"),
                "scheme",
            )),
            Some(host) if host.is_empty() => errors.push(ValidationError::with_rule(
                "api_base_url",
                "missing host",
                "host",
            )),
            Some(_) => {}
        }

        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            errors.push(ValidationError::with_rule(
                "timeout_secs",
                format!("must be between 1 and {MAX_TIMEOUT_SECS}"),
                "range",
            ));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            errors.push(ValidationError::with_rule(
                "page_size",
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
                "range",
            ));
        }

        if self.user_agent.trim().is_empty() {
            errors.push(ValidationError::new("user_agent", "must not be empty"));
        }

        errors
    }
}
