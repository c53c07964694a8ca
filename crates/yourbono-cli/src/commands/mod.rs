//! CLI command implementations.

pub mod bonds;
pub mod profile;
pub mod sign_in;
pub mod validate;

// Re-export submodules for convenience
pub use bonds::BondsArgs;
pub use profile::ProfileArgs;
pub use sign_in::SignInArgs;
pub use validate::ValidateArgs;

use std::path::Path;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use yourbono_client::{ApiClient, Credentials};
use yourbono_config::{ClientConfig, Validate};
use yourbono_core::{BondDraft, FieldId, FieldUpdate};
use yourbono_forms::BondForm;

use crate::cli::Context;
use crate::error::{CliError, CliResult};

/// Loads the configuration, applying `--api-url` last.
pub fn load_config(context: &Context) -> CliResult<ClientConfig> {
    let mut config = ClientConfig::load(context.config.as_deref())?;
    if let Some(url) = &context.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
        config.validate_or_error()?;
    }
    Ok(config)
}

/// Builds an API client from the configuration.
pub fn client(context: &Context) -> CliResult<ApiClient> {
    Ok(ApiClient::new(load_config(context)?)?)
}

/// Reads the credential context from `--token` / `YOURBONO_TOKEN`.
pub fn credentials(context: &Context) -> CliResult<Credentials> {
    let token = context.token.as_deref().ok_or(CliError::MissingToken)?;
    Ok(Credentials::from_token(token)?)
}

/// Parses a `YYYY-MM-DD` date, or returns today's UTC date.
pub fn today_or(date: Option<&str>) -> CliResult<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| CliError::InvalidArgument(format!("{s}: use YYYY-MM-DD"))),
        None => Ok(Utc::now().date_naive()),
    }
}

/// Reads a JSON draft file; missing fields take their defaults.
pub fn read_draft(path: &Path) -> CliResult<BondDraft> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Parses a `field=value` assignment into a field update.
pub fn parse_assignment(assignment: &str) -> CliResult<FieldUpdate> {
    let (name, value) = assignment
        .split_once('=')
        .ok_or_else(|| CliError::InvalidArgument(format!("{assignment}: expected field=value")))?;
    let field = FieldId::from_str(name.trim())
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    FieldUpdate::parse(field, value).map_err(|e| CliError::InvalidArgument(e.to_string()))
}

/// Applies every `--set` assignment to the form, in order.
pub fn apply_assignments(form: &mut BondForm, assignments: &[String]) -> CliResult<()> {
    for assignment in assignments {
        form.update(parse_assignment(assignment)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use yourbono_core::FieldId;

    #[test]
    fn test_parse_assignment() {
        let update = parse_assignment("interestRate=8.5").unwrap();
        assert_eq!(update.field(), FieldId::InterestRate);

        let update = parse_assignment("name= Bono A ").unwrap();
        assert_eq!(update, FieldUpdate::Name(" Bono A ".into()));

        assert!(parse_assignment("interestRate").is_err());
        assert!(parse_assignment("color=red").is_err());
        assert!(parse_assignment("duration=five").is_err());
    }

    #[test]
    fn test_today_or() {
        assert_eq!(
            today_or(Some("2025-02-03")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap()
        );
        assert!(today_or(Some("03/02/2025")).is_err());
    }
}
