//! Sign-in command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;
use yourbono_forms::sign_in::SignInForm;

use super::client;
use crate::cli::{Context, OutputFormat};
use crate::error::CliError;
use crate::output::{print_error, print_info, print_output, print_single, print_success, KeyValue};

/// Arguments for the sign-in command.
#[derive(Args, Debug)]
pub struct SignInArgs {
    /// Email address
    #[arg(long)]
    pub email: String,

    /// Password
    #[arg(long, env = "YOURBONO_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Session<'a> {
    token: &'a str,
    user_id: i64,
    email: &'a str,
}

/// Executes the sign-in command.
pub async fn execute(args: SignInArgs, context: &Context) -> Result<()> {
    let form = SignInForm::new(args.email, args.password);
    let errors = form.validate();
    if !errors.is_empty() {
        for message in errors.values() {
            print_error(message);
        }
        return Err(CliError::InvalidSignIn.into());
    }

    let client = client(context)?;
    let response = client.sign_in(&form).await.map_err(CliError::from)?;
    let credentials = response.credentials().map_err(CliError::from)?;
    info!(user_id = credentials.user_id(), "signed in");

    match context.format {
        OutputFormat::Minimal => println!("{}", credentials.token()),
        OutputFormat::Json | OutputFormat::Csv => {
            let session = Session {
                token: credentials.token(),
                user_id: credentials.user_id(),
                email: &response.user.email,
            };
            print_single(&session, context.format)?;
        }
        OutputFormat::Table => {
            if !context.quiet {
                print_success("Sesión iniciada");
            }
            let rows = vec![
                KeyValue::new("Usuario", credentials.user_id().to_string()),
                KeyValue::new("Token", credentials.token()),
            ];
            print_output(&rows, context.format)?;
            if !context.quiet {
                print_info("Exporta YOURBONO_TOKEN con este token para los demás comandos");
            }
        }
    }
    Ok(())
}
