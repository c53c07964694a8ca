//! Profile command implementation.

use anyhow::Result;
use clap::{Args, Subcommand};
use yourbono_forms::profile::UsernameUpdate;

use super::{client, credentials};
use crate::cli::{Context, OutputFormat};
use crate::error::CliError;
use crate::output::{print_output, print_single, print_success, KeyValue};

/// Arguments for the profile command.
#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

/// Profile subcommands.
#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Show the signed-in user
    Show,

    /// Change the username
    Rename(RenameArgs),
}

/// Arguments for rename subcommand.
#[derive(Args, Debug)]
pub struct RenameArgs {
    /// New username
    pub username: String,
}

/// Executes the profile command.
pub async fn execute(args: ProfileArgs, context: &Context) -> Result<()> {
    let credentials = credentials(context)?;
    let client = client(context)?;

    match args.command {
        ProfileCommand::Show => {
            let user = client.get_user(&credentials).await.map_err(CliError::from)?;
            match context.format {
                OutputFormat::Table => {
                    let rows = vec![
                        KeyValue::new("ID", user.id.to_string()),
                        KeyValue::new("Usuario", user.username),
                    ];
                    print_output(&rows, context.format)?;
                }
                OutputFormat::Minimal => println!("{}", user.username),
                OutputFormat::Json | OutputFormat::Csv => print_single(&user, context.format)?,
            }
        }
        ProfileCommand::Rename(rename) => {
            let update = UsernameUpdate::new(&rename.username)
                .ok_or_else(|| CliError::InvalidArgument(UsernameUpdate::EMPTY_MESSAGE.to_string()))?;
            client
                .update_username(&credentials, &update)
                .await
                .map_err(CliError::from)?;
            if !context.quiet {
                print_success(&format!("Nombre de usuario actualizado a {}", update.username));
            }
        }
    }
    Ok(())
}
