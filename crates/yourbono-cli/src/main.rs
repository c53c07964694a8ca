//! YourBono CLI - command-line client for the YourBono bond platform.
//!
//! # Usage
//!
//! ```bash
//! # Check a draft offline
//! yourbono validate --file bono.json --set interestRate=8.5
//!
//! # Sign in and keep the token
//! export YOURBONO_TOKEN=$(yourbono -f minimal sign-in --email ana@bonos.pe)
//!
//! # Manage bonds
//! yourbono bonds list --page 2
//! yourbono bonds create --file bono.json
//! yourbono bonds edit 12 --set marketValue=990
//! yourbono bonds delete 12 --yes
//!
//! # Profile
//! yourbono profile rename ana.bonos
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so piped output stays clean
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("warn,yourbono=debug,yourbono_client=debug,yourbono_forms=debug")
        })
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,yourbono=info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (context, command) = cli.into_parts();

    // Execute command
    let result = match command {
        Commands::Validate(args) => commands::validate::execute(args, &context),
        Commands::SignIn(args) => commands::sign_in::execute(args, &context).await,
        Commands::Bonds(args) => commands::bonds::execute(args, &context).await,
        Commands::Profile(args) => commands::profile::execute(args, &context).await,
    };

    if let Err(err) = result {
        output::print_error(&err.to_string());
        std::process::exit(1);
    }
    Ok(())
}
