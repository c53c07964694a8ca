//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{BondsArgs, ProfileArgs, SignInArgs, ValidateArgs};

/// YourBono - bond portfolio client
#[derive(Parser)]
#[command(name = "yourbono")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to <config dir>/yourbono/config.toml)
    #[arg(long, env = "YOURBONO_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, overriding the configuration
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token from `yourbono sign-in`
    #[arg(long, env = "YOURBONO_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate a bond draft offline and show the payload it would send
    Validate(ValidateArgs),

    /// Sign in and print a bearer token
    SignIn(SignInArgs),

    /// List, create, edit and delete bonds
    Bonds(BondsArgs),

    /// Show or rename the signed-in user
    Profile(ProfileArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

/// Options every command shares.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
    /// API base URL override.
    pub api_url: Option<String>,
    /// Bearer token.
    pub token: Option<String>,
}

impl Cli {
    /// Splits the shared options from the command.
    pub fn into_parts(self) -> (Context, Commands) {
        let context = Context {
            format: self.format,
            quiet: self.quiet,
            config: self.config,
            api_url: self.api_url,
            token: self.token,
        };
        (context, self.command)
    }
}
