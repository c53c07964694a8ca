//! Bonds command implementation.
//!
//! Lists the signed-in user's bonds and creates, edits or deletes them.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use yourbono_client::{ApiClient, BondSubmitter, ClientError, Credentials, SubmitTarget};
use yourbono_core::types::CurrencyType;
use yourbono_core::{Bond, BondDraft};
use yourbono_forms::display::{
    format_currency, format_percentage, format_timestamp_date, grace_period_type_label,
    interest_rate_type_label,
};
use yourbono_forms::listing::paginate;
use yourbono_forms::{BondForm, SubmitRejection};

use super::{apply_assignments, client, credentials, load_config, read_draft, today_or};
use crate::cli::{Context, OutputFormat};
use crate::error::CliError;
use crate::output::{
    print_field_errors, print_info, print_output, print_single, print_success, print_warnings,
};

/// Arguments for the bonds command.
#[derive(Args, Debug)]
pub struct BondsArgs {
    #[command(subcommand)]
    pub command: BondsCommand,
}

/// Bonds subcommands.
#[derive(Subcommand, Debug)]
pub enum BondsCommand {
    /// List bonds, one page at a time
    List(ListArgs),

    /// Create a bond from a draft file and/or field assignments
    Create(CreateArgs),

    /// Edit a stored bond
    Edit(EditArgs),

    /// Delete a stored bond
    Delete(DeleteArgs),
}

/// Arguments for list subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Bonds per page (defaults to the configured page size)
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Arguments for create subcommand.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// JSON draft file (camelCase field names, rates in percent)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Set a field, e.g. `--set name="Bono A"` (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub assignments: Vec<String>,

    /// Date used for the emission-date checks (YYYY-MM-DD, default today)
    #[arg(long)]
    pub today: Option<String>,
}

/// Arguments for edit subcommand.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Bond id
    pub id: i64,

    /// Set a field, e.g. `--set marketValue=990` (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub assignments: Vec<String>,

    /// Date used for the emission-date checks (YYYY-MM-DD, default today)
    #[arg(long)]
    pub today: Option<String>,
}

/// Arguments for delete subcommand.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Bond id
    pub id: i64,

    /// Confirm the deletion
    #[arg(long)]
    pub yes: bool,
}

/// One bond as shown in the list.
#[derive(Debug, Clone, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct BondRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Nombre")]
    pub name: String,
    #[tabled(rename = "Valor nominal")]
    pub nominal_value: String,
    #[tabled(rename = "Valor comercial")]
    pub market_value: String,
    #[tabled(rename = "Tasa")]
    pub interest_rate: String,
    #[tabled(rename = "Tipo de tasa")]
    pub interest_rate_type: &'static str,
    #[tabled(rename = "Plazo")]
    pub duration: String,
    #[tabled(rename = "Gracia")]
    pub grace_period: String,
    #[tabled(rename = "Emisión")]
    pub emission_date: String,
}

impl From<&Bond> for BondRow {
    fn from(bond: &Bond) -> Self {
        let currency = CurrencyType::from_id_or_default(bond.currency_type_id);
        let grace_period = if bond.grace_period_duration > 0 {
            format!(
                "{} ({} años)",
                grace_period_type_label(bond.grace_period_type_id),
                bond.grace_period_duration
            )
        } else {
            "Sin gracia".to_string()
        };
        Self {
            id: bond.id,
            name: bond.name.clone(),
            nominal_value: format_currency(bond.nominal_value, currency),
            market_value: format_currency(bond.market_value, currency),
            interest_rate: format_percentage(bond.interest_rate),
            interest_rate_type: interest_rate_type_label(bond.interest_rate_type_id),
            duration: format!("{} años", bond.duration),
            grace_period,
            emission_date: format_timestamp_date(&bond.emission_date),
        }
    }
}

/// Executes the bonds command.
pub async fn execute(args: BondsArgs, context: &Context) -> Result<()> {
    let credentials = credentials(context)?;
    match args.command {
        BondsCommand::List(args) => execute_list(args, context, &credentials).await,
        BondsCommand::Create(args) => execute_create(args, context, &credentials).await,
        BondsCommand::Edit(args) => execute_edit(args, context, &credentials).await,
        BondsCommand::Delete(args) => execute_delete(args, context, &credentials).await,
    }
}

async fn execute_list(args: ListArgs, context: &Context, credentials: &Credentials) -> Result<()> {
    let config = load_config(context)?;
    let page_size = args.page_size.unwrap_or(config.page_size);
    let client = ApiClient::new(config).map_err(CliError::from)?;

    let bonds = client
        .list_bonds(credentials)
        .await
        .map_err(CliError::from)?;
    let rows: Vec<BondRow> = bonds.iter().map(BondRow::from).collect();

    if context.format != OutputFormat::Table {
        return print_output(&rows, context.format);
    }

    let page = paginate(&rows, args.page, page_size);
    print_output(page.items, context.format)?;
    if !context.quiet {
        print_info(&page.summary());
        if page.has_next() {
            print_info(&format!("Siguiente: --page {}", page.number + 1));
        }
    }
    Ok(())
}

async fn execute_create(
    args: CreateArgs,
    context: &Context,
    credentials: &Credentials,
) -> Result<()> {
    let today = today_or(args.today.as_deref())?;
    let draft = match &args.file {
        Some(path) => read_draft(path)?,
        None => BondDraft::new(credentials.user_id(), today),
    };
    let mut form = BondForm::with_draft(draft, today);
    apply_assignments(&mut form, &args.assignments)?;

    submit(context, credentials, &mut form, today, SubmitTarget::Create).await?;
    if !context.quiet {
        print_success("Bono creado correctamente");
    }
    Ok(())
}

async fn execute_edit(args: EditArgs, context: &Context, credentials: &Credentials) -> Result<()> {
    let today = today_or(args.today.as_deref())?;
    let client = client(context)?;
    let bonds = client
        .list_bonds(credentials)
        .await
        .map_err(CliError::from)?;
    let bond = bonds
        .iter()
        .find(|bond| bond.id == args.id)
        .ok_or(CliError::BondNotFound(args.id))?;

    let draft =
        BondDraft::from_bond(bond).map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    let mut form = BondForm::with_draft(draft, today);
    apply_assignments(&mut form, &args.assignments)?;

    submit(
        context,
        credentials,
        &mut form,
        today,
        SubmitTarget::Update(args.id),
    )
    .await?;
    if !context.quiet {
        print_success(&format!("Bono {} actualizado correctamente", args.id));
    }
    Ok(())
}

async fn execute_delete(
    args: DeleteArgs,
    context: &Context,
    credentials: &Credentials,
) -> Result<()> {
    if !args.yes {
        return Err(CliError::InvalidArgument(format!(
            "confirma la eliminación del bono {} con --yes",
            args.id
        ))
        .into());
    }
    let client = client(context)?;
    client
        .delete_bond(credentials, args.id)
        .await
        .map_err(CliError::from)?;
    if !context.quiet {
        print_success(&format!("Bono {} eliminado", args.id));
    }
    Ok(())
}

/// Sends the form and prints its feedback; field errors stay on the form.
async fn submit(
    context: &Context,
    credentials: &Credentials,
    form: &mut BondForm,
    today: chrono::NaiveDate,
    target: SubmitTarget,
) -> Result<()> {
    let submitter = BondSubmitter::new(client(context)?);
    match submitter.submit(credentials, form, today, target).await {
        Ok(submitted) => {
            print_warnings(&submitted.warnings);
            if context.format != OutputFormat::Table && !submitted.response.is_null() {
                print_single(&submitted.response, context.format)?;
            }
            Ok(())
        }
        Err(ClientError::Rejected(SubmitRejection::InvalidFields(errors))) => {
            print_field_errors(&errors);
            print_warnings(form.warnings());
            Err(CliError::InvalidDraft(errors.len()).into())
        }
        Err(err) => {
            print_warnings(form.warnings());
            Err(CliError::from(err).into())
        }
    }
}
