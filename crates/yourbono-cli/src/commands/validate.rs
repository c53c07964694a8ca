//! Validate command implementation.
//!
//! Runs a bond draft through the same checks as submission, without a
//! backend, and prints the payload it would send.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use yourbono_core::{BondDraft, BondPayload};
use yourbono_forms::bond::BusinessWarning;
use yourbono_forms::{BondForm, SubmitRejection};

use super::{apply_assignments, read_draft, today_or};
use crate::cli::{Context, OutputFormat};
use crate::error::CliError;
use crate::output::{
    print_field_errors, print_header, print_output, print_single, print_success, print_warnings,
    FeedbackRow,
};

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON draft file (camelCase field names, rates in percent)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Set a field, e.g. `--set interestRate=8.5` (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub assignments: Vec<String>,

    /// Date used for the emission-date checks (YYYY-MM-DD, default today)
    #[arg(long)]
    pub today: Option<String>,

    /// User id placed in the payload
    #[arg(long)]
    pub user_id: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationOutput<'a> {
    valid: bool,
    errors: Vec<FeedbackRow>,
    warnings: &'a [BusinessWarning],
    payload: Option<BondPayload>,
}

/// Executes the validate command.
pub fn execute(args: ValidateArgs, context: &Context) -> Result<()> {
    let today = today_or(args.today.as_deref())?;

    let mut draft = match &args.file {
        Some(path) => read_draft(path)?,
        None => BondDraft::new(0, today),
    };
    if let Some(user_id) = args.user_id {
        draft.user_id = user_id;
    }

    let mut form = BondForm::with_draft(draft, today);
    apply_assignments(&mut form, &args.assignments)?;

    let (payload, error_count) = match form.begin_submit(today) {
        Ok(payload) => (Some(payload), 0),
        Err(SubmitRejection::InvalidFields(errors)) => (None, errors.len()),
        Err(rejection) => {
            let message = form
                .submission_error()
                .map_or_else(|| rejection.to_string(), str::to_string);
            return Err(CliError::NotSubmitted(message).into());
        }
    };

    match context.format {
        OutputFormat::Json => {
            let output = ValidationOutput {
                valid: payload.is_some(),
                errors: FeedbackRow::collect(form.errors(), &[]),
                warnings: form.warnings(),
                payload: payload.clone(),
            };
            print_single(&output, context.format)?;
        }
        OutputFormat::Table => {
            print_field_errors(form.errors());
            print_warnings(form.warnings());
            if let Some(payload) = &payload {
                if !context.quiet {
                    print_header("Datos a enviar");
                }
                print_single(payload, OutputFormat::Json)?;
            }
        }
        OutputFormat::Csv | OutputFormat::Minimal => {
            print_output(
                &FeedbackRow::collect(form.errors(), form.warnings()),
                context.format,
            )?;
        }
    }

    if error_count > 0 {
        return Err(CliError::InvalidDraft(error_count).into());
    }
    if !context.quiet && context.format == OutputFormat::Table {
        print_success("El bono es válido");
    }
    Ok(())
}
