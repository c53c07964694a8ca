//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};
use yourbono_forms::bond::{BusinessWarning, FieldErrors};

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints a single serializable value.
pub fn print_single<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.serialize(data)?;
            wtr.flush()?;
        }
        OutputFormat::Minimal => println!("{}", serde_json::to_string(data)?),
        OutputFormat::Table | OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
    }
    Ok(())
}

fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("Sin resultados.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Prints field errors, one per line, to stderr.
pub fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        print_error(&format!("{}: {message}", field.label()));
    }
}

/// Prints business warnings, one per line, to stderr.
pub fn print_warnings(warnings: &[BusinessWarning]) {
    for warning in warnings {
        print_warning(&format!("{}: {}", warning.field.label(), warning.message));
    }
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Campo")]
    pub key: String,
    #[tabled(rename = "Valor")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One row of field feedback.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct FeedbackRow {
    #[tabled(rename = "Tipo")]
    pub kind: &'static str,
    #[tabled(rename = "Campo")]
    pub field: String,
    #[tabled(rename = "Mensaje")]
    pub message: String,
}

impl FeedbackRow {
    /// Rows for every error then every warning.
    pub fn collect(errors: &FieldErrors, warnings: &[BusinessWarning]) -> Vec<Self> {
        errors
            .iter()
            .map(|(field, message)| Self {
                kind: "error",
                field: field.as_str().to_string(),
                message: message.to_string(),
            })
            .chain(warnings.iter().map(|warning| Self {
                kind: "advertencia",
                field: warning.field.as_str().to_string(),
                message: warning.message.clone(),
            }))
            .collect()
    }
}
