use std::io::{self, Write};

use log::warn;
use sectorscope_core::Envelope;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(envelope)?,
    }

    Ok(())
}

/// Print a standalone document. Envelope warnings and errors go to the log
/// since stdout carries the document itself.
pub fn write_document(document: &str, envelope: &Envelope<Value>) -> Result<(), CliError> {
    for warning in &envelope.meta.warnings {
        warn!("{warning}");
    }
    for error in &envelope.errors {
        warn!("{}: {}", error.code, error.message);
    }

    let mut stdout = io::stdout().lock();
    stdout.write_all(document.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn render_table(envelope: &Envelope<Value>) -> Result<(), CliError> {
    println!("request_id  : {}", envelope.meta.request_id);
    println!("schema      : {}", envelope.meta.schema_version);
    println!("generated_at: {}", envelope.meta.generated_at);
    println!("dataset     : {}", envelope.meta.dataset);

    if !envelope.meta.warnings.is_empty() {
        println!("warnings:");
        for warning in &envelope.meta.warnings {
            println!("  - {warning}");
        }
    }

    println!("data:");
    let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
    for line in pretty_data.lines() {
        println!("  {line}");
    }

    if !envelope.errors.is_empty() {
        println!("errors:");
        for error in &envelope.errors {
            match error.record_index {
                Some(index) => println!("  - {} [record {index}]: {}", error.code, error.message),
                None => println!("  - {}: {}", error.code, error.message),
            }
        }
    }

    Ok(())
}
