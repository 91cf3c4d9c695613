use crate::cli::DatasetArgs;
use crate::error::CliError;

use super::{record_errors, CommandResult, Context};

pub fn run(args: &DatasetArgs, context: &Context) -> Result<CommandResult, CliError> {
    let (dataset, output) = context.execute(args)?;

    let warnings = output.diagnostics.warnings();
    let errors = record_errors(&output);
    let data = serde_json::to_value(&output)?;

    Ok(CommandResult::ok(data, dataset)
        .with_warnings(warnings)
        .with_errors(errors))
}
