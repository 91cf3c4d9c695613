mod pipeline;
mod render;
mod sectors;

use log::info;
use sectorscope_core::{
    DatasetLoader, Envelope, EnvelopeError, EnvelopeMeta, Pipeline, PipelineOutput, ViewConfig,
};
use serde_json::Value;
use uuid::Uuid;

use crate::cli::{Cli, Command, DatasetArgs};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    /// Sector id or file path the data came from.
    pub dataset: String,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    /// Standalone document (SVG) printed instead of the envelope.
    pub document: Option<String>,
}

impl CommandResult {
    pub fn ok(data: Value, dataset: impl Into<String>) -> Self {
        Self {
            data,
            dataset: dataset.into(),
            warnings: Vec::new(),
            errors: Vec::new(),
            document: None,
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }

    pub fn with_document(mut self, document: String) -> Self {
        self.document = Some(document);
        self
    }
}

/// What a command hands back to `main` for printing.
#[derive(Debug)]
pub struct Response {
    pub envelope: Envelope<Value>,
    pub document: Option<String>,
}

pub fn run(cli: &Cli) -> Result<Response, CliError> {
    let command_result = match &cli.command {
        Command::Pipeline(args) => pipeline::run(args, &load_context(cli)?)?,
        Command::Render(args) => render::run(args, &load_context(cli)?)?,
        Command::Sectors => sectors::run(&DatasetLoader::new(&cli.data_dir))?,
    };

    let CommandResult {
        data,
        dataset,
        warnings,
        errors,
        document,
    } = command_result;

    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), dataset)?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    let envelope = Envelope::with_errors(meta, data, errors)?;
    Ok(Response { envelope, document })
}

/// Shared state for commands that run the pipeline.
pub struct Context {
    pub loader: DatasetLoader,
    pub pipeline: Pipeline,
}

impl Context {
    /// Load the selected dataset and run the pipeline over it.
    pub fn execute(&self, args: &DatasetArgs) -> Result<(String, PipelineOutput), CliError> {
        let (label, dataset) = match (&args.sector, &args.file) {
            (Some(sector), _) => (sector.to_string(), self.loader.load_sector(*sector)?),
            (None, Some(path)) => (path.display().to_string(), self.loader.load_path(path)?),
            (None, None) => {
                return Err(CliError::Command(String::from(
                    "either --sector or --file is required",
                )))
            }
        };

        let output = self.pipeline.run_value(&dataset)?;
        info!(
            "{label}: {} records, {} companies, {} rejected",
            output.diagnostics.total_records,
            output.diagnostics.companies,
            output.diagnostics.rejected.len()
        );
        Ok((label, output))
    }
}

fn load_context(cli: &Cli) -> Result<Context, CliError> {
    let config = ViewConfig::resolve(cli.config.as_deref())?;
    Ok(Context {
        loader: DatasetLoader::new(&cli.data_dir),
        pipeline: Pipeline::new(config),
    })
}

/// Envelope errors for every record the normalizer skipped.
fn record_errors(output: &PipelineOutput) -> Vec<EnvelopeError> {
    output
        .diagnostics
        .rejected
        .iter()
        .map(EnvelopeError::from)
        .collect()
}
