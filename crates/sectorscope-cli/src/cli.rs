//! CLI argument definitions for sectorscope.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pipeline` | Run the data pipeline and print both view models |
//! | `render` | Render one view as SVG or as a JSON scene |
//! | `sectors` | List bundled sector datasets |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings and record errors as failures |
//! | `--config` | `./sectorscope.toml` | View configuration file |
//! | `--data-dir` | `data` | Directory holding sector datasets |
//!
//! # Examples
//!
//! ```bash
//! sectorscope pipeline --sector ai --pretty
//! sectorscope render --sector oil --view treemap --out oil.svg
//! sectorscope render --file prices.json --view line --scene
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sectorscope_core::dataset::DEFAULT_DATA_DIR;
use sectorscope_core::{Sector, View};

/// Sector stock comparison: ranked line chart and market-cap treemap.
#[derive(Debug, Parser)]
#[command(name = "sectorscope", author, version, about)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and record errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// View configuration file. Falls back to ./sectorscope.toml, then defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the sector datasets.
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object.
    Json,
    /// Human-readable summary.
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the pipeline and print the line selection, treemap hierarchy and
    /// diagnostics.
    ///
    /// # Examples
    ///
    ///   sectorscope pipeline --sector ai
    ///   sectorscope pipeline --file prices.json --pretty
    Pipeline(DatasetArgs),

    /// Render one view.
    ///
    /// Without `--out` the SVG document goes to stdout. `--scene` emits the
    /// drawing description as JSON inside the standard envelope instead.
    ///
    /// # Examples
    ///
    ///   sectorscope render --sector ai --view line > ai.svg
    ///   sectorscope render --sector oil --view treemap --out oil.svg
    Render(RenderArgs),

    /// List bundled sector datasets.
    Sectors,
}

/// Where the records come from: a bundled sector or an explicit file.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct DatasetArgs {
    /// Bundled sector (ai, oil).
    #[arg(long, value_parser = parse_sector)]
    pub sector: Option<Sector>,

    /// Path to a JSON array of records.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// View to render.
    #[arg(long, value_enum, default_value_t = ViewArg::Line)]
    pub view: ViewArg,

    /// Write the SVG document to this file.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Emit the scene as JSON instead of SVG.
    #[arg(long, default_value_t = false, conflicts_with = "out")]
    pub scene: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Line,
    Treemap,
}

impl From<ViewArg> for View {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::Line => Self::Line,
            ViewArg::Treemap => Self::Treemap,
        }
    }
}

fn parse_sector(value: &str) -> Result<Sector, String> {
    value.parse().map_err(|error: sectorscope_core::ValidationError| error.to_string())
}
