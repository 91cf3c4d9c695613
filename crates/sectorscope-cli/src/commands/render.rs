use std::fs;

use log::info;
use sectorscope_core::View;
use sectorscope_render::Scene;
use serde::Serialize;
use serde_json::Value;

use crate::cli::RenderArgs;
use crate::error::CliError;

use super::{record_errors, CommandResult, Context};

#[derive(Debug, Serialize)]
struct RenderSummary<'a> {
    view: &'static str,
    width: f64,
    height: f64,
    elements: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    out: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scene: Option<&'a Scene>,
}

pub fn run(args: &RenderArgs, context: &Context) -> Result<CommandResult, CliError> {
    let (dataset, output) = context.execute(&args.dataset)?;
    let view = View::from(args.view);
    let config = context.pipeline.config();

    let scene = match view {
        View::Line => sectorscope_render::line(&output.line, &config.line),
        View::Treemap => sectorscope_render::treemap(&output.treemap, &config.treemap),
    };

    let mut summary = RenderSummary {
        view: view.as_str(),
        width: scene.width,
        height: scene.height,
        elements: scene.walk().len(),
        out: None,
        scene: None,
    };

    let mut document = None;
    if args.scene {
        summary.scene = Some(&scene);
    } else if let Some(path) = &args.out {
        fs::write(path, scene.to_svg())?;
        info!("wrote {view} view to {}", path.display());
        summary.out = Some(path.display().to_string());
    } else {
        document = Some(scene.to_svg());
    }

    let data: Value = serde_json::to_value(&summary)?;
    let result = CommandResult::ok(data, dataset)
        .with_warnings(output.diagnostics.warnings())
        .with_errors(record_errors(&output));

    Ok(match document {
        Some(svg) => result.with_document(svg),
        None => result,
    })
}
