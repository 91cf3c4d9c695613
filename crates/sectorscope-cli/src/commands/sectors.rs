use sectorscope_core::{DatasetLoader, Sector};
use serde::Serialize;

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct SectorEntry {
    id: Sector,
    label: &'static str,
    path: String,
    available: bool,
}

#[derive(Debug, Serialize)]
struct SectorsResponseData {
    sectors: Vec<SectorEntry>,
}

pub fn run(loader: &DatasetLoader) -> Result<CommandResult, CliError> {
    let sectors = Sector::ALL
        .into_iter()
        .map(|id| {
            let path = loader.path_for(id);
            SectorEntry {
                id,
                label: id.label(),
                available: path.is_file(),
                path: path.display().to_string(),
            }
        })
        .collect::<Vec<_>>();

    let missing = sectors
        .iter()
        .filter(|entry| !entry.available)
        .map(|entry| format!("dataset for sector '{}' not found at {}", entry.id, entry.path))
        .collect();

    let data = serde_json::to_value(SectorsResponseData { sectors })?;
    Ok(CommandResult::ok(data, loader.data_dir().display().to_string()).with_warnings(missing))
}
