//! Sector catalog and dataset loading.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{PipelineError, ValidationError};

/// Directory searched for sector datasets unless overridden.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Industry sectors with a bundled dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Ai,
    #[serde(rename = "oil")]
    OilGas,
}

impl Sector {
    pub const ALL: [Self; 2] = [Self::Ai, Self::OilGas];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::OilGas => "oil",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ai => "Integrated circuits (AI)",
            Self::OilGas => "Oil & gas",
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Ai => "ai_sector.json",
            Self::OilGas => "oil_gas_sector.json",
        }
    }
}

impl Display for Sector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ai" => Ok(Self::Ai),
            "oil" | "oil-gas" | "oil_gas" => Ok(Self::OilGas),
            other => Err(ValidationError::InvalidSector {
                value: other.to_owned(),
            }),
        }
    }
}

/// Reads sector datasets from a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLoader {
    data_dir: PathBuf,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl DatasetLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, sector: Sector) -> PathBuf {
        self.data_dir.join(sector.file_name())
    }

    pub fn load_sector(&self, sector: Sector) -> Result<Value, PipelineError> {
        self.load_path(self.path_for(sector))
    }

    /// Read and decode a dataset file. Structural checks are left to the
    /// normalizer.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Value, PipelineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let value: Value = serde_json::from_str(&content)?;
        info!("loaded dataset {} ({} bytes)", path.display(), content.len());
        Ok(value)
    }
}
