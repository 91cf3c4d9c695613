//! View configuration.
//!
//! Loaded from TOML; every field has a default so a partial file (or none at
//! all) is valid:
//!
//! ```toml
//! [line]
//! window = 5
//! x_scale = "time"   # or "point"
//! tooltip = true
//!
//! [treemap]
//! window = 10
//! padding = 2.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ranking::View;
use crate::{ConfigError, ValidationError};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sectorscope.toml";

/// Root configuration for both chart views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub line: LineViewConfig,
    pub treemap: TreemapViewConfig,
}

/// How dates are laid out along the line chart's horizontal axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XScale {
    /// Continuous calendar time; gaps between trading days stay visible.
    #[default]
    Time,
    /// One evenly spaced slot per distinct date.
    Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineViewConfig {
    pub window: usize,
    pub x_scale: XScale,
    pub tooltip: bool,
    pub width: f64,
    pub height: f64,
}

impl Default for LineViewConfig {
    fn default() -> Self {
        Self {
            window: View::Line.default_window(),
            x_scale: XScale::Time,
            tooltip: true,
            width: 1200.0,
            height: 400.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreemapViewConfig {
    pub window: usize,
    pub width: f64,
    pub height: f64,
    /// Gap between neighbouring tiles, in pixels.
    pub padding: f64,
}

impl Default for TreemapViewConfig {
    fn default() -> Self {
        Self {
            window: View::Treemap.default_window(),
            width: 1200.0,
            height: 600.0,
            padding: 2.0,
        }
    }
}

impl ViewConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ViewConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, else `./sectorscope.toml` if present, else
    /// defaults. An explicit path that cannot be read is an error.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            debug!("loading view config from {}", fallback.display());
            return Self::load(fallback);
        }

        Ok(Self::default())
    }

    pub fn window(&self, view: View) -> usize {
        match view {
            View::Line => self.line.window,
            View::Treemap => self.treemap.window,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for view in View::ALL {
            if self.window(view) == 0 {
                return Err(ValidationError::EmptyWindow {
                    view: view.as_str(),
                });
            }
        }

        let dimensions = [
            ("line", "width", self.line.width),
            ("line", "height", self.line.height),
            ("treemap", "width", self.treemap.width),
            ("treemap", "height", self.treemap.height),
        ];
        for (view, field, value) in dimensions {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::InvalidCanvas { view, field });
            }
        }

        let padding = self.treemap.padding;
        if !padding.is_finite() || padding < 0.0 {
            return Err(ValidationError::InvalidCanvas {
                view: "treemap",
                field: "padding",
            });
        }

        Ok(())
    }
}
