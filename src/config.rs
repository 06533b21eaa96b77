use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scaler::ScalerKind;

#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq, Debug)]
#[serde(default)]
pub struct GlobalConfig {
    #[serde(skip_serializing, skip_deserializing)]
    pub modified: bool,
    pub default_scaler: ScalerKind,
}

impl GlobalConfig {
    pub fn resolve_scaler(&self, requested: Option<ScalerKind>) -> ScalerKind {
        requested.unwrap_or(self.default_scaler)
    }

    pub fn set_default_scaler(&mut self, scaler: ScalerKind) {
        if self.default_scaler != scaler {
            self.default_scaler = scaler;
            self.modified = true;
        }
    }
}

pub fn get_global_config_path() -> Result<PathBuf> {
    let project_dirs = directories::ProjectDirs::from("", "", "CoilSnakeTileset")
        .context("Unable to open global config directory.")?;
    let config_dir = project_dirs.config_dir();
    let config_path = config_dir.join("config.json");
    Ok(config_path)
}
