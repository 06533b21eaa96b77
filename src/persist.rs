use std::{fs, path::Path};

use anyhow::{Context, Result};
use json_pretty_compact::PrettyCompactFormatter;
use log::info;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Serializer;

use crate::{common::TilesetId, config::GlobalConfig, file::TilesetFile};

pub fn to_json_string<T: Serialize>(data: &T) -> Result<String> {
    let formatter = PrettyCompactFormatter::new();
    let mut data_bytes = vec![];
    let mut ser = Serializer::with_formatter(&mut data_bytes, formatter);
    data.serialize(&mut ser)?;
    Ok(String::from_utf8(data_bytes)?)
}

pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    info!("Saving {}", path.display());
    let data_str = to_json_string(data)?;
    fs::create_dir_all(path.parent().context("invalid parent directory")?)?;
    fs::write(path, data_str)?;
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    info!("Loading {}", path.display());
    let data_bytes = std::fs::read(path)?;
    let data: T = serde_json::from_slice(&data_bytes)?;
    Ok(data)
}

pub fn load_global_config(path: &Path) -> Result<GlobalConfig> {
    if !path.exists() {
        info!("No config at {}, using defaults", path.display());
        return Ok(GlobalConfig::default());
    }
    load_json(path).with_context(|| format!("Unable to read config {}", path.display()))
}

pub fn save_global_config(path: &Path, config: &mut GlobalConfig) -> Result<()> {
    if config.modified {
        save_json(path, config)?;
        config.modified = false;
    }
    Ok(())
}

/// Tileset files are named by their number, e.g. "05.fts".
pub fn tileset_number_from_path(path: &Path) -> Option<TilesetId> {
    let stem = path.file_stem()?.to_str()?;
    let number: i64 = stem.parse().ok()?;
    TilesetId::new(number).ok()
}

pub fn load_tileset_file(path: &Path, tileset_number: TilesetId) -> Result<TilesetFile> {
    info!("Loading {}", path.display());
    let text = fs::read_to_string(path)
        .with_context(|| format!("Unable to read tileset file {}", path.display()))?;
    let file = TilesetFile::parse(&text, tileset_number)
        .with_context(|| format!("Invalid tileset file {}", path.display()))?;
    Ok(file)
}

pub fn save_tileset_file(path: &Path, file: &TilesetFile) -> Result<()> {
    info!("Saving {}", path.display());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, file.to_text())?;
    Ok(())
}
