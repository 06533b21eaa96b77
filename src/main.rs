use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use log::{error, info, warn};
use serde::Serialize;

use coilsnake_tileset::{
    common::TilesetId,
    config::{get_global_config_path, GlobalConfig},
    persist::{
        load_global_config, load_tileset_file, save_global_config, save_tileset_file,
        to_json_string, tileset_number_from_path,
    },
    Color, ScalerKind, TilesetFile,
};

#[derive(Parser, Debug)]
#[command(name = "coilsnake-tileset", about = "Check and convert CoilSnake tileset files")]
struct Args {
    /// Color scaler to use instead of the configured default
    #[arg(long, global = true)]
    scaler: Option<ScalerKind>,

    /// Config file to use instead of the one in the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse every matching tileset file and report errors
    Check {
        #[arg(required = true)]
        patterns: Vec<String>,
    },
    /// Parse a tileset file, write it back, and compare with the original
    Roundtrip {
        file: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
        /// Tileset number, when it can't be taken from the file name
        #[arg(long)]
        tileset: Option<i64>,
    },
    /// Print a JSON summary of a tileset file
    Info {
        file: PathBuf,
        #[arg(long)]
        tileset: Option<i64>,
    },
    /// Convert a color between "#rrggbb" and three-digit base-32 form
    Color { value: String },
    /// Show the config, or change the default scaler
    Config {
        #[arg(long)]
        set_scaler: Option<ScalerKind>,
    },
}

#[derive(Serialize)]
struct GraphicsSetSummary {
    id: u16,
    palette_sets: usize,
}

#[derive(Serialize)]
struct TilesetSummary {
    tileset: u16,
    graphics_sets: Vec<GraphicsSetSummary>,
    blank_minitiles: usize,
    unused_minitiles: usize,
    most_used_minitiles: Vec<(u16, usize)>,
}

fn tileset_number(path: &Path, explicit: Option<i64>) -> Result<TilesetId> {
    match explicit {
        Some(n) => Ok(TilesetId::new(n)?),
        None => match tileset_number_from_path(path) {
            Some(n) => Ok(n),
            None => {
                warn!(
                    "Cannot tell tileset number from {}, using 0",
                    path.display()
                );
                Ok(TilesetId::MIN)
            }
        },
    }
}

fn check(patterns: &[String]) -> Result<()> {
    let mut failures = 0;
    let mut count = 0;
    for pattern in patterns {
        for entry in glob::glob(pattern)? {
            let path = entry?;
            count += 1;
            let number = tileset_number(&path, None)?;
            match load_tileset_file(&path, number) {
                Ok(file) => info!(
                    "{}: ok ({} graphics sets)",
                    path.display(),
                    file.graphics_sets.len()
                ),
                Err(e) => {
                    error!("{}: {:#}", path.display(), e);
                    failures += 1;
                }
            }
        }
    }
    if count == 0 {
        bail!("No files matched {}", patterns.iter().join(", "));
    }
    info!("Checked {} files, {} failed", count, failures);
    if failures > 0 {
        bail!("{} of {} tileset files are invalid", failures, count);
    }
    Ok(())
}

fn roundtrip(path: &Path, output: Option<&Path>, explicit: Option<i64>) -> Result<()> {
    let number = tileset_number(path, explicit)?;
    let original = std::fs::read_to_string(path)
        .with_context(|| format!("Unable to read {}", path.display()))?;
    let file = TilesetFile::parse(&original, number)?;
    let text = file.to_text();
    if let Some(output) = output {
        save_tileset_file(output, &file)?;
    }
    if text == original {
        println!("{}: identical", path.display());
        Ok(())
    } else {
        let first_diff = original
            .chars()
            .zip(text.chars())
            .position(|(a, b)| a != b)
            .unwrap_or(original.len().min(text.len()));
        bail!(
            "{}: re-encoded text differs from the original at character {}",
            path.display(),
            first_diff
        )
    }
}

fn summarize(file: &TilesetFile, number: TilesetId) -> TilesetSummary {
    let usage = file.tileset.tile_usage();
    TilesetSummary {
        tileset: number.get(),
        graphics_sets: file
            .graphics_sets
            .iter()
            .map(|set| GraphicsSetSummary {
                id: set.id.get(),
                palette_sets: set.palette_sets().len(),
            })
            .collect(),
        blank_minitiles: file
            .tileset
            .minitiles()
            .iter()
            .filter(|tile| tile.is_blank())
            .count(),
        unused_minitiles: file.tileset.unused_minitiles().len(),
        most_used_minitiles: usage
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
            .take(5)
            .collect(),
    }
}

fn info_command(path: &Path, explicit: Option<i64>) -> Result<()> {
    let number = tileset_number(path, explicit)?;
    let file = load_tileset_file(path, number)?;
    println!("{}", to_json_string(&summarize(&file, number))?);
    Ok(())
}

fn color(value: &str, scaler: ScalerKind) -> Result<()> {
    let color = if value.starts_with('#') {
        Color::from_hex(value, scaler)?
    } else {
        Color::from_base32(value)?
    };
    let [r, g, b, a] = color.to_rgba(scaler);
    println!("base32: {}", color.to_base32());
    println!("hex:    {}", color.to_hex(scaler));
    println!("rgba:   {} {} {} {}", r, g, b, a);
    println!(
        "5-bit:  {} {} {} ({})",
        color.red, color.green, color.blue, scaler
    );
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_global_config_path()?,
    };
    let mut config: GlobalConfig = load_global_config(&config_path)?;
    let scaler = config.resolve_scaler(args.scaler);

    match args.command {
        Command::Check { patterns } => check(&patterns),
        Command::Roundtrip {
            file,
            output,
            tileset,
        } => roundtrip(&file, output.as_deref(), tileset),
        Command::Info { file, tileset } => info_command(&file, tileset),
        Command::Color { value } => color(&value, scaler),
        Command::Config { set_scaler } => {
            if let Some(s) = set_scaler {
                config.set_default_scaler(s);
                save_global_config(&config_path, &mut config)?;
            }
            println!("config: {}", config_path.display());
            println!("{}", to_json_string(&config)?);
            Ok(())
        }
    }
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    run(args)
}
