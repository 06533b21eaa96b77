// Splitting a whole tileset file into its regions and records, and putting
// it back together.
//
// A file is three regions separated by three consecutive line breaks:
// minitiles, graphics sets, arrangements. The graphics-set region has no
// record count and no record delimiter; records are recovered from the
// leading id digit of their lines.
use std::sync::OnceLock;

use itertools::Itertools;
use log::{debug, info};
use regex::Regex;

use crate::{
    common::{GraphicsSetId, TilesetId},
    error::{format_bail, format_ensure, Result},
    graphics_set::{GraphicsSet, GRAPHICS_SET_LINE_LEN},
    helpers::{is_line_break, LineBreak},
    tileset::Tileset,
};

fn region_separator_regex() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| {
        Regex::new(r"\r\n\r\n\r\n|\n\n\n|\r\r\r").expect("invalid region separator pattern")
    })
}

pub fn split_regions(text: &str) -> Result<[&str; 3]> {
    let regions: Vec<&str> = region_separator_regex().split(text).collect();
    match <[&str; 3]>::try_from(regions) {
        Ok(regions) => Ok(regions),
        Err(regions) => format_bail!(
            "tileset file must have 3 regions separated by blank lines, found {}",
            regions.len()
        ),
    }
}

pub fn detect_line_break(text: &str) -> Option<LineBreak> {
    let separator = region_separator_regex().find(text)?;
    let one = &separator.as_str()[..separator.len() / 3];
    LineBreak::from_str_exact(one)
}

/// Recover the graphics-set records of region 2.
///
/// A record ends where a line starts with a character other than the id
/// character of the record's first line. Two adjacent records that share an
/// id character are not told apart and come back as one record.
pub fn split_graphics_set_records(region: &str) -> Result<Vec<&str>> {
    let region = region.trim();
    let length = region.chars().count();
    format_ensure!(
        length >= GRAPHICS_SET_LINE_LEN,
        "graphics set region is {} characters, shorter than one {}-character line",
        length,
        GRAPHICS_SET_LINE_LEN
    );

    let mut records = vec![];
    let mut start = 0;
    let mut id_char = region.chars().next();
    let mut prev: Option<char> = None;
    for (i, c) in region.char_indices() {
        if let Some(p) = prev {
            if is_line_break(p) && !is_line_break(c) && Some(c) != id_char {
                records.push(region[start..i].trim());
                start = i;
                id_char = Some(c);
            }
        }
        prev = Some(c);
    }
    records.push(region[start..].trim());
    debug!("Split graphics set region into {} records", records.len());
    Ok(records)
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TilesetFile {
    pub tileset: Tileset,
    pub graphics_sets: Vec<GraphicsSet>,
    pub line_break: LineBreak,
    pub trailing_line_break: bool,
}

impl TilesetFile {
    pub fn new(tileset: Tileset, graphics_sets: Vec<GraphicsSet>) -> Self {
        TilesetFile {
            tileset,
            graphics_sets,
            line_break: LineBreak::Lf,
            trailing_line_break: true,
        }
    }

    pub fn parse(text: &str, tileset_number: TilesetId) -> Result<Self> {
        let [minitile_region, graphics_region, arrangement_region] = split_regions(text)?;
        let line_break = detect_line_break(text).unwrap_or_default();
        let trailing_line_break = text.ends_with(line_break.as_str());

        let mut graphics_sets = vec![];
        for (i, record) in split_graphics_set_records(graphics_region)?
            .into_iter()
            .enumerate()
        {
            match GraphicsSet::from_text(record, tileset_number) {
                Ok(set) => graphics_sets.push(set),
                Err(e) => format_bail!("graphics set record {}: {}", i, e.message()),
            }
        }
        let tileset = Tileset::from_regions(minitile_region, arrangement_region)?;
        info!(
            "Parsed tileset {} with {} graphics sets ({})",
            tileset_number,
            graphics_sets.len(),
            graphics_sets.iter().map(|g| g.id).join(", ")
        );
        Ok(TilesetFile {
            tileset,
            graphics_sets,
            line_break,
            trailing_line_break,
        })
    }

    pub fn to_text(&self) -> String {
        let lb = self.line_break;
        let graphics = self
            .graphics_sets
            .iter()
            .map(|set| set.to_text_with(lb))
            .join(lb.as_str());
        let mut out = [
            self.tileset.minitiles_to_text(lb),
            graphics,
            self.tileset.arrangements_to_text(lb),
        ]
        .join(&lb.repeat(3));
        if self.trailing_line_break {
            out.push_str(lb.as_str());
        }
        out
    }

    pub fn graphics_set(&self, id: GraphicsSetId) -> Option<&GraphicsSet> {
        self.graphics_sets.iter().find(|set| set.id == id)
    }
}
