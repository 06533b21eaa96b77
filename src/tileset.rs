use hashbrown::HashMap;
use itertools::Itertools;
use log::debug;

use crate::{
    arrangement::Arrangement,
    common::{TILESET_ARRANGEMENTS, TILESET_MINITILES},
    error::{format_bail, format_ensure, Result},
    helpers::{split_lines, LineBreak},
    minitile::Minitile,
};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tileset {
    minitiles: Vec<Minitile>,
    arrangements: Vec<Arrangement>,
}

impl Default for Tileset {
    fn default() -> Self {
        Tileset {
            minitiles: vec![Minitile::default(); TILESET_MINITILES],
            arrangements: vec![Arrangement::default(); TILESET_ARRANGEMENTS],
        }
    }
}

impl Tileset {
    pub fn new(minitiles: Vec<Minitile>, arrangements: Vec<Arrangement>) -> Result<Self> {
        format_ensure!(
            minitiles.len() == TILESET_MINITILES,
            "tileset needs {} minitiles, got {}",
            TILESET_MINITILES,
            minitiles.len()
        );
        format_ensure!(
            arrangements.len() == TILESET_ARRANGEMENTS,
            "tileset needs {} arrangements, got {}",
            TILESET_ARRANGEMENTS,
            arrangements.len()
        );
        Ok(Tileset {
            minitiles,
            arrangements,
        })
    }

    pub fn from_regions(minitile_region: &str, arrangement_region: &str) -> Result<Self> {
        let minitiles = Self::parse_minitiles(minitile_region)?;
        let arrangements = Self::parse_arrangements(arrangement_region)?;
        debug!(
            "Parsed {} minitiles and {} arrangements",
            minitiles.len(),
            arrangements.len()
        );
        Self::new(minitiles, arrangements)
    }

    fn parse_minitiles(region: &str) -> Result<Vec<Minitile>> {
        let lines = split_lines(region.trim());
        // Each record is background, foreground, blank; the last blank is
        // consumed by the region separator.
        format_ensure!(
            lines.len() == TILESET_MINITILES * 3 - 1,
            "minitile region must hold {} minitiles ({} lines), got {} lines",
            TILESET_MINITILES,
            TILESET_MINITILES * 3 - 1,
            lines.len()
        );
        let mut minitiles = Vec::with_capacity(TILESET_MINITILES);
        for (i, record) in lines.chunks(3).enumerate() {
            if let Some(separator) = record.get(2) {
                format_ensure!(
                    separator.is_empty(),
                    "minitile {} is not followed by a blank line",
                    i
                );
            }
            let text = format!("{}\n{}", record[0], record[1]);
            match Minitile::from_text(&text) {
                Ok(tile) => minitiles.push(tile),
                Err(e) => format_bail!("minitile {}: {}", i, e.message()),
            }
        }
        Ok(minitiles)
    }

    fn parse_arrangements(region: &str) -> Result<Vec<Arrangement>> {
        let lines = split_lines(region.trim());
        format_ensure!(
            lines.len() == TILESET_ARRANGEMENTS,
            "arrangement region must hold {} lines, got {}",
            TILESET_ARRANGEMENTS,
            lines.len()
        );
        let mut arrangements = Vec::with_capacity(TILESET_ARRANGEMENTS);
        for (i, line) in lines.into_iter().enumerate() {
            match Arrangement::from_hex(line) {
                Ok(arrangement) => arrangements.push(arrangement),
                Err(e) => format_bail!("arrangement {}: {}", i, e.message()),
            }
        }
        Ok(arrangements)
    }

    pub fn minitiles_to_text(&self, line_break: LineBreak) -> String {
        self.minitiles
            .iter()
            .map(|tile| tile.to_text_with(line_break))
            .join(&line_break.repeat(2))
    }

    pub fn arrangements_to_text(&self, line_break: LineBreak) -> String {
        self.arrangements
            .iter()
            .map(Arrangement::to_hex)
            .join(line_break.as_str())
    }

    pub fn minitile(&self, idx: usize) -> Result<&Minitile> {
        match self.minitiles.get(idx) {
            Some(tile) => Ok(tile),
            None => format_bail!("minitile index {} out of range (0-{})", idx, TILESET_MINITILES - 1),
        }
    }

    pub fn arrangement(&self, idx: usize) -> Result<&Arrangement> {
        match self.arrangements.get(idx) {
            Some(arrangement) => Ok(arrangement),
            None => format_bail!(
                "arrangement index {} out of range (0-{})",
                idx,
                TILESET_ARRANGEMENTS - 1
            ),
        }
    }

    pub fn arrangement_mut(&mut self, idx: usize) -> Result<&mut Arrangement> {
        match self.arrangements.get_mut(idx) {
            Some(arrangement) => Ok(arrangement),
            None => format_bail!(
                "arrangement index {} out of range (0-{})",
                idx,
                TILESET_ARRANGEMENTS - 1
            ),
        }
    }

    pub fn minitiles(&self) -> &[Minitile] {
        &self.minitiles
    }

    pub fn arrangements(&self) -> &[Arrangement] {
        &self.arrangements
    }

    pub fn tile_usage(&self) -> HashMap<u16, usize> {
        let mut usage: HashMap<u16, usize> = HashMap::new();
        for cell in self.arrangements.iter().flat_map(|a| a.cells.iter()) {
            *usage.entry(cell.tile_index.get()).or_default() += 1;
        }
        usage
    }

    pub fn unused_minitiles(&self) -> Vec<usize> {
        let usage = self.tile_usage();
        (0..TILESET_MINITILES)
            .filter(|&i| !usage.contains_key(&(i as u16)))
            .collect()
    }
}
