// A graphics set is one record of a tileset file's palette region: between one
// and eight lines, each "<id digit><palette-set digit><288 base-32 digits>".
use itertools::Itertools;

use crate::{
    common::{GraphicsSetId, TilesetId, MAX_PALETTE_SETS},
    error::{format_bail, format_ensure, Result},
    helpers::{split_lines, LineBreak},
    palette::PaletteSet,
    primitives::{base32_digit, base32_digit_value, ConstrainedString, StringKind},
};

pub const GRAPHICS_SET_LINE_LEN: usize = 290;

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct GraphicsSet {
    pub id: GraphicsSetId,
    pub tileset: TilesetId,
    palette_sets: Vec<PaletteSet>,
}

// Map sectors refer to the same records under this name.
pub type SectorGraphicsSet = GraphicsSet;

impl GraphicsSet {
    pub fn new(id: GraphicsSetId, tileset: TilesetId, palette_sets: Vec<PaletteSet>) -> Result<Self> {
        Self::check_count(palette_sets.len())?;
        Ok(GraphicsSet {
            id,
            tileset,
            palette_sets,
        })
    }

    fn check_count(count: usize) -> Result<()> {
        format_ensure!(
            (1..=MAX_PALETTE_SETS).contains(&count),
            "graphics set must have 1 to {} palette sets, got {}",
            MAX_PALETTE_SETS,
            count
        );
        Ok(())
    }

    /// Parse one record. Line `i` must carry palette-set digit `i`, and every
    /// line must start with the same id digit.
    pub fn from_text(s: &str, tileset: TilesetId) -> Result<Self> {
        let lines = split_lines(s);
        Self::check_count(lines.len())?;

        let mut id_digit: Option<char> = None;
        let mut palette_sets = vec![];
        for (i, line) in lines.into_iter().enumerate() {
            let wire = ConstrainedString::new(StringKind::GraphicsSetLine, line)?;
            let line = wire.as_str();
            let mut chars = line.chars();
            let (Some(id_char), Some(index_char)) = (chars.next(), chars.next()) else {
                format_bail!("graphics set line {} is too short", i);
            };
            match id_digit {
                None => id_digit = Some(id_char),
                Some(expected) if expected != id_char => {
                    format_bail!(
                        "graphics set line {} has id {:?}, expected {:?}",
                        i,
                        id_char,
                        expected
                    );
                }
                Some(_) => {}
            }
            let index = base32_digit_value(index_char)? as usize;
            format_ensure!(
                index == i,
                "graphics set {:?}: line {} is labelled palette set {}",
                id_char,
                i,
                index
            );
            palette_sets.push(PaletteSet::from_base32(&line[2..])?);
        }

        let Some(id_char) = id_digit else {
            format_bail!("graphics set has no lines");
        };
        Ok(GraphicsSet {
            id: GraphicsSetId::new(base32_digit_value(id_char)? as i64)?,
            tileset,
            palette_sets,
        })
    }

    pub fn to_text(&self) -> String {
        self.to_text_with(LineBreak::Lf)
    }

    pub fn to_text_with(&self, line_break: LineBreak) -> String {
        let id_char = base32_digit(self.id);
        self.palette_sets
            .iter()
            .enumerate()
            .map(|(i, set)| format!("{}{}{}", id_char, i, set.to_base32()))
            .join(line_break.as_str())
    }

    pub fn palette_sets(&self) -> &[PaletteSet] {
        &self.palette_sets
    }

    pub fn palette_set(&self, number: usize) -> Result<&PaletteSet> {
        match self.palette_sets.get(number) {
            Some(set) => Ok(set),
            None => format_bail!(
                "graphics set {} has no palette set {} (has {})",
                self.id,
                number,
                self.palette_sets.len()
            ),
        }
    }

    pub fn push_palette_set(&mut self, set: PaletteSet) -> Result<()> {
        Self::check_count(self.palette_sets.len() + 1)?;
        self.palette_sets.push(set);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(seed: u32) -> String {
        (0..288u32)
            .map(|i| std::char::from_digit((i * 3 + seed) % 32, 32).unwrap())
            .collect()
    }

    fn record(id: char, count: usize) -> String {
        (0..count)
            .map(|i| format!("{}{}{}", id, i, group(i as u32)))
            .join("\n")
    }

    fn tileset() -> TilesetId {
        TilesetId::new(3).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let text = record('k', 3);
        let set = GraphicsSet::from_text(&text, tileset()).unwrap();
        assert_eq!(set.id.get(), 20);
        assert_eq!(set.tileset, tileset());
        assert_eq!(set.palette_sets().len(), 3);
        assert_eq!(set.to_text(), text);
        assert_eq!(set.palette_set(2).unwrap().to_base32(), group(2));
        assert!(set.palette_set(3).is_err());
    }

    #[test]
    fn test_crlf_lines() {
        let text = record('0', 2).replace('\n', "\r\n");
        let set = GraphicsSet::from_text(&text, tileset()).unwrap();
        assert_eq!(set.to_text_with(LineBreak::CrLf), text);
    }

    #[test]
    fn test_rejects_misordered_lines() {
        let text = format!("a1{}\na0{}", group(0), group(1));
        let err = GraphicsSet::from_text(&text, tileset()).unwrap_err();
        assert!(err.message().contains("line 0 is labelled palette set 1"));
    }

    #[test]
    fn test_rejects_missing_line() {
        let text = format!("a0{}\na2{}", group(0), group(1));
        assert!(GraphicsSet::from_text(&text, tileset()).is_err());
    }

    #[test]
    fn test_rejects_mixed_ids() {
        let text = format!("a0{}\nb1{}", group(0), group(1));
        let err = GraphicsSet::from_text(&text, tileset()).unwrap_err();
        assert!(err.message().contains("has id 'b'"));
    }

    #[test]
    fn test_line_count_limits() {
        assert!(GraphicsSet::from_text(&record('1', 8), tileset()).is_ok());
        assert!(GraphicsSet::from_text("", tileset()).is_err());
        assert!(GraphicsSet::new(GraphicsSetId::MIN, tileset(), vec![]).is_err());

        let mut set = GraphicsSet::from_text(&record('1', 8), tileset()).unwrap();
        assert!(set.push_palette_set(PaletteSet::default()).is_err());
    }

    #[test]
    fn test_rejects_short_line() {
        let text = format!("a0{}", &group(0)[1..]);
        assert!(GraphicsSet::from_text(&text, tileset()).is_err());
    }
}
