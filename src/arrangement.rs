// Arrangements: 4x4 grids of minitile references. Each cell is a 24-bit word
// written as hex:
//
//   bit 23     vertical flip
//   bit 22     horizontal flip
//   bit 21     unused
//   bits 20-18 subpalette select, stored as (logical value + 2)
//   bits 17-8  minitile index (the low 9 bits are used)
//   bits 7-0   surface flags
use crate::{
    common::{PaletteIdx, TileIdx, ARRANGEMENT_SIZE},
    error::{format_bail, format_ensure, Result},
    helpers::split_exact,
    primitives::{ConstrainedString, StringKind},
};

const CELL_DIGITS: usize = 6;
const ARRANGEMENT_CELLS: usize = ARRANGEMENT_SIZE * ARRANGEMENT_SIZE;

const VERTICAL_FLIP_BIT: u32 = 1 << 23;
const HORIZONTAL_FLIP_BIT: u32 = 1 << 22;
const PALETTE_SHIFT: u32 = 18;
const PALETTE_MASK: u32 = 0x7;
const PALETTE_OFFSET: i64 = 2;
const TILE_SHIFT: u32 = 8;
const TILE_MASK: u32 = 0x1FF;
// Wire bits with no field of their own: bit 21, and bit 17 at the top of the
// 10-bit tile index. They are carried so that re-encoding is exact.
const PASSTHROUGH_MASK: u32 = 1 << 21 | 1 << 17;

const SOLID_BIT: u32 = 0x80;
const FLAG_0X40_BIT: u32 = 0x40;
const FLAG_0X20_BIT: u32 = 0x20;
const INTERACTIVE_BIT: u32 = 0x10;
const WATER_BIT: u32 = 0x08;
const SUNSTROKE_BIT: u32 = 0x04;
const COVERS_UPPER_BODY_BIT: u32 = 0x02;
const COVERS_LOWER_BODY_BIT: u32 = 0x01;

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct ArrangementCell {
    pub vertical_flip: bool,
    pub horizontal_flip: bool,
    palette_select: PaletteIdx,
    pub tile_index: TileIdx,
    pub solid: bool,
    pub flag_0x40: bool,
    pub flag_0x20: bool,
    pub interactive: bool,
    pub water: bool,
    pub sunstroke: bool,
    pub covers_upper_body: bool,
    pub covers_lower_body: bool,
    passthrough: u32,
}

impl ArrangementCell {
    pub fn from_u24(word: u32) -> Result<Self> {
        format_ensure!(word <= 0xFF_FFFF, "arrangement cell {:#x} exceeds 24 bits", word);
        let stored_palette = ((word >> PALETTE_SHIFT) & PALETTE_MASK) as i64;
        let palette = stored_palette - PALETTE_OFFSET;
        if !(0..=7).contains(&palette) {
            format_bail!(
                "arrangement cell {:06x} has subpalette {} (stored {}), expected 0 to 7",
                word,
                palette,
                stored_palette
            );
        }
        Ok(ArrangementCell {
            vertical_flip: word & VERTICAL_FLIP_BIT != 0,
            horizontal_flip: word & HORIZONTAL_FLIP_BIT != 0,
            palette_select: PaletteIdx::new(palette)?,
            tile_index: TileIdx::new(((word >> TILE_SHIFT) & TILE_MASK) as i64)?,
            solid: word & SOLID_BIT != 0,
            flag_0x40: word & FLAG_0X40_BIT != 0,
            flag_0x20: word & FLAG_0X20_BIT != 0,
            interactive: word & INTERACTIVE_BIT != 0,
            water: word & WATER_BIT != 0,
            sunstroke: word & SUNSTROKE_BIT != 0,
            covers_upper_body: word & COVERS_UPPER_BODY_BIT != 0,
            covers_lower_body: word & COVERS_LOWER_BODY_BIT != 0,
            passthrough: word & PASSTHROUGH_MASK,
        })
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let s = ConstrainedString::new(StringKind::CellHex, s)?;
        match u32::from_str_radix(s.as_str(), 16) {
            Ok(word) => Self::from_u24(word),
            Err(e) => format_bail!("arrangement cell {:?}: {}", s.as_str(), e),
        }
    }

    pub fn to_u24(&self) -> u32 {
        let flags = [
            (self.vertical_flip, VERTICAL_FLIP_BIT),
            (self.horizontal_flip, HORIZONTAL_FLIP_BIT),
            (self.solid, SOLID_BIT),
            (self.flag_0x40, FLAG_0X40_BIT),
            (self.flag_0x20, FLAG_0X20_BIT),
            (self.interactive, INTERACTIVE_BIT),
            (self.water, WATER_BIT),
            (self.sunstroke, SUNSTROKE_BIT),
            (self.covers_upper_body, COVERS_UPPER_BODY_BIT),
            (self.covers_lower_body, COVERS_LOWER_BODY_BIT),
        ];
        let mut word = flags
            .iter()
            .filter(|(set, _)| *set)
            .fold(0u32, |acc, (_, bit)| acc | bit);
        let stored_palette = (self.palette_select.get() as i64 + PALETTE_OFFSET) as u32;
        word |= stored_palette << PALETTE_SHIFT;
        word |= (self.tile_index.get() as u32) << TILE_SHIFT;
        word | self.passthrough
    }

    /// Hex of the cell word with no zero padding. The stored subpalette is
    /// never below 2, so the result is never empty and always at least five
    /// digits.
    pub fn to_hex(&self) -> String {
        format!("{:x}", self.to_u24())
    }

    pub fn to_padded_hex(&self) -> String {
        format!("{:06x}", self.to_u24())
    }

    pub fn palette_select(&self) -> PaletteIdx {
        self.palette_select
    }

    /// Set the subpalette; the stored value (logical + 2) has to fit in
    /// three bits, so only 0-5 are accepted.
    pub fn with_palette_select(mut self, palette: PaletteIdx) -> Result<Self> {
        let stored = palette.get() as i64 + PALETTE_OFFSET;
        format_ensure!(
            stored <= PALETTE_MASK as i64,
            "subpalette {} cannot be stored in an arrangement cell (maximum 5)",
            palette
        );
        self.palette_select = palette;
        Ok(self)
    }

    pub fn is_deep_water(&self) -> bool {
        self.sunstroke && self.water
    }

    pub fn extends_interaction_range(&self) -> bool {
        self.covers_upper_body && self.solid
    }
}

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct Arrangement {
    pub cells: [ArrangementCell; ARRANGEMENT_CELLS],
}

impl Arrangement {
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = ConstrainedString::new(StringKind::ArrangementHex, s)?;
        let mut cells = [ArrangementCell::default(); ARRANGEMENT_CELLS];
        let segments = split_exact(s.as_str(), CELL_DIGITS, ARRANGEMENT_CELLS, "arrangement")?;
        for (cell, segment) in cells.iter_mut().zip(segments) {
            *cell = ArrangementCell::from_hex(segment)?;
        }
        Ok(Arrangement { cells })
    }

    pub fn to_hex(&self) -> String {
        self.cells.iter().map(ArrangementCell::to_padded_hex).collect()
    }

    pub fn cell(&self, x: usize, y: usize) -> Result<&ArrangementCell> {
        format_ensure!(
            x < ARRANGEMENT_SIZE && y < ARRANGEMENT_SIZE,
            "cell ({}, {}) outside 4x4 arrangement",
            x,
            y
        );
        Ok(&self.cells[y * ARRANGEMENT_SIZE + x])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_all_fields_set() {
        let mut cell = ArrangementCell {
            vertical_flip: true,
            horizontal_flip: true,
            tile_index: TileIdx::new(511).unwrap(),
            solid: true,
            flag_0x40: true,
            flag_0x20: true,
            interactive: true,
            water: true,
            sunstroke: true,
            covers_upper_body: true,
            covers_lower_body: true,
            ..Default::default()
        };
        cell = cell.with_palette_select(PaletteIdx::new(5).unwrap()).unwrap();
        // 0x800000 | 0x400000 | (5 + 2) << 18 | 511 << 8 | 0xff
        assert_eq!(cell.to_u24(), 0xddffff);
        assert_eq!(cell.to_hex(), "ddffff");
        assert_eq!(ArrangementCell::from_hex("ddffff").unwrap(), cell);
    }

    #[test]
    fn test_cell_mask_table() {
        // 0x37ffff: bit 21 set, stored palette 0b101, tile field 0x3ff, all flags.
        let cell = ArrangementCell::from_hex("37ffff").unwrap();
        assert!(!cell.vertical_flip);
        assert!(!cell.horizontal_flip);
        assert_eq!(cell.palette_select().get(), 3);
        assert_eq!(cell.tile_index.get(), 511);
        assert!(cell.solid && cell.flag_0x40 && cell.flag_0x20 && cell.interactive);
        assert!(cell.water && cell.sunstroke && cell.covers_upper_body && cell.covers_lower_body);
        assert_eq!(cell.to_hex(), "37ffff");
    }

    #[test]
    fn test_cell_individual_flags() {
        let cell = ArrangementCell::from_hex("080001").unwrap();
        assert!(cell.covers_lower_body);
        assert!(!cell.covers_upper_body);
        let cell = ArrangementCell::from_hex("080080").unwrap();
        assert!(cell.solid);
        assert!(!cell.flag_0x40);
        let cell = ArrangementCell::from_hex("080010").unwrap();
        assert!(cell.interactive);
        let cell = ArrangementCell::from_hex("0c2a00").unwrap();
        assert_eq!(cell.palette_select().get(), 1);
        assert_eq!(cell.tile_index.get(), 0x2a);
    }

    #[test]
    fn test_cell_rejects_low_palette() {
        assert!(ArrangementCell::from_hex("000000").is_err());
        assert!(ArrangementCell::from_hex("040000").is_err());
        assert!(ArrangementCell::from_hex("080000").is_ok());
    }

    #[test]
    fn test_cell_hex_is_unpadded() {
        let cell = ArrangementCell::from_hex("080000").unwrap();
        assert_eq!(cell.to_hex(), "80000");
        assert_eq!(cell.to_padded_hex(), "080000");
    }

    #[test]
    fn test_default_cell_hex() {
        // Subpalette 0 is stored as 2, so even the default cell has a
        // non-zero word.
        let cell = ArrangementCell::default();
        assert_eq!(cell.to_u24(), 0x080000);
        assert_eq!(cell.to_hex(), "80000");
        assert_eq!(ArrangementCell::from_hex(&cell.to_padded_hex()).unwrap(), cell);
        assert!(ArrangementCell::from_u24(0).is_err());
    }

    #[test]
    fn test_with_palette_select_limits() {
        let cell = ArrangementCell::default();
        assert!(cell.with_palette_select(PaletteIdx::new(5).unwrap()).is_ok());
        assert!(cell.with_palette_select(PaletteIdx::new(6).unwrap()).is_err());
    }

    #[test]
    fn test_derived_flags() {
        let mut cell = ArrangementCell::default();
        cell.water = true;
        assert!(!cell.is_deep_water());
        cell.sunstroke = true;
        assert!(cell.is_deep_water());
        cell.covers_upper_body = true;
        assert!(!cell.extends_interaction_range());
        cell.solid = true;
        assert!(cell.extends_interaction_range());
    }

    #[test]
    fn test_arrangement_round_trip() {
        let cells = [
            "080000", "ddffff", "37ffff", "0c2a00", "1c0101", "d80000", "0a0000", "080001",
            "080002", "090004", "0b0008", "0801f0", "c80000", "480000", "880000", "1dff00",
        ];
        let text: String = cells.concat();
        let arrangement = Arrangement::from_hex(&text).unwrap();
        assert_eq!(arrangement.to_hex(), text);
        assert_eq!(arrangement.cell(1, 0).unwrap().to_hex(), "ddffff");
        assert_eq!(arrangement.cell(3, 3).unwrap().tile_index.get(), 0x1ff);
        assert!(arrangement.cell(4, 0).is_err());
    }

    #[test]
    fn test_arrangement_rejects_bad_cell() {
        let text = format!("{}{}", "000000", "080000".repeat(15));
        assert!(Arrangement::from_hex(&text).is_err());
        assert!(Arrangement::from_hex(&"080000".repeat(15)).is_err());
    }
}
