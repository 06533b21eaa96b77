// Subpalettes (16 colors) and subpalette groups (6 subpalettes), stored as
// runs of base-32 digits with no separators.
use crate::{
    color::Color,
    common::{ColorIdx, GROUP_SUBPALETTES, SUBPALETTE_COLORS},
    error::{format_ensure, Result},
    helpers::split_exact,
    primitives::{ConstrainedString, StringKind},
};

const COLOR_DIGITS: usize = 3;
const SUBPALETTE_DIGITS: usize = COLOR_DIGITS * SUBPALETTE_COLORS;

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct Subpalette {
    pub colors: [Color; SUBPALETTE_COLORS],
}

impl Subpalette {
    pub fn from_base32(s: &str) -> Result<Self> {
        let s = ConstrainedString::new(StringKind::SubpaletteBase32, s)?;
        let mut colors = [Color::default(); SUBPALETTE_COLORS];
        let segments = split_exact(s.as_str(), COLOR_DIGITS, SUBPALETTE_COLORS, "subpalette")?;
        for (color, segment) in colors.iter_mut().zip(segments) {
            *color = Color::from_base32(segment)?;
        }
        Ok(Subpalette { colors })
    }

    pub fn to_base32(&self) -> String {
        self.colors.iter().map(Color::to_base32).collect()
    }

    pub fn color(&self, idx: ColorIdx) -> Color {
        self.colors[idx.as_usize()]
    }

    pub fn set_color(&mut self, idx: ColorIdx, color: Color) {
        self.colors[idx.as_usize()] = color;
    }
}

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct SubpaletteGroup {
    pub subpalettes: [Subpalette; GROUP_SUBPALETTES],
}

// The format uses both names for the same six-subpalette shape.
pub type Palette = SubpaletteGroup;
pub type PaletteSet = SubpaletteGroup;

impl SubpaletteGroup {
    pub fn from_base32(s: &str) -> Result<Self> {
        let s = ConstrainedString::new(StringKind::GroupBase32, s)?;
        let mut subpalettes = [Subpalette::default(); GROUP_SUBPALETTES];
        let segments = split_exact(s.as_str(), SUBPALETTE_DIGITS, GROUP_SUBPALETTES, "subpalette group")?;
        for (subpalette, segment) in subpalettes.iter_mut().zip(segments) {
            *subpalette = Subpalette::from_base32(segment)?;
        }
        Ok(SubpaletteGroup { subpalettes })
    }

    pub fn to_base32(&self) -> String {
        self.subpalettes.iter().map(Subpalette::to_base32).collect()
    }

    pub fn subpalette(&self, idx: usize) -> Result<&Subpalette> {
        format_ensure!(
            idx < GROUP_SUBPALETTES,
            "subpalette index {} out of range (0-{})",
            idx,
            GROUP_SUBPALETTES - 1
        );
        Ok(&self.subpalettes[idx])
    }
}
