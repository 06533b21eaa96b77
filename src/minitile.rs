// Module for the 8x8 minitiles: two layers of 4-bit subpalette indices.
use crate::{
    common::{ColorIdx, MINITILE_SIZE},
    error::{format_ensure, Result},
    helpers::{split_lines, LineBreak},
    primitives::{hex_digit, hex_digit_value, ConstrainedString, StringKind},
};

const LAYER_PIXELS: usize = MINITILE_SIZE * MINITILE_SIZE;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct MinitileLayer {
    pub pixels: [ColorIdx; LAYER_PIXELS],
}

impl Default for MinitileLayer {
    fn default() -> Self {
        MinitileLayer {
            pixels: [ColorIdx::MIN; LAYER_PIXELS],
        }
    }
}

impl MinitileLayer {
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = ConstrainedString::new(StringKind::LayerHex, s)?;
        let mut pixels = [ColorIdx::MIN; LAYER_PIXELS];
        for (pixel, c) in pixels.iter_mut().zip(s.as_str().chars()) {
            *pixel = ColorIdx::new(hex_digit_value(c)? as i64)?;
        }
        Ok(MinitileLayer { pixels })
    }

    pub fn to_hex(&self) -> String {
        self.pixels.iter().copied().map(hex_digit).collect()
    }

    fn offset(x: usize, y: usize) -> Result<usize> {
        format_ensure!(
            x < MINITILE_SIZE && y < MINITILE_SIZE,
            "pixel ({}, {}) outside 8x8 minitile",
            x,
            y
        );
        Ok(y * MINITILE_SIZE + x)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Result<ColorIdx> {
        Ok(self.pixels[Self::offset(x, y)?])
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, value: ColorIdx) -> Result<()> {
        self.pixels[Self::offset(x, y)?] = value;
        Ok(())
    }
}

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct Minitile {
    pub background: MinitileLayer,
    pub foreground: MinitileLayer,
}

impl Minitile {
    // Any of the three line-break conventions may separate the layers.
    pub fn from_text(s: &str) -> Result<Self> {
        let s = ConstrainedString::new(StringKind::MinitileText, s)?;
        let lines = split_lines(s.as_str());
        format_ensure!(lines.len() == 2, "minitile must have exactly two layers");
        Ok(Minitile {
            background: MinitileLayer::from_hex(lines[0])?,
            foreground: MinitileLayer::from_hex(lines[1])?,
        })
    }

    pub fn to_text(&self) -> String {
        self.to_text_with(LineBreak::Lf)
    }

    pub fn to_text_with(&self, line_break: LineBreak) -> String {
        format!(
            "{}{}{}",
            self.background.to_hex(),
            line_break.as_str(),
            self.foreground.to_hex()
        )
    }

    /// Foreground drawn over background; foreground index 0 is transparent.
    pub fn composite(&self) -> MinitileLayer {
        let mut out = self.background;
        for (dst, &fg) in out.pixels.iter_mut().zip(self.foreground.pixels.iter()) {
            if fg != ColorIdx::MIN {
                *dst = fg;
            }
        }
        out
    }

    pub fn is_blank(&self) -> bool {
        *self == Minitile::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_layer(seed: usize) -> String {
        (0..64)
            .map(|i| std::char::from_digit(((i * 5 + seed) % 16) as u32, 16).unwrap())
            .collect()
    }

    #[test]
    fn test_layer_round_trip() {
        let text = sample_layer(1);
        let layer = MinitileLayer::from_hex(&text).unwrap();
        assert_eq!(layer.to_hex(), text);
        assert_eq!(layer.pixel(0, 0).unwrap().get(), 1);
        assert_eq!(layer.pixel(1, 0).unwrap().get(), 6);
        assert_eq!(layer.pixel(0, 1).unwrap().get(), (8 * 5 + 1) % 16);
        assert!(layer.pixel(8, 0).is_err());
    }

    #[test]
    fn test_layer_rejects_uppercase() {
        let text = sample_layer(10).to_uppercase();
        assert!(MinitileLayer::from_hex(&text).is_err());
    }

    #[test]
    fn test_minitile_line_breaks() {
        let bg = sample_layer(2);
        let fg = sample_layer(9);
        for lb in [LineBreak::Lf, LineBreak::CrLf, LineBreak::Cr] {
            let text = format!("{}{}{}", bg, lb.as_str(), fg);
            let tile = Minitile::from_text(&text).unwrap();
            assert_eq!(tile.background.to_hex(), bg);
            assert_eq!(tile.foreground.to_hex(), fg);
            assert_eq!(tile.to_text_with(lb), text);
        }
        assert!(Minitile::from_text(&format!("{}{}", bg, fg)).is_err());
        assert!(Minitile::from_text(&bg).is_err());
    }

    #[test]
    fn test_composite() {
        let mut tile = Minitile::default();
        let idx = |v| ColorIdx::new(v).unwrap();
        tile.background.set_pixel(0, 0, idx(3)).unwrap();
        tile.background.set_pixel(1, 0, idx(4)).unwrap();
        tile.foreground.set_pixel(1, 0, idx(9)).unwrap();
        tile.foreground.set_pixel(2, 0, idx(5)).unwrap();
        let out = tile.composite();
        assert_eq!(out.pixel(0, 0).unwrap(), idx(3));
        assert_eq!(out.pixel(1, 0).unwrap(), idx(9));
        assert_eq!(out.pixel(2, 0).unwrap(), idx(5));
        assert_eq!(out.pixel(3, 0).unwrap(), idx(0));
        assert!(!tile.is_blank());
        assert!(Minitile::default().is_blank());
    }
}
