use serde::{Deserialize, Serialize};

use crate::{
    common::ColorValue,
    error::Result,
    primitives::{base32_digit, base32_digit_value, ConstrainedString, StringKind},
    scaler::{ColorScaler, ScalerKind},
};

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Color {
    pub red: ColorValue,
    pub green: ColorValue,
    pub blue: ColorValue,
}

impl Color {
    pub const BLACK: Color = Color {
        red: ColorValue::MIN,
        green: ColorValue::MIN,
        blue: ColorValue::MIN,
    };

    pub fn new(red: ColorValue, green: ColorValue, blue: ColorValue) -> Self {
        Color { red, green, blue }
    }

    pub fn from_components(red: i64, green: i64, blue: i64) -> Result<Self> {
        Ok(Color {
            red: ColorValue::new(red)?,
            green: ColorValue::new(green)?,
            blue: ColorValue::new(blue)?,
        })
    }

    /// Parse `#rgb` or `#rrggbb` (either case); the 8-bit channels are
    /// brought down to 5 bits by `scaler`.
    pub fn from_hex(hex: &str, scaler: ScalerKind) -> Result<Self> {
        let hex = ConstrainedString::new(StringKind::HexColor, hex)?;
        let digits = hex.as_str()[1..].to_ascii_lowercase();
        let expanded: String = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits
        };
        let channel = |i: usize| -> Result<ColorValue> {
            // The grammar check guarantees two hex digits here.
            let byte = u8::from_str_radix(&expanded[i * 2..i * 2 + 2], 16).unwrap_or(0);
            scaler.to_five(byte)
        };
        Ok(Color {
            red: channel(0)?,
            green: channel(1)?,
            blue: channel(2)?,
        })
    }

    pub fn from_base32(s: &str) -> Result<Self> {
        let s = ConstrainedString::new(StringKind::ColorBase32, s)?;
        let mut channels = [ColorValue::MIN; 3];
        for (channel, c) in channels.iter_mut().zip(s.as_str().chars()) {
            *channel = ColorValue::new(base32_digit_value(c)? as i64)?;
        }
        let [red, green, blue] = channels;
        Ok(Color { red, green, blue })
    }

    pub fn to_base32(&self) -> String {
        [self.red, self.green, self.blue]
            .into_iter()
            .map(base32_digit)
            .collect()
    }

    pub fn to_hex(&self, scaler: ScalerKind) -> String {
        let [r, g, b, _] = self.to_rgba(scaler);
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    pub fn to_rgba(&self, scaler: ScalerKind) -> [u8; 4] {
        self.to_rgba_with_alpha(scaler, 255)
    }

    pub fn to_rgba_with_alpha(&self, scaler: ScalerKind, alpha: u8) -> [u8; 4] {
        [
            scaler.to_eight(self.red),
            scaler.to_eight(self.green),
            scaler.to_eight(self.blue),
            alpha,
        ]
    }
}
