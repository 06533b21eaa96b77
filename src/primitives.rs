// Range-checked integers and grammar-checked strings. Every other type in
// the crate is built out of these, so a value that exists is a valid value.
use std::{fmt::Display, sync::OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{format_bail, format_ensure, FormatError, Result};

#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u16")]
pub struct RangedInt<const BITS: u32>(u16);

pub type U3 = RangedInt<3>;
pub type U4 = RangedInt<4>;
pub type U5 = RangedInt<5>;
pub type U8 = RangedInt<8>;
pub type U9 = RangedInt<9>;

impl<const BITS: u32> RangedInt<BITS> {
    pub const MIN: Self = RangedInt(0);
    pub const MAX: Self = RangedInt(((1u32 << BITS) - 1) as u16);

    pub fn validate(value: i64) -> bool {
        (0..=Self::MAX.0 as i64).contains(&value)
    }

    pub fn new(value: i64) -> Result<Self> {
        format_ensure!(
            Self::validate(value),
            "{} is not a {}-bit value (expected 0 to {})",
            value,
            BITS,
            Self::MAX.0
        );
        Ok(RangedInt(value as u16))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl<const BITS: u32> TryFrom<i64> for RangedInt<BITS> {
    type Error = FormatError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl<const BITS: u32> From<RangedInt<BITS>> for u16 {
    fn from(value: RangedInt<BITS>) -> u16 {
        value.0
    }
}

impl<const BITS: u32> Display for RangedInt<BITS> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum StringKind {
    CellHex,          // 6 hex digits: one arrangement cell
    LayerHex,         // 64 hex digits: one minitile layer
    ArrangementHex,   // 96 hex digits: 16 arrangement cells
    ColorBase32,      // 3 base-32 digits: one color
    SubpaletteBase32, // 48 base-32 digits: 16 colors
    GroupBase32,      // 288 base-32 digits: 6 subpalettes
    MinitileText,     // two layers on two lines
    GraphicsSetLine,  // id digit, index digit, one subpalette group
    HexColor,         // "#" + 3 or 6 hex digits, either case
}

const STRING_KIND_COUNT: usize = 9;

impl StringKind {
    fn pattern(self) -> &'static str {
        match self {
            StringKind::CellHex => r"\A[0-9a-f]{6}\z",
            StringKind::LayerHex => r"\A[0-9a-f]{64}\z",
            StringKind::ArrangementHex => r"\A[0-9a-f]{96}\z",
            StringKind::ColorBase32 => r"\A[0-9a-v]{3}\z",
            StringKind::SubpaletteBase32 => r"\A[0-9a-v]{48}\z",
            StringKind::GroupBase32 => r"\A[0-9a-v]{288}\z",
            StringKind::MinitileText => r"\A[0-9a-f]{64}(?:\r\n|\n|\r)[0-9a-f]{64}\z",
            StringKind::GraphicsSetLine => r"\A[0-9a-v][0-7][0-9a-v]{288}\z",
            StringKind::HexColor => r"\A#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})\z",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn regex(self) -> &'static Regex {
        #[allow(clippy::declare_interior_mutable_const)]
        const UNCOMPILED: OnceLock<Regex> = OnceLock::new();
        static PATTERNS: [OnceLock<Regex>; STRING_KIND_COUNT] = [UNCOMPILED; STRING_KIND_COUNT];
        PATTERNS[self.index()]
            .get_or_init(|| Regex::new(self.pattern()).expect("invalid wire grammar pattern"))
    }

    pub fn validate(self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}

impl Display for StringKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StringKind::CellHex => "arrangement cell hex",
            StringKind::LayerHex => "minitile layer hex",
            StringKind::ArrangementHex => "arrangement hex",
            StringKind::ColorBase32 => "base-32 color",
            StringKind::SubpaletteBase32 => "base-32 subpalette",
            StringKind::GroupBase32 => "base-32 subpalette group",
            StringKind::MinitileText => "minitile",
            StringKind::GraphicsSetLine => "graphics set line",
            StringKind::HexColor => "hex color",
        };
        write!(f, "{}", name)
    }
}

/// A string known to match the grammar of its `StringKind`. Every decoder
/// in the crate goes through `ConstrainedString::new` before reading digits.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ConstrainedString {
    kind: StringKind,
    value: String,
}

impl ConstrainedString {
    pub fn new(kind: StringKind, value: &str) -> Result<Self> {
        if !kind.validate(value) {
            format_bail!("{:?} is not a valid {} string", abbreviate(value), kind);
        }
        Ok(ConstrainedString {
            kind,
            value: value.to_string(),
        })
    }

    pub fn kind(&self) -> StringKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Display for ConstrainedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

// Long wire strings make unreadable error messages.
fn abbreviate(value: &str) -> String {
    const MAX_CHARS: usize = 24;
    if value.chars().count() <= MAX_CHARS {
        value.to_string()
    } else {
        let head: String = value.chars().take(MAX_CHARS).collect();
        format!("{}... ({} chars)", head, value.chars().count())
    }
}

pub fn base32_digit_value(c: char) -> Result<u8> {
    match c {
        '0'..='9' | 'a'..='v' => Ok(c.to_digit(32).unwrap_or(0) as u8),
        _ => format_bail!("{:?} is not a base-32 digit", c),
    }
}

pub fn base32_digit(value: U5) -> char {
    std::char::from_digit(value.get() as u32, 32).unwrap_or('0')
}

pub fn hex_digit_value(c: char) -> Result<u8> {
    match c {
        '0'..='9' | 'a'..='f' => Ok(c.to_digit(16).unwrap_or(0) as u8),
        _ => format_bail!("{:?} is not a lowercase hex digit", c),
    }
}

pub fn hex_digit(value: U4) -> char {
    std::char::from_digit(value.get() as u32, 16).unwrap_or('0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranged_int_bounds() {
        assert!(U3::validate(0));
        assert!(U3::validate(7));
        assert!(!U3::validate(8));
        assert!(!U3::validate(-1));
        assert_eq!(U9::MAX.get(), 511);
        assert_eq!(U8::MAX.get(), 255);
        assert!(U5::new(32).is_err());
        assert_eq!(U5::new(31).unwrap().get(), 31);
        assert!(U4::try_from(-3i64).is_err());
    }

    #[test]
    fn test_ranged_int_serde() {
        let v: U5 = serde_json::from_str("17").unwrap();
        assert_eq!(v.get(), 17);
        assert!(serde_json::from_str::<U5>("40").is_err());
        assert_eq!(serde_json::to_string(&v).unwrap(), "17");
    }

    #[test]
    fn test_string_kinds() {
        assert!(StringKind::CellHex.validate("0a1b2c"));
        assert!(!StringKind::CellHex.validate("0A1B2C"));
        assert!(!StringKind::CellHex.validate("0a1b2"));
        assert!(!StringKind::CellHex.validate("0a1b2c\n"));
        assert!(StringKind::ColorBase32.validate("0av"));
        assert!(!StringKind::ColorBase32.validate("0aw"));
        assert!(StringKind::HexColor.validate("#ABC"));
        assert!(StringKind::HexColor.validate("#a0b0c0"));
        assert!(!StringKind::HexColor.validate("#abcd"));
        assert!(!StringKind::HexColor.validate("abc"));
        let layer = "0".repeat(64);
        assert!(StringKind::MinitileText.validate(&format!("{layer}\r\n{layer}")));
        assert!(StringKind::MinitileText.validate(&format!("{layer}\r{layer}")));
        assert!(!StringKind::MinitileText.validate(&format!("{layer}\n\n{layer}")));
        let group = "v".repeat(288);
        assert!(StringKind::GraphicsSetLine.validate(&format!("a7{group}")));
        assert!(!StringKind::GraphicsSetLine.validate(&format!("a8{group}")));
    }

    #[test]
    fn test_constrained_string() {
        let s = ConstrainedString::new(StringKind::ColorBase32, "00v").unwrap();
        assert_eq!(s.as_str(), "00v");
        assert_eq!(s.kind(), StringKind::ColorBase32);
        let err = ConstrainedString::new(StringKind::SubpaletteBase32, "00v").unwrap_err();
        assert!(err.message().contains("base-32 subpalette"));
    }

    #[test]
    fn test_digits() {
        assert_eq!(base32_digit_value('v').unwrap(), 31);
        assert!(base32_digit_value('V').is_err());
        assert!(base32_digit_value('w').is_err());
        assert_eq!(base32_digit(U5::new(31).unwrap()), 'v');
        assert_eq!(hex_digit_value('f').unwrap(), 15);
        assert!(hex_digit_value('g').is_err());
        assert_eq!(hex_digit(U4::new(10).unwrap()), 'a');
    }
}
