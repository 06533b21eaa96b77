// Conversion between the console's 5-bit color channels and 8-bit RGB.
use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{format_bail, FormatError, Result},
    primitives::U5,
};

pub trait ColorScaler {
    fn to_eight(&self, value: U5) -> u8;

    fn to_five(&self, value: u8) -> Result<U5>;

    /// Snap an 8-bit channel to the nearest value this scaler can produce.
    fn normalize(&self, value: u8) -> Result<u8> {
        Ok(self.to_eight(self.to_five(value)?))
    }
}

/// Linear scaling by 8: the low 3 bits of an 8-bit channel are dropped, and
/// the brightest representable value is 248.
#[derive(Copy, Clone, Default, Debug)]
pub struct FactorOfEight;

impl ColorScaler for FactorOfEight {
    fn to_eight(&self, value: U5) -> u8 {
        (value.get() << 3) as u8
    }

    fn to_five(&self, value: u8) -> Result<U5> {
        U5::new((value >> 3) as i64)
    }

    fn normalize(&self, value: u8) -> Result<u8> {
        Ok((value >> 3) << 3)
    }
}

/// Gamma ramp emulating how the console's colors look on a CRT: dark values
/// are compressed and the full 0-255 range is reached.
#[derive(Copy, Clone, Default, Debug)]
pub struct KindredGammaRamp;

pub const KINDRED_GAMMA_RAMP: [u8; 32] = [
    0x00, 0x01, 0x03, 0x06, 0x0a, 0x0f, 0x15, 0x1c, 0x24, 0x2d, 0x37, 0x42, 0x4e, 0x5b, 0x69, 0x78,
    0x88, 0x90, 0x98, 0xa0, 0xa8, 0xb0, 0xb8, 0xc0, 0xc8, 0xd0, 0xd8, 0xe0, 0xe8, 0xf0, 0xf8, 0xff,
];

impl ColorScaler for KindredGammaRamp {
    fn to_eight(&self, value: U5) -> u8 {
        KINDRED_GAMMA_RAMP[value.as_usize()]
    }

    fn to_five(&self, value: u8) -> Result<U5> {
        // Nearest table entry; on a tie the lower index wins.
        let mut best: Option<(usize, u8)> = None;
        for (i, &entry) in KINDRED_GAMMA_RAMP.iter().enumerate() {
            let diff = entry.abs_diff(value);
            match best {
                Some((_, best_diff)) if diff >= best_diff => {}
                _ => best = Some((i, diff)),
            }
            if diff == 0 {
                break;
            }
        }
        match best {
            Some((i, _)) => U5::new(i as i64),
            None => format_bail!("no 5-bit value for 8-bit channel {}", value),
        }
    }
}

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalerKind {
    #[default]
    FactorOfEight,
    KindredGammaRamp,
}

impl ScalerKind {
    pub const ALL: [ScalerKind; 2] = [ScalerKind::FactorOfEight, ScalerKind::KindredGammaRamp];

    pub fn name(self) -> &'static str {
        match self {
            ScalerKind::FactorOfEight => "factor-of-eight",
            ScalerKind::KindredGammaRamp => "kindred-gamma-ramp",
        }
    }

    fn scaler(self) -> &'static dyn ColorScaler {
        match self {
            ScalerKind::FactorOfEight => &FactorOfEight,
            ScalerKind::KindredGammaRamp => &KindredGammaRamp,
        }
    }
}

impl ColorScaler for ScalerKind {
    fn to_eight(&self, value: U5) -> u8 {
        self.scaler().to_eight(value)
    }

    fn to_five(&self, value: u8) -> Result<U5> {
        self.scaler().to_five(value)
    }

    fn normalize(&self, value: u8) -> Result<u8> {
        self.scaler().normalize(value)
    }
}

impl FromStr for ScalerKind {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "factor-of-eight" | "FactorOfEight" => Ok(ScalerKind::FactorOfEight),
            "kindred-gamma-ramp" | "KindredGammaRamp" => Ok(ScalerKind::KindredGammaRamp),
            _ => format_bail!("unknown color scaler: {:?}", s),
        }
    }
}

impl Display for ScalerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u5(v: i64) -> U5 {
        U5::new(v).unwrap()
    }

    #[test]
    fn test_factor_of_eight() {
        let s = FactorOfEight;
        assert_eq!(s.to_eight(u5(0)), 0);
        assert_eq!(s.to_eight(u5(31)), 248);
        assert_eq!(s.to_five(248).unwrap(), u5(31));
        assert_eq!(s.to_five(255).unwrap(), u5(31));
        assert_eq!(s.to_five(7).unwrap(), u5(0));
        assert_eq!(s.normalize(253).unwrap(), 248);
        assert_eq!(s.normalize(8).unwrap(), 8);
    }

    #[test]
    fn test_kindred_gamma_ramp() {
        let s = KindredGammaRamp;
        assert_eq!(s.to_eight(u5(0)), 0);
        assert_eq!(s.to_eight(u5(31)), 255);
        assert_eq!(s.to_five(255).unwrap(), u5(31));
        assert_eq!(s.to_five(248).unwrap(), u5(30));
        assert_eq!(s.normalize(99).unwrap(), 105);
    }

    #[test]
    fn test_kindred_tie_takes_lower_index() {
        // 2 is equally far from 0x01 and 0x03.
        assert_eq!(KindredGammaRamp.to_five(2).unwrap(), u5(1));
        // 0x8c is equally far from 0x88 and 0x90.
        assert_eq!(KindredGammaRamp.to_five(0x8c).unwrap(), u5(16));
    }

    #[test]
    fn test_kindred_round_trips_table() {
        for i in 0..32 {
            let eight = KindredGammaRamp.to_eight(u5(i));
            assert_eq!(KindredGammaRamp.to_five(eight).unwrap(), u5(i));
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for kind in ScalerKind::ALL {
            for v in 0..=255u8 {
                let once = kind.normalize(v).unwrap();
                assert_eq!(kind.normalize(once).unwrap(), once, "{} at {}", kind, v);
            }
        }
    }

    #[test]
    fn test_scaler_kind_names() {
        assert_eq!("factor-of-eight".parse::<ScalerKind>().unwrap(), ScalerKind::FactorOfEight);
        assert_eq!("KindredGammaRamp".parse::<ScalerKind>().unwrap(), ScalerKind::KindredGammaRamp);
        assert!("linear".parse::<ScalerKind>().is_err());
        assert_eq!(serde_json::to_string(&ScalerKind::KindredGammaRamp).unwrap(), "\"kindred-gamma-ramp\"");
        assert_eq!(ScalerKind::default(), ScalerKind::FactorOfEight);
    }
}
