// Validation of map sector attributes. Reading the YAML itself is left to the
// caller; this module takes the already-parsed record and checks every enum
// name and numeric range.
use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    common::{GraphicsSetId, PaletteIdx},
    error::{format_bail, FormatError, Result},
    graphics_set::GraphicsSet,
    primitives::U8,
};

// Declares an enum whose variants are written as fixed lowercase names.
macro_rules! named_enum {
    ($name:ident, $what:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
        pub enum $name {
            #[default]
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = FormatError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => format_bail!("unknown {}: {:?}", $what, s),
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.name())
            }
        }
    };
}

named_enum!(SectorSetting, "sector setting", {
    None => "none",
    Indoors => "indoors",
    ExitMouseUsable => "exit mouse usable",
    LostUnderworldSprites => "lost underworld sprites",
    MagicantSprites => "magicant sprites",
    RobotSprites => "robot sprites",
    Butterflies => "butterflies",
    IndoorsAndButterflies => "indoors and butterflies",
});

named_enum!(Teleport, "teleport setting", {
    Enabled => "enabled",
    Disabled => "disabled",
});

named_enum!(TownMap, "town map", {
    None => "none",
    Onett => "onett",
    Twoson => "twoson",
    Threed => "threed",
    Fourside => "fourside",
    Scaraba => "scaraba",
    Summers => "summers",
});

named_enum!(TownMapArrow, "town map arrow", {
    None => "none",
    Up => "up",
    Down => "down",
    Left => "left",
    Right => "right",
});

/// One sector record as a YAML/JSON loader hands it over, before validation.
#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RawSectorAttributes {
    #[serde(rename = "Item")]
    pub item: i64,
    #[serde(rename = "Music")]
    pub music: i64,
    #[serde(rename = "Palette")]
    pub palette: i64,
    #[serde(rename = "Setting")]
    pub setting: String,
    #[serde(rename = "Teleport")]
    pub teleport: String,
    #[serde(rename = "Tileset")]
    pub tileset: i64,
    #[serde(rename = "Town Map")]
    pub town_map: String,
    #[serde(rename = "Town Map Arrow")]
    pub town_map_arrow: String,
    #[serde(rename = "Town Map Image")]
    pub town_map_image: String,
    #[serde(rename = "Town Map X")]
    pub town_map_x: i64,
    #[serde(rename = "Town Map Y")]
    pub town_map_y: i64,
}

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct SectorAttributes {
    pub item: U8,
    pub music: U8,
    pub palette: PaletteIdx,
    pub setting: SectorSetting,
    pub teleport: Teleport,
    pub tileset: GraphicsSetId,
    pub town_map: TownMap,
    pub town_map_arrow: TownMapArrow,
    pub town_map_image: TownMap,
    pub town_map_x: U8,
    pub town_map_y: U8,
}

fn field<T>(name: &str, value: Result<T>) -> Result<T> {
    value.map_err(|e| FormatError::new(format!("sector {}: {}", name, e.message())))
}

impl TryFrom<&RawSectorAttributes> for SectorAttributes {
    type Error = FormatError;

    fn try_from(raw: &RawSectorAttributes) -> Result<Self> {
        Ok(SectorAttributes {
            item: field("Item", U8::new(raw.item))?,
            music: field("Music", U8::new(raw.music))?,
            palette: field("Palette", PaletteIdx::new(raw.palette))?,
            setting: field("Setting", raw.setting.parse())?,
            teleport: field("Teleport", raw.teleport.parse())?,
            tileset: field("Tileset", GraphicsSetId::new(raw.tileset))?,
            town_map: field("Town Map", raw.town_map.parse())?,
            town_map_arrow: field("Town Map Arrow", raw.town_map_arrow.parse())?,
            town_map_image: field("Town Map Image", raw.town_map_image.parse())?,
            town_map_x: field("Town Map X", U8::new(raw.town_map_x))?,
            town_map_y: field("Town Map Y", U8::new(raw.town_map_y))?,
        })
    }
}

impl From<&SectorAttributes> for RawSectorAttributes {
    fn from(attrs: &SectorAttributes) -> Self {
        RawSectorAttributes {
            item: attrs.item.get() as i64,
            music: attrs.music.get() as i64,
            palette: attrs.palette.get() as i64,
            setting: attrs.setting.to_string(),
            teleport: attrs.teleport.to_string(),
            tileset: attrs.tileset.get() as i64,
            town_map: attrs.town_map.to_string(),
            town_map_arrow: attrs.town_map_arrow.to_string(),
            town_map_image: attrs.town_map_image.to_string(),
            town_map_x: attrs.town_map_x.get() as i64,
            town_map_y: attrs.town_map_y.get() as i64,
        }
    }
}

impl SectorAttributes {
    pub fn graphics_set<'a>(&self, sets: &'a [GraphicsSet]) -> Result<&'a GraphicsSet> {
        match sets.iter().find(|set| set.id == self.tileset) {
            Some(set) => {
                if set.palette_sets().len() <= self.palette.as_usize() {
                    format_bail!(
                        "sector palette {} not present in graphics set {} ({} palette sets)",
                        self.palette,
                        set.id,
                        set.palette_sets().len()
                    );
                }
                Ok(set)
            }
            None => format_bail!("no graphics set with id {}", self.tileset),
        }
    }
}
