use crate::primitives::{U3, U4, U5, U9};

pub type ColorValue = U5; // Color channel value (0-31)
pub type ColorIdx = U4; // Index into a 16-color subpalette (0-15)
pub type PaletteIdx = U3; // Subpalette selector of an arrangement cell / sector (0-7)
pub type TileIdx = U9; // Index into a tileset's minitiles (0-511)
pub type GraphicsSetId = U5; // Map tileset id, the leading digit of palette lines (0-31)
pub type TilesetId = U5; // Number of the tileset file a graphics set belongs to

pub const SUBPALETTE_COLORS: usize = 16;
pub const GROUP_SUBPALETTES: usize = 6;
pub const MAX_PALETTE_SETS: usize = 8;
pub const MINITILE_SIZE: usize = 8;
pub const ARRANGEMENT_SIZE: usize = 4;
pub const TILESET_MINITILES: usize = 512;
pub const TILESET_ARRANGEMENTS: usize = 1024;
