//! Codec for CoilSnake tileset files.
//!
//! A tileset file holds 512 two-layer minitiles, the graphics sets (palettes)
//! that use them, and 1024 arrangements, all as fixed-width hex and base-32
//! text. Every type here decodes from its text form and encodes back to the
//! same characters.
//!
//! - [`primitives`]: range-checked integers and grammar-checked strings
//! - [`scaler`]: 5-bit to 8-bit color channel conversion
//! - [`color`], [`palette`], [`minitile`], [`arrangement`], [`graphics_set`],
//!   [`tileset`]: the data model, bottom to top
//! - [`file`]: splitting a file into regions and records
//! - [`sector`]: validation of map sector attributes

pub mod arrangement;
pub mod color;
pub mod common;
pub mod config;
pub mod error;
pub mod file;
pub mod graphics_set;
pub mod helpers;
pub mod minitile;
pub mod palette;
pub mod persist;
pub mod primitives;
pub mod scaler;
pub mod sector;
pub mod tileset;

pub use arrangement::{Arrangement, ArrangementCell};
pub use color::Color;
pub use error::FormatError;
pub use file::{split_graphics_set_records, split_regions, TilesetFile};
pub use graphics_set::{GraphicsSet, SectorGraphicsSet};
pub use helpers::LineBreak;
pub use minitile::{Minitile, MinitileLayer};
pub use palette::{Palette, PaletteSet, Subpalette, SubpaletteGroup};
pub use primitives::{ConstrainedString, RangedInt, StringKind, U3, U4, U5, U8, U9};
pub use scaler::{ColorScaler, ScalerKind};
pub use tileset::Tileset;
