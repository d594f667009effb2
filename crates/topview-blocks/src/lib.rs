//! Block names, base colors, and the palette lookup table.
#![forbid(unsafe_code)]

pub mod color;
pub mod config;
pub mod names;
pub mod palette;

pub use color::Rgb;
pub use names::{is_transparent, normalize_block_name};
pub use palette::{BlockPalette, PaletteError};
