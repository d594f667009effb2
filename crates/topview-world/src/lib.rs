//! World store: region addressing, chunk access, and Anvil decoding.
#![forbid(unsafe_code)]

pub mod anvil;
mod coord;
mod error;
pub mod memory;
mod store;

pub use anvil::{AnvilChunk, AnvilRegion, AnvilStore};
pub use coord::{RegionCoord, parse_region_file_name};
pub use error::{DecodeError, WorldError};
pub use memory::{MemoryChunk, MemoryStore};
pub use store::{ChunkView, RegionHandle, WorldStore};

/// Blocks along one horizontal edge of a chunk.
pub const CHUNK_EDGE: usize = 16;
/// Chunks along one edge of a region.
pub const REGION_CHUNKS: usize = 32;
/// Exclusive upper bound of the scanned elevation range.
pub const MAX_HEIGHT: usize = 256;
/// Vertical size of one chunk section.
pub const SECTION_HEIGHT: usize = 16;

pub const AIR: &str = "air";
