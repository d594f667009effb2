//! Top-down tile rendering: column resolution, relief shading, raster
//! assembly, and image output.
#![forbid(unsafe_code)]

mod column;
mod raster;
mod shade;
mod sink;
mod tile;

pub use column::{Column, NETHER_CEILING, ScanPolicy, resolve};
pub use raster::Raster;
pub use shade::{SHADE_STEP, shade};
pub use sink::{ImageSink, PngSink, SinkError};
pub use tile::{
    ColumnPixel, RenderError, RenderedTile, RowScan, TileReport, TileSpec, UnknownBlock,
    render_tile,
};

/// Output pixels per chunk edge (one per block column).
pub const PIXELS_PER_CHUNK: usize = topview_world::CHUNK_EDGE;
