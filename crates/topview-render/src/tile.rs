use topview_blocks::{BlockPalette, Rgb};
use topview_world::{CHUNK_EDGE, REGION_CHUNKS, RegionHandle, WorldError};

use crate::PIXELS_PER_CHUNK;
use crate::column::{Column, ScanPolicy, resolve};
use crate::raster::Raster;
use crate::shade::shade;

/// A rectangle of chunks inside one region, in region-relative chunk units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSpec {
    pub chunk_x: usize,
    pub chunk_z: usize,
    pub chunks_x: usize,
    pub chunks_z: usize,
}

impl TileSpec {
    /// Chunks along one edge of a quadrant tile.
    pub const QUADRANT_CHUNKS: usize = REGION_CHUNKS / 2;

    /// One 16×16-chunk quadrant; `offx` and `offz` are 0 or 1.
    pub fn quadrant(offx: usize, offz: usize) -> Self {
        Self {
            chunk_x: offx * Self::QUADRANT_CHUNKS,
            chunk_z: offz * Self::QUADRANT_CHUNKS,
            chunks_x: Self::QUADRANT_CHUNKS,
            chunks_z: Self::QUADRANT_CHUNKS,
        }
    }

    /// The whole 32×32-chunk region as a single tile.
    pub fn whole_region() -> Self {
        Self {
            chunk_x: 0,
            chunk_z: 0,
            chunks_x: REGION_CHUNKS,
            chunks_z: REGION_CHUNKS,
        }
    }

    #[inline]
    pub fn width_px(&self) -> usize {
        self.chunks_x * PIXELS_PER_CHUNK
    }

    #[inline]
    pub fn height_px(&self) -> usize {
        self.chunks_z * PIXELS_PER_CHUNK
    }
}

/// An unknown block id, by pixel position inside the tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownBlock {
    pub id: String,
    pub x: usize,
    pub z: usize,
}

/// Recovered anomalies met while rendering one tile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileReport {
    pub chunks_rendered: usize,
    pub absent_chunks: usize,
    pub empty_columns: usize,
    pub unknown_blocks: Vec<UnknownBlock>,
}

#[derive(Clone, Debug)]
pub struct RenderedTile {
    pub raster: Raster,
    pub report: TileReport,
}

#[derive(Debug)]
pub enum RenderError {
    World(WorldError),
}

/// Outcome of one column inside a row scan.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColumnPixel<'a> {
    Shaded(Rgb),
    Empty,
    Unknown(&'a str),
}

impl ColumnPixel<'_> {
    #[inline]
    pub fn color(&self) -> Rgb {
        match self {
            ColumnPixel::Shaded(c) => *c,
            ColumnPixel::Empty | ColumnPixel::Unknown(_) => Rgb::SENTINEL,
        }
    }
}

/// Shading state for one row (fixed z) of one chunk, scanned in increasing x.
///
/// Only a palette hit updates the remembered elevation. Empty columns and
/// unknown blocks leave it as it was, so the next hit compares against the
/// last colored column of the row.
#[derive(Clone, Copy, Debug, Default)]
pub struct RowScan {
    prev: Option<i32>,
}

impl RowScan {
    pub fn new() -> Self {
        Self { prev: None }
    }

    #[inline]
    pub fn prev_elevation(&self) -> Option<i32> {
        self.prev
    }

    pub fn step<'a>(&mut self, column: Column<'a>, palette: &BlockPalette) -> ColumnPixel<'a> {
        match column {
            Column::Empty => ColumnPixel::Empty,
            Column::Block { id, elevation } => match palette.lookup(id) {
                Some(base) => {
                    let color = shade(base, self.prev, elevation);
                    self.prev = Some(elevation);
                    ColumnPixel::Shaded(color)
                }
                None => ColumnPixel::Unknown(id),
            },
        }
    }
}

/// Renders every chunk of `tile` from `region` into a fresh raster.
///
/// Absent chunks, empty columns and unknown ids are recovered here and show
/// up in the report. A chunk that cannot be loaded aborts the tile.
pub fn render_tile<R: RegionHandle>(
    region: &mut R,
    palette: &BlockPalette,
    tile: TileSpec,
    scan: ScanPolicy,
) -> Result<RenderedTile, RenderError> {
    let mut raster = Raster::new(tile.width_px(), tile.height_px());
    let mut report = TileReport::default();
    let coord = region.coord();

    for tz in 0..tile.chunks_z {
        for tx in 0..tile.chunks_x {
            let cx = tile.chunk_x + tx;
            let cz = tile.chunk_z + tz;
            let px0 = tx * PIXELS_PER_CHUNK;
            let pz0 = tz * PIXELS_PER_CHUNK;

            let Some(chunk) = region.chunk(cx, cz)? else {
                log::info!("region {} chunk ({}, {}) absent", coord, cx, cz);
                raster.fill_rect(px0, pz0, PIXELS_PER_CHUNK, PIXELS_PER_CHUNK, Rgb::SENTINEL);
                report.absent_chunks += 1;
                continue;
            };

            for z in 0..CHUNK_EDGE {
                let mut row = RowScan::new();
                for x in 0..CHUNK_EDGE {
                    let pixel = row.step(resolve(&chunk, x, z, scan), palette);
                    match pixel {
                        ColumnPixel::Shaded(_) => {}
                        ColumnPixel::Empty => report.empty_columns += 1,
                        ColumnPixel::Unknown(id) => {
                            log::warn!(
                                "unknown block '{}' in region {} chunk ({}, {})",
                                id,
                                coord,
                                cx,
                                cz
                            );
                            report.unknown_blocks.push(UnknownBlock {
                                id: id.to_string(),
                                x: px0 + x,
                                z: pz0 + z,
                            });
                        }
                    }
                    raster.put_pixel(px0 + x, pz0 + z, pixel.color());
                }
            }
            report.chunks_rendered += 1;
        }
    }

    Ok(RenderedTile { raster, report })
}

impl From<WorldError> for RenderError {
    fn from(e: WorldError) -> Self {
        RenderError::World(e)
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::World(e) => write!(f, "render failed: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::World(e) => Some(e),
        }
    }
}
