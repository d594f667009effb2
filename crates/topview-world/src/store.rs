use std::sync::Arc;

use crate::coord::RegionCoord;
use crate::error::WorldError;

/// Read access to the blocks of one loaded chunk.
///
/// Coordinates are chunk-local: `x` and `z` in `[0, 16)`, `y` in
/// `[0, MAX_HEIGHT)`. Positions outside the stored data read as air.
pub trait ChunkView {
    fn block_id(&self, x: usize, y: usize, z: usize) -> &str;
}

impl<C: ChunkView + ?Sized> ChunkView for Arc<C> {
    #[inline]
    fn block_id(&self, x: usize, y: usize, z: usize) -> &str {
        (**self).block_id(x, y, z)
    }
}

impl<C: ChunkView + ?Sized> ChunkView for &C {
    #[inline]
    fn block_id(&self, x: usize, y: usize, z: usize) -> &str {
        (**self).block_id(x, y, z)
    }
}

/// An opened region. Handles are owned by a single render job.
pub trait RegionHandle {
    type Chunk: ChunkView;

    fn coord(&self) -> RegionCoord;

    /// Loads the chunk at region-relative `(cx, cz)`, both in `[0, 32)`.
    /// `Ok(None)` means the chunk was never generated.
    fn chunk(&mut self, cx: usize, cz: usize) -> Result<Option<Self::Chunk>, WorldError>;
}

/// Source of regions. Shared read-only between workers; every job opens its
/// own handle.
pub trait WorldStore: Sync {
    type Region: RegionHandle;

    fn open_region(&self, coord: RegionCoord) -> Result<Self::Region, WorldError>;
}
