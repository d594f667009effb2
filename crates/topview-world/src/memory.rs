//! In-memory world, for synthetic renders and tests.

use std::sync::Arc;

use hashbrown::HashMap;

use topview_blocks::normalize_block_name;

use crate::coord::RegionCoord;
use crate::error::{DecodeError, WorldError};
use crate::store::{ChunkView, RegionHandle, WorldStore};
use crate::{AIR, CHUNK_EDGE, MAX_HEIGHT};

/// A chunk stored column by column. Each column holds palette slots from
/// `y = 0` up to its highest written block; everything above reads as air.
#[derive(Clone, Debug)]
pub struct MemoryChunk {
    palette: Vec<String>,
    columns: Vec<Vec<u16>>,
}

impl Default for MemoryChunk {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryChunk {
    pub fn new() -> Self {
        Self {
            palette: vec![AIR.to_string()],
            columns: vec![Vec::new(); CHUNK_EDGE * CHUNK_EDGE],
        }
    }

    #[inline]
    fn column_index(x: usize, z: usize) -> usize {
        z * CHUNK_EDGE + x
    }

    fn slot_for(&mut self, id: &str) -> u16 {
        let id = normalize_block_name(id);
        if let Some(i) = self.palette.iter().position(|p| p == id) {
            return i as u16;
        }
        self.palette.push(id.to_string());
        (self.palette.len() - 1) as u16
    }

    /// Writes one block. Out-of-range positions are ignored.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, id: &str) {
        if x >= CHUNK_EDGE || z >= CHUNK_EDGE || y >= MAX_HEIGHT {
            return;
        }
        let slot = self.slot_for(id);
        let column = &mut self.columns[Self::column_index(x, z)];
        if column.len() <= y {
            column.resize(y + 1, 0);
        }
        column[y] = slot;
    }

    /// Fills `y` in `[0, top]` of one column with `id`.
    pub fn fill_column(&mut self, x: usize, z: usize, top: usize, id: &str) {
        for y in 0..=top.min(MAX_HEIGHT - 1) {
            self.set_block(x, y, z, id);
        }
    }

    /// Builds a chunk whose every column is filled up to the height returned
    /// by `surface(x, z)` with the returned block.
    pub fn from_surface<'a>(surface: impl Fn(usize, usize) -> (usize, &'a str)) -> Self {
        let mut chunk = Self::new();
        for z in 0..CHUNK_EDGE {
            for x in 0..CHUNK_EDGE {
                let (top, id) = surface(x, z);
                chunk.fill_column(x, z, top, id);
            }
        }
        chunk
    }
}

impl ChunkView for MemoryChunk {
    #[inline]
    fn block_id(&self, x: usize, y: usize, z: usize) -> &str {
        if x >= CHUNK_EDGE || z >= CHUNK_EDGE {
            return AIR;
        }
        match self.columns[Self::column_index(x, z)].get(y) {
            Some(&slot) => &self.palette[slot as usize],
            None => AIR,
        }
    }
}

#[derive(Clone, Debug)]
enum Entry {
    Chunk(Arc<MemoryChunk>),
    Corrupt,
}

/// Chunks keyed by absolute chunk coordinate. Cheap to clone and share.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    chunks: Arc<HashMap<(i32, i32), Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries_mut(&mut self) -> &mut HashMap<(i32, i32), Entry> {
        Arc::make_mut(&mut self.chunks)
    }

    pub fn insert_chunk(&mut self, chunk_x: i32, chunk_z: i32, chunk: MemoryChunk) {
        self.entries_mut()
            .insert((chunk_x, chunk_z), Entry::Chunk(Arc::new(chunk)));
    }

    /// Marks a chunk as undecodable; loading it fails with `WorldError::Decode`.
    pub fn insert_corrupt(&mut self, chunk_x: i32, chunk_z: i32) {
        self.entries_mut().insert((chunk_x, chunk_z), Entry::Corrupt);
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl WorldStore for MemoryStore {
    type Region = MemoryRegion;

    fn open_region(&self, coord: RegionCoord) -> Result<MemoryRegion, WorldError> {
        Ok(MemoryRegion {
            coord,
            chunks: Arc::clone(&self.chunks),
        })
    }
}

pub struct MemoryRegion {
    coord: RegionCoord,
    chunks: Arc<HashMap<(i32, i32), Entry>>,
}

impl RegionHandle for MemoryRegion {
    type Chunk = Arc<MemoryChunk>;

    fn coord(&self) -> RegionCoord {
        self.coord
    }

    fn chunk(&mut self, cx: usize, cz: usize) -> Result<Option<Arc<MemoryChunk>>, WorldError> {
        match self.chunks.get(&self.coord.chunk_origin(cx, cz)) {
            Some(Entry::Chunk(chunk)) => Ok(Some(Arc::clone(chunk))),
            Some(Entry::Corrupt) => Err(WorldError::Decode {
                cx,
                cz,
                source: DecodeError::Invalid("marked corrupt"),
            }),
            None => Ok(None),
        }
    }
}
