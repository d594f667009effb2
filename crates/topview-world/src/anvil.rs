//! Anvil (`.mca`) region files.
//!
//! Region containers are read with `fastanvil`; chunk payloads are decoded
//! with `fastnbt` into the handful of fields the renderer needs. Both the
//! pre-1.18 `Level.Sections` layout and the flattened 1.18+ `sections`
//! layout are understood.

use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;

use fastanvil::Region;
use fastnbt::LongArray;
use serde::Deserialize;
use topview_blocks::normalize_block_name;

use crate::coord::RegionCoord;
use crate::error::{DecodeError, WorldError};
use crate::store::{ChunkView, RegionHandle, WorldStore};
use crate::{AIR, CHUNK_EDGE, MAX_HEIGHT, SECTION_HEIGHT};

/// First data version (20w17a) whose packed block states no longer span
/// across 64-bit words.
const PADDED_STATES_VERSION: i32 = 2529;

const SECTION_VOLUME: usize = CHUNK_EDGE * CHUNK_EDGE * SECTION_HEIGHT;
const SECTION_COUNT: usize = MAX_HEIGHT / SECTION_HEIGHT;

/// Region files on disk. The source is either a directory holding
/// `r.X.Z.mca` files or a single region file, used whatever coordinate is
/// requested.
#[derive(Clone, Debug)]
pub struct AnvilStore {
    source: PathBuf,
}

impl AnvilStore {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn region_path(&self, coord: RegionCoord) -> PathBuf {
        if self.source.is_dir() {
            self.source.join(coord.file_name())
        } else {
            self.source.clone()
        }
    }
}

impl WorldStore for AnvilStore {
    type Region = AnvilRegion;

    fn open_region(&self, coord: RegionCoord) -> Result<AnvilRegion, WorldError> {
        let path = self.region_path(coord);
        let file = File::open(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => WorldError::MissingRegion(path.clone()),
            _ => WorldError::Io(path.clone(), e),
        })?;
        let region = Region::from_stream(file).map_err(|e| WorldError::Region(path.clone(), e))?;
        log::debug!("opened region {} from {}", coord, path.display());
        Ok(AnvilRegion {
            coord,
            path,
            region,
        })
    }
}

pub struct AnvilRegion {
    coord: RegionCoord,
    path: PathBuf,
    region: Region<File>,
}

impl RegionHandle for AnvilRegion {
    type Chunk = AnvilChunk;

    fn coord(&self) -> RegionCoord {
        self.coord
    }

    fn chunk(&mut self, cx: usize, cz: usize) -> Result<Option<AnvilChunk>, WorldError> {
        let data = self
            .region
            .read_chunk(cx, cz)
            .map_err(|e| WorldError::Region(self.path.clone(), e))?;
        match data {
            Some(bytes) => AnvilChunk::from_nbt(&bytes)
                .map(Some)
                .map_err(|source| WorldError::Decode { cx, cz, source }),
            None => Ok(None),
        }
    }
}

/// One decoded chunk column, sections 0..16 (elevation 0..256).
#[derive(Clone, Debug, Default)]
pub struct AnvilChunk {
    sections: Vec<Option<Section>>,
}

#[derive(Clone, Debug)]
struct Section {
    palette: Vec<String>,
    // Empty when the palette has a single entry covering the whole section.
    indices: Vec<u16>,
}

impl Section {
    #[inline]
    fn block_id(&self, x: usize, y: usize, z: usize) -> &str {
        let slot = if self.indices.is_empty() {
            0
        } else {
            self.indices[(y * CHUNK_EDGE + z) * CHUNK_EDGE + x] as usize
        };
        self.palette.get(slot).map(String::as_str).unwrap_or(AIR)
    }
}

impl AnvilChunk {
    /// Decodes uncompressed chunk NBT.
    pub fn from_nbt(bytes: &[u8]) -> Result<Self, DecodeError> {
        let nbt: ChunkNbt = fastnbt::from_bytes(bytes).map_err(DecodeError::Nbt)?;
        let spanning = nbt.data_version < PADDED_STATES_VERSION;
        let mut chunk = AnvilChunk {
            sections: vec![None; SECTION_COUNT],
        };
        let raw = match nbt.level {
            Some(level) => level
                .sections
                .into_iter()
                .map(|s| (s.y, s.palette, s.block_states))
                .collect::<Vec<_>>(),
            None => nbt
                .sections
                .into_iter()
                .map(|s| match s.block_states {
                    Some(bs) => (s.y, Some(bs.palette), bs.data),
                    None => (s.y, None, None),
                })
                .collect(),
        };
        for (y, palette, states) in raw {
            // Below-zero sections of 1.18+ worlds are outside the scanned range.
            if y < 0 || y as usize >= SECTION_COUNT {
                continue;
            }
            let Some(palette) = palette else {
                continue;
            };
            let names: Vec<String> = palette
                .into_iter()
                .map(|p| normalize_block_name(&p.name).to_string())
                .collect();
            let indices = match states {
                Some(data) if names.len() > 1 => unpack_indices(&data, names.len(), spanning)?,
                Some(_) | None if names.len() == 1 => Vec::new(),
                _ => continue,
            };
            chunk.sections[y as usize] = Some(Section {
                palette: names,
                indices,
            });
        }
        Ok(chunk)
    }
}

impl ChunkView for AnvilChunk {
    fn block_id(&self, x: usize, y: usize, z: usize) -> &str {
        if x >= CHUNK_EDGE || z >= CHUNK_EDGE || y >= MAX_HEIGHT {
            return AIR;
        }
        match &self.sections[y / SECTION_HEIGHT] {
            Some(section) => section.block_id(x, y % SECTION_HEIGHT, z),
            None => AIR,
        }
    }
}

/// Bits per packed palette index: at least 4, enough to address every entry.
#[inline]
pub fn bits_per_index(palette_len: usize) -> usize {
    let needed = if palette_len <= 1 {
        0
    } else {
        (usize::BITS - (palette_len - 1).leading_zeros()) as usize
    };
    needed.max(4)
}

/// Unpacks the 4096 palette indices of one section.
///
/// With `spanning`, indices are laid out back to back and may straddle two
/// longs (pre-20w17a). Otherwise each long holds `64 / bits` indices and the
/// remaining high bits are padding.
pub fn unpack_indices(
    data: &[i64],
    palette_len: usize,
    spanning: bool,
) -> Result<Vec<u16>, DecodeError> {
    let bits = bits_per_index(palette_len);
    let mask = (1u64 << bits) - 1;
    let needed = if spanning {
        (SECTION_VOLUME * bits).div_ceil(64)
    } else {
        SECTION_VOLUME.div_ceil(64 / bits)
    };
    if data.len() < needed {
        return Err(DecodeError::ShortBlockStates {
            longs: data.len(),
            needed,
            bits,
        });
    }
    let mut out = Vec::with_capacity(SECTION_VOLUME);
    for i in 0..SECTION_VOLUME {
        let v = if spanning {
            let bit = i * bits;
            let word = bit / 64;
            let off = bit % 64;
            let mut v = (data[word] as u64) >> off;
            if off + bits > 64 {
                v |= (data[word + 1] as u64) << (64 - off);
            }
            v & mask
        } else {
            let per_long = 64 / bits;
            let word = i / per_long;
            let off = (i % per_long) * bits;
            ((data[word] as u64) >> off) & mask
        };
        out.push(v as u16);
    }
    Ok(out)
}

// --- NBT layout ---

#[derive(Deserialize)]
struct ChunkNbt {
    #[serde(rename = "DataVersion", default)]
    data_version: i32,
    #[serde(rename = "Level", default)]
    level: Option<LevelNbt>,
    #[serde(default)]
    sections: Vec<SectionNbt>,
}

#[derive(Deserialize)]
struct LevelNbt {
    #[serde(rename = "Sections", default)]
    sections: Vec<LegacySectionNbt>,
}

#[derive(Deserialize)]
struct LegacySectionNbt {
    #[serde(rename = "Y")]
    y: i8,
    #[serde(rename = "Palette", default)]
    palette: Option<Vec<PaletteEntryNbt>>,
    #[serde(rename = "BlockStates", default)]
    block_states: Option<LongArray>,
}

#[derive(Deserialize)]
struct SectionNbt {
    #[serde(rename = "Y")]
    y: i8,
    #[serde(default)]
    block_states: Option<BlockStatesNbt>,
}

#[derive(Deserialize)]
struct BlockStatesNbt {
    palette: Vec<PaletteEntryNbt>,
    #[serde(default)]
    data: Option<LongArray>,
}

#[derive(Deserialize)]
struct PaletteEntryNbt {
    #[serde(rename = "Name")]
    name: String,
}
