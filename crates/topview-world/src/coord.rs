use std::path::Path;

use crate::REGION_CHUNKS;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionCoord {
    pub x: i32,
    pub z: i32,
}

impl RegionCoord {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// `r.{x}.{z}.mca`
    pub fn file_name(self) -> String {
        format!("r.{}.{}.mca", self.x, self.z)
    }

    /// Absolute chunk coordinate of a region-relative chunk.
    #[inline]
    pub fn chunk_origin(self, cx: usize, cz: usize) -> (i32, i32) {
        (
            self.x * REGION_CHUNKS as i32 + cx as i32,
            self.z * REGION_CHUNKS as i32 + cz as i32,
        )
    }
}

impl std::fmt::Display for RegionCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Parses `r.<x>.<z>.mca` into region coordinates. Anything else is `None`.
pub fn parse_region_file_name(path: impl AsRef<Path>) -> Option<RegionCoord> {
    let name = path.as_ref().file_name()?.to_str()?;
    let rest = name.strip_prefix("r.")?.strip_suffix(".mca")?;
    let (x, z) = rest.split_once('.')?;
    Some(RegionCoord::new(x.parse().ok()?, z.parse().ok()?))
}
