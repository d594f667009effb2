use topview_blocks::is_transparent;
use topview_world::{ChunkView, MAX_HEIGHT};

/// Highest elevation scanned in the nether, just under the bedrock ceiling.
pub const NETHER_CEILING: usize = 127;

/// What a column looks like from above.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Column<'a> {
    Block { id: &'a str, elevation: i32 },
    Empty,
}

/// How a column is scanned.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ScanPolicy {
    /// From the top of the world; the first non-transparent block wins.
    #[default]
    Overworld,
    /// From `NETHER_CEILING` down. Solid blocks are skipped until the first
    /// transparent one, so the roof is looked through.
    Nether,
}

impl ScanPolicy {
    #[inline]
    fn top(self) -> usize {
        match self {
            ScanPolicy::Overworld => MAX_HEIGHT - 1,
            ScanPolicy::Nether => NETHER_CEILING,
        }
    }
}

/// Scans one column downward and returns the first visible block under
/// `policy`. First match wins; nothing below it is consulted.
pub fn resolve<C: ChunkView + ?Sized>(
    chunk: &C,
    x: usize,
    z: usize,
    policy: ScanPolicy,
) -> Column<'_> {
    let mut air_found = policy == ScanPolicy::Overworld;
    for y in (0..=policy.top()).rev() {
        let id = chunk.block_id(x, y, z);
        if is_transparent(id) {
            air_found = true;
            continue;
        }
        if air_found {
            return Column::Block {
                id,
                elevation: y as i32,
            };
        }
    }
    Column::Empty
}
