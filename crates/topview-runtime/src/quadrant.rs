use topview_render::TileSpec;
use topview_world::RegionCoord;

/// One 16×16-chunk quarter of a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quadrant {
    pub region: RegionCoord,
    pub offx: usize,
    pub offz: usize,
}

impl Quadrant {
    pub fn new(region: RegionCoord, offx: usize, offz: usize) -> Self {
        debug_assert!(offx < 2 && offz < 2);
        Self { region, offx, offz }
    }

    pub fn all(region: RegionCoord) -> [Quadrant; 4] {
        [
            Quadrant::new(region, 0, 0),
            Quadrant::new(region, 0, 1),
            Quadrant::new(region, 1, 0),
            Quadrant::new(region, 1, 1),
        ]
    }

    #[inline]
    pub fn tile(&self) -> TileSpec {
        TileSpec::quadrant(self.offx, self.offz)
    }

    /// Position in the grid of half-region tiles.
    #[inline]
    pub fn tile_coord(&self) -> (i32, i32) {
        (
            self.region.x * 2 + self.offx as i32,
            self.region.z * 2 + self.offz as i32,
        )
    }

    /// `"{tile_x},{tile_z}.png"`
    pub fn output_name(&self) -> String {
        let (x, z) = self.tile_coord();
        format!("{x},{z}.png")
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "r.{}.{} +{},{}",
            self.region.x, self.region.z, self.offx, self.offz
        )
    }
}
