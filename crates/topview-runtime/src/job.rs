use std::path::{Path, PathBuf};

use topview_blocks::BlockPalette;
use topview_render::{
    ImageSink, RenderError, ScanPolicy, SinkError, TileReport, TileSpec, render_tile,
};
use topview_world::{RegionCoord, WorldError, WorldStore};

use crate::quadrant::Quadrant;

#[derive(Debug)]
pub enum JobError {
    Open(WorldError),
    Render(RenderError),
    Write(SinkError),
    Panicked,
}

/// Result of one quadrant job.
#[derive(Debug)]
pub struct JobOutcome {
    pub quadrant: Quadrant,
    pub output: PathBuf,
    pub result: Result<TileReport, JobError>,
}

/// Totals over a batch of job outcomes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub failed: usize,
    pub absent_chunks: usize,
    pub empty_columns: usize,
    pub unknown_blocks: usize,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[JobOutcome]) -> Self {
        let mut summary = RunSummary::default();
        for outcome in outcomes {
            summary.add(&outcome.result);
        }
        summary
    }

    pub fn add(&mut self, result: &Result<TileReport, JobError>) {
        match result {
            Ok(report) => {
                self.written += 1;
                self.absent_chunks += report.absent_chunks;
                self.empty_columns += report.empty_columns;
                self.unknown_blocks += report.unknown_blocks.len();
            }
            Err(_) => self.failed += 1,
        }
    }

    #[inline]
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

fn render_and_write<S, K>(
    store: &S,
    palette: &BlockPalette,
    sink: &K,
    region: RegionCoord,
    tile: TileSpec,
    scan: ScanPolicy,
    output: &Path,
) -> Result<TileReport, JobError>
where
    S: WorldStore,
    K: ImageSink,
{
    let mut handle = store.open_region(region).map_err(JobError::Open)?;
    let rendered = render_tile(&mut handle, palette, tile, scan).map_err(JobError::Render)?;
    sink.write_raster(&rendered.raster, output).map_err(JobError::Write)?;
    Ok(rendered.report)
}

/// One quadrant job: open the region, render the quadrant, write the tile.
/// Nothing is written unless the whole tile rendered.
pub fn render_quadrant<S, K>(
    store: &S,
    palette: &BlockPalette,
    sink: &K,
    quadrant: Quadrant,
    scan: ScanPolicy,
    output: &Path,
) -> Result<TileReport, JobError>
where
    S: WorldStore,
    K: ImageSink,
{
    render_and_write(
        store,
        palette,
        sink,
        quadrant.region,
        quadrant.tile(),
        scan,
        output,
    )
}

/// Renders a whole region as one tile on the calling thread.
pub fn render_whole_region<S, K>(
    store: &S,
    palette: &BlockPalette,
    sink: &K,
    region: RegionCoord,
    scan: ScanPolicy,
    output: &Path,
) -> Result<TileReport, JobError>
where
    S: WorldStore,
    K: ImageSink,
{
    render_and_write(
        store,
        palette,
        sink,
        region,
        TileSpec::whole_region(),
        scan,
        output,
    )
}

impl std::fmt::Display for JobError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobError::Open(e) => write!(f, "{}", e),
            JobError::Render(e) => write!(f, "{}", e),
            JobError::Write(e) => write!(f, "{}", e),
            JobError::Panicked => write!(f, "render job panicked"),
        }
    }
}

impl std::error::Error for JobError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JobError::Open(e) => Some(e),
            JobError::Render(e) => Some(e),
            JobError::Write(e) => Some(e),
            JobError::Panicked => None,
        }
    }
}
