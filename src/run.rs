use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use topview_blocks::BlockPalette;
use topview_render::{ImageSink, PngSink, ScanPolicy};
use topview_runtime::{RunSummary, Scheduler, render_whole_region};
use topview_world::{AnvilStore, RegionCoord, WorldStore, parse_region_file_name};

use crate::cli::Mode;
use crate::config::Settings;

/// Builtin palette with the optional user palette laid over it.
pub fn load_palette(user: Option<&Path>) -> Result<BlockPalette, Box<dyn Error>> {
    let mut palette = BlockPalette::builtin();
    if let Some(path) = user {
        let extra = BlockPalette::from_path(path)?;
        log::info!("merged {} color(s) from {}", extra.len(), path.display());
        palette.merge(extra);
    }
    Ok(palette)
}

/// Written next to the tiles by `--gen-range`.
pub const RANGE_FILE_NAME: &str = "chunk_range.json";

/// Region coordinates of every `r.X.Z.mca` file in `dir`, sorted.
pub fn discover_regions(dir: &Path) -> io::Result<Vec<RegionCoord>> {
    let mut regions = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        match parse_region_file_name(&path) {
            Some(coord) if path.is_file() => regions.push(coord),
            _ => log::info!("skipping {}: not a region file", path.display()),
        }
    }
    regions.sort();
    Ok(regions)
}

/// Bounds of `regions` as `[min_x, min_z, max_x, max_z]`, max exclusive.
pub fn region_range(regions: &[RegionCoord]) -> Option<[i32; 4]> {
    let first = regions.first()?;
    let init = [first.x, first.z, first.x + 1, first.z + 1];
    Some(regions.iter().fold(init, |[x0, z0, x1, z1], r| {
        [x0.min(r.x), z0.min(r.z), x1.max(r.x + 1), z1.max(r.z + 1)]
    }))
}

pub fn write_range_file(out_dir: &Path, range: [i32; 4]) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(RANGE_FILE_NAME);
    let mut text = serde_json::to_string(&range)?;
    text.push('\n');
    fs::write(&path, text).map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
    Ok(path)
}

pub fn execute(
    mode: &Mode,
    settings: &Settings,
    palette: &BlockPalette,
) -> Result<RunSummary, Box<dyn Error>> {
    if settings.gen_range && !matches!(mode, Mode::Directory { .. }) {
        log::warn!("--gen-range only applies when rendering a whole directory");
    }
    match mode {
        Mode::Quadrants { source, region } => {
            let store = AnvilStore::new(source);
            render_regions(&store, palette, &PngSink, &[*region], settings)
        }
        Mode::Directory { dir } => {
            let regions = discover_regions(dir)
                .map_err(|e| format!("cannot list {}: {}", dir.display(), e))?;
            if regions.is_empty() {
                log::warn!("no region files found in {}", dir.display());
            }
            let store = AnvilStore::new(dir);
            let summary = render_regions(&store, palette, &PngSink, &regions, settings)?;
            if settings.gen_range {
                match region_range(&regions) {
                    Some(range) => {
                        let path = write_range_file(&settings.out_dir, range)?;
                        log::info!("wrote region range {:?} to {}", range, path.display());
                    }
                    None => log::warn!("no regions rendered; {} not written", RANGE_FILE_NAME),
                }
            }
            Ok(summary)
        }
        Mode::Single {
            source,
            region,
            output,
        } => {
            let store = AnvilStore::new(source);
            Ok(render_single(
                &store,
                palette,
                &PngSink,
                *region,
                settings.scan,
                output,
            ))
        }
    }
}

pub fn render_regions<S, K>(
    store: &S,
    palette: &BlockPalette,
    sink: &K,
    regions: &[RegionCoord],
    settings: &Settings,
) -> Result<RunSummary, Box<dyn Error>>
where
    S: WorldStore,
    K: ImageSink,
{
    let scheduler = Scheduler::new(settings.workers)?.with_scan_policy(settings.scan);
    let outcomes = scheduler.run(store, palette, sink, regions, &settings.out_dir);
    Ok(RunSummary::from_outcomes(&outcomes))
}

pub fn render_single<S, K>(
    store: &S,
    palette: &BlockPalette,
    sink: &K,
    region: RegionCoord,
    scan: ScanPolicy,
    output: &Path,
) -> RunSummary
where
    S: WorldStore,
    K: ImageSink,
{
    let result = render_whole_region(store, palette, sink, region, scan, output);
    match &result {
        Ok(_) => log::info!("wrote {}", output.display()),
        Err(e) => log::error!("region {} failed: {}", region, e),
    }
    let mut summary = RunSummary::default();
    summary.add(&result);
    summary
}
