use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use proptest::prelude::*;
use topview_blocks::{BlockPalette, Rgb};
use topview_render::{ImageSink, Raster, ScanPolicy, SinkError};
use topview_runtime::{JobError, Quadrant, RunSummary, Scheduler, render_whole_region};
use topview_world::{MemoryChunk, MemoryStore, RegionCoord};

#[derive(Default)]
struct RecordingSink {
    written: Mutex<Vec<(PathBuf, Raster)>>,
    panic_on: Option<PathBuf>,
}

impl RecordingSink {
    fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .written
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect();
        paths.sort();
        paths
    }

    fn raster(&self, path: &Path) -> Raster {
        self.written
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, r)| r.clone())
            .expect("raster written")
    }
}

impl ImageSink for RecordingSink {
    fn write_raster(&self, raster: &Raster, path: &Path) -> Result<(), SinkError> {
        if self.panic_on.as_deref() == Some(path) {
            panic!("sink exploded on {}", path.display());
        }
        self.written
            .lock()
            .unwrap()
            .push((path.to_path_buf(), raster.clone()));
        Ok(())
    }
}

fn make_palette() -> BlockPalette {
    [("stone", Rgb::new(125, 125, 125)), ("sand", Rgb::new(219, 207, 163))]
        .into_iter()
        .collect()
}

fn world_for(region: RegionCoord) -> MemoryStore {
    let mut store = MemoryStore::new();
    for (i, (cx, cz)) in [(0, 0), (5, 20), (17, 3), (31, 31), (16, 16)].into_iter().enumerate() {
        let (ax, az) = region.chunk_origin(cx, cz);
        let id = if i % 2 == 0 { "stone" } else { "sand" };
        store.insert_chunk(ax, az, MemoryChunk::from_surface(|x, z| (30 + x + (z % 3), id)));
    }
    store
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn four_quadrants_are_written_with_doubled_coordinates() {
    let region = RegionCoord::new(-1, 2);
    let store = world_for(region);
    let sink = RecordingSink::default();
    let scheduler = Scheduler::new(2).unwrap();
    let out_dir = Path::new("tiles");

    let outcomes = scheduler.run(&store, &make_palette(), &sink, &[region], out_dir);

    assert_eq!(outcomes.len(), 4);
    assert!(outcomes.iter().all(|o| o.result.is_ok()));
    assert_eq!(
        names(&sink.paths()),
        vec!["-1,4.png", "-1,5.png", "-2,4.png", "-2,5.png"]
    );
    assert!(sink.paths().iter().all(|p| p.starts_with(out_dir)));
    let summary = RunSummary::from_outcomes(&outcomes);
    assert_eq!(summary.written, 4);
    assert_eq!(summary.absent_chunks, 4 * 256 - 5);
    assert_eq!(summary.empty_columns, 0);
    assert!(summary.all_succeeded());
}

#[test]
fn scheduled_quadrants_match_single_tile_render() {
    let region = RegionCoord::new(3, -4);
    let store = world_for(region);
    let palette = make_palette();
    let sink = RecordingSink::default();
    Scheduler::new(3)
        .unwrap()
        .run(&store, &palette, &sink, &[region], Path::new("."));
    render_whole_region(
        &store,
        &palette,
        &sink,
        region,
        ScanPolicy::Overworld,
        Path::new("whole.png"),
    )
    .unwrap();

    let whole = sink.raster(Path::new("whole.png"));
    let mut stitched = Raster::new(512, 512);
    for q in Quadrant::all(region) {
        let tile = sink.raster(&Path::new(".").join(q.output_name()));
        stitched.blit(&tile, q.offx * 256, q.offz * 256);
    }
    assert!(whole == stitched);
}

#[test]
fn corrupt_quadrant_does_not_stop_siblings() {
    let region = RegionCoord::new(0, 0);
    let mut store = world_for(region);
    // chunk (20, 2) lives in quadrant (1, 0)
    store.insert_corrupt(20, 2);
    let sink = RecordingSink::default();
    let outcomes = Scheduler::new(2)
        .unwrap()
        .run(&store, &make_palette(), &sink, &[region], Path::new("."));

    for o in &outcomes {
        if (o.quadrant.offx, o.quadrant.offz) == (1, 0) {
            assert!(matches!(o.result, Err(JobError::Render(_))));
        } else {
            assert!(o.result.is_ok(), "{} failed", o.quadrant);
        }
    }
    assert_eq!(names(&sink.paths()), vec!["0,0.png", "0,1.png", "1,1.png"]);
    let summary = RunSummary::from_outcomes(&outcomes);
    assert_eq!((summary.written, summary.failed), (3, 1));
    assert!(!summary.all_succeeded());
}

#[test]
fn panicking_job_is_contained() {
    let region = RegionCoord::new(0, 0);
    let store = world_for(region);
    let sink = RecordingSink {
        panic_on: Some(Path::new(".").join("1,1.png")),
        ..Default::default()
    };
    let outcomes = Scheduler::new(1)
        .unwrap()
        .run(&store, &make_palette(), &sink, &[region], Path::new("."));

    assert_eq!(outcomes.len(), 4);
    let failed: Vec<_> = outcomes.iter().filter(|o| o.result.is_err()).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].quadrant, Quadrant::new(region, 1, 1));
    assert!(matches!(failed[0].result, Err(JobError::Panicked)));
    assert_eq!(sink.paths().len(), 3);
}

#[test]
fn many_regions_share_one_pool() {
    let regions = [RegionCoord::new(0, 0), RegionCoord::new(1, 0), RegionCoord::new(0, -1)];
    let store = MemoryStore::new();
    let sink = RecordingSink::default();
    let outcomes = Scheduler::new(4)
        .unwrap()
        .run(&store, &make_palette(), &sink, &regions, Path::new("."));
    assert_eq!(outcomes.len(), 12);
    let unique: HashSet<_> = sink.paths().into_iter().collect();
    assert_eq!(unique.len(), 12);
    // outcomes come back sorted by region, then offset
    let order: Vec<Quadrant> = outcomes.iter().map(|o| o.quadrant).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
}

#[test]
fn nether_policy_reaches_every_job() {
    let region = RegionCoord::new(0, 0);
    let mut store = MemoryStore::new();
    // one chunk per quadrant: solid to the ceiling except for a single column
    for (cx, cz) in [(0, 0), (16, 0), (0, 16), (16, 16)] {
        let mut chunk = MemoryChunk::from_surface(|_, _| (127, "stone"));
        chunk.set_block(0, 127, 0, "air");
        store.insert_chunk(cx, cz, chunk);
    }
    let sink = RecordingSink::default();
    let outcomes = Scheduler::new(2)
        .unwrap()
        .with_scan_policy(ScanPolicy::Nether)
        .run(&store, &make_palette(), &sink, &[region], Path::new("."));

    let summary = RunSummary::from_outcomes(&outcomes);
    assert_eq!(summary.written, 4);
    // no gap below the roof except at local (0, 0) of each chunk
    assert_eq!(summary.empty_columns, 4 * 255);
    for q in Quadrant::all(region) {
        let tile = sink.raster(&Path::new(".").join(q.output_name()));
        assert_eq!(tile.pixel(0, 0), Rgb::new(125, 125, 125));
        assert_eq!(tile.pixel(1, 0), Rgb::SENTINEL);
    }
}

#[test]
fn zero_workers_still_runs() {
    assert_eq!(Scheduler::new(0).unwrap().workers(), 1);
    assert_eq!(Scheduler::new(5).unwrap().workers(), 5);
}

proptest! {
    #[test]
    fn output_name_doubles_region_coordinates(rx in -10_000i32..10_000, rz in -10_000i32..10_000) {
        let region = RegionCoord::new(rx, rz);
        let mut seen = HashSet::new();
        for q in Quadrant::all(region) {
            let expect = format!("{},{}.png", rx * 2 + q.offx as i32, rz * 2 + q.offz as i32);
            prop_assert_eq!(q.output_name(), expect);
            prop_assert!(seen.insert(q.tile_coord()));
        }
        prop_assert_eq!(seen.len(), 4);
    }
}
