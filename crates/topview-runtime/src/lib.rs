//! Quadrant job splitting and the bounded render worker pool.
#![forbid(unsafe_code)]

mod job;
mod quadrant;

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

use crossbeam_channel::unbounded;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use topview_blocks::BlockPalette;
use topview_render::{ImageSink, ScanPolicy};
use topview_world::{RegionCoord, WorldStore};

pub use job::{JobError, JobOutcome, RunSummary, render_quadrant, render_whole_region};
pub use quadrant::Quadrant;

pub const DEFAULT_WORKERS: usize = 2;

/// Runs quadrant jobs on a fixed number of OS threads.
pub struct Scheduler {
    pool: ThreadPool,
    workers: usize,
    scan: ScanPolicy,
}

impl Scheduler {
    pub fn new(workers: usize) -> Result<Self, ThreadPoolBuildError> {
        let workers = workers.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("topview-render-{i}"))
            .build()?;
        Ok(Self {
            pool,
            workers,
            scan: ScanPolicy::default(),
        })
    }

    /// Column scan used by every job of this scheduler.
    pub fn with_scan_policy(mut self, scan: ScanPolicy) -> Self {
        self.scan = scan;
        self
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Renders all four quadrants of every region in `regions` and writes
    /// each tile into `out_dir`.
    ///
    /// Returns after every job has finished, one outcome per quadrant sorted
    /// by region and offset. A failing or panicking job is reported in its
    /// outcome and does not affect the others.
    pub fn run<S, K>(
        &self,
        store: &S,
        palette: &BlockPalette,
        sink: &K,
        regions: &[RegionCoord],
        out_dir: &Path,
    ) -> Vec<JobOutcome>
    where
        S: WorldStore,
        K: ImageSink,
    {
        let (tx, rx) = unbounded::<JobOutcome>();
        let jobs: Vec<Quadrant> = regions.iter().flat_map(|r| Quadrant::all(*r)).collect();
        let scan = self.scan;
        log::info!(
            target: "jobs",
            "scheduling {} quadrant job(s) on {} worker(s), {:?} scan",
            jobs.len(),
            self.workers,
            scan
        );

        self.pool.scope(|s| {
            for quadrant in jobs {
                let tx = tx.clone();
                s.spawn(move |_| {
                    let output = out_dir.join(quadrant.output_name());
                    let t0 = Instant::now();
                    log::info!(target: "jobs", "[{}] started", quadrant);
                    let result = panic::catch_unwind(AssertUnwindSafe(|| {
                        render_quadrant(store, palette, sink, quadrant, scan, &output)
                    }))
                    .unwrap_or(Err(JobError::Panicked));
                    match &result {
                        Ok(report) => log::info!(
                            target: "jobs",
                            "[{}] wrote {} in {} ms ({} absent chunk(s), {} unknown block(s))",
                            quadrant,
                            output.display(),
                            t0.elapsed().as_millis(),
                            report.absent_chunks,
                            report.unknown_blocks.len()
                        ),
                        Err(e) => log::error!("[{}] failed: {}", quadrant, e),
                    }
                    let _ = tx.send(JobOutcome {
                        quadrant,
                        output,
                        result,
                    });
                });
            }
        });
        drop(tx);

        let mut outcomes: Vec<JobOutcome> = rx.into_iter().collect();
        outcomes.sort_by_key(|o| o.quadrant);
        outcomes
    }
}
