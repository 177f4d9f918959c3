use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use log::{debug, info};

use crate::capture::{CaptureBackend, CaptureWorker, FrameBuffer};
use crate::config::Config;
use crate::convert::{convert_table, BbHistory, BbSnapshot};
use crate::display::DisplayLoop;
use crate::models::BbState;
use crate::ocr::{OcrEngine, OcrPipeline};
use crate::parser::{assemble_table_state, sanitize};
use crate::pipeline::stats::{PipelineStats, StatsSnapshot};
use crate::pipeline::worker_pool::WorkerPool;

const FRAME_POLL_TIMEOUT: Duration = Duration::from_millis(100);
const STOP_TIMEOUT: Duration = Duration::from_secs(3);

/// Coordinates the full pipeline: capture thread, processing thread, and the
/// latest-result cell the display loop polls.
///
/// The OCR pipeline (with its cache) is owned by the processing worker for
/// the duration of a run; only the frame buffer and the latest cell cross
/// thread boundaries.
pub struct Orchestrator<B, E>
where
    B: CaptureBackend + 'static,
    E: OcrEngine + 'static,
{
    frame_buffer: Arc<FrameBuffer>,
    capture: CaptureWorker<B>,
    ocr: Arc<Mutex<OcrPipeline<E>>>,
    latest: Arc<Mutex<Option<BbState>>>,
    history: Arc<Mutex<BbHistory>>,
    stats: Arc<PipelineStats>,
    pool: WorkerPool,
}

impl<B, E> Orchestrator<B, E>
where
    B: CaptureBackend + 'static,
    E: OcrEngine + 'static,
{
    pub fn new(backend: B, engine: E, config: &Config) -> Self {
        let stats = Arc::new(PipelineStats::new());
        let frame_buffer = Arc::new(FrameBuffer::new(config.capture.buffer_capacity));
        let capture = CaptureWorker::new(
            backend,
            Arc::clone(&frame_buffer),
            Arc::clone(&stats),
            config.capture.fps,
        );
        Self {
            frame_buffer,
            capture,
            ocr: Arc::new(Mutex::new(OcrPipeline::new(engine, &config.ocr))),
            latest: Arc::new(Mutex::new(None)),
            history: Arc::new(Mutex::new(BbHistory::new(config.pipeline.history_size))),
            stats,
            pool: WorkerPool::new(),
        }
    }

    /// Starts the capture and processing threads. Idempotent while running.
    pub fn start(&mut self) -> Result<()> {
        if self.running() {
            return Ok(());
        }
        info!("starting pipeline");
        self.pool.clear_stop();
        self.capture.start()?;

        let buffer = Arc::clone(&self.frame_buffer);
        let ocr = Arc::clone(&self.ocr);
        let latest = Arc::clone(&self.latest);
        let history = Arc::clone(&self.history);
        let stats = Arc::clone(&self.stats);
        self.pool.spawn("processing", move |stop| {
            process_loop(stop, buffer, ocr, latest, history, stats)
        })?;
        info!("pipeline running");
        Ok(())
    }

    /// Stops the processing thread, then the capture thread. A no-op when
    /// nothing is running.
    pub fn stop(&mut self) {
        info!("stopping pipeline");
        self.pool.stop(STOP_TIMEOUT);
        self.capture.stop(STOP_TIMEOUT);
        info!("pipeline stopped");
    }

    pub fn running(&self) -> bool {
        self.pool.alive_count() > 0 || self.capture.running()
    }

    /// Non-blocking snapshot of the most recently published state, if any.
    pub fn get_latest(&self) -> Option<BbState> {
        self.latest.lock().unwrap().clone()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Most recent history entry, if any pipeline run has published yet.
    pub fn latest_snapshot(&self) -> Option<BbSnapshot> {
        self.history.lock().unwrap().latest().cloned()
    }

    /// Builds a display loop over the latest-result cell. The caller drives
    /// its run loop on whichever thread owns the display surface.
    pub fn display_loop(&self, refresh_hz: u32) -> DisplayLoop<impl Fn() -> Option<BbState>> {
        let latest = Arc::clone(&self.latest);
        DisplayLoop::new(move || latest.lock().unwrap().clone(), refresh_hz)
    }
}

fn process_loop<E: OcrEngine>(
    stop: Arc<AtomicBool>,
    buffer: Arc<FrameBuffer>,
    ocr: Arc<Mutex<OcrPipeline<E>>>,
    latest: Arc<Mutex<Option<BbState>>>,
    history: Arc<Mutex<BbHistory>>,
    stats: Arc<PipelineStats>,
) {
    let mut ocr = ocr.lock().unwrap();
    while !stop.load(Ordering::SeqCst) {
        // An empty poll is a normal outcome, not an error.
        let Some(frame) = buffer.get(FRAME_POLL_TIMEOUT) else {
            continue;
        };

        let result = match ocr.process(&frame) {
            Ok(Some(result)) => result,
            Ok(None) => continue,
            Err(err) => {
                debug!("ocr failed: {err}");
                stats.record_ocr_error();
                continue;
            }
        };
        stats.set_cache_hit_rate(ocr.cache_hit_rate());

        let table = match assemble_table_state(&result.text) {
            Ok(table) => table,
            Err(err) => {
                debug!("parse failed ({err}) for: {:.80}", result.text);
                stats.record_parse_error();
                continue;
            }
        };
        let table = match sanitize(table) {
            Ok(table) => table,
            Err(err) => {
                debug!("sanitizer rejected state: {err}");
                stats.record_parse_error();
                continue;
            }
        };

        let bb_state = convert_table(&table);
        history.lock().unwrap().record(&bb_state);
        *latest.lock().unwrap() = Some(bb_state);
        stats.record_frame();
    }
}
