use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::capture::backend::CaptureBackend;
use crate::capture::fps::FpsController;
use crate::capture::FrameBuffer;
use crate::pipeline::{join_with_timeout, PipelineStats};

const GRAB_FAILURE_BACKOFF: Duration = Duration::from_millis(50);

/// Background thread that continuously grabs frames into the frame buffer at
/// a throttled rate.
///
/// The backend rides behind a mutex the worker thread holds for the duration
/// of a run; between runs the same backend is reused. A failed grab is
/// logged, counted, and followed by a short backoff; it never kills the
/// worker.
pub struct CaptureWorker<B: CaptureBackend + 'static> {
    backend: Arc<Mutex<B>>,
    buffer: Arc<FrameBuffer>,
    stats: Arc<PipelineStats>,
    target_fps: u32,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl<B: CaptureBackend + 'static> CaptureWorker<B> {
    pub fn new(
        backend: B,
        buffer: Arc<FrameBuffer>,
        stats: Arc<PipelineStats>,
        target_fps: u32,
    ) -> Self {
        Self {
            backend: Arc::new(Mutex::new(backend)),
            buffer,
            stats,
            target_fps,
            stop: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Starts the capture thread. Idempotent while the thread is alive.
    pub fn start(&mut self) -> Result<()> {
        if self.running() {
            return Ok(());
        }
        self.stop.store(false, Ordering::SeqCst);

        let backend = Arc::clone(&self.backend);
        let buffer = Arc::clone(&self.buffer);
        let stats = Arc::clone(&self.stats);
        let stop = Arc::clone(&self.stop);
        let target_fps = self.target_fps;
        let handle = thread::Builder::new()
            .name("capture".into())
            .spawn(move || capture_loop(backend, buffer, stats, stop, target_fps))
            .context("failed to spawn capture thread")?;
        self.handle = Some(handle);
        info!("capture worker started (target {} fps)", self.target_fps);
        Ok(())
    }

    /// Requests cooperative termination and joins within `timeout`. A thread
    /// that fails to exit in time is detached and tolerated.
    pub fn stop(&mut self, timeout: Duration) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if !join_with_timeout(handle, timeout) {
                warn!("capture thread did not stop within {timeout:?}, detaching");
            }
        }
        info!("capture worker stopped");
    }

    pub fn running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

fn capture_loop<B: CaptureBackend>(
    backend: Arc<Mutex<B>>,
    buffer: Arc<FrameBuffer>,
    stats: Arc<PipelineStats>,
    stop: Arc<AtomicBool>,
    target_fps: u32,
) {
    let mut backend = backend.lock().unwrap();
    if let Err(err) = backend.open() {
        warn!("capture backend failed to open: {err}");
        stats.record_capture_error();
        return;
    }

    let mut fps = FpsController::new(target_fps);
    while !stop.load(Ordering::SeqCst) {
        match backend.grab() {
            Ok(frame) => buffer.put(frame),
            Err(err) => {
                warn!("frame grab failed: {err}");
                stats.record_capture_error();
                thread::sleep(GRAB_FAILURE_BACKOFF);
            }
        }
        fps.tick();
        stats.set_capture_fps(fps.actual_fps());
    }
    backend.close();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::backend::CaptureError;
    use crate::capture::frame::Frame;
    use std::sync::atomic::AtomicUsize;

    struct CountingBackend {
        opens: Arc<AtomicUsize>,
        grabs: Arc<AtomicUsize>,
        fail_every_other: bool,
    }

    impl CaptureBackend for CountingBackend {
        fn open(&mut self) -> Result<(), CaptureError> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn grab(&mut self) -> Result<Frame, CaptureError> {
            let n = self.grabs.fetch_add(1, Ordering::SeqCst);
            if self.fail_every_other && n % 2 == 1 {
                return Err(CaptureError::Grab("synthetic fault".into()));
            }
            Ok(Frame::new(2, 2, vec![0; 16]))
        }

        fn close(&mut self) {}
    }

    fn worker(
        fail_every_other: bool,
        opens: Arc<AtomicUsize>,
        grabs: Arc<AtomicUsize>,
    ) -> (CaptureWorker<CountingBackend>, Arc<FrameBuffer>, Arc<PipelineStats>) {
        let backend = CountingBackend {
            opens,
            grabs,
            fail_every_other,
        };
        let buffer = Arc::new(FrameBuffer::new(8));
        let stats = Arc::new(PipelineStats::new());
        let worker = CaptureWorker::new(backend, Arc::clone(&buffer), Arc::clone(&stats), 200);
        (worker, buffer, stats)
    }

    #[test]
    fn frames_flow_into_the_buffer() {
        let opens = Arc::new(AtomicUsize::new(0));
        let grabs = Arc::new(AtomicUsize::new(0));
        let (mut worker, buffer, _stats) = worker(false, opens, grabs);
        worker.start().unwrap();
        let frame = buffer.get(Duration::from_secs(2));
        worker.stop(Duration::from_secs(1));
        assert!(frame.is_some());
        assert!(!worker.running());
    }

    #[test]
    fn double_start_opens_the_backend_once() {
        let opens = Arc::new(AtomicUsize::new(0));
        let grabs = Arc::new(AtomicUsize::new(0));
        let (mut worker, _buffer, _stats) = worker(false, Arc::clone(&opens), grabs);
        worker.start().unwrap();
        worker.start().unwrap();
        thread::sleep(Duration::from_millis(30));
        worker.stop(Duration::from_secs(1));
        assert_eq!(opens.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stop_before_start_is_a_no_op() {
        let opens = Arc::new(AtomicUsize::new(0));
        let grabs = Arc::new(AtomicUsize::new(0));
        let (mut worker, _buffer, _stats) = worker(false, opens, grabs);
        worker.stop(Duration::from_millis(10));
        assert!(!worker.running());
    }

    #[test]
    fn grab_failures_are_counted_and_survived() {
        let opens = Arc::new(AtomicUsize::new(0));
        let grabs = Arc::new(AtomicUsize::new(0));
        let (mut worker, buffer, stats) = worker(true, opens, Arc::clone(&grabs));
        worker.start().unwrap();
        // Wait until a few grabs happened, good and bad alike.
        while grabs.load(Ordering::SeqCst) < 4 {
            thread::sleep(Duration::from_millis(5));
        }
        worker.stop(Duration::from_secs(1));
        assert!(stats.snapshot().capture_errors > 0);
        assert!(buffer.get(Duration::from_millis(10)).is_some());
    }
}
