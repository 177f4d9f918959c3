use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};

const JOIN_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Manages a set of named worker threads sharing one cooperative stop signal.
///
/// Workers receive the stop flag and are expected to check it at each loop
/// top. `stop` joins each worker within a bound; a worker that does not exit
/// in time is detached rather than killed, and process exit does not wait
/// for it.
pub struct WorkerPool {
    stop: Arc<AtomicBool>,
    handles: Vec<NamedHandle>,
}

struct NamedHandle {
    name: String,
    handle: JoinHandle<()>,
}

impl WorkerPool {
    pub fn new() -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            handles: Vec::new(),
        }
    }

    /// The shared stop flag handed to every worker.
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn clear_stop(&self) {
        self.stop.store(false, Ordering::SeqCst);
    }

    pub fn spawn<F>(&mut self, name: &str, worker: F) -> Result<()>
    where
        F: FnOnce(Arc<AtomicBool>) + Send + 'static,
    {
        let stop = Arc::clone(&self.stop);
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || worker(stop))
            .with_context(|| format!("failed to spawn worker thread {name}"))?;
        info!("started worker thread: {name}");
        self.handles.push(NamedHandle {
            name: name.to_string(),
            handle,
        });
        Ok(())
    }

    /// Signals stop and joins every worker, waiting up to `timeout` each.
    pub fn stop(&mut self, timeout: Duration) {
        self.stop.store(true, Ordering::SeqCst);
        for NamedHandle { name, handle } in self.handles.drain(..) {
            if join_with_timeout(handle, timeout) {
                info!("stopped worker thread: {name}");
            } else {
                warn!("worker thread {name} did not stop within {timeout:?}, detaching");
            }
        }
    }

    pub fn alive_count(&self) -> usize {
        self.handles
            .iter()
            .filter(|named| !named.handle.is_finished())
            .count()
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Joins `handle` within `timeout`; returns false when the deadline passed
/// and the thread was left running (the handle is dropped, detaching it).
pub(crate) fn join_with_timeout(handle: JoinHandle<()>, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while !handle.is_finished() {
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(JOIN_POLL_INTERVAL);
    }
    handle.join().is_ok()
}
