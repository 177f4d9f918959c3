use std::sync::atomic::{AtomicU64, Ordering};

/// Live pipeline counters shared across worker threads.
///
/// Writers sit on the per-frame hot path, so the fields are plain relaxed
/// atomics; readers take a [`StatsSnapshot`].
#[derive(Debug, Default)]
pub struct PipelineStats {
    frames_processed: AtomicU64,
    capture_errors: AtomicU64,
    ocr_errors: AtomicU64,
    parse_errors: AtomicU64,
    capture_fps_bits: AtomicU64,
    cache_hit_rate_bits: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatsSnapshot {
    pub frames_processed: u64,
    pub capture_errors: u64,
    pub ocr_errors: u64,
    pub parse_errors: u64,
    pub capture_fps: f64,
    pub cache_hit_rate: f64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&self) {
        self.frames_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_capture_error(&self) {
        self.capture_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ocr_error(&self) {
        self.ocr_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_parse_error(&self) {
        self.parse_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn set_capture_fps(&self, fps: f64) {
        self.capture_fps_bits.store(fps.to_bits(), Ordering::Relaxed);
    }

    pub fn set_cache_hit_rate(&self, rate: f64) {
        self.cache_hit_rate_bits
            .store(rate.to_bits(), Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            frames_processed: self.frames_processed.load(Ordering::Relaxed),
            capture_errors: self.capture_errors.load(Ordering::Relaxed),
            ocr_errors: self.ocr_errors.load(Ordering::Relaxed),
            parse_errors: self.parse_errors.load(Ordering::Relaxed),
            capture_fps: f64::from_bits(self.capture_fps_bits.load(Ordering::Relaxed)),
            cache_hit_rate: f64::from_bits(self.cache_hit_rate_bits.load(Ordering::Relaxed)),
        }
    }
}
