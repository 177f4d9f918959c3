use std::thread;
use std::time::{Duration, Instant};

/// Throttles a loop to a target rate.
///
/// Call [`tick`](FpsController::tick) once per iteration; it sleeps only as
/// long as needed to keep consecutive ticks at least one frame interval
/// apart. The first call has no reference point and returns immediately. An
/// iteration that overran its budget is not compensated: the next call
/// proceeds without trying to catch up.
pub struct FpsController {
    frame_interval: Duration,
    target_fps: u32,
    last_tick: Option<Instant>,
    actual_fps: f64,
}

impl FpsController {
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(target_fps)),
            target_fps,
            last_tick: None,
            actual_fps: 0.0,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_tick {
            let elapsed = now.duration_since(last);
            if let Some(remaining) = self.frame_interval.checked_sub(elapsed) {
                thread::sleep(remaining);
            }
            let total = last.elapsed().as_secs_f64();
            self.actual_fps = if total > 0.0 { 1.0 / total } else { 0.0 };
        }
        self.last_tick = Some(Instant::now());
    }

    /// Measured rate over the last tick interval.
    pub fn actual_fps(&self) -> f64 {
        self.actual_fps
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }
}
