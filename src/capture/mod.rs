mod backend;
mod fps;
mod frame;
mod worker;

pub use backend::{CaptureBackend, CaptureError, ReplayBackend};
pub use fps::FpsController;
pub use frame::Frame;
pub use worker::CaptureWorker;

use crate::pipeline::StageQueue;

/// Bounded drop-oldest hand-off between the capture and processing threads.
pub type FrameBuffer = StageQueue<Frame>;
