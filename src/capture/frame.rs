use chrono::{DateTime, Utc};

/// One raw sample from the capture backend.
///
/// Pixels are packed BGRA, 4 bytes per pixel, row-major. A frame is immutable
/// once produced; ownership moves from the capture worker through the frame
/// buffer to the processing worker.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub captured_at: DateTime<Utc>,
}

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize) * 4);
        Self {
            width,
            height,
            data,
            captured_at: Utc::now(),
        }
    }

    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}
