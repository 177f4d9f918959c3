use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::capture::frame::Frame;
use crate::models::CaptureRegion;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture backend is not open, call open() first")]
    NotOpen,
    #[error("failed to open capture source: {0}")]
    Open(String),
    #[error("frame grab failed: {0}")]
    Grab(String),
}

/// Source of raw frames.
///
/// The platform screen grabber lives behind this trait and is wired in by the
/// embedding application; the crate ships [`ReplayBackend`] for demos and
/// tests.
pub trait CaptureBackend: Send {
    fn open(&mut self) -> Result<(), CaptureError>;
    fn grab(&mut self) -> Result<Frame, CaptureError>;
    fn close(&mut self);
}

/// Plays PNG frames from a directory in a loop, optionally cropped to a
/// capture region.
pub struct ReplayBackend {
    dir: PathBuf,
    region: Option<CaptureRegion>,
    paths: Vec<PathBuf>,
    cursor: usize,
    opened: bool,
}

impl ReplayBackend {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            region: None,
            paths: Vec::new(),
            cursor: 0,
            opened: false,
        }
    }

    pub fn with_region(mut self, region: CaptureRegion) -> Self {
        self.region = Some(region);
        self
    }
}

impl CaptureBackend for ReplayBackend {
    fn open(&mut self) -> Result<(), CaptureError> {
        let entries = std::fs::read_dir(&self.dir)
            .map_err(|e| CaptureError::Open(format!("{}: {e}", self.dir.display())))?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("png"))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();
        if paths.is_empty() {
            return Err(CaptureError::Open(format!(
                "no .png frames in {}",
                self.dir.display()
            )));
        }
        self.paths = paths;
        self.cursor = 0;
        self.opened = true;
        Ok(())
    }

    fn grab(&mut self) -> Result<Frame, CaptureError> {
        if !self.opened {
            return Err(CaptureError::NotOpen);
        }
        let path = &self.paths[self.cursor];
        self.cursor = (self.cursor + 1) % self.paths.len();

        let img = image::open(path)
            .map_err(|e| CaptureError::Grab(format!("{}: {e}", path.display())))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut data = rgba.into_raw();
        // Frames carry BGRA; swap the red and blue channels in place.
        for px in data.chunks_exact_mut(4) {
            px.swap(0, 2);
        }
        let frame = Frame::new(width, height, data);
        match self.region {
            Some(region) => Ok(crop_to_region(&frame, region)),
            None => Ok(frame),
        }
    }

    fn close(&mut self) {
        self.paths.clear();
        self.opened = false;
    }
}

/// Copies the sub-rectangle of `frame` covered by `region`, clipped to the
/// frame boundaries. An empty intersection yields a 0x0 frame.
fn crop_to_region(frame: &Frame, region: CaptureRegion) -> Frame {
    let x0 = region.x.clamp(0, frame.width as i32) as u32;
    let y0 = region.y.clamp(0, frame.height as i32) as u32;
    let x1 = (x0 + region.width).min(frame.width);
    let y1 = (y0 + region.height).min(frame.height);
    let width = x1.saturating_sub(x0);
    let height = y1.saturating_sub(y0);

    let stride = frame.width as usize * 4;
    let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
    for row in y0..y1 {
        let start = row as usize * stride + x0 as usize * 4;
        let end = start + width as usize * 4;
        data.extend_from_slice(&frame.data[start..end]);
    }
    Frame::new(width, height, data)
}
