use image::GrayImage;
use log::debug;

use crate::ocr::engine::OcrResult;

/// Skips OCR on frames that are perceptually identical to the last one.
///
/// Compares the current grayscale image to the previously stored one by mean
/// absolute per-pixel difference. Below the threshold, the stored result is
/// returned as-is. Trades a small staleness risk for large CPU savings on
/// mostly-static sources.
pub struct FrameDiffCache {
    threshold: f64,
    last: Option<CacheEntry>,
    hits: u64,
    misses: u64,
}

struct CacheEntry {
    image: GrayImage,
    result: OcrResult,
}

impl FrameDiffCache {
    pub fn new(diff_threshold: f64) -> Self {
        Self {
            threshold: diff_threshold,
            last: None,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the cached result when the image has not changed. Misses on:
    /// no prior image, dimension mismatch, or difference at or above the
    /// threshold.
    pub fn get_if_unchanged(&mut self, image: &GrayImage) -> Option<OcrResult> {
        let Some(entry) = &self.last else {
            self.misses += 1;
            return None;
        };
        if entry.image.dimensions() != image.dimensions() {
            self.misses += 1;
            return None;
        }
        let diff = mean_abs_diff(&entry.image, image);
        if diff < self.threshold {
            self.hits += 1;
            debug!("ocr cache hit (diff={diff:.2})");
            return Some(entry.result.clone());
        }
        self.misses += 1;
        None
    }

    /// Stores the image and its result, replacing any prior entry.
    pub fn update(&mut self, image: &GrayImage, result: OcrResult) {
        self.last = Some(CacheEntry {
            image: image.clone(),
            result,
        });
    }

    /// Lifetime hit rate as a percentage.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64 * 100.0
        }
    }
}

fn mean_abs_diff(a: &GrayImage, b: &GrayImage) -> f64 {
    if a.as_raw().is_empty() {
        return 0.0;
    }
    let total: u64 = a
        .as_raw()
        .iter()
        .zip(b.as_raw())
        .map(|(&x, &y)| (i64::from(x) - i64::from(y)).unsigned_abs())
        .sum();
    total as f64 / a.as_raw().len() as f64
}
