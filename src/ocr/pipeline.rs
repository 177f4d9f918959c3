use crate::capture::Frame;
use crate::config::OcrSettings;
use crate::ocr::cache::FrameDiffCache;
use crate::ocr::confidence::is_confident;
use crate::ocr::engine::{OcrEngine, OcrError, OcrResult};
use crate::ocr::preprocess::{adaptive_threshold, reduce_noise, to_grayscale};

/// End-to-end extraction for one frame: grayscale, change-detection cache,
/// binarization, denoising, the engine, and the confidence filter.
pub struct OcrPipeline<E: OcrEngine> {
    engine: E,
    cache: Option<FrameDiffCache>,
    confidence_threshold: f64,
    threshold_block_size: u32,
    threshold_constant: i32,
    median_kernel_size: u32,
}

impl<E: OcrEngine> OcrPipeline<E> {
    pub fn new(engine: E, settings: &OcrSettings) -> Self {
        let cache = settings
            .cache_enabled
            .then(|| FrameDiffCache::new(settings.cache_diff_threshold));
        Self {
            engine,
            cache,
            confidence_threshold: settings.confidence_threshold,
            threshold_block_size: settings.threshold_block_size,
            threshold_constant: settings.threshold_constant,
            median_kernel_size: settings.median_kernel_size,
        }
    }

    /// Runs the full pass. `Ok(None)` means the extraction did not clear the
    /// confidence threshold.
    pub fn process(&mut self, frame: &Frame) -> Result<Option<OcrResult>, OcrError> {
        let gray = to_grayscale(frame);

        if let Some(cache) = self.cache.as_mut() {
            if let Some(cached) = cache.get_if_unchanged(&gray) {
                return Ok(Some(cached));
            }
        }

        let binary = adaptive_threshold(&gray, self.threshold_block_size, self.threshold_constant);
        let clean = reduce_noise(&binary, self.median_kernel_size);

        let result = self.engine.extract(&clean)?;

        // The cache key is the pre-binarization grayscale image.
        if let Some(cache) = self.cache.as_mut() {
            cache.update(&gray, result.clone());
        }

        if !is_confident(&result, self.confidence_threshold) {
            return Ok(None);
        }
        Ok(Some(result))
    }

    pub fn cache_hit_rate(&self) -> f64 {
        self.cache
            .as_ref()
            .map(FrameDiffCache::hit_rate)
            .unwrap_or(0.0)
    }
}
