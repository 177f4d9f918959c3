mod cache;
mod confidence;
mod engine;
mod pipeline;
mod preprocess;

pub use cache::FrameDiffCache;
pub use confidence::{filter_confident, is_confident};
pub use engine::{OcrEngine, OcrError, OcrResult, TesseractCli};
pub use pipeline::OcrPipeline;
pub use preprocess::{adaptive_threshold, reduce_noise, to_grayscale};
