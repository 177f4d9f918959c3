use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

use image::GrayImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("ocr engine failure: {0}")]
    Engine(String),
}

/// Result of one OCR extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrResult {
    pub text: String,
    /// Engine-reported quality score in [0, 100].
    pub confidence: f64,
}

/// Text extraction engine boundary. Swap implementations freely; the
/// pipeline only depends on this trait.
pub trait OcrEngine: Send {
    fn extract(&mut self, image: &GrayImage) -> Result<OcrResult, OcrError>;
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Adapter around the `tesseract` command-line binary.
///
/// Runs tesseract in TSV mode and averages the per-word confidences into a
/// single score, which matches how the rest of the pipeline consumes
/// confidence.
pub struct TesseractCli {
    lang: String,
    psm: u8,
}

impl TesseractCli {
    pub fn new(lang: impl Into<String>, psm: u8) -> Self {
        Self {
            lang: lang.into(),
            psm,
        }
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        // PSM 7: treat the image as a single text line.
        Self::new("eng", 7)
    }
}

impl OcrEngine for TesseractCli {
    fn extract(&mut self, image: &GrayImage) -> Result<OcrResult, OcrError> {
        let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "bbhud-ocr-{}-{seq}.png",
            std::process::id()
        ));
        image
            .save(&path)
            .map_err(|e| OcrError::Engine(format!("failed to write temp image: {e}")))?;

        let output = Command::new("tesseract")
            .arg(&path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .arg("--psm")
            .arg(self.psm.to_string())
            .arg("tsv")
            .output();
        let _ = std::fs::remove_file(&path);

        let output = output.map_err(|e| OcrError::Engine(format!("failed to run tesseract: {e}")))?;
        if !output.status.success() {
            return Err(OcrError::Engine(format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(parse_tsv(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// TSV columns: level page block par line word left top width height conf text.
/// Rows with conf <= 0 are layout markers, not recognized words.
fn parse_tsv(tsv: &str) -> OcrResult {
    let mut words: Vec<&str> = Vec::new();
    let mut confidences: Vec<f64> = Vec::new();
    for line in tsv.lines().skip(1) {
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < 12 {
            continue;
        }
        let conf: f64 = match cols[10].parse() {
            Ok(conf) => conf,
            Err(_) => continue,
        };
        let word = cols[11].trim();
        if conf > 0.0 && !word.is_empty() {
            words.push(word);
            confidences.push(conf);
        }
    }
    let confidence = if confidences.is_empty() {
        0.0
    } else {
        confidences.iter().sum::<f64>() / confidences.len() as f64
    };
    OcrResult {
        text: words.join(" "),
        confidence,
    }
}
