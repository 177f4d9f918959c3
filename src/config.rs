use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::convert::DisplayMode;

const DEFAULT_CONFIG_FILENAME: &str = "bbhud.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Read(String, std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub capture: CaptureSettings,
    #[serde(default)]
    pub ocr: OcrSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureSettings {
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrSettings {
    /// Minimum acceptable confidence (0-100).
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
    /// Mean pixel difference below which frames count as identical.
    #[serde(default = "default_cache_diff_threshold")]
    pub cache_diff_threshold: f64,
    /// Neighborhood size for adaptive thresholding (odd).
    #[serde(default = "default_threshold_block_size")]
    pub threshold_block_size: u32,
    /// Constant subtracted from the local mean.
    #[serde(default = "default_threshold_constant")]
    pub threshold_constant: i32,
    /// Median denoise kernel size (odd).
    #[serde(default = "default_median_kernel_size")]
    pub median_kernel_size: u32,
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Tesseract page segmentation mode (7 = single line).
    #[serde(default = "default_psm")]
    pub psm: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_refresh_hz")]
    pub refresh_hz: u32,
    #[serde(default)]
    pub mode: DisplayMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

impl Config {
    /// Loads configuration from a TOML file merged over the defaults.
    ///
    /// With no explicit path, looks for `bbhud.toml` in the working
    /// directory. A missing file yields the defaults; an unreadable or
    /// malformed file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILENAME),
        };
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            cache_enabled: default_cache_enabled(),
            cache_diff_threshold: default_cache_diff_threshold(),
            threshold_block_size: default_threshold_block_size(),
            threshold_constant: default_threshold_constant(),
            median_kernel_size: default_median_kernel_size(),
            lang: default_lang(),
            psm: default_psm(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            refresh_hz: default_refresh_hz(),
            mode: DisplayMode::default(),
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            history_size: default_history_size(),
        }
    }
}

fn default_fps() -> u32 {
    30
}
fn default_buffer_capacity() -> usize {
    30
}
fn default_confidence_threshold() -> f64 {
    60.0
}
fn default_cache_enabled() -> bool {
    true
}
fn default_cache_diff_threshold() -> f64 {
    5.0
}
fn default_threshold_block_size() -> u32 {
    11
}
fn default_threshold_constant() -> i32 {
    2
}
fn default_median_kernel_size() -> u32 {
    3
}
fn default_lang() -> String {
    "eng".into()
}
fn default_psm() -> u8 {
    7
}
fn default_refresh_hz() -> u32 {
    15
}
fn default_retry_attempts() -> u32 {
    3
}
fn default_retry_delay_ms() -> u64 {
    1000
}
fn default_history_size() -> usize {
    100
}
