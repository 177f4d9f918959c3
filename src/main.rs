use std::path::PathBuf;
use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use bbhud::capture::ReplayBackend;
use bbhud::config::Config;
use bbhud::display::TerminalSink;
use bbhud::models::CaptureRegion;
use bbhud::ocr::TesseractCli;
use bbhud::pipeline::Orchestrator;

#[derive(Parser, Debug)]
#[command(
    name = "bbhud",
    about = "Real-time poker HUD that reads the table via OCR and shows stacks in big blinds"
)]
struct Cli {
    /// Directory of PNG frames replayed as the capture source.
    #[arg(long, value_name = "DIR")]
    frames: PathBuf,

    /// Target capture FPS (overrides config).
    #[arg(long)]
    fps: Option<u32>,

    /// OCR confidence threshold 0-100 (overrides config).
    #[arg(long)]
    confidence: Option<f64>,

    /// Capture region as 'x,y,width,height'; defaults to the full frame.
    #[arg(long, value_name = "X,Y,W,H")]
    region: Option<CaptureRegion>,

    /// Path to a TOML config file (defaults to ./bbhud.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(fps) = cli.fps {
        config.capture.fps = fps;
    }
    if let Some(confidence) = cli.confidence {
        config.ocr.confidence_threshold = confidence;
    }

    info!(
        "starting bbhud: frames={} fps={} confidence={:.0}",
        cli.frames.display(),
        config.capture.fps,
        config.ocr.confidence_threshold
    );

    let mut backend = ReplayBackend::new(&cli.frames);
    if let Some(region) = cli.region {
        backend = backend.with_region(region);
    }
    let engine = TesseractCli::new(config.ocr.lang.clone(), config.ocr.psm);

    let mut orchestrator = Orchestrator::new(backend, engine, &config);
    orchestrator.start()?;

    let display = orchestrator.display_loop(config.display.refresh_hz);
    let stop = display.stop_signal();
    ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst))
        .context("failed to install signal handler")?;

    // The display loop runs on the main thread until Ctrl+C.
    let mut sink = TerminalSink::new(config.display.mode);
    display.run(&mut sink);

    orchestrator.stop();
    let stats = orchestrator.stats();
    info!(
        "processed {} frames at {:.1} fps (cache hit rate {:.0}%, capture errors {}, ocr errors {}, parse errors {})",
        stats.frames_processed,
        stats.capture_fps,
        stats.cache_hit_rate,
        stats.capture_errors,
        stats.ocr_errors,
        stats.parse_errors
    );
    Ok(())
}
