mod decoder;

use clap::Parser;
use decoder::{CommandDecoder, DecoderConfigJson};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use trackscan::io::{load_surface, save_surface};
use trackscan::{
    extract_tracking, Backend, CancelToken, CandidateVariant, CropRect, DecodeOrchestrator,
    LiveConfig, LiveScanner, OrchestratorConfig, ScanReport, ScanSession, StabilityConfig,
    StopReason, Surface, SystemClock, TrackScanResult, TrackingMatch,
};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "TrackScan CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
    /// Run only the tracking-number extractor on this text and exit.
    #[arg(long, value_name = "TEXT")]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ModeConfig {
    #[default]
    Single,
    Live,
}

#[derive(Clone, Copy, Debug, Deserialize)]
struct CropJson {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl From<CropJson> for CropRect {
    fn from(value: CropJson) -> Self {
        CropRect {
            x: value.x,
            y: value.y,
            width: value.width,
            height: value.height,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct StabilityConfigJson {
    stable_frames: u32,
    cooldown_ms: u64,
}

impl Default for StabilityConfigJson {
    fn default() -> Self {
        let cfg = StabilityConfig::default();
        Self {
            stable_frames: cfg.stable_frames,
            cooldown_ms: cfg.cooldown.as_millis() as u64,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct LiveConfigJson {
    interval_ms: u64,
}

impl Default for LiveConfigJson {
    fn default() -> Self {
        Self {
            interval_ms: LiveConfig::default().interval.as_millis() as u64,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    mode: ModeConfig,
    image_path: String,
    crop: Option<CropJson>,
    frame_paths: Vec<String>,
    output_path: Option<String>,
    dump_variants_dir: Option<String>,
    parallel: bool,
    decoder: DecoderConfigJson,
    stability: StabilityConfigJson,
    live: LiveConfigJson,
}

#[derive(Debug, Serialize)]
struct TrackingRecord {
    carrier: &'static str,
    number: String,
}

impl From<TrackingMatch> for TrackingRecord {
    fn from(value: TrackingMatch) -> Self {
        Self {
            carrier: value.carrier.name(),
            number: value.number,
        }
    }
}

#[derive(Debug, Serialize)]
struct ScanRecord {
    raw_text: String,
    tracking: Option<TrackingRecord>,
    variant: String,
    backend: &'static str,
}

impl ScanRecord {
    fn new(raw_text: String, variant: &CandidateVariant, backend: Backend) -> Self {
        let tracking = extract_tracking(&raw_text).map(TrackingRecord::from);
        Self {
            raw_text,
            tracking,
            variant: variant.to_string(),
            backend: match backend {
                Backend::Native => "native",
                Backend::Fallback => "fallback",
            },
        }
    }
}

impl From<ScanReport> for ScanRecord {
    fn from(value: ScanReport) -> Self {
        Self::new(value.raw_text, &value.variant, value.backend)
    }
}

#[derive(Debug, Serialize)]
struct SingleOutput {
    result: Option<ScanRecord>,
    attempts: usize,
}

#[derive(Debug, Serialize)]
struct LiveOutput {
    frames: usize,
    stop: &'static str,
    emissions: Vec<ScanRecord>,
}

fn build_orchestrator(config: &Config) -> Result<DecodeOrchestrator, Box<dyn std::error::Error>> {
    let fallback = CommandDecoder::new(config.decoder.clone())?;
    Ok(DecodeOrchestrator::new(fallback).with_config(OrchestratorConfig {
        parallel: config.parallel,
        ..OrchestratorConfig::default()
    }))
}

fn dump_variants(
    surface: &Surface,
    cfg: &OrchestratorConfig,
    dir: &Path,
) -> Result<usize, Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    let mut written = 0;
    for (idx, variant) in cfg.variants.iter().enumerate() {
        match variant.apply_with(surface, cfg.parallel) {
            Ok(view) => {
                let path = dir.join(format!("{idx:02}_{}.png", variant.name()));
                save_surface(&view, path)?;
                written += 1;
            }
            Err(err) => tracing::warn!(variant = %variant, error = %err, "variant skipped"),
        }
    }
    Ok(written)
}

fn run_single(config: &Config) -> Result<String, Box<dyn std::error::Error>> {
    if config.image_path.is_empty() {
        return Err("image_path must be set for single mode".into());
    }
    let mut surface = load_surface(&config.image_path)?;
    if let Some(crop) = config.crop {
        surface = surface.crop_rect(crop.into())?;
    }

    let mut orchestrator = build_orchestrator(config)?;
    if let Some(dir) = &config.dump_variants_dir {
        let written = dump_variants(&surface, orchestrator.config(), Path::new(dir))?;
        tracing::info!(written, dir = dir.as_str(), "variants dumped");
    }

    let output = match orchestrator.attempt_decode(&surface) {
        Ok(found) => SingleOutput {
            result: Some(ScanRecord::new(found.text, &found.variant, found.backend)),
            attempts: found.attempts,
        },
        Err(miss) => {
            tracing::info!(attempts = miss.attempts, "no barcode decoded");
            SingleOutput {
                result: None,
                attempts: miss.attempts,
            }
        }
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

fn run_live(config: &Config) -> Result<String, Box<dyn std::error::Error>> {
    if config.frame_paths.is_empty() {
        return Err("frame_paths must list at least one frame for live mode".into());
    }
    let mut session = ScanSession::new(build_orchestrator(config)?).with_stability(StabilityConfig {
        stable_frames: config.stability.stable_frames.max(1),
        cooldown: Duration::from_millis(config.stability.cooldown_ms),
    });
    let scanner = LiveScanner::new(
        SystemClock,
        LiveConfig {
            interval: Duration::from_millis(config.live.interval_ms),
        },
    );

    let crop = config.crop.map(CropRect::from);
    let mut frames = config.frame_paths.iter();
    let mut source = move || -> TrackScanResult<Option<Surface>> {
        let Some(path) = frames.next() else {
            return Ok(None);
        };
        let surface = load_surface(path)?;
        match crop {
            Some(rect) => surface.crop_rect(rect).map(Some),
            None => Ok(Some(surface)),
        }
    };

    let mut emissions = Vec::new();
    let summary = scanner.run(&mut session, &mut source, &CancelToken::new(), |report| {
        if let Some(tracking) = &report.tracking {
            tracing::info!(
                carrier = tracking.carrier.name(),
                number = tracking.number.as_str(),
                "tracking number"
            );
        }
        emissions.push(ScanRecord::from(report));
    })?;

    let output = LiveOutput {
        frames: summary.frames,
        stop: match summary.stop {
            StopReason::Cancelled => "cancelled",
            StopReason::SourceExhausted => "source_exhausted",
        },
        emissions,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("trackscan=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }
    if let Some(text) = cli.text {
        let record = extract_tracking(&text).map(TrackingRecord::from);
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;

    let json = match config.mode {
        ModeConfig::Single => run_single(&config)?,
        ModeConfig::Live => run_live(&config)?,
    };

    match &config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("trackscan-cli-{tag}-{}", std::process::id()))
    }

    fn striped() -> Surface {
        Surface::from_fn(24, 16, |x, _| {
            let v = if (x / 2) % 2 == 0 { 10 } else { 240 };
            [v, v, v, 255]
        })
        .unwrap()
    }

    #[test]
    fn dump_writes_one_png_per_variant() {
        let dir = scratch_path("dump");
        let cfg = OrchestratorConfig::default();
        let written = dump_variants(&striped(), &cfg, &dir).unwrap();
        assert_eq!(written, cfg.variants.len());
        assert!(dir.join("16_rotate_270.png").is_file());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn dump_into_unusable_directory_is_an_error() {
        let blocker = scratch_path("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        let result = dump_variants(&striped(), &OrchestratorConfig::default(), &blocker.join("out"));
        fs::remove_file(&blocker).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn scan_record_labels_the_variant_with_its_parameters() {
        let record = ScanRecord::new(
            "9400 1118 9922 3100 0123 45".to_string(),
            &CandidateVariant::Scale { factor: 1.5 },
            Backend::Fallback,
        );
        assert_eq!(record.variant, "scale(1.5)");
        assert_eq!(record.backend, "fallback");
        let tracking = record.tracking.unwrap();
        assert_eq!(tracking.carrier, "USPS");
        assert_eq!(tracking.number, "9400111899223100012345");
    }
}
