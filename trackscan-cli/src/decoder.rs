//! Fallback decoder that shells out to an external barcode reader.

use serde::Deserialize;
use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use trackscan::io::save_surface;
use trackscan::{DecodeHints, DecodeMiss, DecodedText, FallbackDecoder, Surface};

/// Placeholder replaced by the path of the staged image.
pub const IMAGE_PLACEHOLDER: &str = "{image}";

static STAGED: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DecoderConfigJson {
    pub program: String,
    pub args: Vec<String>,
    pub try_harder_args: Vec<String>,
    pub also_inverted_args: Vec<String>,
    pub pure_barcode_args: Vec<String>,
    /// Directory for staged PNGs; the system temp dir when unset.
    pub work_dir: Option<PathBuf>,
}

/// Runs `program args...` once per request with the view staged as a PNG.
///
/// A non-zero exit status or empty stdout is a miss. The first non-empty
/// stdout line is the decoded text.
pub struct CommandDecoder {
    cfg: DecoderConfigJson,
    work_dir: PathBuf,
}

impl CommandDecoder {
    pub fn new(cfg: DecoderConfigJson) -> Result<Self, String> {
        if cfg.program.trim().is_empty() {
            return Err("decoder.program must be set in the config".to_string());
        }
        let work_dir = cfg.work_dir.clone().unwrap_or_else(std::env::temp_dir);
        Ok(Self { cfg, work_dir })
    }

    fn command_args(&self, image: &str, hints: &DecodeHints) -> Vec<String> {
        let mut args: Vec<String> = self
            .cfg
            .args
            .iter()
            .map(|arg| arg.replace(IMAGE_PLACEHOLDER, image))
            .collect();
        if hints.try_harder {
            args.extend(self.cfg.try_harder_args.iter().cloned());
        }
        if hints.also_inverted {
            args.extend(self.cfg.also_inverted_args.iter().cloned());
        }
        if hints.pure_barcode {
            args.extend(self.cfg.pure_barcode_args.iter().cloned());
        }
        if !self.cfg.args.iter().any(|arg| arg.contains(IMAGE_PLACEHOLDER)) {
            args.push(image.to_string());
        }
        args
    }

    fn run(&self, image: &str, hints: &DecodeHints) -> Result<DecodedText, DecodeMiss> {
        let output = Command::new(&self.cfg.program)
            .args(self.command_args(image, hints))
            .output()
            .map_err(|err| DecodeMiss::Backend(format!("{}: {err}", self.cfg.program)))?;
        if !output.status.success() {
            return Err(DecodeMiss::NotFound);
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let text = stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or(DecodeMiss::NotFound)?;
        Ok(DecodedText {
            text: text.to_string(),
        })
    }
}

impl FallbackDecoder for CommandDecoder {
    fn decode(&mut self, surface: &Surface, hints: &DecodeHints) -> Result<DecodedText, DecodeMiss> {
        let seq = STAGED.fetch_add(1, Ordering::Relaxed);
        let path = self
            .work_dir
            .join(format!("trackscan-{}-{seq}.png", std::process::id()));
        save_surface(surface, &path).map_err(|err| DecodeMiss::Backend(err.to_string()))?;
        let image = path.to_string_lossy().into_owned();
        let result = self.run(&image, hints);
        if let Err(err) = std::fs::remove_file(&path) {
            tracing::warn!(path = image.as_str(), error = %err, "failed to remove staged image");
        }
        result
    }
}
