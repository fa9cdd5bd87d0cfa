use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use crate::core::FrameNaming;

/// How frames are pulled out of the source video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExtractionStrategy {
    /// Let ffmpeg decode, encode and number the frames itself
    #[default]
    ExternalProcess,
    /// Decode raw frames from a pipe and encode each one in-process
    StreamDecode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,
    #[serde(default)]
    pub strategy: ExtractionStrategy,
    #[serde(default)]
    pub naming: FrameNaming,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// Remove frames left over from a previous, longer run before extracting
    #[serde(default = "default_clear_stale_frames")]
    pub clear_stale_frames: bool,
    /// Language code overriding the system locale ("en", "de", ...)
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub last_source_directory: Option<PathBuf>,
}

fn default_jpeg_quality() -> u8 {
    90
}

fn default_clear_stale_frames() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            ffprobe_path: None,
            strategy: ExtractionStrategy::default(),
            naming: FrameNaming::default(),
            jpeg_quality: default_jpeg_quality(),
            clear_stale_frames: default_clear_stale_frames(),
            language: None,
            last_source_directory: None,
        }
    }
}

/// Widest frame index ffmpeg's `%0Nd` pattern needs for a `u32` counter.
const MAX_FRAME_DIGITS: usize = 10;

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Read the config at `path`. A missing or unparsable file is replaced by
    /// saved defaults. Out-of-range values are corrected and written back.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No config file found at {}, creating default config", path.display());
                return Self::write_defaults(path);
            }
            Err(e) => {
                return Err(anyhow::anyhow!("Failed to read config file at {}: {}", path.display(), e));
            }
        };

        let mut config = match serde_json::from_str::<Self>(&content) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Config file {} is unusable ({}), replacing it with defaults", path.display(), e);
                return Self::write_defaults(path);
            }
        };

        let corrected = config.normalize();
        if corrected.is_empty() {
            log::info!("Loaded config from {}", path.display());
        } else {
            log::warn!("Corrected out-of-range config values: {}", corrected.join(", "));
            if let Err(e) = config.save_to(path) {
                log::warn!("Failed to write corrected config back: {}", e);
            }
        }
        Ok(config)
    }

    fn write_defaults(path: &Path) -> anyhow::Result<Self> {
        let config = Self::default();
        config
            .save_to(path)
            .map_err(|e| anyhow::anyhow!("Failed to save default config: {}", e))?;
        log::info!("Created new config file at {}", path.display());
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("frame-extractor")
            .join("config.json")
    }

    /// Pull hand-edited values back into the range the extractor supports.
    /// Returns the names of the fields that were changed.
    pub fn normalize(&mut self) -> Vec<&'static str> {
        let mut corrected = Vec::new();

        let quality = self.effective_jpeg_quality();
        if quality != self.jpeg_quality {
            self.jpeg_quality = quality;
            corrected.push("jpeg_quality");
        }

        let digits = self.naming.digits.clamp(1, MAX_FRAME_DIGITS);
        if digits != self.naming.digits {
            self.naming.digits = digits;
            corrected.push("naming.digits");
        }

        // Blank entries mean "use the default"
        if self.ffmpeg_path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            self.ffmpeg_path = None;
            corrected.push("ffmpeg_path");
        }
        if self.ffprobe_path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            self.ffprobe_path = None;
            corrected.push("ffprobe_path");
        }
        if self.language.as_deref().is_some_and(|l| l.trim().is_empty()) {
            self.language = None;
            corrected.push("language");
        }

        corrected
    }

    /// JPEG quality clamped to what the encoder accepts.
    pub fn effective_jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}
