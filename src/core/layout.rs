use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File extension of every extracted frame.
pub const FRAME_EXTENSION: &str = "jpg";

/// How extracted frames are numbered on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameNaming {
    /// Zero-padded width of the frame index
    pub digits: usize,
    /// Index given to the first extracted frame
    pub start_index: u32,
}

impl Default for FrameNaming {
    fn default() -> Self {
        Self {
            digits: 5,
            start_index: 1,
        }
    }
}

impl FrameNaming {
    /// Four digit names starting at zero (`0000.jpg`, `0001.jpg`, ...).
    pub fn legacy() -> Self {
        Self {
            digits: 4,
            start_index: 0,
        }
    }

    /// File name for the `position`-th frame of a run (zero based).
    pub fn file_name(&self, position: u64) -> String {
        let index = self.start_index as u64 + position;
        format!("{:0width$}.{}", index, FRAME_EXTENSION, width = self.digits)
    }

    /// Output pattern understood by ffmpeg's image2 muxer, e.g. `%05d.jpg`.
    pub fn tool_pattern(&self) -> String {
        format!("%0{}d.{}", self.digits, FRAME_EXTENSION)
    }

    /// Whether `name` looks like a frame written with this naming.
    pub fn matches(&self, name: &str) -> bool {
        let Some(stem) = name.strip_suffix(FRAME_EXTENSION).and_then(|s| s.strip_suffix('.')) else {
            return false;
        };
        // ffmpeg keeps counting past the padded width, so longer stems still belong to us
        stem.len() >= self.digits && stem.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Where the frames of one source video go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub directory: PathBuf,
    pub naming: FrameNaming,
}

impl OutputLayout {
    pub fn for_source(source: &Path, naming: FrameNaming) -> Self {
        Self {
            directory: Self::output_directory(source),
            naming,
        }
    }

    /// `<dir-of-source>/<source-stem>_frames`
    pub fn output_directory(source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video".to_string());
        let parent = source.parent().unwrap_or_else(|| Path::new(""));
        parent.join(format!("{}_frames", stem))
    }

    pub fn frame_path(&self, position: u64) -> PathBuf {
        self.directory.join(self.naming.file_name(position))
    }

    pub fn tool_output_pattern(&self) -> PathBuf {
        self.directory.join(self.naming.tool_pattern())
    }

    /// Create the output directory if needed. An existing directory is reused.
    /// With `clear_stale` set, frames left behind by an earlier run are removed first.
    pub fn prepare(&self, clear_stale: bool) -> std::io::Result<usize> {
        std::fs::create_dir_all(&self.directory)?;
        log::debug!("Output directory ensured: {}", self.directory.display());

        if !clear_stale {
            return Ok(0);
        }

        let stale = self.list_frames()?;
        for path in &stale {
            std::fs::remove_file(path)?;
        }
        if !stale.is_empty() {
            log::info!(
                "Removed {} stale frames from {}",
                stale.len(),
                self.directory.display()
            );
        }
        Ok(stale.len())
    }

    /// All frame files currently in the output directory, sorted by name.
    pub fn list_frames(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut frames = Vec::new();
        for entry in std::fs::read_dir(&self.directory)? {
            let entry = entry?;
            let path = entry.path();
            let is_frame = path
                .file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| self.naming.matches(n));
            if is_frame && path.is_file() {
                frames.push(path);
            }
        }
        frames.sort();
        Ok(frames)
    }
}
