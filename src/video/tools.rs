use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use crate::core::{AppConfig, ExtractionError};

/// Locations of the external ffmpeg binaries used for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tools {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl Tools {
    pub fn from_config(config: &AppConfig) -> Self {
        let ffmpeg = config
            .ffmpeg_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("ffmpeg"));
        let ffprobe = config
            .ffprobe_path
            .clone()
            .unwrap_or_else(|| derive_ffprobe_path(&ffmpeg));
        Self { ffmpeg, ffprobe }
    }

    pub fn ffmpeg_command(&self) -> Command {
        Command::new(&self.ffmpeg)
    }

    pub fn ffprobe_command(&self) -> Command {
        Command::new(&self.ffprobe)
    }
}

/// `ffprobe` living next to the configured `ffmpeg`.
pub fn derive_ffprobe_path(ffmpeg: &Path) -> PathBuf {
    match ffmpeg.file_name().and_then(|f| f.to_str()) {
        Some(file_name) => ffmpeg.with_file_name(file_name.replacen("ffmpeg", "ffprobe", 1)),
        None => PathBuf::from("ffprobe"),
    }
}

pub(crate) fn tool_name(program: &Path) -> String {
    program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string())
}

/// Run a tool to completion, turning a non-zero exit into an error carrying its stderr.
pub fn execute(mut command: Command) -> Result<Output, ExtractionError> {
    let tool = tool_name(Path::new(command.get_program()));
    log::debug!("Executing {:?}", command);

    let output = command.output().map_err(|source| ExtractionError::Launch {
        tool: tool.clone(),
        source,
    })?;

    log::debug!("{} finished with {}", tool, output.status);

    if !output.status.success() {
        return Err(tool_failure(&tool, &output.status, &output.stderr));
    }

    Ok(output)
}

pub(crate) fn tool_failure(tool: &str, status: &std::process::ExitStatus, stderr: &[u8]) -> ExtractionError {
    let stderr = String::from_utf8_lossy(stderr).trim().to_string();
    ExtractionError::ToolFailed {
        tool: tool.to_string(),
        status: status.to_string(),
        stderr: if stderr.is_empty() {
            "(no diagnostic output)".to_string()
        } else {
            stderr
        },
    }
}

#[cfg(test)]
pub(crate) fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
