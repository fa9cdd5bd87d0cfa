use std::path::PathBuf;
use std::time::Duration;

/// Everything that can go wrong inside one extraction run.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Failed to create output directory {}: {source}", .path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to launch {tool}: {source}")]
    Launch {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} exited with {status}:\n{stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },
    #[error("Failed to probe video stream: {0}")]
    Probe(String),
    #[error("Failed to decode frame {index}: {reason}")]
    Decode { index: u64, reason: String },
    #[error("Failed to write frame {}: {source}", .path.display())]
    FrameWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("I/O error during extraction: {0}")]
    Io(#[from] std::io::Error),
    #[error("Extraction worker stopped unexpectedly: {0}")]
    Panicked(String),
}

/// Details of a successful run, shown in logs and the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub output_directory: PathBuf,
    /// Frames produced by this run only. The external tool's figure comes from
    /// its progress report. Only an ffmpeg that prints no report falls back to
    /// counting every frame file in the directory.
    pub frames_written: usize,
    pub elapsed: Duration,
}

/// The single terminal result of an extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Succeeded(ExtractionReport),
    Failed(String),
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Succeeded(_))
    }

    /// Diagnostic for failures, `"OK"` for successes.
    pub fn message(&self) -> &str {
        match self {
            ExtractionOutcome::Succeeded(_) => "OK",
            ExtractionOutcome::Failed(message) => message,
        }
    }
}

impl From<Result<ExtractionReport, ExtractionError>> for ExtractionOutcome {
    fn from(result: Result<ExtractionReport, ExtractionError>) -> Self {
        match result {
            Ok(report) => ExtractionOutcome::Succeeded(report),
            Err(e) => {
                let message = e.to_string();
                if message.trim().is_empty() {
                    ExtractionOutcome::Failed("Unknown extraction error".to_string())
                } else {
                    ExtractionOutcome::Failed(message)
                }
            }
        }
    }
}
