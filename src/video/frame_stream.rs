use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process::{Child, ChildStdout, Stdio};
use std::thread::JoinHandle;
use image::RgbImage;
use crate::core::ExtractionError;
use crate::video::probe::StreamInfo;
use crate::video::tools::{self, Tools};

/// Pulls fixed-size RGB24 frames out of a byte stream, one at a time.
pub struct RawFrameReader<R: Read> {
    reader: R,
    info: StreamInfo,
    frames_read: u64,
}

impl<R: Read> RawFrameReader<R> {
    pub fn new(reader: R, info: StreamInfo) -> Self {
        Self {
            reader,
            info,
            frames_read: 0,
        }
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Next decoded frame, or `None` once the stream is exhausted.
    pub fn next_frame(&mut self) -> Result<Option<RgbImage>, ExtractionError> {
        let frame_len = self.info.frame_len();
        let mut buffer = vec![0u8; frame_len];
        let mut filled = 0;

        while filled < frame_len {
            match self.reader.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ExtractionError::Io(e)),
            }
        }

        if filled == 0 {
            return Ok(None);
        }
        if filled < frame_len {
            return Err(ExtractionError::Decode {
                index: self.frames_read,
                reason: format!("stream ended after {} of {} bytes", filled, frame_len),
            });
        }

        let frame = RgbImage::from_raw(self.info.width, self.info.height, buffer).ok_or_else(|| {
            ExtractionError::Decode {
                index: self.frames_read,
                reason: "frame buffer does not match stream dimensions".to_string(),
            }
        })?;
        self.frames_read += 1;
        Ok(Some(frame))
    }
}

/// An ffmpeg child decoding a video to raw RGB24 on its stdout.
pub struct DecoderProcess {
    child: Child,
    tool: String,
    stderr_reader: Option<JoinHandle<Vec<u8>>>,
}

impl DecoderProcess {
    pub fn spawn(tools: &Tools, source: &Path, info: StreamInfo) -> Result<(Self, RawFrameReader<ChildStdout>), ExtractionError> {
        let tool = tools::tool_name(&tools.ffmpeg);
        // Autorotation stays on, `info` already holds the rotated dimensions
        let mut command = tools.ffmpeg_command();
        command
            .arg("-v").arg("error")
            .arg("-nostdin")
            .arg("-i").arg(source)
            .arg("-map").arg("0:v:0")
            .arg("-f").arg("rawvideo")
            .arg("-pix_fmt").arg("rgb24")
            .arg("-")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        log::debug!("Spawning decoder {:?}", command);
        let mut child = command.spawn().map_err(|source| ExtractionError::Launch {
            tool: tool.clone(),
            source,
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            ExtractionError::Io(std::io::Error::new(ErrorKind::BrokenPipe, "decoder stdout unavailable"))
        })?;

        // Drained on its own thread so a chatty decoder cannot stall on a full pipe
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            std::thread::spawn(move || {
                let mut collected = Vec::new();
                let _ = stderr.read_to_end(&mut collected);
                collected
            })
        });

        let process = Self {
            child,
            tool,
            stderr_reader,
        };
        Ok((process, RawFrameReader::new(stdout, info)))
    }

    /// Wait for the decoder to exit and report a non-zero status as a failure.
    pub fn finish(mut self) -> Result<(), ExtractionError> {
        let status = self.child.wait()?;
        let stderr = self
            .stderr_reader
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        log::debug!("{} decoder finished with {}", self.tool, status);
        if !status.success() {
            return Err(tools::tool_failure(&self.tool, &status, &stderr));
        }
        Ok(())
    }

    /// Stop the decoder after a failure on our side.
    pub fn abort(mut self) {
        if let Err(e) = self.child.kill() {
            log::warn!("Failed to stop {} decoder: {}", self.tool, e);
        }
        let _ = self.child.wait();
    }
}
