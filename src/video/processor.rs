use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Instant;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use crate::core::{AppConfig, ExtractionError, ExtractionReport, ExtractionStrategy, FrameNaming, OutputLayout};
use crate::video::frame_stream::{DecoderProcess, RawFrameReader};
use crate::video::probe;
use crate::video::tools::{self, Tools};

/// Turns one source video into a directory of numbered JPEG frames.
#[derive(Debug, Clone)]
pub struct FrameExtractor {
    pub tools: Tools,
    pub strategy: ExtractionStrategy,
    pub naming: FrameNaming,
    pub jpeg_quality: u8,
    pub clear_stale_frames: bool,
}

impl FrameExtractor {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            tools: Tools::from_config(config),
            strategy: config.strategy,
            naming: config.naming,
            jpeg_quality: config.effective_jpeg_quality(),
            clear_stale_frames: config.clear_stale_frames,
        }
    }

    pub fn layout_for(&self, source: &Path) -> OutputLayout {
        OutputLayout::for_source(source, self.naming)
    }

    pub fn extract(&self, source: &Path) -> Result<ExtractionReport, ExtractionError> {
        let started = Instant::now();
        let layout = self.layout_for(source);

        layout
            .prepare(self.clear_stale_frames)
            .map_err(|source| ExtractionError::OutputDirectory {
                path: layout.directory.clone(),
                source,
            })?;

        let frames_written = match self.strategy {
            ExtractionStrategy::ExternalProcess => self.run_external(source, &layout)?,
            ExtractionStrategy::StreamDecode => self.run_stream_decode(source, &layout)?,
        };

        Ok(ExtractionReport {
            output_directory: layout.directory,
            frames_written,
            elapsed: started.elapsed(),
        })
    }

    /// ffmpeg decodes, encodes and numbers the frames on its own.
    fn run_external(&self, source: &Path, layout: &OutputLayout) -> Result<usize, ExtractionError> {
        let mut command = self.tools.ffmpeg_command();
        command
            .arg("-nostdin")
            .arg("-y")
            .arg("-nostats")
            .arg("-progress")
            .arg("pipe:1")
            .arg("-i")
            .arg(source)
            .arg("-start_number")
            .arg(self.naming.start_index.to_string())
            .arg(layout.tool_output_pattern());

        let output = tools::execute(command)?;

        // Frames left over from an earlier run must not be counted
        match written_frame_count(&String::from_utf8_lossy(&output.stdout)) {
            Some(count) => Ok(count),
            None => {
                log::debug!("ffmpeg reported no frame count, counting files instead");
                Ok(layout.list_frames()?.len())
            }
        }
    }

    /// Pull raw frames from a decoder pipe and encode each one here.
    fn run_stream_decode(&self, source: &Path, layout: &OutputLayout) -> Result<usize, ExtractionError> {
        let info = probe::probe_stream(&self.tools, source)?;
        log::debug!("Decoding {}x{} frames from {}", info.width, info.height, source.display());

        let (decoder, reader) = DecoderProcess::spawn(&self.tools, source, info)?;
        match write_frames(reader, layout, self.jpeg_quality) {
            Ok(count) => {
                decoder.finish()?;
                Ok(count)
            }
            Err(e) => {
                decoder.abort();
                Err(e)
            }
        }
    }
}

/// Final `frame=` value of an ffmpeg `-progress` report.
fn written_frame_count(progress: &str) -> Option<usize> {
    progress
        .lines()
        .filter_map(|line| line.trim().strip_prefix("frame="))
        .filter_map(|value| value.trim().parse().ok())
        .last()
}

/// Write every frame the reader yields, numbered from the layout's start index.
pub fn write_frames<R: Read>(
    mut reader: RawFrameReader<R>,
    layout: &OutputLayout,
    quality: u8,
) -> Result<usize, ExtractionError> {
    let mut position: u64 = 0;
    while let Some(frame) = reader.next_frame()? {
        write_frame(&frame, &layout.frame_path(position), quality)?;
        position += 1;
    }
    Ok(position as usize)
}

pub fn write_frame(frame: &RgbImage, path: &Path, quality: u8) -> Result<(), ExtractionError> {
    let to_write_error = |source: image::ImageError| ExtractionError::FrameWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| to_write_error(image::ImageError::IoError(e)))?;
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, quality)
        .encode_image(frame)
        .map_err(to_write_error)?;
    writer
        .flush()
        .map_err(|e| to_write_error(image::ImageError::IoError(e)))?;
    Ok(())
}
