use std::path::Path;
use crate::core::ExtractionError;
use crate::video::tools::{self, Tools};

/// Dimensions of the first video stream of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
}

impl StreamInfo {
    /// Byte length of one raw RGB24 frame.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

/// Dimensions of the frames ffmpeg will emit. ffmpeg autorotates by default,
/// so a quarter-turn display rotation swaps the coded width and height.
pub fn probe_stream(tools: &Tools, source: &Path) -> Result<StreamInfo, ExtractionError> {
    let mut command = tools.ffprobe_command();
    command
        .arg("-v").arg("error")
        .arg("-select_streams").arg("v:0")
        .arg("-show_entries").arg("stream=width,height:stream_tags=rotate:stream_side_data=rotation")
        .arg("-of").arg("json")
        .arg(source);

    let output = tools::execute(command).map_err(|e| match e {
        ExtractionError::ToolFailed { stderr, .. } => ExtractionError::Probe(stderr),
        other => other,
    })?;

    let json = String::from_utf8_lossy(&output.stdout);
    parse_stream_info(&json)
}

pub(crate) fn parse_stream_info(json: &str) -> Result<StreamInfo, ExtractionError> {
    let info: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| ExtractionError::Probe(format!("unreadable ffprobe output: {}", e)))?;

    let stream = info["streams"]
        .as_array()
        .and_then(|streams| streams.first())
        .ok_or_else(|| ExtractionError::Probe("no video stream found".to_string()))?;

    let width = stream["width"].as_u64().unwrap_or(0) as u32;
    let height = stream["height"].as_u64().unwrap_or(0) as u32;
    if width == 0 || height == 0 {
        return Err(ExtractionError::Probe(format!(
            "video stream has no usable dimensions ({}x{})",
            width, height
        )));
    }

    let rotation = display_rotation(stream);
    if matches!(rotation.unsigned_abs() % 360, 90 | 270) {
        log::info!(
            "Video is rotated by {} degrees, frames will be {}x{} (coded {}x{})",
            rotation, height, width, width, height
        );
        return Ok(StreamInfo { width: height, height: width });
    }

    Ok(StreamInfo { width, height })
}

/// Rotation in degrees from the legacy `rotate` tag or, failing that, the
/// display matrix side data. ffprobe prints the latter as a number or a string
/// depending on its version.
fn display_rotation(stream: &serde_json::Value) -> i64 {
    let from_tag = stream["tags"]["rotate"].as_str().and_then(|s| s.trim().parse::<i64>().ok());
    if let Some(rotation) = from_tag.filter(|r| *r != 0) {
        return rotation;
    }

    stream["side_data_list"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|entry| rotation_value(&entry["rotation"]))
        .find(|r| *r != 0)
        .unwrap_or(0)
}

fn rotation_value(value: &serde_json::Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|r| r.round() as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()).map(|r| r.round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stream_info() {
        let json = r#"{"programs": [], "streams": [{"width": 320, "height": 240}]}"#;
        let info = parse_stream_info(json).unwrap();
        assert_eq!(info, StreamInfo { width: 320, height: 240 });
        assert_eq!(info.frame_len(), 320 * 240 * 3);
    }

    #[test]
    fn test_no_video_stream() {
        let error = parse_stream_info(r#"{"streams": []}"#).unwrap_err();
        assert!(error.to_string().contains("no video stream"));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let error = parse_stream_info(r#"{"streams": [{"width": 0, "height": 240}]}"#).unwrap_err();
        assert!(matches!(error, ExtractionError::Probe(_)));
    }

    #[test]
    fn test_quarter_turn_side_data_swaps_dimensions() {
        let json = r#"{"streams":[{"width":1920,"height":1080,"side_data_list":[{"rotation":-90}]}]}"#;
        let info = parse_stream_info(json).unwrap();
        assert_eq!((info.width, info.height), (1080, 1920));
    }

    #[test]
    fn test_rotation_formats() {
        let cases = [
            (r#"{"streams":[{"width":640,"height":360,"tags":{"rotate":"90"}}]}"#, (360, 640)),
            (r#"{"streams":[{"width":640,"height":360,"tags":{"rotate":"270"}}]}"#, (360, 640)),
            (r#"{"streams":[{"width":640,"height":360,"side_data_list":[{"rotation":90.0}]}]}"#, (360, 640)),
            (r#"{"streams":[{"width":640,"height":360,"side_data_list":[{"rotation":"-270"}]}]}"#, (360, 640)),
            (r#"{"streams":[{"width":640,"height":360,"side_data_list":[{"side_data_type":"CPB"},{"rotation":90}]}]}"#, (360, 640)),
            (r#"{"streams":[{"width":640,"height":360,"tags":{"rotate":"180"}}]}"#, (640, 360)),
            (r#"{"streams":[{"width":640,"height":360,"side_data_list":[{"rotation":-180}]}]}"#, (640, 360)),
            (r#"{"streams":[{"width":640,"height":360,"tags":{"rotate":"0"}}]}"#, (640, 360)),
        ];

        for (json, expected) in cases {
            let info = parse_stream_info(json).unwrap();
            assert_eq!((info.width, info.height), expected, "{}", json);
        }
    }

    #[test]
    fn test_garbage_output() {
        assert!(parse_stream_info("not json").is_err());
    }
}
