#[cfg(test)]
mod tests {

    use std::path::PathBuf;
    use crate::core::{AppConfig, ExtractionStrategy, FrameNaming};

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.strategy, ExtractionStrategy::ExternalProcess);
        assert_eq!(config.naming, FrameNaming { digits: 5, start_index: 1 });
        assert_eq!(config.jpeg_quality, 90);
        assert!(config.clear_stale_frames);
        assert!(config.ffmpeg_path.is_none());
        assert!(config.language.is_none());
    }

    #[test]
    fn test_app_config_serialization() {
        let mut config = AppConfig::default();
        config.strategy = ExtractionStrategy::StreamDecode;
        config.naming = FrameNaming::legacy();
        config.ffmpeg_path = Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        config.language = Some("de".to_string());

        let serialized = serde_json::to_string(&config).expect("Failed to serialize config");
        let deserialized: AppConfig = serde_json::from_str(&serialized).expect("Failed to deserialize config");

        assert_eq!(deserialized.strategy, ExtractionStrategy::StreamDecode);
        assert_eq!(deserialized.naming, FrameNaming::legacy());
        assert_eq!(deserialized.ffmpeg_path, config.ffmpeg_path);
        assert_eq!(deserialized.language.as_deref(), Some("de"));
    }

    #[test]
    fn test_config_backward_compatibility() {
        // Older config files only knew about the ffmpeg path
        let old_config_json = r#"{
            "ffmpeg_path": null
        }"#;

        let config: AppConfig = serde_json::from_str(old_config_json).expect("Failed to parse old config");

        assert_eq!(config.strategy, ExtractionStrategy::ExternalProcess);
        assert_eq!(config.naming, FrameNaming::default());
        assert_eq!(config.jpeg_quality, 90);
        assert!(config.clear_stale_frames);
    }

    #[test]
    fn test_strategy_names_in_json() {
        let json = serde_json::to_string(&ExtractionStrategy::StreamDecode).unwrap();
        assert_eq!(json, "\"StreamDecode\"");
    }

    #[test]
    fn test_jpeg_quality_is_clamped() {
        let mut config = AppConfig::default();
        config.jpeg_quality = 0;
        assert_eq!(config.effective_jpeg_quality(), 1);
        config.jpeg_quality = 255;
        assert_eq!(config.effective_jpeg_quality(), 100);
        config.jpeg_quality = 75;
        assert_eq!(config.effective_jpeg_quality(), 75);
    }

    #[test]
    fn test_load_creates_missing_config() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("config.json");

        let config = AppConfig::load_from(&path).unwrap();

        assert_eq!(config.jpeg_quality, 90);
        assert!(path.exists());
    }

    #[test]
    fn test_load_replaces_broken_config() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let config = AppConfig::load_from(&path).unwrap();

        assert_eq!(config.strategy, ExtractionStrategy::ExternalProcess);
        let rewritten: AppConfig = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(rewritten.naming, FrameNaming::default());
    }

    #[test]
    fn test_load_corrects_out_of_range_values() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "jpeg_quality": 0,
                "naming": { "digits": 0, "start_index": 7 },
                "ffmpeg_path": "",
                "language": "  "
            }"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();

        assert_eq!(config.jpeg_quality, 1);
        assert_eq!(config.naming, FrameNaming { digits: 1, start_index: 7 });
        assert!(config.ffmpeg_path.is_none());
        assert!(config.language.is_none());

        // The corrected values are what ends up on disk
        let saved: AppConfig = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved.jpeg_quality, 1);
        assert_eq!(saved.naming.digits, 1);
    }

    #[test]
    fn test_normalize_caps_large_values() {
        let mut config = AppConfig::default();
        config.jpeg_quality = 255;
        config.naming.digits = 64;

        assert_eq!(config.normalize(), vec!["jpeg_quality", "naming.digits"]);
        assert_eq!(config.jpeg_quality, 100);
        assert_eq!(config.naming.digits, 10);
    }

    #[test]
    fn test_normalize_keeps_valid_config() {
        let mut config = AppConfig::default();
        config.language = Some("pt".to_string());
        config.ffmpeg_path = Some(PathBuf::from("/usr/bin/ffmpeg"));

        assert!(config.normalize().is_empty());
        assert_eq!(config.language.as_deref(), Some("pt"));
    }
}
