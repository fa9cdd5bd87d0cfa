#[cfg(test)]
mod tests {

    use std::path::PathBuf;
    use std::sync::mpsc;
    use std::time::Duration;
    use crate::core::AppConfig;
    use crate::gui::app::{DialogKind, FrameExtractorApp, ShellError};

    // Test helper to create an app that never touches the real config file or ffmpeg
    fn create_test_app() -> FrameExtractorApp {
        let mut config = AppConfig::default();
        config.language = Some("en".to_string());
        config.ffmpeg_path = Some(PathBuf::from("/nonexistent/frame-extractor/ffmpeg"));
        FrameExtractorApp::with_config(config)
    }

    fn wait_for_outcome(app: &mut FrameExtractorApp, done: mpsc::Receiver<()>) {
        done.recv_timeout(Duration::from_secs(10)).expect("extraction never finished");
        assert!(app.poll_extraction().is_some());
    }

    #[test]
    fn test_app_initial_state() {
        let app = create_test_app();
        assert!(app.video_path.is_none());
        assert!(!app.is_running());
        assert!(app.dialog.is_none());
        assert_eq!(app.video_label, "No video has been selected.");
    }

    #[test]
    fn test_selecting_a_video_updates_label() {
        let mut app = create_test_app();
        app.set_video(Some(PathBuf::from("/videos/clip.mp4")));
        assert_eq!(app.video_path, Some(PathBuf::from("/videos/clip.mp4")));
        assert_eq!(app.video_label, "Video selected: clip.mp4");
    }

    #[test]
    fn test_cancelled_dialog_resets_label_but_keeps_video() {
        let mut app = create_test_app();
        app.set_video(Some(PathBuf::from("/videos/clip.mp4")));
        app.set_video(None);
        assert_eq!(app.video_label, "No video has been selected.");
        assert!(app.video_path.is_some());
    }

    #[test]
    fn test_start_without_video_warns() {
        let mut app = create_test_app();

        let result = app.start_extraction(|| {});

        assert_eq!(result, Err(ShellError::NoSourceSelected));
        assert!(!app.is_running());
        let dialog = app.dialog.expect("warning dialog expected");
        assert_eq!(dialog.kind, DialogKind::Warning);
        assert_eq!(dialog.body, "Please, select a video first.");
    }

    #[test]
    fn test_failed_run_shows_error_and_reenables_controls() {
        let temp = tempfile::tempdir().unwrap();
        let mut app = create_test_app();
        app.set_video(Some(temp.path().join("clip.mp4")));

        let (done_tx, done_rx) = mpsc::channel();
        app.start_extraction(move || {
            let _ = done_tx.send(());
        })
        .unwrap();
        assert!(app.is_running());
        assert_eq!(app.status_message, "Extracting frames...");

        wait_for_outcome(&mut app, done_rx);

        assert!(!app.is_running());
        assert_eq!(app.status_message, "Error during extraction.");
        let dialog = app.dialog.clone().expect("error dialog expected");
        assert_eq!(dialog.kind, DialogKind::Error);
        assert!(dialog.body.starts_with("An error occurred during extraction:\n"));
        assert!(dialog.body.contains("ffmpeg"));

        // Outcome is only reported once
        assert!(app.poll_extraction().is_none());
    }

    #[test]
    fn test_second_start_is_rejected_while_running() {
        let temp = tempfile::tempdir().unwrap();
        let mut app = create_test_app();
        app.set_video(Some(temp.path().join("clip.mp4")));

        let (release_tx, release_rx) = mpsc::channel::<()>();
        let (done_tx, done_rx) = mpsc::channel();
        // Completion hook blocks until released, so the handle stays outstanding
        app.start_extraction(move || {
            let _ = release_rx.recv();
            let _ = done_tx.send(());
        })
        .unwrap();

        assert_eq!(app.start_extraction(|| {}), Err(ShellError::AlreadyRunning));

        release_tx.send(()).unwrap();
        done_rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert!(app.poll_extraction().is_some());
        assert!(!app.is_running());
    }

    #[test]
    fn test_retry_after_failure_is_allowed() {
        let temp = tempfile::tempdir().unwrap();
        let mut app = create_test_app();
        app.set_video(Some(temp.path().join("clip.mp4")));

        for _ in 0..2 {
            let (done_tx, done_rx) = mpsc::channel();
            app.start_extraction(move || {
                let _ = done_tx.send(());
            })
            .unwrap();
            wait_for_outcome(&mut app, done_rx);
            app.dialog = None;
        }
    }

    #[test]
    fn test_localized_messages() {
        let mut config = AppConfig::default();
        config.language = Some("es".to_string());
        let mut app = FrameExtractorApp::with_config(config);

        assert_eq!(app.video_label, "No se ha seleccionado ningún video.");
        let _ = app.start_extraction(|| {});
        assert_eq!(app.dialog.unwrap().title, "Advertencia");
    }
}
