mod core;
mod gui;
mod video;

use eframe::egui;
use gui::FrameExtractorApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([400.0, 220.0])
            .with_min_inner_size([320.0, 200.0])
            .with_title("Video Frame Extractor"),
        ..Default::default()
    };

    eframe::run_native(
        "Video Frame Extractor",
        options,
        Box::new(|cc| {
            match FrameExtractorApp::new(cc) {
                Ok(app) => Ok(Box::new(app)),
                Err(e) => {
                    log::error!("Failed to initialize app: {}", e);
                    Err(e.into())
                }
            }
        }),
    ).map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
