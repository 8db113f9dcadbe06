mod app;
mod chart;
mod samples;
mod simulation;
mod types;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1080.0, 720.0])
            .with_min_inner_size([840.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GAN Training Lab",
        options,
        Box::new(|cc| Ok(Box::new(app::GanLabApp::new(cc)))),
    )
}
