use std::{env, process};

use gesture_pad::{GesturePadApp, SurfaceConfig};

fn main() -> eframe::Result {
    env_logger::builder()
        .filter_module(env!("CARGO_CRATE_NAME"), log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    let config = match env::args_os().nth(1) {
        Some(path) => SurfaceConfig::load(&path).unwrap_or_else(|err| {
            log::error!("{err}");
            process::exit(1);
        }),
        None => SurfaceConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([640.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Gesture Pad",
        options,
        Box::new(|cc| Ok(Box::new(GesturePadApp::new(cc, config)))),
    )
}
