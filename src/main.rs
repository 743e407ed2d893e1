//#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use eframe::egui;
use tuneseek::api::BackendClient;
use tuneseek::app::{ClientSession, MusicSearchApp};
use tuneseek::config::ClientConfig;
use tuneseek::constants::{APP_DESCRIPTION, APP_HEIGHT, APP_NAME, APP_WIDTH};
use tuneseek::utils::{http, AudioController};

// App version and metadata
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<(), eframe::Error> {
    // Set RUST_LOG=debug for verbose output, RUST_LOG=info for normal logs
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("hyper_util", log::LevelFilter::Warn)
        .filter_module("rustls", log::LevelFilter::Warn)
        .filter_module("symphonia_core", log::LevelFilter::Warn)
        .init();

    log::info!("[Main] Starting {} v{}", APP_NAME, APP_VERSION);

    let config = ClientConfig::from_env();
    log::info!("[Main] Backend: {}", config.backend_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("{} v{} - {}", APP_NAME, APP_VERSION, APP_DESCRIPTION))
            .with_inner_size([APP_WIDTH, APP_HEIGHT])
            .with_min_inner_size([APP_WIDTH * 0.6, APP_HEIGHT * 0.6])
            .with_resizable(true)
            .with_decorations(true),
        ..Default::default()
    };

    eframe::run_native(
        &format!("{} v{}", APP_NAME, APP_VERSION),
        options,
        Box::new(move |cc| {
            let backend = BackendClient::new(http::client(), config.backend_url);
            let session = ClientSession::new(Box::new(backend), Box::new(AudioController::new()));
            Ok(Box::new(MusicSearchApp::new(cc, session)))
        }),
    )
}
