mod app;
mod config;
mod dispatch;
mod upload;
mod utils;

#[cfg(test)]
mod test_utils;

use app::Curvetopia;
use config::Config;
use eframe::CreationContext;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}

fn main() -> Result<(), eframe::Error> {
    init_tracing();

    let config = Config::load().unwrap_or_else(|e| {
        error!("{}; falling back to the default ML service URL", e);
        Config::default()
    });

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Curvetopia",
        options,
        Box::new(move |cc: &CreationContext| Box::new(Curvetopia::new(cc, config))),
    )
}
