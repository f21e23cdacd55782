mod animation;
mod compositor;
mod config;
mod fonts;
mod resolver;
mod scheduler;
mod session;
mod splash;
mod theme;

use anyhow::Result;

use crate::config::SplashConfig;
use crate::splash::{Prepared, SplashWindow};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SplashConfig::load();
    if let Err(e) = config.ensure_dir() {
        log::warn!("{e:#}");
    }
    for tip in config.startup_tips() {
        log::info!("{tip}");
    }

    let prepared = Prepared::new(&config)?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Splash")
            .with_app_id("oneshot-splash")
            .with_fullscreen(true)
            .with_decorations(false)
            .with_transparent(true)
            .with_window_level(egui::WindowLevel::AlwaysOnTop),
        ..Default::default()
    };

    eframe::run_native("oneshot-splash", native_options, Box::new(move |cc| Box::new(SplashWindow::new(cc, prepared))))
        .map_err(|e| {
            log::error!("windowing toolkit unavailable: {e}");
            anyhow::anyhow!("eframe: {e}")
        })
}
