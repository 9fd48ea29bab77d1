//! # HomeGuard Monitor
//!
//! Dashboard de segurança residencial com GUI acelerada por GPU via
//! eframe/egui.
//!
//! Recebe os pushes do node via UDP, classifica cada canal, dispara
//! alertas com cooldown e oferece chamada de emergência, envio de status
//! por SMS e acionamento do servo/buzzer.
//!
//! ## Atalhos
//! - `F` / `F11`: Fullscreen
//! - `T`: Alternar tema
//! - `Esc`: Fechar diálogo / sair
//! - `Q`: Sair

mod dashboard;
mod net_thread;
mod notifier;
mod panels;
mod telephony;
mod theme_egui;
mod toasts;
mod view;

use dashboard::HomeGuardDashboard;
use homeguard_core::config::AppConfig;
use std::path::{Path, PathBuf};
use tracing::warn;

fn main() -> eframe::Result<()> {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── Config ──
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path);

    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    for problem in config.validate() {
        warn!("Config: {problem}");
    }

    let outbox_dir = resolve_outbox(&config_path, &config.monitor.outbox_dir);

    // ── Janela eframe ──
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("🏠 HomeGuard")
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "HomeGuard",
        options,
        Box::new(move |cc| Ok(Box::new(HomeGuardDashboard::new(cc, config, outbox_dir)))),
    )
}

/// Caminhos relativos da outbox partem do diretório do config.toml.
fn resolve_outbox(config_path: &Path, outbox_dir: &str) -> PathBuf {
    let dir = Path::new(outbox_dir);
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    config_path
        .parent()
        .unwrap_or(Path::new("."))
        .join(dir)
}
