//! Textos dos diálogos de detalhes e da tela da câmera.

use crate::config::Thresholds;
use crate::state::MonitorState;
use crate::status::{DetailLevel, detail_level};
use crate::types::{SensorChannel, StatusTier, format_level};

/// Mensagem do diálogo de temperatura.
pub fn temperature_details(state: &MonitorState, th: &Thresholds) -> String {
    let temp = state.level(SensorChannel::Temperature);
    let status = match detail_level(SensorChannel::Temperature, temp, th) {
        DetailLevel::Low => "Low Temperature",
        DetailLevel::High => "High Temperature",
        _ => "Normal",
    };

    format!(
        "Current temperature: {}°C\nHumidity level: {}%\nStatus: {status}",
        format_level(temp),
        format_level(state.humidity()),
    )
}

/// Mensagem do diálogo de gás.
pub fn gas_details(state: &MonitorState, th: &Thresholds) -> String {
    let gas = state.level(SensorChannel::Gas);
    let status = match detail_level(SensorChannel::Gas, gas, th) {
        DetailLevel::Low | DetailLevel::Normal => "Air Quality Stable - No immediate risk.",
        DetailLevel::Moderate => "Warning! Elevated gas levels detected - Please monitor.",
        DetailLevel::High => "Critical Alert! High gas levels detected - Immediate action needed!",
    };

    format!("Gas Level: {}%\nStatus: {status}", format_level(gas))
}

/// Mensagem do diálogo de nível de água.
pub fn flood_details(state: &MonitorState, th: &Thresholds) -> String {
    let level = state.level(SensorChannel::Flood);
    let status = match detail_level(SensorChannel::Flood, level, th) {
        DetailLevel::Low | DetailLevel::Normal => "Low",
        DetailLevel::Moderate => "Moderate - Monitor the levels",
        DetailLevel::High => "High - Risk of flooding!",
    };

    format!("Level: {}%\nStatus: {status}", format_level(level))
}

/// Título do diálogo de cada canal.
pub fn dialog_title(channel: SensorChannel) -> &'static str {
    match channel {
        SensorChannel::Temperature => "Temperature Details",
        SensorChannel::Gas => "Gas Level Details",
        SensorChannel::Flood => "Water Level Details",
        SensorChannel::Fire => "Live Camera Feed",
    }
}

/// Status exibido na tela da câmera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireFeedStatus {
    pub status: &'static str,
    pub advice: &'static str,
}

impl FireFeedStatus {
    pub fn for_tier(tier: StatusTier) -> Self {
        match tier {
            StatusTier::Warning => Self {
                status: "Status: Possible",
                advice: "Please investigate immediately!",
            },
            StatusTier::Safe => Self {
                status: "Status: Clear",
                advice: "All clear, no fire detected.",
            },
        }
    }
}
