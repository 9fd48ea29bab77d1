//! Conversão de temas para `egui::Color32`.

use egui::Color32;
use homeguard_core::theme::{self, Theme};
use homeguard_core::types::{SensorChannel, StatusTier};

/// Tema convertido para tipos egui.
#[derive(Clone)]
pub struct EguiTheme {
    pub name: String,
    pub bg: Color32,
    pub panel: Color32,
    pub border: Color32,
    pub text: Color32,
    pub dim: Color32,
    pub title: Color32,
    pub fire: Color32,
    pub gas: Color32,
    pub temperature: Color32,
    pub flood: Color32,
    pub safe: Color32,
    pub warning: Color32,
    pub critical: Color32,
}

impl EguiTheme {
    /// Converte um [`Theme`] do core para [`EguiTheme`].
    pub fn from_core(t: &Theme) -> Self {
        Self {
            name: t.name.clone(),
            bg: hex_color(&t.bg),
            panel: hex_color(&t.panel),
            border: hex_color(&t.border),
            text: hex_color(&t.text),
            dim: hex_color(&t.dim),
            title: hex_color(&t.title),
            fire: hex_color(&t.fire),
            gas: hex_color(&t.gas),
            temperature: hex_color(&t.temperature),
            flood: hex_color(&t.flood),
            safe: hex_color(&t.safe),
            warning: hex_color(&t.warning),
            critical: hex_color(&t.critical),
        }
    }

    /// Cor de destaque de um canal.
    pub fn channel_color(&self, channel: SensorChannel) -> Color32 {
        match channel {
            SensorChannel::Fire => self.fire,
            SensorChannel::Gas => self.gas,
            SensorChannel::Temperature => self.temperature,
            SensorChannel::Flood => self.flood,
        }
    }

    /// Cor do nível de status.
    pub fn tier_color(&self, tier: StatusTier) -> Color32 {
        match tier {
            StatusTier::Safe => self.safe,
            StatusTier::Warning => self.warning,
        }
    }
}

fn hex_color(hex: &str) -> Color32 {
    let (r, g, b) = theme::hex_to_rgb(hex);
    Color32::from_rgb(r, g, b)
}

/// Carrega todos os temas disponíveis.
pub fn all_themes() -> Vec<EguiTheme> {
    theme::theme_names()
        .iter()
        .map(|name| EguiTheme::from_core(&theme::get_theme(name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_every_theme() {
        let themes = all_themes();
        assert_eq!(themes.len(), theme::theme_names().len());
        assert_eq!(themes[0].name, "dark");
    }

    #[test]
    fn tier_and_channel_colors() {
        let t = EguiTheme::from_core(&theme::high_contrast_theme());
        assert_eq!(t.tier_color(StatusTier::Safe), Color32::from_rgb(0, 255, 0));
        assert_eq!(t.tier_color(StatusTier::Warning), Color32::from_rgb(255, 255, 0));
        assert_eq!(t.channel_color(SensorChannel::Fire), Color32::from_rgb(255, 102, 0));
    }
}
