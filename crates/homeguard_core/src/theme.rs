//! Definição de temas visuais para o dashboard.

use serde::{Deserialize, Serialize};

/// Definição completa de um tema de cores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Cores de fundo
    pub bg: Color32Hex,
    pub panel: Color32Hex,
    pub border: Color32Hex,
    // Cores de texto
    pub text: Color32Hex,
    pub dim: Color32Hex,
    pub title: Color32Hex,
    // Cores por canal
    pub fire: Color32Hex,
    pub gas: Color32Hex,
    pub temperature: Color32Hex,
    pub flood: Color32Hex,
    // Cores de status
    pub safe: Color32Hex,
    pub warning: Color32Hex,
    pub critical: Color32Hex,
}

/// Cor em formato hex string (ex: "#00ff88") para serialização.
/// A conversão para `egui::Color32` é feita no monitor.
pub type Color32Hex = String;

/// Converte uma string hex "#RRGGBB" para tupla (r, g, b).
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return (255, 255, 255); // fallback branco
    }
    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);
    (r, g, b)
}

/// Tema Escuro (padrão).
pub fn dark_theme() -> Theme {
    Theme {
        name: "dark".into(),
        bg: "#161a1d".into(),
        panel: "#22272b".into(),
        border: "#353b40".into(),
        text: "#f2f2f2".into(),
        dim: "#7a8288".into(),
        title: "#4fc3f7".into(),
        fire: "#ff7043".into(),
        gas: "#ffd54f".into(),
        temperature: "#ba68c8".into(),
        flood: "#4fc3f7".into(),
        safe: "#66bb6a".into(),
        warning: "#ffb300".into(),
        critical: "#ef5350".into(),
    }
}

/// Tema Claro.
pub fn light_theme() -> Theme {
    Theme {
        name: "light".into(),
        bg: "#f5f5f5".into(),
        panel: "#ffffff".into(),
        border: "#cccccc".into(),
        text: "#333333".into(),
        dim: "#888888".into(),
        title: "#0066cc".into(),
        fire: "#d84315".into(),
        gas: "#b28704".into(),
        temperature: "#7b1fa2".into(),
        flood: "#0277bd".into(),
        safe: "#2e7d32".into(),
        warning: "#cc9900".into(),
        critical: "#cc2222".into(),
    }
}

/// Tema High Contrast (acessibilidade).
pub fn high_contrast_theme() -> Theme {
    Theme {
        name: "high_contrast".into(),
        bg: "#000000".into(),
        panel: "#1a1a1a".into(),
        border: "#ffffff".into(),
        text: "#ffffff".into(),
        dim: "#cccccc".into(),
        title: "#00ffff".into(),
        fire: "#ff6600".into(),
        gas: "#ffff00".into(),
        temperature: "#ff00ff".into(),
        flood: "#00ffff".into(),
        safe: "#00ff00".into(),
        warning: "#ffff00".into(),
        critical: "#ff0000".into(),
    }
}

/// Retorna tema pelo nome.
pub fn get_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "light" => light_theme(),
        "high_contrast" => high_contrast_theme(),
        _ => dark_theme(),
    }
}

/// Nomes de temas disponíveis.
pub fn theme_names() -> Vec<&'static str> {
    vec!["dark", "light", "high_contrast"]
}
