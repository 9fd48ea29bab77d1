//! Tiles dos sensores, banner de status e cartões de notificação.

use crate::notifier::PostedAlert;
use crate::theme_egui::EguiTheme;
use egui::{Color32, RichText, Ui};
use homeguard_core::status::AggregateStatus;
use homeguard_core::types::{SensorChannel, SensorReading, SensorValue, StatusTier, format_level};

/// Clique num cartão de notificação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationClick {
    None,
    Open,
    Dismiss,
}

// ──────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────

fn unit(channel: SensorChannel) -> &'static str {
    match channel {
        SensorChannel::Temperature => "°C",
        SensorChannel::Gas | SensorChannel::Flood => "%",
        SensorChannel::Fire => "",
    }
}

/// Texto do valor exibido no tile.
pub fn tile_value(channel: SensorChannel, reading: Option<&SensorReading>) -> String {
    match reading.map(|r| &r.value) {
        Some(SensorValue::Level(v)) => format!("{}{}", format_level(*v), unit(channel)),
        Some(SensorValue::Status(s)) => s.clone(),
        Some(SensorValue::Missing) | None => "--".into(),
    }
}

fn panel_frame(
    ui: &mut Ui,
    title: &str,
    accent: Color32,
    theme: &EguiTheme,
    add_body: impl FnOnce(&mut Ui),
) -> egui::Response {
    egui::Frame::new()
        .fill(theme.panel)
        .stroke(egui::Stroke::new(2.0, accent))
        .corner_radius(4.0)
        .inner_margin(8.0)
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(
                    RichText::new(format!("── {title} ──"))
                        .color(accent)
                        .strong()
                        .monospace()
                        .size(13.0),
                );
            });
            ui.add_space(4.0);
            add_body(ui);
        })
        .response
}

// ──────────────────────────────────────────
// Banner
// ──────────────────────────────────────────

pub fn render_banner(ui: &mut Ui, status: &AggregateStatus, theme: &EguiTheme) {
    let color = if status.is_danger() { theme.critical } else { theme.safe };
    egui::Frame::new()
        .fill(theme.panel)
        .stroke(egui::Stroke::new(2.0, color))
        .corner_radius(4.0)
        .inner_margin(10.0)
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(
                    RichText::new(status.to_string())
                        .color(color)
                        .strong()
                        .monospace()
                        .size(18.0),
                );
            });
        });
}

// ──────────────────────────────────────────
// Tiles
// ──────────────────────────────────────────

/// Renderiza o tile de um canal. Retorna `true` se foi clicado.
pub fn render_tile(
    ui: &mut Ui,
    channel: SensorChannel,
    reading: Option<&SensorReading>,
    tier: StatusTier,
    theme: &EguiTheme,
) -> bool {
    let accent = match tier {
        StatusTier::Warning => theme.critical,
        StatusTier::Safe => theme.channel_color(channel),
    };

    let response = panel_frame(ui, &channel.name().to_uppercase(), accent, theme, |ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(
                RichText::new(tile_value(channel, reading))
                    .color(theme.text)
                    .monospace()
                    .strong()
                    .size(22.0),
            );
            ui.label(
                RichText::new(tier.label())
                    .color(theme.tier_color(tier))
                    .monospace(),
            );
            ui.label(RichText::new("clique para detalhes").color(theme.dim).monospace().size(9.0));
        });
    });

    response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
        .clicked()
}

// ──────────────────────────────────────────
// Notificações
// ──────────────────────────────────────────

pub fn render_notification(ui: &mut Ui, posted: &PostedAlert, theme: &EguiTheme) -> NotificationClick {
    let accent = theme.channel_color(posted.alert.kind.channel());
    let mut click = NotificationClick::None;

    egui::Frame::new()
        .fill(theme.panel)
        .stroke(egui::Stroke::new(1.0, theme.border))
        .corner_radius(4.0)
        .inner_margin(6.0)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                let kind = posted.alert.kind;
                ui.label(RichText::new(&posted.alert.title).color(accent).strong())
                    .on_hover_text(format!("{}: {}", kind.channel_name(), kind.channel_description()));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                    if ui.small_button("✖").clicked() {
                        click = NotificationClick::Dismiss;
                    }
                    ui.label(
                        RichText::new(format!("{}s", posted.posted.elapsed().as_secs()))
                            .color(theme.dim)
                            .size(10.0),
                    );
                });
            });
            let body = ui.add(
                egui::Label::new(RichText::new(&posted.alert.body).color(theme.text))
                    .sense(egui::Sense::click()),
            );
            if body.clicked() {
                click = NotificationClick::Open;
            }
        });

    click
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeguard_core::types::NO_FIRE;

    #[test]
    fn tile_values() {
        let temp = SensorReading::level(SensorChannel::Temperature, 31.0);
        assert_eq!(tile_value(SensorChannel::Temperature, Some(&temp)), "31.0°C");

        let gas = SensorReading::level(SensorChannel::Gas, 0.42);
        assert_eq!(tile_value(SensorChannel::Gas, Some(&gas)), "0.42%");

        let fire = SensorReading::fire(NO_FIRE);
        assert_eq!(tile_value(SensorChannel::Fire, Some(&fire)), "no fire");
    }

    #[test]
    fn missing_values_show_placeholder() {
        let missing = SensorReading::missing(SensorChannel::Flood);
        assert_eq!(tile_value(SensorChannel::Flood, Some(&missing)), "--");
        assert_eq!(tile_value(SensorChannel::Gas, None), "--");
    }
}
