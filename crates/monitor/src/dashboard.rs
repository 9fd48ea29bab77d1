//! Dashboard principal – App eframe/egui.

use crate::net_thread::{self, NetMessage, StoreWriter};
use crate::notifier::NotificationCenter;
use crate::panels::{self, NotificationClick};
use crate::telephony::OutboxTelephony;
use crate::theme_egui::{self, EguiTheme};
use crate::toasts::Toasts;
use crate::view::{Dialog, ViewState};
use crossbeam_channel::Receiver;
use egui::{Color32, RichText};
use homeguard_core::alerts::{AlertKind, NotificationSink};
use homeguard_core::config::AppConfig;
use homeguard_core::details::{self, FireFeedStatus};
use homeguard_core::report;
use homeguard_core::state::SensorEvaluator;
use homeguard_core::store::{self, StoreReading, StoreUpdate, TriggerTarget, unix_millis};
use homeguard_core::types::SensorChannel;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Ações da UI, aplicadas depois da renderização do frame.
#[derive(Debug, Clone, PartialEq)]
enum UiAction {
    OpenTile(SensorChannel),
    OpenNotification(AlertKind),
    DismissNotification(AlertKind),
    OpenDialog(Dialog),
    CloseDialog,
    PlaceEmergencyCall,
    SendStatus(usize),
    Trigger(TriggerTarget),
}

/// Estado do dashboard.
pub struct HomeGuardDashboard {
    config: AppConfig,
    theme: EguiTheme,
    theme_index: usize,
    all_themes: Vec<EguiTheme>,

    // Dados
    rx: Receiver<NetMessage>,
    writer: Option<StoreWriter>,
    evaluator: SensorEvaluator,
    last_data_time: Option<Instant>,
    last_source: Option<IpAddr>,
    packet_size: usize,
    servo_triggered: bool,
    buzzer_triggered: bool,

    // Ações externas
    notifications: NotificationCenter,
    telephony: OutboxTelephony,

    // UI state
    view: ViewState,
    toasts: Toasts,
    is_fullscreen: bool,
}

impl HomeGuardDashboard {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig, outbox_dir: PathBuf) -> Self {
        let mon_cfg = &config.monitor;

        // Inicia thread de rede
        let rx = net_thread::spawn_receiver_thread(mon_cfg.port, mon_cfg.node_ip.clone());
        let writer = match StoreWriter::bind(mon_cfg.node_ip.clone(), mon_cfg.node_port) {
            Ok(w) => Some(w),
            Err(e) => {
                error!("Falha ao criar socket de escrita: {e}");
                None
            }
        };

        // Carrega tema
        let all_themes = theme_egui::all_themes();
        let theme_index = all_themes
            .iter()
            .position(|t| t.name == mon_cfg.theme)
            .unwrap_or(0);
        let theme = all_themes[theme_index].clone();

        let evaluator = SensorEvaluator::from_config(mon_cfg);
        let telephony = OutboxTelephony::new(outbox_dir);
        info!("Outbox de SMS/chamadas: {}", telephony.dir().display());

        Self {
            config,
            theme,
            theme_index,
            all_themes,
            rx,
            writer,
            evaluator,
            last_data_time: None,
            last_source: None,
            packet_size: 0,
            servo_triggered: false,
            buzzer_triggered: false,
            notifications: NotificationCenter::default(),
            telephony,
            view: ViewState::Closed,
            toasts: Toasts::default(),
            is_fullscreen: false,
        }
    }

    /// Processa mensagens pendentes da thread de rede.
    fn poll_network(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            let now = Instant::now();
            self.last_data_time = Some(now);
            self.last_source = Some(msg.source.ip());
            self.packet_size = msg.raw_size;

            let Some(reading) = store::route(&msg.update) else {
                debug!("Caminho ignorado: {}", msg.update.path);
                continue;
            };

            if let StoreReading::Trigger { target, triggered } = &reading {
                match target {
                    TriggerTarget::Servo => self.servo_triggered = *triggered,
                    TriggerTarget::Buzzer => self.buzzer_triggered = *triggered,
                }
            }

            if let Some(alert) = self.evaluator.apply(reading, now).and_then(|e| e.alert) {
                self.notifications.fire(&alert);
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.last_data_time
            .is_some_and(|t| t.elapsed() < CONNECTION_TIMEOUT)
    }

    fn toast(&mut self, text: impl Into<String>) {
        self.toasts.push(text, Instant::now());
    }

    // ──────────────────────────────────────────
    // Ações
    // ──────────────────────────────────────────

    fn handle(&mut self, action: UiAction) {
        match action {
            UiAction::OpenTile(channel) => self.view = ViewState::for_tile(channel),
            UiAction::OpenNotification(kind) => {
                if let Some(alert) = self.notifications.dismiss(kind) {
                    self.view = ViewState::for_tap(alert.tap);
                }
            }
            UiAction::DismissNotification(kind) => {
                self.notifications.dismiss(kind);
            }
            UiAction::OpenDialog(dialog) => self.view = ViewState::Open(dialog),
            UiAction::CloseDialog => self.view.close(),
            UiAction::PlaceEmergencyCall => {
                let number = self.config.monitor.emergency_number.clone();
                match report::place_emergency_call(
                    &number,
                    &self.config.monitor.permissions,
                    &mut self.telephony,
                ) {
                    Ok(()) => self.toast(format!("Calling {number}...")),
                    Err(e) => self.toast(e.to_string()),
                }
                self.view.close();
            }
            UiAction::SendStatus(index) => {
                self.view.close();
                let Some(contact) = self.config.monitor.contacts.get(index).cloned() else {
                    return;
                };
                let result = report::send_status_report(
                    &contact.phone,
                    self.evaluator.state(),
                    &self.config.monitor.permissions,
                    &self.config.monitor.location,
                    &mut self.telephony,
                );
                match result {
                    Ok(outcome) => {
                        for notice in outcome.notices {
                            self.toast(notice);
                        }
                    }
                    Err(e) => self.toast(e.to_string()),
                }
            }
            UiAction::Trigger(target) => self.write_trigger(target),
        }
    }

    fn write_trigger(&mut self, target: TriggerTarget) {
        let Some(writer) = &self.writer else {
            self.toast("Store unavailable");
            return;
        };

        let update = StoreUpdate::trigger(target, unix_millis());
        match writer.write(&update, self.last_source) {
            Ok(()) => {
                match target {
                    TriggerTarget::Servo => self.servo_triggered = true,
                    TriggerTarget::Buzzer => self.buzzer_triggered = true,
                }
                self.toast(format!("{} triggered", target_label(target)));
            }
            Err(e) => {
                error!("Falha ao escrever {}: {e}", update.path);
                self.toast(format!("Failed to trigger {}", target_label(target).to_lowercase()));
            }
        }
    }

    // ──────────────────────────────────────────
    // Renderização
    // ──────────────────────────────────────────

    fn render_dialog(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        let Some(dialog) = self.view.dialog() else {
            return;
        };

        let title = match dialog {
            Dialog::Detail(channel) => details::dialog_title(channel),
            Dialog::CameraFeed => details::dialog_title(SensorChannel::Fire),
            Dialog::Emergency => "Emergency Services",
            Dialog::ContactPicker => "Send Status To",
        };

        let mut open = true;
        egui::Window::new(title)
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui: &mut egui::Ui| match dialog {
                Dialog::Detail(channel) => self.render_detail(ui, channel, actions),
                Dialog::CameraFeed => self.render_camera_feed(ui, actions),
                Dialog::Emergency => self.render_emergency(ui, actions),
                Dialog::ContactPicker => self.render_contact_picker(ui, actions),
            });

        if !open {
            actions.push(UiAction::CloseDialog);
        }
    }

    fn render_detail(&self, ui: &mut egui::Ui, channel: SensorChannel, actions: &mut Vec<UiAction>) {
        let state = self.evaluator.state();
        let th = self.evaluator.thresholds();
        let message = match channel {
            SensorChannel::Temperature => details::temperature_details(state, th),
            SensorChannel::Gas => details::gas_details(state, th),
            SensorChannel::Flood => details::flood_details(state, th),
            SensorChannel::Fire => FireFeedStatus::for_tier(state.tier(SensorChannel::Fire)).status.to_string(),
        };

        ui.label(RichText::new(message).color(self.theme.text).monospace());
        ui.add_space(8.0);
        if ui.button("OK").clicked() {
            actions.push(UiAction::CloseDialog);
        }
    }

    fn render_camera_feed(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let tier = self.evaluator.state().tier(SensorChannel::Fire);
        let feed = FireFeedStatus::for_tier(tier);
        let color = self.theme.tier_color(tier);

        ui.hyperlink_to("▶ Open live feed", &self.config.monitor.camera_url);
        ui.add_space(6.0);
        ui.label(RichText::new(feed.status).color(color).strong().monospace());
        ui.label(RichText::new(feed.advice).color(self.theme.text));
        ui.add_space(8.0);
        ui.horizontal(|ui: &mut egui::Ui| {
            if ui.button("🚨 Emergency Services").clicked() {
                actions.push(UiAction::OpenDialog(Dialog::Emergency));
            }
            if ui.button("Back").clicked() {
                actions.push(UiAction::CloseDialog);
            }
        });
    }

    fn render_emergency(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.label(
            RichText::new(format!("Call {}?", self.config.monitor.emergency_number))
                .color(self.theme.text)
                .size(16.0),
        );
        ui.add_space(8.0);
        ui.horizontal(|ui: &mut egui::Ui| {
            let call = egui::Button::new(RichText::new("📞 Call").color(Color32::WHITE))
                .fill(self.theme.critical);
            if ui.add(call).clicked() {
                actions.push(UiAction::PlaceEmergencyCall);
            }
            if ui.button("Cancel").clicked() {
                actions.push(UiAction::CloseDialog);
            }
        });
    }

    fn render_contact_picker(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let contacts = &self.config.monitor.contacts;
        if contacts.is_empty() {
            ui.label(
                RichText::new("No contacts configured in config.toml")
                    .color(self.theme.dim),
            );
        }
        for (index, contact) in contacts.iter().enumerate() {
            if ui.button(format!("{} ({})", contact.name, contact.phone)).clicked() {
                actions.push(UiAction::SendStatus(index));
            }
        }
        ui.add_space(6.0);
        if ui.button("Cancel").clicked() {
            actions.push(UiAction::CloseDialog);
        }
    }

    fn render_toasts(&self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -40.0])
            .show(ctx, |ui: &mut egui::Ui| {
                for text in self.toasts.visible() {
                    egui::Frame::new()
                        .fill(self.theme.panel)
                        .stroke(egui::Stroke::new(1.0, self.theme.border))
                        .corner_radius(12.0)
                        .inner_margin(8.0)
                        .show(ui, |ui: &mut egui::Ui| {
                            ui.label(RichText::new(text).color(self.theme.text));
                        });
                }
            });
    }
}

/// Atalhos pressionados num frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Shortcuts {
    cycle_theme: bool,
    toggle_fullscreen: bool,
    close_dialog: bool,
    quit: bool,
}

impl Shortcuts {
    /// Esc fecha o diálogo aberto; sem diálogo, sai.
    fn read(pressed: impl Fn(egui::Key) -> bool, dialog_open: bool) -> Self {
        let escape = pressed(egui::Key::Escape);
        Self {
            cycle_theme: pressed(egui::Key::T),
            toggle_fullscreen: pressed(egui::Key::F) || pressed(egui::Key::F11),
            close_dialog: escape && dialog_open,
            quit: pressed(egui::Key::Q) || (escape && !dialog_open),
        }
    }
}

fn target_label(target: TriggerTarget) -> &'static str {
    match target {
        TriggerTarget::Servo => "Trigger",
        TriggerTarget::Buzzer => "Buzzer",
    }
}

impl eframe::App for HomeGuardDashboard {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Poll rede ──
        self.poll_network();
        self.toasts.prune(Instant::now());

        ctx.request_repaint_after(Duration::from_millis(100));

        // ── Configurar estilo visual baseado no tema ──
        let mut visuals = if self.theme.name == "light" {
            egui::Visuals::light()
        } else {
            egui::Visuals::dark()
        };
        visuals.panel_fill = self.theme.bg;
        visuals.window_fill = self.theme.panel;
        visuals.override_text_color = Some(self.theme.text);
        ctx.set_visuals(visuals);

        let mut actions = Vec::new();

        // ── Atalhos de teclado ──
        // Comandos de viewport só depois de soltar o lock do input
        let dialog_open = self.view != ViewState::Closed;
        let keys = ctx.input(|i: &egui::InputState| Shortcuts::read(|k| i.key_pressed(k), dialog_open));

        if keys.cycle_theme {
            self.theme_index = (self.theme_index + 1) % self.all_themes.len();
            self.theme = self.all_themes[self.theme_index].clone();
            info!("Tema: {}", self.theme.name);
        }
        if keys.close_dialog {
            actions.push(UiAction::CloseDialog);
        }
        if keys.toggle_fullscreen {
            self.is_fullscreen = !self.is_fullscreen;
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.is_fullscreen));
        }
        if keys.quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // ── Central de notificações ──
        if !self.notifications.is_empty() {
            egui::SidePanel::right("notifications")
                .resizable(false)
                .default_width(280.0)
                .show(ctx, |ui: &mut egui::Ui| {
                    ui.label(
                        RichText::new("🔔 Notifications")
                            .color(self.theme.title)
                            .strong()
                            .monospace(),
                    );
                    ui.add_space(4.0);
                    for posted in self.notifications.active() {
                        let kind = posted.alert.kind;
                        match panels::render_notification(ui, posted, &self.theme) {
                            NotificationClick::Open => actions.push(UiAction::OpenNotification(kind)),
                            NotificationClick::Dismiss => {
                                actions.push(UiAction::DismissNotification(kind))
                            }
                            NotificationClick::None => {}
                        }
                        ui.add_space(4.0);
                    }
                });
        }

        // ── Painel central ──
        egui::CentralPanel::default().show(ctx, |ui: &mut egui::Ui| {
            // ── Título ──
            ui.vertical_centered(|ui: &mut egui::Ui| {
                ui.label(
                    RichText::new("🏠 HOMEGUARD 🏠")
                        .color(self.theme.title)
                        .size(22.0)
                        .strong()
                        .monospace(),
                );
            });

            // ── Status de conexão ──
            ui.vertical_centered(|ui: &mut egui::Ui| {
                match (self.last_data_time, self.last_source) {
                    (Some(t), Some(source)) if self.is_connected() => {
                        ui.label(
                            RichText::new(format!(
                                "● Conectado a {source} | {} bytes | {}ms atrás",
                                self.packet_size,
                                t.elapsed().as_millis()
                            ))
                            .color(self.theme.safe)
                            .monospace(),
                        );
                    }
                    _ => {
                        ui.label(
                            RichText::new(format!(
                                "○ Aguardando dados na porta {}...",
                                self.config.monitor.port
                            ))
                            .color(self.theme.critical)
                            .monospace(),
                        );
                    }
                }
            });

            ui.add_space(8.0);
            panels::render_banner(ui, &self.evaluator.state().aggregate(), &self.theme);
            ui.add_space(8.0);

            // ── Tiles ──
            let state = self.evaluator.state();
            ui.columns(SensorChannel::ALL.len(), |cols| {
                for (col, channel) in cols.iter_mut().zip(SensorChannel::ALL) {
                    let clicked = panels::render_tile(
                        col,
                        channel,
                        state.latest(channel),
                        state.tier(channel),
                        &self.theme,
                    );
                    if clicked {
                        actions.push(UiAction::OpenTile(channel));
                    }
                }
            });

            ui.add_space(12.0);

            // ── Ações ──
            ui.horizontal_wrapped(|ui: &mut egui::Ui| {
                if ui.button("🚨 Emergency Services").clicked() {
                    actions.push(UiAction::OpenDialog(Dialog::Emergency));
                }
                if ui.button("✉ Send Status").clicked() {
                    actions.push(UiAction::OpenDialog(Dialog::ContactPicker));
                }
                if ui.button("📷 Live Feed").clicked() {
                    actions.push(UiAction::OpenDialog(Dialog::CameraFeed));
                }
                ui.separator();
                let servo = if self.servo_triggered { "⚙ Trigger (active)" } else { "⚙ Trigger" };
                if ui.button(servo).clicked() {
                    actions.push(UiAction::Trigger(TriggerTarget::Servo));
                }
                let buzzer = if self.buzzer_triggered { "🔊 Buzzer (active)" } else { "🔊 Buzzer" };
                if ui.button(buzzer).clicked() {
                    actions.push(UiAction::Trigger(TriggerTarget::Buzzer));
                }
            });

            // ── Help bar (fundo) ──
            ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui: &mut egui::Ui| {
                ui.label(
                    RichText::new("[F] Fullscreen | [T] Theme | [Esc] Close | [Q] Quit")
                        .color(self.theme.dim)
                        .monospace()
                        .size(10.0),
                );
            });
        });

        // ── Diálogos e toasts ──
        self.render_dialog(ctx, &mut actions);
        self.render_toasts(ctx);

        for action in actions {
            self.handle(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(down: &[egui::Key], dialog_open: bool) -> Shortcuts {
        Shortcuts::read(|k| down.contains(&k), dialog_open)
    }

    #[test]
    fn no_keys_no_shortcuts() {
        assert_eq!(keys(&[], false), Shortcuts::default());
    }

    #[test]
    fn escape_closes_dialog_before_quitting() {
        let with_dialog = keys(&[egui::Key::Escape], true);
        assert!(with_dialog.close_dialog);
        assert!(!with_dialog.quit);

        let without_dialog = keys(&[egui::Key::Escape], false);
        assert!(!without_dialog.close_dialog);
        assert!(without_dialog.quit);
    }

    #[test]
    fn viewport_keys_become_flags() {
        assert!(keys(&[egui::Key::F11], false).toggle_fullscreen);
        assert!(keys(&[egui::Key::F], true).toggle_fullscreen);
        assert!(keys(&[egui::Key::Q], true).quit);
        assert!(keys(&[egui::Key::T], false).cycle_theme);
    }
}
