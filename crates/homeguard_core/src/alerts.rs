//! Sistema de alertas – tipos de notificação e conteúdo por canal.

use crate::config::Thresholds;
use crate::types::{SensorChannel, SensorReading, format_level};

/// Um tipo de alerta por canal, cada um com canal de notificação e slot
/// fixos: no máximo uma notificação visível por tipo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertKind(SensorChannel);

impl AlertKind {
    pub fn for_channel(channel: SensorChannel) -> Self {
        Self(channel)
    }

    pub fn channel(self) -> SensorChannel {
        self.0
    }

    /// Identificador do canal de notificação.
    pub fn channel_id(self) -> &'static str {
        match self.0 {
            SensorChannel::Fire => "fire_alert_channel",
            SensorChannel::Temperature => "temperature_alert_channel",
            SensorChannel::Gas => "gas_alert_channel",
            SensorChannel::Flood => "flood_alert_channel",
        }
    }

    /// Slot fixo da notificação (uma nova substitui a anterior).
    pub fn notification_id(self) -> u32 {
        match self.0 {
            SensorChannel::Fire => 1,
            SensorChannel::Temperature => 2,
            SensorChannel::Gas => 3,
            SensorChannel::Flood => 4,
        }
    }

    /// Nome do canal de notificação.
    pub fn channel_name(self) -> &'static str {
        match self.0 {
            SensorChannel::Fire => "Fire Alerts",
            SensorChannel::Temperature => "Temperature Alerts",
            SensorChannel::Gas => "Gas Alerts",
            SensorChannel::Flood => "Flood Alerts",
        }
    }

    /// Descrição do canal de notificação.
    pub fn channel_description(self) -> &'static str {
        match self.0 {
            SensorChannel::Fire => "Notifications for fire events",
            SensorChannel::Temperature => "Notifications for temperature changes",
            SensorChannel::Gas => "Notifications for gas level changes",
            SensorChannel::Flood => "Notifications for flood warnings",
        }
    }

    pub fn title(self) -> &'static str {
        match self.0 {
            SensorChannel::Fire => "Fire Alert!",
            SensorChannel::Temperature => "Temperature Alert!",
            SensorChannel::Gas => "Gas Alert!",
            SensorChannel::Flood => "Flood Alert!",
        }
    }
}

/// O que acontece ao tocar na notificação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    /// Abre a tela da câmera
    OpenCameraFeed,
    /// Abre o diálogo de detalhes do canal
    OpenDetail(SensorChannel),
}

/// Um alerta disparado.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub body: String,
    pub tap: TapAction,
}

impl Alert {
    /// Monta o alerta de uma leitura em Warning.
    pub fn for_reading(reading: &SensorReading, th: &Thresholds) -> Self {
        let kind = AlertKind::for_channel(reading.channel);
        let value = format_level(reading.as_level());

        let (body, tap) = match reading.channel {
            SensorChannel::Fire => (
                "Possible fire detected in your home. Tap to view live feed.".to_string(),
                TapAction::OpenCameraFeed,
            ),
            SensorChannel::Temperature => {
                let direction = if reading.as_level() < th.temperature_low {
                    "low"
                } else {
                    "high"
                };
                (
                    format!("Temperature is too {direction}! {value}°C. Tap to view more."),
                    TapAction::OpenDetail(SensorChannel::Temperature),
                )
            }
            SensorChannel::Gas => (
                format!("Gas levels are high! {value}%. Immediate action required!"),
                TapAction::OpenDetail(SensorChannel::Gas),
            ),
            SensorChannel::Flood => (
                format!("Water level is {value}%. Tap to view details."),
                TapAction::OpenDetail(SensorChannel::Flood),
            ),
        };

        Self {
            kind,
            title: kind.title().to_string(),
            body,
            tap,
        }
    }
}

/// Destino das notificações (um por plataforma).
pub trait NotificationSink {
    /// Exibe o alerta no slot do seu tipo, substituindo o anterior.
    fn fire(&mut self, alert: &Alert);
}
