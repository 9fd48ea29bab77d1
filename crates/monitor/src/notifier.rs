//! Central de notificações do dashboard.
//!
//! Um slot por tipo de alerta: um novo alerta do mesmo tipo substitui o
//! anterior.

use homeguard_core::alerts::{Alert, AlertKind, NotificationSink};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::info;

/// Alerta exibido na central.
#[derive(Debug, Clone)]
pub struct PostedAlert {
    pub alert: Alert,
    pub posted: Instant,
}

#[derive(Debug, Default)]
pub struct NotificationCenter {
    slots: BTreeMap<u32, PostedAlert>,
}

impl NotificationCenter {
    /// Alertas visíveis, na ordem dos slots.
    pub fn active(&self) -> impl Iterator<Item = &PostedAlert> {
        self.slots.values()
    }

    /// Remove o alerta do slot do tipo.
    pub fn dismiss(&mut self, kind: AlertKind) -> Option<Alert> {
        self.slots.remove(&kind.notification_id()).map(|p| p.alert)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl NotificationSink for NotificationCenter {
    fn fire(&mut self, alert: &Alert) {
        info!("🔔 [{}] {} {}", alert.kind.channel_id(), alert.title, alert.body);
        self.slots.insert(
            alert.kind.notification_id(),
            PostedAlert {
                alert: alert.clone(),
                posted: Instant::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeguard_core::Thresholds;
    use homeguard_core::types::{FIRE_DETECTED, SensorChannel, SensorReading};

    fn gas_alert(level: f64) -> Alert {
        Alert::for_reading(&SensorReading::level(SensorChannel::Gas, level), &Thresholds::default())
    }

    #[test]
    fn same_kind_replaces_previous() {
        let mut center = NotificationCenter::default();
        center.fire(&gas_alert(0.4));
        center.fire(&gas_alert(0.9));

        assert_eq!(center.len(), 1);
        let shown = center.active().next().unwrap();
        assert!(shown.alert.body.contains("0.9"));
    }

    #[test]
    fn slots_are_ordered_by_notification_id() {
        let mut center = NotificationCenter::default();
        center.fire(&gas_alert(0.4));
        center.fire(&Alert::for_reading(&SensorReading::fire(FIRE_DETECTED), &Thresholds::default()));

        let titles: Vec<&str> = center.active().map(|p| p.alert.title.as_str()).collect();
        assert_eq!(titles, vec!["Fire Alert!", "Gas Alert!"]);
    }

    #[test]
    fn dismiss_clears_slot() {
        let mut center = NotificationCenter::default();
        center.fire(&gas_alert(0.4));

        let kind = AlertKind::for_channel(SensorChannel::Gas);
        assert!(center.dismiss(kind).is_some());
        assert!(center.is_empty());
        assert!(center.dismiss(kind).is_none());
    }
}
