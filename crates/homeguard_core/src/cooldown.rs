//! Debounce de notificações por canal.

use crate::types::{PerChannel, SensorChannel, StatusTier};
use std::time::{Duration, Instant};

/// Janela padrão entre duas notificações do mesmo canal.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(15_000);

/// Último disparo por canal. No máximo uma notificação por canal a cada
/// `window`; não há fila, alertas dentro da janela são descartados.
#[derive(Debug, Clone)]
pub struct NotificationCooldown {
    window: Duration,
    last_fired: PerChannel<Option<Instant>>,
}

impl Default for NotificationCooldown {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl NotificationCooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fired: PerChannel::default(),
        }
    }

    /// Decide se um alerta deve ser disparado agora e, se sim, registra
    /// `now` como último disparo do canal.
    ///
    /// Um `now` anterior ao último disparo (entrega fora de ordem) conta
    /// como dentro da janela.
    pub fn should_notify(&mut self, channel: SensorChannel, tier: StatusTier, now: Instant) -> bool {
        if !tier.is_alerting() {
            return false;
        }

        if let Some(last) = self.last_fired[channel] {
            if now.saturating_duration_since(last) < self.window {
                return false;
            }
        }

        self.last_fired[channel] = Some(now);
        true
    }

    pub fn last_fired(&self, channel: SensorChannel) -> Option<Instant> {
        self.last_fired[channel]
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn second_alert_inside_window_is_suppressed() {
        let mut cd = NotificationCooldown::default();
        let t0 = Instant::now();
        assert!(cd.should_notify(SensorChannel::Gas, StatusTier::Warning, t0));
        assert!(!cd.should_notify(SensorChannel::Gas, StatusTier::Warning, t0 + ms(14_999)));
    }

    #[test]
    fn alert_fires_again_at_window_boundary() {
        let mut cd = NotificationCooldown::default();
        let t0 = Instant::now();
        assert!(cd.should_notify(SensorChannel::Flood, StatusTier::Warning, t0));
        assert!(cd.should_notify(SensorChannel::Flood, StatusTier::Warning, t0 + ms(15_000)));
        assert_eq!(cd.last_fired(SensorChannel::Flood), Some(t0 + ms(15_000)));
    }

    #[test]
    fn suppressed_call_does_not_extend_window() {
        let mut cd = NotificationCooldown::default();
        let t0 = Instant::now();
        assert!(cd.should_notify(SensorChannel::Fire, StatusTier::Warning, t0));
        assert!(!cd.should_notify(SensorChannel::Fire, StatusTier::Warning, t0 + ms(10_000)));
        assert!(cd.should_notify(SensorChannel::Fire, StatusTier::Warning, t0 + ms(15_000)));
    }

    #[test]
    fn safe_tier_never_notifies_nor_records() {
        let mut cd = NotificationCooldown::default();
        let t0 = Instant::now();
        assert!(!cd.should_notify(SensorChannel::Temperature, StatusTier::Safe, t0));
        assert_eq!(cd.last_fired(SensorChannel::Temperature), None);
    }

    #[test]
    fn channels_are_independent() {
        let mut cd = NotificationCooldown::default();
        let t0 = Instant::now();
        assert!(cd.should_notify(SensorChannel::Gas, StatusTier::Warning, t0));
        assert!(cd.should_notify(SensorChannel::Fire, StatusTier::Warning, t0 + ms(1)));
    }

    #[test]
    fn out_of_order_instant_is_inside_window() {
        let mut cd = NotificationCooldown::new(ms(1_000));
        let t0 = Instant::now() + ms(5_000);
        assert!(cd.should_notify(SensorChannel::Gas, StatusTier::Warning, t0));
        assert!(!cd.should_notify(SensorChannel::Gas, StatusTier::Warning, t0 - ms(3_000)));
    }
}
