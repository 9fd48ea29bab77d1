//! Confirmação de fogo pela câmera.
//!
//! Chamas precisam persistir por `confirm` antes de o status virar
//! "fire detected". O link UDP não guarda o último valor, então o status
//! confirmado sai em todo ciclo; a mudança só controla o log.

use homeguard_core::types::{FIRE_DETECTED, NO_FIRE};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Status confirmado de um ciclo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireStatus {
    pub status: &'static str,
    /// `true` quando difere do ciclo anterior
    pub changed: bool,
}

pub struct FireDebouncer {
    confirm: Duration,
    flame_since: Option<Instant>,
    last: Option<&'static str>,
}

impl FireDebouncer {
    pub fn new(confirm: Duration) -> Self {
        Self {
            confirm,
            flame_since: None,
            last: None,
        }
    }

    /// Status confirmado no instante `now`.
    fn status_at(&mut self, flame: bool, now: Instant) -> &'static str {
        if !flame {
            self.flame_since = None;
            return NO_FIRE;
        }

        let since = *self.flame_since.get_or_insert(now);
        if now.saturating_duration_since(since) >= self.confirm {
            FIRE_DETECTED
        } else {
            NO_FIRE
        }
    }

    /// Alimenta o resultado de um frame e retorna o status a publicar.
    pub fn update(&mut self, flame: bool, now: Instant) -> FireStatus {
        let status = self.status_at(flame, now);
        let changed = self.last != Some(status);

        if changed {
            match status {
                FIRE_DETECTED => warn!(
                    "🔥 Fogo confirmado após {:.1}s de chamas",
                    self.confirm.as_secs_f64()
                ),
                _ => info!("Status de fogo: {status}"),
            }
            self.last = Some(status);
        }

        FireStatus { status, changed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn status(s: &'static str, changed: bool) -> FireStatus {
        FireStatus { status: s, changed }
    }

    #[test]
    fn first_frame_reports_no_fire_as_change() {
        let mut fire = FireDebouncer::new(secs(5.0));
        assert_eq!(fire.update(false, Instant::now()), status(NO_FIRE, true));
    }

    #[test]
    fn flames_must_persist_before_confirming() {
        let t0 = Instant::now();
        let mut fire = FireDebouncer::new(secs(5.0));

        assert_eq!(fire.update(true, t0), status(NO_FIRE, true));
        assert_eq!(fire.update(true, t0 + secs(4.9)), status(NO_FIRE, false));
        assert_eq!(fire.update(true, t0 + secs(5.0)), status(FIRE_DETECTED, true));
        assert_eq!(fire.update(true, t0 + secs(6.0)), status(FIRE_DETECTED, false));
    }

    #[test]
    fn confirmed_fire_is_repeated_every_cycle() {
        let t0 = Instant::now();
        let mut fire = FireDebouncer::new(Duration::ZERO);

        assert_eq!(fire.update(true, t0).status, FIRE_DETECTED);
        for n in 1..=60 {
            let cycle = fire.update(true, t0 + secs(0.5 * n as f64));
            assert_eq!(cycle, status(FIRE_DETECTED, false));
        }
    }

    #[test]
    fn gap_in_flames_restarts_confirmation() {
        let t0 = Instant::now();
        let mut fire = FireDebouncer::new(secs(5.0));

        fire.update(true, t0);
        fire.update(false, t0 + secs(3.0));
        assert_eq!(fire.update(true, t0 + secs(4.0)).status, NO_FIRE);
        assert_eq!(fire.update(true, t0 + secs(8.0)).status, NO_FIRE);
        assert_eq!(fire.update(true, t0 + secs(9.0)), status(FIRE_DETECTED, true));
    }

    #[test]
    fn clearing_flames_reports_no_fire_again() {
        let t0 = Instant::now();
        let mut fire = FireDebouncer::new(Duration::ZERO);

        assert_eq!(fire.update(true, t0), status(FIRE_DETECTED, true));
        assert_eq!(fire.update(false, t0 + secs(1.0)), status(NO_FIRE, true));
    }
}
