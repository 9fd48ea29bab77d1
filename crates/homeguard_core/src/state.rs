//! Estado do monitor e o avaliador de status.
//!
//! [`MonitorState`] guarda apenas a leitura mais recente de cada canal;
//! [`SensorEvaluator`] combina o reducer, o debounce e a montagem de alertas.

use crate::alerts::Alert;
use crate::config::{MonitorConfig, Thresholds};
use crate::cooldown::NotificationCooldown;
use crate::status::{AggregateStatus, aggregate, classify};
use crate::store::StoreReading;
use crate::types::{PerChannel, SensorChannel, SensorReading, StatusTier};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Mudança de nível causada por uma leitura.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub channel: SensorChannel,
    pub previous: StatusTier,
    pub tier: StatusTier,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.previous != self.tier
    }
}

/// Estado derivado das leituras: último valor e nível por canal.
#[derive(Debug, Clone, Default)]
pub struct MonitorState {
    latest: PerChannel<Option<SensorReading>>,
    tiers: PerChannel<StatusTier>,
    humidity: f64,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sobrescreve a leitura do canal e recalcula seu nível.
    pub fn apply(&mut self, reading: SensorReading, th: &Thresholds) -> Transition {
        let channel = reading.channel;
        let tier = classify(&reading, th);
        let previous = std::mem::replace(&mut self.tiers[channel], tier);
        self.latest[channel] = Some(reading);

        Transition {
            channel,
            previous,
            tier,
        }
    }

    pub fn set_humidity(&mut self, humidity: f64) {
        self.humidity = humidity;
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn tier(&self, channel: SensorChannel) -> StatusTier {
        self.tiers[channel]
    }

    pub fn tiers(&self) -> &PerChannel<StatusTier> {
        &self.tiers
    }

    pub fn latest(&self, channel: SensorChannel) -> Option<&SensorReading> {
        self.latest[channel].as_ref()
    }

    /// Valor numérico atual do canal (0.0 sem dados).
    pub fn level(&self, channel: SensorChannel) -> f64 {
        self.latest(channel).map_or(0.0, SensorReading::as_level)
    }

    pub fn aggregate(&self) -> AggregateStatus {
        aggregate(&self.tiers)
    }
}

/// Resultado do processamento de uma leitura.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub transition: Transition,
    pub aggregate: AggregateStatus,
    /// Presente quando o alerta passou pelo debounce
    pub alert: Option<Alert>,
}

/// Avaliador de status: classifica, atualiza o estado, decide alertas e
/// recalcula o status agregado.
#[derive(Debug, Clone)]
pub struct SensorEvaluator {
    thresholds: Thresholds,
    state: MonitorState,
    cooldown: NotificationCooldown,
}

impl SensorEvaluator {
    pub fn new(thresholds: Thresholds, cooldown: Duration) -> Self {
        Self {
            thresholds,
            state: MonitorState::new(),
            cooldown: NotificationCooldown::new(cooldown),
        }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(
            config.thresholds.clone(),
            Duration::from_millis(config.cooldown_ms),
        )
    }

    /// Processa uma leitura de sensor recebida em `now`.
    pub fn process(&mut self, reading: SensorReading, now: Instant) -> Evaluation {
        let alert_candidate = Alert::for_reading(&reading, &self.thresholds);
        let transition = self.state.apply(reading, &self.thresholds);

        if transition.changed() {
            info!(
                "{}: {} → {}",
                transition.channel, transition.previous, transition.tier
            );
        }

        let alert = if self
            .cooldown
            .should_notify(transition.channel, transition.tier, now)
        {
            Some(alert_candidate)
        } else {
            if transition.tier.is_alerting() {
                debug!("Alerta de {} suprimido pelo cooldown", transition.channel);
            }
            None
        };

        Evaluation {
            transition,
            aggregate: self.state.aggregate(),
            alert,
        }
    }

    /// Aplica um push já roteado. Retorna `None` para dados que não são
    /// canais classificados (umidade, atuadores).
    pub fn apply(&mut self, reading: StoreReading, now: Instant) -> Option<Evaluation> {
        match reading {
            StoreReading::Sensor(reading) => Some(self.process(reading, now)),
            StoreReading::Humidity(h) => {
                self.state.set_humidity(h);
                None
            }
            StoreReading::Trigger { .. } => None,
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }
}
