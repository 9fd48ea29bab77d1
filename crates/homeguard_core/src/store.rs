//! Modelo do store em tempo real: caminhos, valores e roteamento de pushes.
//!
//! O node publica um [`StoreUpdate`] por caminho; o monitor converte cada
//! push em uma [`StoreReading`] com [`route`]. Caminhos desconhecidos são
//! ignorados e valores `null` viram leituras seguras.

use crate::types::{SensorChannel, SensorReading};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Caminhos conhecidos do store.
pub mod paths {
    pub const TEMPERATURE: &str = "sensors/temperature";
    pub const HUMIDITY: &str = "sensors/humidity";
    pub const WATER_LEVEL: &str = "sensors/water_level";
    pub const GAS: &str = "sensors/gas";
    pub const FIRE_DETECTION: &str = "sensors/fire_detection";
    pub const FIRE_STATUS: &str = "sensors/fire_detection/status";
    pub const TRIGGER: &str = "trigger";
    pub const BUZZER_TRIGGER: &str = "buzzer_trigger";
}

/// Status escrito para acionar um atuador.
pub const TRIGGERED: &str = "triggered";

/// Status escrito pelo node depois de executar o acionamento.
pub const RESET: &str = "reset";

/// Valor armazenado em um caminho.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreValue {
    Null,
    /// `{value, timestamp}` (sensores numéricos)
    Number { value: f64, timestamp: f64 },
    /// `{status, timestamp}` (fogo, trigger, buzzer)
    Status { status: String, timestamp: f64 },
    /// Texto puro (filho `status`)
    Text(String),
}

/// Um push `{path, value}` no store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreUpdate {
    pub path: String,
    pub value: StoreValue,
}

/// Atuadores controlados por escrita no store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerTarget {
    /// Servo (trava / válvula) em `trigger`
    Servo,
    /// Buzzer em `buzzer_trigger`
    Buzzer,
}

impl TriggerTarget {
    pub fn path(self) -> &'static str {
        match self {
            TriggerTarget::Servo => paths::TRIGGER,
            TriggerTarget::Buzzer => paths::BUZZER_TRIGGER,
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            paths::TRIGGER => Some(TriggerTarget::Servo),
            paths::BUZZER_TRIGGER => Some(TriggerTarget::Buzzer),
            _ => None,
        }
    }
}

/// Resultado do roteamento de um push.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreReading {
    Sensor(SensorReading),
    /// Umidade não é classificada; só aparece no diálogo de temperatura.
    Humidity(f64),
    /// Estado atual de um atuador.
    Trigger { target: TriggerTarget, triggered: bool },
}

impl StoreUpdate {
    /// Leitura numérica com timestamp em segundos.
    pub fn number(path: &str, value: f64, timestamp: f64) -> Self {
        Self {
            path: path.into(),
            value: StoreValue::Number { value, timestamp },
        }
    }

    /// Status textual com timestamp.
    pub fn status(path: &str, status: &str, timestamp: f64) -> Self {
        Self {
            path: path.into(),
            value: StoreValue::Status {
                status: status.into(),
                timestamp,
            },
        }
    }

    /// Escrita que aciona um atuador (timestamp em ms).
    pub fn trigger(target: TriggerTarget, timestamp_ms: f64) -> Self {
        Self::status(target.path(), TRIGGERED, timestamp_ms)
    }

    /// Escrita de reset após o acionamento (timestamp em ms).
    pub fn reset(target: TriggerTarget, timestamp_ms: f64) -> Self {
        Self::status(target.path(), RESET, timestamp_ms)
    }

    /// `true` se este push pede o acionamento de um atuador.
    pub fn triggered_target(&self) -> Option<TriggerTarget> {
        let target = TriggerTarget::from_path(&self.path)?;
        match &self.value {
            StoreValue::Status { status, .. } if status == TRIGGERED => Some(target),
            _ => None,
        }
    }

    fn numeric_value(&self) -> Option<f64> {
        match &self.value {
            StoreValue::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    fn status_text(&self) -> Option<&str> {
        match &self.value {
            StoreValue::Status { status, .. } => Some(status),
            StoreValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Converte um push do store em leitura. Retorna `None` para caminhos
/// que o monitor não acompanha.
pub fn route(update: &StoreUpdate) -> Option<StoreReading> {
    let level = |channel| {
        StoreReading::Sensor(match update.numeric_value() {
            Some(value) => SensorReading::level(channel, value),
            None => SensorReading::missing(channel),
        })
    };

    let reading = match update.path.as_str() {
        paths::TEMPERATURE => level(SensorChannel::Temperature),
        paths::GAS => level(SensorChannel::Gas),
        paths::WATER_LEVEL => level(SensorChannel::Flood),
        paths::HUMIDITY => StoreReading::Humidity(update.numeric_value().unwrap_or(0.0)),
        paths::FIRE_DETECTION | paths::FIRE_STATUS => StoreReading::Sensor(
            update
                .status_text()
                .map(SensorReading::fire)
                .unwrap_or_else(|| SensorReading::missing(SensorChannel::Fire)),
        ),
        paths::TRIGGER | paths::BUZZER_TRIGGER => {
            let target = TriggerTarget::from_path(&update.path)?;
            StoreReading::Trigger {
                target,
                triggered: update.status_text() == Some(TRIGGERED),
            }
        }
        _ => return None,
    };

    Some(reading)
}

/// Segundos desde a época Unix (timestamp das leituras).
pub fn unix_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Milissegundos desde a época Unix (timestamp dos triggers).
pub fn unix_millis() -> f64 {
    unix_secs() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FIRE_DETECTED, NO_DATA};

    #[test]
    fn routes_numeric_sensors() {
        let update = StoreUpdate::number(paths::WATER_LEVEL, 12.5, 1.0);
        assert_eq!(
            route(&update),
            Some(StoreReading::Sensor(SensorReading::level(SensorChannel::Flood, 12.5)))
        );
    }

    #[test]
    fn null_numeric_is_missing() {
        let update = StoreUpdate {
            path: paths::GAS.into(),
            value: StoreValue::Null,
        };
        let Some(StoreReading::Sensor(reading)) = route(&update) else {
            panic!("esperava leitura de sensor");
        };
        assert!(reading.is_missing());
        assert_eq!(reading.as_level(), 0.0);
    }

    #[test]
    fn fire_status_from_parent_and_child_paths() {
        let parent = StoreUpdate::status(paths::FIRE_DETECTION, FIRE_DETECTED, 1.0);
        let child = StoreUpdate {
            path: paths::FIRE_STATUS.into(),
            value: StoreValue::Text(FIRE_DETECTED.into()),
        };
        let expected = Some(StoreReading::Sensor(SensorReading::fire(FIRE_DETECTED)));
        assert_eq!(route(&parent), expected);
        assert_eq!(route(&child), expected);
    }

    #[test]
    fn null_fire_status_is_no_data() {
        let update = StoreUpdate {
            path: paths::FIRE_DETECTION.into(),
            value: StoreValue::Null,
        };
        let Some(StoreReading::Sensor(reading)) = route(&update) else {
            panic!("esperava leitura de sensor");
        };
        assert_eq!(reading.channel, SensorChannel::Fire);
        assert_eq!(reading.as_status(), NO_DATA);
    }

    #[test]
    fn humidity_is_not_a_channel() {
        let update = StoreUpdate::number(paths::HUMIDITY, 55.0, 1.0);
        assert_eq!(route(&update), Some(StoreReading::Humidity(55.0)));
    }

    #[test]
    fn unknown_paths_are_ignored() {
        let update = StoreUpdate::number("sensors/co2", 400.0, 1.0);
        assert_eq!(route(&update), None);
    }

    #[test]
    fn trigger_writes() {
        let write = StoreUpdate::trigger(TriggerTarget::Buzzer, 1_000.0);
        assert_eq!(write.path, paths::BUZZER_TRIGGER);
        assert_eq!(write.triggered_target(), Some(TriggerTarget::Buzzer));

        let reset = StoreUpdate::reset(TriggerTarget::Buzzer, 2_000.0);
        assert_eq!(reset.triggered_target(), None);
        assert_eq!(
            route(&reset),
            Some(StoreReading::Trigger {
                target: TriggerTarget::Buzzer,
                triggered: false
            })
        );
    }
}
