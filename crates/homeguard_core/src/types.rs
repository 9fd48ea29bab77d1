//! Tipos compartilhados: canais de sensor, leituras e níveis de status.
//!
//! Cada leitura substitui a anterior do mesmo canal; nenhum histórico é mantido.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Status publicado pelo node quando o fogo é confirmado.
pub const FIRE_DETECTED: &str = "fire detected";

/// Status publicado pelo node quando não há fogo.
pub const NO_FIRE: &str = "no fire";

/// Status usado quando o store entrega `null` para o canal de fogo.
pub const NO_DATA: &str = "no data";

// ──────────────────────────────────────────────
// Canais
// ──────────────────────────────────────────────

/// Canal de sensor monitorado.
///
/// A ordem das variantes é a ordem canônica usada no status agregado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SensorChannel {
    Fire,
    Gas,
    Temperature,
    Flood,
}

impl SensorChannel {
    /// Todos os canais na ordem de agregação.
    pub const ALL: [SensorChannel; 4] = [
        SensorChannel::Fire,
        SensorChannel::Gas,
        SensorChannel::Temperature,
        SensorChannel::Flood,
    ];

    /// Nome exibido ao usuário.
    pub fn name(self) -> &'static str {
        match self {
            SensorChannel::Fire => "Fire",
            SensorChannel::Gas => "Gas",
            SensorChannel::Temperature => "Temperature",
            SensorChannel::Flood => "Flood",
        }
    }

    fn index(self) -> usize {
        match self {
            SensorChannel::Fire => 0,
            SensorChannel::Gas => 1,
            SensorChannel::Temperature => 2,
            SensorChannel::Flood => 3,
        }
    }
}

impl fmt::Display for SensorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Um valor por canal, indexável por [`SensorChannel`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerChannel<T> {
    values: [T; 4],
}

impl<T> PerChannel<T> {
    /// Itera `(canal, valor)` na ordem canônica.
    pub fn iter(&self) -> impl Iterator<Item = (SensorChannel, &T)> {
        SensorChannel::ALL.into_iter().zip(self.values.iter())
    }
}

impl<T> Index<SensorChannel> for PerChannel<T> {
    type Output = T;

    fn index(&self, channel: SensorChannel) -> &T {
        &self.values[channel.index()]
    }
}

impl<T> IndexMut<SensorChannel> for PerChannel<T> {
    fn index_mut(&mut self, channel: SensorChannel) -> &mut T {
        &mut self.values[channel.index()]
    }
}

// ──────────────────────────────────────────────
// Leituras
// ──────────────────────────────────────────────

/// Valor bruto de uma leitura.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SensorValue {
    /// Percentual ou grau (gás, água, temperatura)
    Level(f64),
    /// Status categórico (fogo)
    Status(String),
    /// O store entregou `null`: lido como 0.0 / "no data", sempre Safe
    Missing,
}

/// Leitura de um canal, como recebida do store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub channel: SensorChannel,
    pub value: SensorValue,
}

impl SensorReading {
    /// Leitura numérica (gás, água, temperatura).
    pub fn level(channel: SensorChannel, value: f64) -> Self {
        Self {
            channel,
            value: SensorValue::Level(value),
        }
    }

    /// Leitura do status de fogo.
    pub fn fire(status: impl Into<String>) -> Self {
        Self {
            channel: SensorChannel::Fire,
            value: SensorValue::Status(status.into()),
        }
    }

    /// Leitura ausente (`null` no store).
    pub fn missing(channel: SensorChannel) -> Self {
        Self {
            channel,
            value: SensorValue::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.value, SensorValue::Missing)
    }

    /// Valor numérico; status categórico vale 0.0.
    pub fn as_level(&self) -> f64 {
        match &self.value {
            SensorValue::Level(v) => *v,
            SensorValue::Status(_) | SensorValue::Missing => 0.0,
        }
    }

    /// Status textual; leituras numéricas não têm status.
    pub fn as_status(&self) -> &str {
        match &self.value {
            SensorValue::Status(s) => s,
            SensorValue::Level(_) | SensorValue::Missing => NO_DATA,
        }
    }
}

// ──────────────────────────────────────────────
// Status
// ──────────────────────────────────────────────

/// Nível exibido no tile de cada canal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusTier {
    #[default]
    Safe,
    Warning,
}

impl StatusTier {
    /// Texto do tile.
    pub fn label(self) -> &'static str {
        match self {
            StatusTier::Safe => "Safe",
            StatusTier::Warning => "Warning",
        }
    }

    /// `true` para níveis que disparam notificação.
    pub fn is_alerting(self) -> bool {
        matches!(self, StatusTier::Warning)
    }
}

impl fmt::Display for StatusTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Formata um número como o app exibe: inteiros com uma casa (`31.0`),
/// demais valores sem arredondamento (`0.42`).
pub fn format_level(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_order_is_fire_gas_temperature_flood() {
        let names: Vec<_> = SensorChannel::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["Fire", "Gas", "Temperature", "Flood"]);
    }

    #[test]
    fn per_channel_indexing() {
        let mut tiers = PerChannel::<StatusTier>::default();
        tiers[SensorChannel::Gas] = StatusTier::Warning;
        assert_eq!(tiers[SensorChannel::Gas], StatusTier::Warning);
        assert_eq!(tiers[SensorChannel::Fire], StatusTier::Safe);
        let alerting: Vec<_> = tiers
            .iter()
            .filter(|(_, t)| t.is_alerting())
            .map(|(c, _)| c)
            .collect();
        assert_eq!(alerting, vec![SensorChannel::Gas]);
    }

    #[test]
    fn missing_readings_default_to_safe_values() {
        assert_eq!(SensorReading::missing(SensorChannel::Gas).as_level(), 0.0);
        assert_eq!(SensorReading::missing(SensorChannel::Fire).as_status(), NO_DATA);
    }

    #[test]
    fn format_level_matches_app_display() {
        assert_eq!(format_level(31.0), "31.0");
        assert_eq!(format_level(0.42), "0.42");
        assert_eq!(format_level(27.5), "27.5");
    }
}
