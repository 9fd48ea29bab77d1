//! Classificação de leituras e status agregado.

use crate::config::Thresholds;
use crate::types::{FIRE_DETECTED, PerChannel, SensorChannel, SensorReading, StatusTier};
use std::fmt;

/// Classifica uma leitura contra a tabela de thresholds.
///
/// | Canal       | Safe              | Warning              |
/// |-------------|-------------------|----------------------|
/// | Temperature | low ≤ v ≤ high    | v < low ou v > high  |
/// | Gas         | v < gas_warning   | v ≥ gas_warning      |
/// | Flood       | v ≤ flood_warning | v > flood_warning    |
/// | Fire        | v ≠ "fire detected" | v == "fire detected" |
///
/// Leituras ausentes são sempre Safe.
pub fn classify(reading: &SensorReading, th: &Thresholds) -> StatusTier {
    if reading.is_missing() {
        return StatusTier::Safe;
    }

    let warning = match reading.channel {
        SensorChannel::Temperature => {
            let t = reading.as_level();
            t < th.temperature_low || t > th.temperature_high
        }
        SensorChannel::Gas => reading.as_level() >= th.gas_warning,
        SensorChannel::Flood => reading.as_level() > th.flood_warning,
        SensorChannel::Fire => reading.as_status() == FIRE_DETECTED,
    };

    if warning {
        StatusTier::Warning
    } else {
        StatusTier::Safe
    }
}

/// Faixa detalhada exibida nos diálogos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailLevel {
    Low,
    Normal,
    Moderate,
    High,
}

/// Faixa detalhada de um canal numérico.
///
/// Temperatura: Low / Normal / High pelos mesmos limites da classificação.
/// Gás e água: Low / Moderate / High, com o limite crítico separando
/// Moderate de High.
pub fn detail_level(channel: SensorChannel, value: f64, th: &Thresholds) -> DetailLevel {
    match channel {
        SensorChannel::Temperature => {
            if value < th.temperature_low {
                DetailLevel::Low
            } else if value > th.temperature_high {
                DetailLevel::High
            } else {
                DetailLevel::Normal
            }
        }
        SensorChannel::Gas => {
            if value < th.gas_warning {
                DetailLevel::Low
            } else if value < th.gas_critical {
                DetailLevel::Moderate
            } else {
                DetailLevel::High
            }
        }
        SensorChannel::Flood => {
            if value <= th.flood_warning {
                DetailLevel::Low
            } else if value <= th.flood_critical {
                DetailLevel::Moderate
            } else {
                DetailLevel::High
            }
        }
        SensorChannel::Fire => DetailLevel::Normal,
    }
}

// ──────────────────────────────────────────────
// Status agregado
// ──────────────────────────────────────────────

/// Resumo legível de todos os canais.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateStatus {
    AllNormal,
    Single(SensorChannel),
    Multiple(Vec<SensorChannel>),
}

impl AggregateStatus {
    /// `true` se algum canal está em alerta.
    pub fn is_danger(&self) -> bool {
        !matches!(self, AggregateStatus::AllNormal)
    }
}

impl fmt::Display for AggregateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateStatus::AllNormal => f.write_str("All Systems Normal"),
            AggregateStatus::Single(channel) => write!(f, "{channel} Detected"),
            AggregateStatus::Multiple(channels) => {
                let names: Vec<&str> = channels.iter().map(|c| c.name()).collect();
                write!(f, "Multiple Dangers Detected: {}", names.join(", "))
            }
        }
    }
}

/// Calcula o status agregado a partir dos níveis por canal.
///
/// Canais em alerta são coletados na ordem Fire, Gas, Temperature, Flood.
pub fn aggregate(tiers: &PerChannel<StatusTier>) -> AggregateStatus {
    let mut dangers: Vec<SensorChannel> = tiers
        .iter()
        .filter(|(_, tier)| tier.is_alerting())
        .map(|(channel, _)| channel)
        .collect();

    match dangers.len() {
        0 => AggregateStatus::AllNormal,
        1 => AggregateStatus::Single(dangers.remove(0)),
        _ => AggregateStatus::Multiple(dangers),
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn th() -> Thresholds {
        Thresholds::default()
    }

    fn level(channel: SensorChannel, value: f64) -> StatusTier {
        classify(&SensorReading::level(channel, value), &th())
    }

    fn tiers_with(alerting: &[SensorChannel]) -> PerChannel<StatusTier> {
        let mut tiers = PerChannel::default();
        for &channel in alerting {
            tiers[channel] = StatusTier::Warning;
        }
        tiers
    }

    #[test]
    fn temperature_boundaries_are_inclusive_on_safe_side() {
        assert_eq!(level(SensorChannel::Temperature, 10.0), StatusTier::Safe);
        assert_eq!(level(SensorChannel::Temperature, 28.0), StatusTier::Safe);
        assert_eq!(level(SensorChannel::Temperature, 9.99), StatusTier::Warning);
        assert_eq!(level(SensorChannel::Temperature, 28.01), StatusTier::Warning);
    }

    #[test]
    fn gas_boundary_is_warning() {
        assert_eq!(level(SensorChannel::Gas, 0.30), StatusTier::Warning);
        assert_eq!(level(SensorChannel::Gas, 0.29), StatusTier::Safe);
    }

    #[test]
    fn flood_boundary_is_safe() {
        assert_eq!(level(SensorChannel::Flood, 5.0), StatusTier::Safe);
        assert_eq!(level(SensorChannel::Flood, 5.1), StatusTier::Warning);
    }

    #[test]
    fn fire_only_on_exact_status() {
        let t = th();
        assert_eq!(classify(&SensorReading::fire("fire detected"), &t), StatusTier::Warning);
        assert_eq!(classify(&SensorReading::fire("no fire"), &t), StatusTier::Safe);
        assert_eq!(classify(&SensorReading::fire("clear"), &t), StatusTier::Safe);
        assert_eq!(classify(&SensorReading::missing(SensorChannel::Fire), &t), StatusTier::Safe);
    }

    #[test]
    fn missing_values_are_safe() {
        let t = th();
        for channel in SensorChannel::ALL {
            assert_eq!(classify(&SensorReading::missing(channel), &t), StatusTier::Safe);
        }
    }

    #[test]
    fn custom_thresholds_are_respected() {
        let t = Thresholds {
            gas_warning: 25.0,
            ..Thresholds::default()
        };
        assert_eq!(classify(&SensorReading::level(SensorChannel::Gas, 24.0), &t), StatusTier::Safe);
        assert_eq!(classify(&SensorReading::level(SensorChannel::Gas, 25.0), &t), StatusTier::Warning);
    }

    #[test]
    fn detail_levels() {
        let t = th();
        assert_eq!(detail_level(SensorChannel::Temperature, 5.0, &t), DetailLevel::Low);
        assert_eq!(detail_level(SensorChannel::Temperature, 20.0, &t), DetailLevel::Normal);
        assert_eq!(detail_level(SensorChannel::Temperature, 35.0, &t), DetailLevel::High);
        assert_eq!(detail_level(SensorChannel::Gas, 0.1, &t), DetailLevel::Low);
        assert_eq!(detail_level(SensorChannel::Gas, 0.5, &t), DetailLevel::Moderate);
        assert_eq!(detail_level(SensorChannel::Gas, 0.75, &t), DetailLevel::High);
        assert_eq!(detail_level(SensorChannel::Flood, 5.0, &t), DetailLevel::Low);
        assert_eq!(detail_level(SensorChannel::Flood, 40.0, &t), DetailLevel::Moderate);
        assert_eq!(detail_level(SensorChannel::Flood, 80.0, &t), DetailLevel::High);
    }

    #[test]
    fn aggregate_messages() {
        assert_eq!(aggregate(&tiers_with(&[])).to_string(), "All Systems Normal");
        assert_eq!(
            aggregate(&tiers_with(&[SensorChannel::Fire])).to_string(),
            "Fire Detected"
        );
        assert_eq!(
            aggregate(&tiers_with(&[SensorChannel::Fire, SensorChannel::Gas])).to_string(),
            "Multiple Dangers Detected: Fire, Gas"
        );
    }

    #[test]
    fn aggregate_uses_canonical_order() {
        let tiers = tiers_with(&[SensorChannel::Flood, SensorChannel::Temperature, SensorChannel::Fire]);
        assert_eq!(
            aggregate(&tiers).to_string(),
            "Multiple Dangers Detected: Fire, Temperature, Flood"
        );
    }

    proptest! {
        #[test]
        fn temperature_warning_iff_outside_range(t in -50.0f64..80.0) {
            let expected = if t < 10.0 || t > 28.0 { StatusTier::Warning } else { StatusTier::Safe };
            prop_assert_eq!(level(SensorChannel::Temperature, t), expected);
        }

        #[test]
        fn gas_warning_iff_at_or_above_threshold(g in 0.0f64..100.0) {
            let expected = if g >= 0.30 { StatusTier::Warning } else { StatusTier::Safe };
            prop_assert_eq!(level(SensorChannel::Gas, g), expected);
        }

        #[test]
        fn flood_warning_iff_above_threshold(l in 0.0f64..100.0) {
            let expected = if l > 5.0 { StatusTier::Warning } else { StatusTier::Safe };
            prop_assert_eq!(level(SensorChannel::Flood, l), expected);
        }
    }
}
