//! Leitura de sensores – DHT11, MCP3008 (água e MQ135) e câmera.
//!
//! O acesso ao hardware fica atrás de [`SensorSource`]. A conversão das
//! leituras brutas em valores publicados é igual para qualquer fonte.
//!
//! **Fonte disponível:**
//! - [`SimulatedHouse`] — casa simulada com ruído, dropouts do DHT11 e
//!   incidentes roteirizados via `config.toml`

use homeguard_core::config::{ScriptedIncident, SimulationConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::debug;

/// Valor máximo usado na conversão ADC → percentual.
pub const ADC_MAX: f64 = 4095.0;

/// Faixa útil do MQ135.
const MQ135_MIN_ADC: f64 = 150.0;
const MQ135_MAX_ADC: f64 = 2000.0;
/// Fator de sensibilidade aplicado ao MQ135.
const MQ135_SCALING: f64 = 1.4;

/// Canal do MCP3008 (0–7). Só os canais ligados a sensores existem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcChannel(u8);

impl AdcChannel {
    pub const GAS: AdcChannel = AdcChannel(0);
    pub const WATER_LEVEL: AdcChannel = AdcChannel(1);

    pub fn index(self) -> u8 {
        self.0
    }
}

/// Leitura do DHT11.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DhtReading {
    pub humidity: Option<f64>,
    pub temperature: Option<f64>,
}

/// Fonte de leituras brutas.
pub trait SensorSource {
    /// Umidade e temperatura; `None` quando o sensor não respondeu.
    fn read_dht(&mut self) -> DhtReading;
    /// Leitura bruta de 10 bits de um canal do MCP3008.
    fn read_adc(&mut self, channel: AdcChannel) -> u16;
    /// `true` se o frame atual da câmera foi classificado como chama.
    fn flame_in_frame(&mut self) -> bool;
}

/// Valores prontos para publicação.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorFrame {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub water_level: f64,
    pub gas_level: f64,
    pub flame: bool,
}

/// Lê todos os sensores de uma fonte.
pub fn collect(source: &mut dyn SensorSource) -> SensorFrame {
    let dht = source.read_dht();
    let water_adc = source.read_adc(AdcChannel::WATER_LEVEL);
    let gas_adc = source.read_adc(AdcChannel::GAS);
    let scaled_gas = scale_mq135_reading(gas_adc as f64);

    SensorFrame {
        temperature: dht.temperature,
        humidity: dht.humidity,
        water_level: convert_to_percentage(water_adc as f64),
        gas_level: convert_to_percentage(scaled_gas),
        flame: source.flame_in_frame(),
    }
}

// ──────────────────────────────────────────────
// Conversões
// ──────────────────────────────────────────────

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converte uma leitura ADC em percentual (duas casas).
pub fn convert_to_percentage(adc_value: f64) -> f64 {
    round2(adc_value / ADC_MAX * 100.0)
}

/// Normaliza o MQ135 para 0–100%, aplica o fator de sensibilidade e
/// limita em 100%.
pub fn scale_mq135_reading(adc_value: f64) -> f64 {
    let clamped = adc_value.clamp(MQ135_MIN_ADC, MQ135_MAX_ADC);
    let percentage = (clamped - MQ135_MIN_ADC) / (MQ135_MAX_ADC - MQ135_MIN_ADC) * 100.0;
    round2((percentage * MQ135_SCALING).min(100.0))
}

// ──────────────────────────────────────────────
// Casa simulada
// ──────────────────────────────────────────────

/// Fonte simulada usada quando o node roda fora do Raspberry Pi.
pub struct SimulatedHouse {
    config: SimulationConfig,
    started: Instant,
    rng: StdRng,
}

impl SimulatedHouse {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            started: Instant::now(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Versão determinística para testes.
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Self {
        Self {
            config,
            started: Instant::now(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn incident(&self, kind: &str) -> bool {
        let elapsed = self.started.elapsed().as_secs_f64();
        self.config
            .incidents
            .iter()
            .any(|i| i.kind == kind && is_active(i, elapsed))
    }

    fn jitter(&mut self, value: f64) -> f64 {
        let noise = self.config.noise.abs();
        if noise == 0.0 {
            return value;
        }
        value * (1.0 + self.rng.random_range(-noise..=noise))
    }
}

/// `true` se o incidente cobre o instante `elapsed_secs`.
pub fn is_active(incident: &ScriptedIncident, elapsed_secs: f64) -> bool {
    elapsed_secs >= incident.start_secs
        && elapsed_secs < incident.start_secs + incident.duration_secs
}

impl SensorSource for SimulatedHouse {
    fn read_dht(&mut self) -> DhtReading {
        let dropout = self.config.dht_dropout.clamp(0.0, 1.0);
        if self.rng.random_bool(dropout) {
            debug!("DHT11 sem resposta neste ciclo");
            return DhtReading {
                humidity: None,
                temperature: None,
            };
        }

        let base = if self.incident("heat") {
            35.0
        } else if self.incident("cold") {
            5.0
        } else {
            self.config.base_temperature
        };
        let humidity = self.config.base_humidity;

        DhtReading {
            humidity: Some(round2(self.jitter(humidity))),
            temperature: Some(round2(self.jitter(base))),
        }
    }

    fn read_adc(&mut self, channel: AdcChannel) -> u16 {
        let base = match channel {
            AdcChannel::GAS if self.incident("gas") => 900.0,
            AdcChannel::GAS => self.config.base_gas_adc as f64,
            AdcChannel::WATER_LEVEL if self.incident("flood") => 400.0,
            AdcChannel::WATER_LEVEL => self.config.base_water_adc as f64,
            _ => 0.0,
        };
        // MCP3008 tem 10 bits
        let raw = self.jitter(base).clamp(0.0, 1023.0) as u16;
        debug!("ADC canal {} = {raw}", channel.index());
        raw
    }

    fn flame_in_frame(&mut self) -> bool {
        self.incident("fire")
    }
}
