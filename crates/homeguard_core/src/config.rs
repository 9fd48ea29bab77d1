//! Configuração unificada via TOML.
//!
//! Um único `config.toml` ao lado do executável serve ao node e ao monitor.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Erros ao salvar a configuração.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Erro ao serializar TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Erro de I/O: {0}")]
    Io(#[from] std::io::Error),
}

// ──────────────────────────────────────────────
// Node
// ──────────────────────────────────────────────

/// Incidente roteirizado na simulação (segundos desde o início).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScriptedIncident {
    /// "fire", "gas", "flood", "heat" ou "cold"
    pub kind: String,
    pub start_secs: f64,
    pub duration_secs: f64,
}

/// Casa simulada usada como fonte de sensores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Temperatura ambiente base (°C)
    pub base_temperature: f64,
    /// Umidade base (%)
    pub base_humidity: f64,
    /// Leitura ADC base do MQ135
    pub base_gas_adc: u16,
    /// Leitura ADC base do sensor de água
    pub base_water_adc: u16,
    /// Amplitude do ruído aleatório (fração do valor base)
    pub noise: f64,
    /// Probabilidade de o DHT11 não responder em um ciclo
    pub dht_dropout: f64,
    /// Incidentes roteirizados
    pub incidents: Vec<ScriptedIncident>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            base_temperature: 21.0,
            base_humidity: 45.0,
            base_gas_adc: 160,
            base_water_adc: 20,
            noise: 0.05,
            dht_dropout: 0.1,
            incidents: Vec::new(),
        }
    }
}

/// Configuração do node de sensores (Raspberry Pi).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Modo de envio: "broadcast" ou "unicast"
    pub mode: String,
    /// IP de destino (255.255.255.255 para broadcast)
    pub dest_ip: String,
    /// Porta UDP do monitor
    pub port: u16,
    /// Porta UDP onde o node escuta escritas (trigger / buzzer)
    pub listen_port: u16,
    /// Intervalo de amostragem em segundos
    pub interval_secs: f64,
    /// IP local para bind (vazio = auto)
    pub bind_ip: String,
    /// Tempo que as chamas precisam persistir para confirmar fogo
    pub fire_confirm_secs: f64,
    /// Fonte simulada
    pub simulation: SimulationConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            mode: "broadcast".into(),
            dest_ip: "255.255.255.255".into(),
            port: 5005,
            listen_port: 5006,
            interval_secs: 0.5,
            bind_ip: String::new(),
            fire_confirm_secs: 5.0,
            simulation: SimulationConfig::default(),
        }
    }
}

// ──────────────────────────────────────────────
// Monitor
// ──────────────────────────────────────────────

/// Thresholds de classificação por canal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Thresholds {
    /// Abaixo disso a temperatura é Warning (°C)
    pub temperature_low: f64,
    /// Acima disso a temperatura é Warning (°C)
    pub temperature_high: f64,
    /// A partir disso o gás é Warning
    pub gas_warning: f64,
    /// A partir disso o gás é crítico (diálogo)
    pub gas_critical: f64,
    /// Acima disso o nível de água é Warning (%)
    pub flood_warning: f64,
    /// Acima disso há risco de inundação (diálogo)
    pub flood_critical: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature_low: 10.0,
            temperature_high: 28.0,
            gas_warning: 0.30,
            gas_critical: 0.75,
            flood_warning: 5.0,
            flood_critical: 75.0,
        }
    }
}

/// Permissões concedidas ao monitor para ações externas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Permissions {
    pub send_sms: bool,
    pub location: bool,
    pub call_phone: bool,
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            send_sms: true,
            location: true,
            call_phone: true,
        }
    }
}

/// Localização fixa da casa (sem GPS no desktop).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocationConfig {
    /// Desligado = nenhuma localização conhecida
    pub enabled: bool,
    pub latitude: f64,
    pub longitude: f64,
}

/// Contato disponível no seletor de envio de status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

/// Configuração do monitor (dashboard).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Porta UDP para escutar
    pub port: u16,
    /// IP do node (vazio = aceita qualquer origem)
    pub node_ip: String,
    /// Porta de escrita do node (trigger / buzzer)
    pub node_port: u16,
    /// Tema: "dark", "light", "high_contrast"
    pub theme: String,
    /// Janela mínima entre notificações do mesmo canal (ms)
    pub cooldown_ms: u64,
    /// URL da transmissão da câmera
    pub camera_url: String,
    /// Número de emergência
    pub emergency_number: String,
    /// Diretório onde SMS e chamadas são registrados
    pub outbox_dir: String,
    /// Thresholds
    pub thresholds: Thresholds,
    /// Permissões
    pub permissions: Permissions,
    /// Localização
    pub location: LocationConfig,
    /// Contatos
    pub contacts: Vec<Contact>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            port: 5005,
            node_ip: String::new(),
            node_port: 5006,
            theme: "dark".into(),
            cooldown_ms: 15_000,
            camera_url: "http://192.168.1.178:5000".into(),
            emergency_number: "999".into(),
            outbox_dir: "outbox".into(),
            thresholds: Thresholds::default(),
            permissions: Permissions::default(),
            location: LocationConfig::default(),
            contacts: Vec::new(),
        }
    }
}

/// Configuração raiz do aplicativo (unifica node e monitor).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub node: NodeConfig,
    pub monitor: MonitorConfig,
}

impl AppConfig {
    /// Carrega configuração de um arquivo TOML.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        info!("Configuração carregada de {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        warn!("Erro ao parsear {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    warn!("Erro ao ler {}: {}", path.display(), e);
                }
            }
        }

        info!("Usando configuração padrão");
        AppConfig::default()
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Retorna o caminho padrão do config.toml.
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join("config.toml")
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.node.port == 0 || self.node.listen_port == 0 {
            errors.push("Portas do node não podem ser 0".into());
        }
        if self.node.interval_secs < 0.1 || self.node.interval_secs > 60.0 {
            errors.push(format!(
                "Intervalo do node inválido: {} (0.1–60.0)",
                self.node.interval_secs
            ));
        }
        if self.node.fire_confirm_secs < 0.0 {
            errors.push("fire_confirm_secs não pode ser negativo".into());
        }
        if self.monitor.port == 0 {
            errors.push("Porta do monitor não pode ser 0".into());
        }

        let th = &self.monitor.thresholds;
        if th.temperature_low > th.temperature_high {
            errors.push(format!(
                "Faixa de temperatura inválida: {} > {}",
                th.temperature_low, th.temperature_high
            ));
        }
        if th.gas_warning > th.gas_critical {
            errors.push("gas_warning deve ser ≤ gas_critical".into());
        }
        if th.flood_warning > th.flood_critical {
            errors.push("flood_warning deve ser ≤ flood_critical".into());
        }
        if self.monitor.emergency_number.trim().is_empty() {
            errors.push("Número de emergência vazio".into());
        }

        errors
    }
}
