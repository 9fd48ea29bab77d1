//! # HomeGuard Core
//!
//! Crate compartilhada entre o node de sensores e o monitor: modelo do
//! store em tempo real, protocolo binário (bincode), configuração TOML e a
//! lógica de avaliação de status.
//!
//! ## Módulos
//! - [`types`] – Canais, leituras e níveis de status
//! - [`store`] – Caminhos e valores do store, roteamento de pushes
//! - [`protocol`] – Encode/decode binário com magic byte
//! - [`config`] – Configuração unificada via TOML
//! - [`status`] – Classificação por thresholds e status agregado
//! - [`cooldown`] – Debounce de notificações por canal
//! - [`state`] – Estado do monitor e avaliador
//! - [`alerts`] – Conteúdo e slots das notificações
//! - [`details`] – Textos dos diálogos de detalhes
//! - [`report`] – Envio de status por SMS e chamada de emergência
//! - [`theme`] – Temas do dashboard

pub mod types;
pub mod store;
pub mod protocol;
pub mod config;
pub mod status;
pub mod cooldown;
pub mod state;
pub mod alerts;
pub mod details;
pub mod report;
pub mod theme;

// Re-exports convenientes
pub use config::{AppConfig, MonitorConfig, NodeConfig, Thresholds};
pub use protocol::{PROTOCOL_VERSION, decode_update, encode_update};
pub use state::{Evaluation, MonitorState, SensorEvaluator};
pub use store::{StoreReading, StoreUpdate, StoreValue};
pub use types::{SensorChannel, SensorReading, StatusTier};
