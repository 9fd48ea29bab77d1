//! Ações externas: envio do status por SMS e chamada de emergência.
//!
//! Telefonia e localização são colaboradores externos representados pelos
//! traits [`Telephony`] e [`LocationSource`]. As funções daqui decidem o
//! fluxo (permissões, mensagem, avisos ao usuário) sem depender de
//! plataforma.

use crate::config::{LocationConfig, Permissions};
use crate::state::MonitorState;
use crate::types::SensorChannel;
use tracing::{info, warn};

/// Aviso quando a localização não pôde ser obtida.
pub const NOTICE_NO_LOCATION: &str = "Unable to get location.";
/// Aviso quando a permissão de localização foi negada.
pub const NOTICE_LOCATION_DENIED: &str = "Location permission not granted.";
/// Aviso de envio concluído.
pub const NOTICE_SENT: &str = "Status sent successfully.";

/// Posição geográfica.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Fonte da última posição conhecida.
pub trait LocationSource {
    fn last_known(&self) -> Option<Location>;
}

impl LocationSource for LocationConfig {
    fn last_known(&self) -> Option<Location> {
        self.enabled.then_some(Location {
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

/// Erros de telefonia.
#[derive(Debug, thiserror::Error)]
pub enum TelephonyError {
    #[error("Número inválido: {0:?}")]
    InvalidNumber(String),

    #[error("Erro de I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Chamadas e SMS.
pub trait Telephony {
    fn place_call(&mut self, number: &str) -> Result<(), TelephonyError>;
    fn send_sms(&mut self, number: &str, body: &str) -> Result<(), TelephonyError>;
}

/// Erros das ações. A mensagem é exibida ao usuário.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("SMS permission denied.")]
    SmsPermissionDenied,

    #[error("Permission denied to make calls")]
    CallPermissionDenied,

    #[error("Failed to send status")]
    SmsFailed(#[source] TelephonyError),

    #[error("Failed to place call")]
    CallFailed(#[source] TelephonyError),
}

/// Resultado de um envio de status.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    /// Corpo enviado
    pub body: String,
    /// Avisos ao usuário, na ordem em que ocorreram
    pub notices: Vec<&'static str>,
}

/// Aceita dígitos com `+` inicial opcional e separadores comuns.
pub fn validate_number(number: &str) -> Result<(), TelephonyError> {
    let digits = number.trim().trim_start_matches('+');
    let valid = !digits.is_empty()
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
        && digits.chars().any(|c| c.is_ascii_digit());

    if valid {
        Ok(())
    } else {
        Err(TelephonyError::InvalidNumber(number.to_string()))
    }
}

/// Texto do status atual de todos os canais.
pub fn compose_status_message(state: &MonitorState) -> String {
    format!(
        "HomeGuard Status:\nFire: {}\nGas: {}\nFlood: {}\nTemperature: {}",
        state.tier(SensorChannel::Fire),
        state.tier(SensorChannel::Gas),
        state.tier(SensorChannel::Flood),
        state.tier(SensorChannel::Temperature),
    )
}

/// Linha com o link do mapa para uma posição.
pub fn location_link(location: &Location) -> String {
    format!(
        "Location: https://maps.google.com/?q={},{}",
        location.latitude, location.longitude
    )
}

/// Envia o status (e a localização, quando possível) para um contato.
///
/// Sem permissão de SMS a ação é abortada. Sem permissão de localização
/// ou sem posição conhecida, o status segue sem o link do mapa.
pub fn send_status_report(
    phone: &str,
    state: &MonitorState,
    permissions: &Permissions,
    location: &dyn LocationSource,
    telephony: &mut dyn Telephony,
) -> Result<ReportOutcome, ActionError> {
    if !permissions.send_sms {
        return Err(ActionError::SmsPermissionDenied);
    }

    let mut notices = Vec::new();
    let mut body = compose_status_message(state);

    if !permissions.location {
        notices.push(NOTICE_LOCATION_DENIED);
    } else {
        match location.last_known() {
            Some(loc) => {
                body.push_str("\n\n");
                body.push_str(&location_link(&loc));
            }
            None => notices.push(NOTICE_NO_LOCATION),
        }
    }

    if let Err(e) = telephony.send_sms(phone, &body) {
        warn!("Falha ao enviar SMS para {phone}: {e}");
        return Err(ActionError::SmsFailed(e));
    }

    info!("Status enviado para {phone}");
    notices.push(NOTICE_SENT);
    Ok(ReportOutcome { body, notices })
}

/// Liga para o número de emergência.
pub fn place_emergency_call(
    number: &str,
    permissions: &Permissions,
    telephony: &mut dyn Telephony,
) -> Result<(), ActionError> {
    if !permissions.call_phone {
        return Err(ActionError::CallPermissionDenied);
    }

    telephony.place_call(number).map_err(|e| {
        warn!("Falha ao ligar para {number}: {e}");
        ActionError::CallFailed(e)
    })?;

    info!("Chamada de emergência para {number}");
    Ok(())
}
