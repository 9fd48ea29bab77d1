//! Qual diálogo está aberto sobre o dashboard.

use homeguard_core::alerts::TapAction;
use homeguard_core::types::SensorChannel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    /// Detalhes de temperatura, gás ou água
    Detail(SensorChannel),
    /// Transmissão da câmera e status de fogo
    CameraFeed,
    /// Ligar para o número de emergência
    Emergency,
    /// Escolha do contato para envio do status
    ContactPicker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Closed,
    Open(Dialog),
}

impl ViewState {
    /// Diálogo aberto ao clicar no tile de um canal.
    pub fn for_tile(channel: SensorChannel) -> Self {
        match channel {
            SensorChannel::Fire => ViewState::Open(Dialog::CameraFeed),
            other => ViewState::Open(Dialog::Detail(other)),
        }
    }

    /// Diálogo aberto ao clicar numa notificação.
    pub fn for_tap(tap: TapAction) -> Self {
        match tap {
            TapAction::OpenCameraFeed => ViewState::Open(Dialog::CameraFeed),
            TapAction::OpenDetail(channel) => Self::for_tile(channel),
        }
    }

    pub fn dialog(self) -> Option<Dialog> {
        match self {
            ViewState::Closed => None,
            ViewState::Open(dialog) => Some(dialog),
        }
    }

    pub fn close(&mut self) {
        *self = ViewState::Closed;
    }
}
