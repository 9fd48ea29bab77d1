//! Atuadores (servo e buzzer) acionados por escritas do monitor.
//!
//! Uma thread escuta escritas em `listen_port` e repassa as que pedem
//! acionamento por um canal bounded. A thread de atuadores executa o
//! movimento e publica o reset no store.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use homeguard_core::protocol::{decode_update, encode_update};
use homeguard_core::store::{StoreUpdate, TriggerTarget, unix_millis};
use std::net::UdpSocket;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Escritas pendentes além disso são descartadas.
const QUEUE_CAPACITY: usize = 8;

/// Timeout de leitura do socket de escuta.
const LISTEN_TIMEOUT: Duration = Duration::from_secs(1);
/// Pausa após um erro de recepção.
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Duração de cada bipe e de cada pausa.
const BEEP: Duration = Duration::from_millis(500);
const BEEPS: u32 = 3;
/// Tempo para o servo alcançar 90°.
const SERVO_SETTLE: Duration = Duration::from_secs(1);

pub trait Actuators {
    /// Servo a 90° e desliga o sinal.
    fn move_servo(&mut self);
    /// Três bipes de 0,5 s.
    fn sound_buzzer(&mut self);
}

/// Atuadores simulados: registram no log e respeitam os tempos reais.
pub struct SimulatedActuators {
    settle: Duration,
    beep: Duration,
}

impl SimulatedActuators {
    pub fn new() -> Self {
        Self {
            settle: SERVO_SETTLE,
            beep: BEEP,
        }
    }
}

impl Default for SimulatedActuators {
    fn default() -> Self {
        Self::new()
    }
}

impl Actuators for SimulatedActuators {
    fn move_servo(&mut self) {
        info!("Servo → 90° (duty 7.5%)");
        std::thread::sleep(self.settle);
        debug!("Servo: sinal desligado");
    }

    fn sound_buzzer(&mut self) {
        for n in 1..=BEEPS {
            info!("Buzzer ON ({n}/{BEEPS})");
            std::thread::sleep(self.beep);
            debug!("Buzzer OFF");
            std::thread::sleep(self.beep);
        }
    }
}

/// Executa uma escrita de acionamento e retorna o reset a publicar.
/// Escritas que não pedem acionamento são ignoradas.
pub fn handle_write(update: &StoreUpdate, actuators: &mut dyn Actuators) -> Option<StoreUpdate> {
    let target = update.triggered_target()?;
    match target {
        TriggerTarget::Servo => actuators.move_servo(),
        TriggerTarget::Buzzer => actuators.sound_buzzer(),
    }
    Some(StoreUpdate::reset(target, unix_millis()))
}

/// Thread que escuta escritas do monitor.
pub fn spawn_listener(sock: UdpSocket) -> Receiver<StoreUpdate> {
    let (tx, rx) = crossbeam_channel::bounded(QUEUE_CAPACITY);

    if let Err(e) = sock.set_read_timeout(Some(LISTEN_TIMEOUT)) {
        warn!("Não foi possível definir timeout de leitura: {e}");
    }

    if let Err(e) = std::thread::Builder::new()
        .name("write-listener".into())
        .spawn(move || listen_loop(sock, tx))
    {
        error!("Falha ao criar thread de escuta: {e}");
    }

    rx
}

fn listen_loop(sock: UdpSocket, tx: Sender<StoreUpdate>) {
    let mut buf = [0u8; 65535];

    loop {
        let (size, src) = match sock.recv_from(&mut buf) {
            Ok(r) => r,
            Err(ref e) if is_idle(e) => {
                // Timeout normal, continua
                continue;
            }
            Err(e) => {
                warn!("Erro ao receber escrita: {e}. Tentando novamente em 2s...");
                std::thread::sleep(RETRY_DELAY);
                continue;
            }
        };

        let update = match decode_update(&buf[..size]) {
            Ok(u) => u,
            Err(e) => {
                debug!("Pacote inválido de {src}: {e}");
                continue;
            }
        };

        if update.triggered_target().is_none() {
            continue;
        }

        info!("← escrita {} de {src}", update.path);
        match tx.try_send(update) {
            Ok(()) => {}
            Err(TrySendError::Full(u)) => warn!("Fila de atuadores cheia, descartando {}", u.path),
            Err(TrySendError::Disconnected(_)) => return,
        }
    }
}

/// `true` para o timeout de leitura sem dados.
fn is_idle(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
    )
}

/// Thread que executa os acionamentos e publica os resets.
pub fn spawn_worker(
    writes: Receiver<StoreUpdate>,
    sock: UdpSocket,
    dest_addr: String,
    mut actuators: impl Actuators + Send + 'static,
) {
    let worker = move || {
        for write in writes.iter() {
            let Some(reset) = handle_write(&write, &mut actuators) else {
                continue;
            };
            match encode_update(&reset) {
                Ok(frame) => match sock.send_to(&frame, &dest_addr) {
                    Ok(_) => info!("→ reset {} para {dest_addr}", reset.path),
                    Err(e) => error!("Erro ao enviar reset: {e}"),
                },
                Err(e) => error!("Erro ao serializar reset: {e}"),
            }
        }
    };

    if let Err(e) = std::thread::Builder::new().name("actuators".into()).spawn(worker) {
        error!("Falha ao criar thread de atuadores: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeguard_core::store::{RESET, StoreValue, paths};

    #[derive(Default)]
    struct CountingActuators {
        servo: u32,
        buzzer: u32,
    }

    impl Actuators for CountingActuators {
        fn move_servo(&mut self) {
            self.servo += 1;
        }

        fn sound_buzzer(&mut self) {
            self.buzzer += 1;
        }
    }

    fn status_of(update: &StoreUpdate) -> &str {
        match &update.value {
            StoreValue::Status { status, .. } => status,
            other => panic!("esperava status, veio {other:?}"),
        }
    }

    #[test]
    fn trigger_moves_servo_and_resets() {
        let mut act = CountingActuators::default();
        let reset = handle_write(&StoreUpdate::trigger(TriggerTarget::Servo, 1.0), &mut act).unwrap();

        assert_eq!(act.servo, 1);
        assert_eq!(act.buzzer, 0);
        assert_eq!(reset.path, paths::TRIGGER);
        assert_eq!(status_of(&reset), RESET);
    }

    #[test]
    fn buzzer_trigger_sounds_buzzer() {
        let mut act = CountingActuators::default();
        let reset = handle_write(&StoreUpdate::trigger(TriggerTarget::Buzzer, 1.0), &mut act).unwrap();

        assert_eq!(act.buzzer, 1);
        assert_eq!(reset.path, paths::BUZZER_TRIGGER);
    }

    #[test]
    fn non_trigger_writes_are_ignored() {
        let mut act = CountingActuators::default();
        assert!(handle_write(&StoreUpdate::reset(TriggerTarget::Servo, 1.0), &mut act).is_none());
        assert!(handle_write(&StoreUpdate::number(paths::GAS, 0.5, 1.0), &mut act).is_none());
        assert_eq!(act.servo + act.buzzer, 0);
    }

    #[test]
    fn read_timeouts_are_idle_not_errors() {
        assert!(is_idle(&std::io::Error::from(std::io::ErrorKind::TimedOut)));
        assert!(is_idle(&std::io::Error::from(std::io::ErrorKind::WouldBlock)));
        assert!(!is_idle(&std::io::Error::from(std::io::ErrorKind::ConnectionReset)));
    }

    #[test]
    fn listener_forwards_only_trigger_writes() {
        let node = UdpSocket::bind("127.0.0.1:0").unwrap();
        let addr = node.local_addr().unwrap();
        let writes = spawn_listener(node);

        // Silêncio maior que o timeout de leitura não derruba a escuta
        std::thread::sleep(LISTEN_TIMEOUT + Duration::from_millis(200));

        let monitor = UdpSocket::bind("127.0.0.1:0").unwrap();
        let reset = encode_update(&StoreUpdate::reset(TriggerTarget::Servo, 1.0)).unwrap();
        let trigger = encode_update(&StoreUpdate::trigger(TriggerTarget::Servo, 2.0)).unwrap();
        monitor.send_to(&[0x00, 0x01], addr).unwrap();
        monitor.send_to(&reset, addr).unwrap();
        monitor.send_to(&trigger, addr).unwrap();

        let received = writes.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(received.triggered_target(), Some(TriggerTarget::Servo));
        assert!(writes.try_recv().is_err());
    }

    #[test]
    fn worker_publishes_reset_over_udp() {
        let monitor = UdpSocket::bind("127.0.0.1:0").unwrap();
        monitor.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        let dest = monitor.local_addr().unwrap().to_string();

        let (tx, rx) = crossbeam_channel::bounded(1);
        let node = UdpSocket::bind("127.0.0.1:0").unwrap();
        spawn_worker(rx, node, dest, CountingActuators::default());
        tx.send(StoreUpdate::trigger(TriggerTarget::Buzzer, 1.0)).unwrap();

        let mut buf = [0u8; 1024];
        let (size, _) = monitor.recv_from(&mut buf).unwrap();
        let reset = decode_update(&buf[..size]).unwrap();
        assert_eq!(reset.path, paths::BUZZER_TRIGGER);
        assert_eq!(status_of(&reset), RESET);
    }
}
