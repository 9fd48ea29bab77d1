//! Rede do monitor.
//!
//! Uma thread escuta UDP e envia os pushes do store para a UI via channel.
//! [`StoreWriter`] faz o caminho inverso: escritas de trigger para o node.

use crossbeam_channel::{Receiver, Sender, bounded};
use homeguard_core::protocol::{ProtocolError, decode_update, encode_update};
use homeguard_core::store::StoreUpdate;
use std::net::{IpAddr, SocketAddr, UdpSocket};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Mensagem enviada da thread de rede para a UI.
#[derive(Debug, Clone)]
pub struct NetMessage {
    pub update: StoreUpdate,
    pub source: SocketAddr,
    pub raw_size: usize,
}

/// Inicia a thread de rede. Retorna o receiver do channel.
pub fn spawn_receiver_thread(port: u16, node_ip_filter: String) -> Receiver<NetMessage> {
    let (tx, rx) = bounded::<NetMessage>(64); // Buffer de 64 mensagens

    if let Err(e) = std::thread::Builder::new()
        .name("udp-receiver".into())
        .spawn(move || receiver_loop(&tx, port, &node_ip_filter))
    {
        error!("Falha ao criar thread de rede: {e}");
    }

    rx
}

fn receiver_loop(tx: &Sender<NetMessage>, port: u16, node_ip_filter: &str) {
    loop {
        match UdpSocket::bind(("0.0.0.0", port)) {
            Ok(sock) => {
                sock.set_read_timeout(Some(Duration::from_secs(1))).ok();

                let mode = if node_ip_filter.is_empty() {
                    "Auto (broadcast)"
                } else {
                    node_ip_filter
                };
                info!("Monitor escutando em 0.0.0.0:{port} – Modo: {mode}");

                let mut buf = [0u8; 65536];
                loop {
                    match sock.recv_from(&mut buf) {
                        Ok((size, addr)) => {
                            let source = addr.ip().to_string();

                            // Filtro de IP se configurado
                            if !node_ip_filter.is_empty() && source != node_ip_filter {
                                debug!("Ignorando pacote de {source} (esperado: {node_ip_filter})");
                                continue;
                            }

                            match decode_update(&buf[..size]) {
                                Ok(update) => {
                                    let msg = NetMessage {
                                        update,
                                        source: addr,
                                        raw_size: size,
                                    };
                                    // Se a UI está lenta, descarta
                                    if tx.try_send(msg).is_err() {
                                        debug!("Channel cheio, descartando pacote");
                                    }
                                }
                                Err(e) => {
                                    debug!("Pacote inválido de {source}: {e}");
                                }
                            }
                        }
                        Err(ref e)
                            if e.kind() == std::io::ErrorKind::TimedOut
                                || e.kind() == std::io::ErrorKind::WouldBlock =>
                        {
                            // Timeout normal, continua
                        }
                        Err(e) => {
                            warn!("Erro ao receber UDP: {e}");
                        }
                    }
                }
            }
            Err(e) => {
                error!("Falha ao bind porta {port}: {e}. Tentando novamente em 2s...");
                std::thread::sleep(Duration::from_secs(2));
            }
        }
    }
}

// ──────────────────────────────────────────────
// Escritas no store
// ──────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("Erro de I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Envia escritas para a porta de escuta do node.
pub struct StoreWriter {
    sock: UdpSocket,
    node_ip: String,
    node_port: u16,
}

impl StoreWriter {
    pub fn bind(node_ip: String, node_port: u16) -> std::io::Result<Self> {
        let sock = UdpSocket::bind(("0.0.0.0", 0))?;
        sock.set_broadcast(true)?;
        Ok(Self {
            sock,
            node_ip,
            node_port,
        })
    }

    /// Destino das escritas: o IP configurado, senão a última origem
    /// conhecida, senão broadcast.
    pub fn target(&self, last_source: Option<IpAddr>) -> String {
        let ip = if !self.node_ip.is_empty() {
            self.node_ip.clone()
        } else if let Some(ip) = last_source {
            ip.to_string()
        } else {
            "255.255.255.255".into()
        };
        format!("{ip}:{}", self.node_port)
    }

    pub fn write(&self, update: &StoreUpdate, last_source: Option<IpAddr>) -> Result<(), WriteError> {
        let frame = encode_update(update)?;
        let target = self.target(last_source);
        self.sock.send_to(&frame, &target)?;
        info!("→ escrita {} para {target}", update.path);
        Ok(())
    }
}
