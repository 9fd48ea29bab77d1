//! # HomeGuard Node
//!
//! Lê os sensores da casa e publica cada leitura no store via UDP.
//! Escuta escritas de trigger/buzzer do monitor e aciona os atuadores.
//!
//! ## Uso
//! ```bash
//! homeguard_node                     # usa config.toml ao lado do executável
//! RUST_LOG=debug homeguard_node      # log detalhado
//! ```

mod actuators;
mod fire;
mod sensors;

use actuators::SimulatedActuators;
use fire::FireDebouncer;
use homeguard_core::config::{AppConfig, NodeConfig};
use homeguard_core::protocol::encode_update;
use homeguard_core::store::{StoreUpdate, paths, unix_secs};
use sensors::{SensorFrame, SimulatedHouse};
use std::net::UdpSocket;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

fn main() {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── Carregar config ──
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path);

    // Salva config padrão se não existir
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    for problem in config.validate() {
        warn!("Config: {problem}");
    }

    if let Err(e) = run(&config.node) {
        error!("Node encerrado: {e}");
        std::process::exit(1);
    }
}

fn run(cfg: &NodeConfig) -> std::io::Result<()> {
    let bind_host = if cfg.bind_ip.is_empty() { "0.0.0.0" } else { cfg.bind_ip.as_str() };
    let interval = Duration::from_secs_f64(cfg.interval_secs.max(0.1));

    // ── Sockets UDP ──
    let sock = UdpSocket::bind((bind_host, 0))?;
    if cfg.mode == "broadcast" || cfg.dest_ip == "255.255.255.255" {
        sock.set_broadcast(true)?;
        info!("Modo BROADCAST ativado");
    } else {
        info!("Modo UNICAST → {}", cfg.dest_ip);
    }
    let dest_addr = format!("{}:{}", cfg.dest_ip, cfg.port);

    let listener = UdpSocket::bind((bind_host, cfg.listen_port))?;
    let writes = actuators::spawn_listener(listener);
    actuators::spawn_worker(writes, sock.try_clone()?, dest_addr.clone(), SimulatedActuators::new());

    // ── Sensores ──
    let mut house = SimulatedHouse::new(cfg.simulation.clone());
    let mut fire = FireDebouncer::new(Duration::from_secs_f64(cfg.fire_confirm_secs.max(0.0)));
    info!(
        "Casa simulada com {} incidente(s) roteirizado(s)",
        cfg.simulation.incidents.len()
    );

    // ── Banner ──
    println!();
    println!("══════════════════════════════════════════════");
    println!("   🏠 HOMEGUARD NODE – ATIVO");
    println!("══════════════════════════════════════════════");
    println!("  Destino:   {dest_addr}");
    println!("  Escritas:  {bind_host}:{}", cfg.listen_port);
    println!("  Intervalo: {:.1}s", cfg.interval_secs);
    println!("  Protocolo: bincode v{}", homeguard_core::PROTOCOL_VERSION);
    println!("══════════════════════════════════════════════");
    println!();

    // ── Loop principal ──
    loop {
        let cycle_start = Instant::now();

        let frame = sensors::collect(&mut house);
        let fire_status = fire.update(frame.flame, cycle_start);

        for update in frame_updates(&frame, fire_status.status, unix_secs()) {
            publish(&sock, &dest_addr, &update);
        }
        if fire_status.changed {
            info!("→ {}: {}", paths::FIRE_DETECTION, fire_status.status);
        }
        info!(
            "Temp {} | Umid {} | Água {:.2}% | Gás {:.2}%",
            fmt_opt(frame.temperature, "°C"),
            fmt_opt(frame.humidity, "%"),
            frame.water_level,
            frame.gas_level
        );

        // Dormir pelo tempo restante do intervalo
        let elapsed = cycle_start.elapsed();
        if elapsed < interval {
            std::thread::sleep(interval - elapsed);
        }
    }
}

/// Pushes de um ciclo. Temperatura e umidade saem cada uma quando o DHT11
/// entregou o valor; o status confirmado de fogo sai sempre.
fn frame_updates(frame: &SensorFrame, fire_status: &str, ts: f64) -> Vec<StoreUpdate> {
    let mut updates = Vec::with_capacity(5);

    if let Some(temperature) = frame.temperature {
        updates.push(StoreUpdate::number(paths::TEMPERATURE, temperature, ts));
    }
    if let Some(humidity) = frame.humidity {
        updates.push(StoreUpdate::number(paths::HUMIDITY, humidity, ts));
    }
    updates.push(StoreUpdate::number(paths::WATER_LEVEL, frame.water_level, ts));
    updates.push(StoreUpdate::number(paths::GAS, frame.gas_level, ts));
    updates.push(StoreUpdate::status(paths::FIRE_DETECTION, fire_status, ts));

    updates
}

fn publish(sock: &UdpSocket, dest_addr: &str, update: &StoreUpdate) {
    match encode_update(update) {
        Ok(frame) => match sock.send_to(&frame, dest_addr) {
            Ok(sent) => debug!("→ {sent} bytes {} para {dest_addr}", update.path),
            Err(e) => error!("Erro ao enviar UDP: {e}"),
        },
        Err(e) => error!("Erro ao serializar {}: {e}", update.path),
    }
}

fn fmt_opt(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.1}{unit}"),
        None => "--".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeguard_core::store::route;
    use homeguard_core::types::{FIRE_DETECTED, NO_FIRE, SensorChannel, StatusTier};
    use homeguard_core::{SensorEvaluator, Thresholds};

    fn frame(temperature: Option<f64>) -> SensorFrame {
        SensorFrame {
            temperature,
            humidity: temperature.map(|_| 40.0),
            water_level: 0.49,
            gas_level: 0.02,
            flame: false,
        }
    }

    fn paths_of(updates: &[StoreUpdate]) -> Vec<&str> {
        updates.iter().map(|u| u.path.as_str()).collect()
    }

    #[test]
    fn full_cycle_publishes_every_sensor() {
        let updates = frame_updates(&frame(Some(21.0)), FIRE_DETECTED, 1.0);
        assert_eq!(
            paths_of(&updates),
            vec![
                paths::TEMPERATURE,
                paths::HUMIDITY,
                paths::WATER_LEVEL,
                paths::GAS,
                paths::FIRE_DETECTION
            ]
        );
    }

    #[test]
    fn dht_dropout_skips_temperature_and_humidity() {
        let updates = frame_updates(&frame(None), NO_FIRE, 1.0);
        assert_eq!(
            paths_of(&updates),
            vec![paths::WATER_LEVEL, paths::GAS, paths::FIRE_DETECTION]
        );
    }

    #[test]
    fn temperature_and_humidity_are_published_independently() {
        let only_temp = SensorFrame {
            humidity: None,
            ..frame(Some(21.0))
        };
        assert_eq!(
            paths_of(&frame_updates(&only_temp, NO_FIRE, 1.0))[0..2],
            [paths::TEMPERATURE, paths::WATER_LEVEL]
        );

        let only_humidity = SensorFrame {
            temperature: None,
            humidity: Some(40.0),
            ..frame(None)
        };
        assert_eq!(
            paths_of(&frame_updates(&only_humidity, NO_FIRE, 1.0))[0..2],
            [paths::HUMIDITY, paths::WATER_LEVEL]
        );
    }

    #[test]
    fn lost_fire_push_is_recovered_next_cycle() {
        let t0 = Instant::now();
        let mut fire = FireDebouncer::new(Duration::ZERO);
        let mut evaluator = SensorEvaluator::new(Thresholds::default(), Duration::from_secs(15));
        let flames = SensorFrame {
            flame: true,
            ..frame(Some(21.0))
        };

        // Primeiro ciclo confirma o fogo, mas o datagrama se perde
        let confirmed = fire.update(true, t0);
        assert!(confirmed.changed);
        drop(frame_updates(&flames, confirmed.status, 1.0));

        let next = fire.update(true, t0 + Duration::from_millis(500));
        assert!(!next.changed);
        let fire_pushes: Vec<StoreUpdate> = frame_updates(&flames, next.status, 1.5)
            .into_iter()
            .filter(|u| u.path == paths::FIRE_DETECTION)
            .collect();
        assert_eq!(fire_pushes.len(), 1);

        for update in &fire_pushes {
            if let Some(reading) = route(update) {
                evaluator.apply(reading, t0 + Duration::from_millis(500));
            }
        }
        assert_eq!(evaluator.state().tier(SensorChannel::Fire), StatusTier::Warning);
    }

    #[test]
    fn optional_values_format() {
        assert_eq!(fmt_opt(Some(21.04), "°C"), "21.0°C");
        assert_eq!(fmt_opt(None, "%"), "--");
    }
}
