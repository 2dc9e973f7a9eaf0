// venus_sim/src/publisher.rs

//! A stand-in robot for testing without hardware.
//!
//! Publishes a random record on one robot's topic at a fixed interval, in
//! the same 7-element wire format the real robots use.

use bevy::log::{debug, info, warn};
use rand::rngs::OsRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rumqttc::{Client, ClientError, Connection, QoS};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use venus_core::codec::encode_record;
use venus_core::messages::{Colour, RobotRecord};
use venus_core::types::RobotId;

use crate::prelude::{InterruptFlag, MissionConfig, PublisherConfig};
use crate::simulation::plugins::ingestion::worker::mqtt_options;

/// How often the send loop checks for a stop request while waiting.
const STOP_POLL: Duration = Duration::from_millis(100);

#[derive(Error, Debug)]
pub enum PublisherError {
    #[error("could not seed the record generator: {0}")]
    Entropy(#[from] rand::Error),

    #[error("could not start connection thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("MQTT client error: {0}")]
    Client(#[from] ClientError),
}

/// Produces random robot records within the configured limits.
pub struct RecordGenerator {
    rng: ChaCha8Rng,
    config: PublisherConfig,
}

impl RecordGenerator {
    /// Seeds from `config.seed` when set, otherwise from the OS.
    pub fn new(config: PublisherConfig) -> Result<Self, PublisherError> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(OsRng)?,
        };
        Ok(Self { rng, config })
    }

    pub fn next_record(&mut self) -> RobotRecord {
        let step = self.config.max_step.max(0);
        let [min_size, max_size] = self.config.size_range;
        RobotRecord {
            x: self.rng.gen_range(-step..=step),
            y: self.rng.gen_range(-step..=step),
            rock: self.rng.gen_bool(self.config.rock_probability),
            colour: Colour::Flag(false),
            size: self.rng.gen_range(min_size..=max_size),
            cliff: self.rng.gen_bool(self.config.cliff_probability),
            mountain: self.rng.gen_bool(self.config.mountain_probability),
        }
    }
}

/// Publishes records for `robot` until `stop` is raised. Returns how many
/// records were sent.
pub fn run_publisher(
    robot: RobotId,
    config: &MissionConfig,
    stop: InterruptFlag,
) -> Result<u64, PublisherError> {
    let mut generator = RecordGenerator::new(config.publisher.clone())?;
    let link = config.robots.get(robot);
    // Must differ from the subscriber's id or the broker drops one of them.
    let client_id = format!("{}_publisher", link.client_id);
    let (client, connection) = Client::new(mqtt_options(&config.broker, &client_id), 10);

    let finished = Arc::new(AtomicBool::new(false));
    let thread_finished = finished.clone();
    let handle = std::thread::Builder::new()
        .name(format!("publish-{}", robot.tag().to_lowercase()))
        .spawn(move || drive_connection(robot, connection, &thread_finished))?;

    info!(
        "[{}] Publishing to '{}' every {} ms. Press Ctrl-C to stop.",
        robot, link.topic, config.publisher.interval_ms
    );

    let mut sent = 0;
    while !stop.is_raised() {
        let payload = encode_record(&generator.next_record());
        let published = client.publish(
            link.topic.as_str(),
            QoS::AtMostOnce,
            false,
            payload.as_bytes(),
        );
        match published {
            Ok(()) => {
                sent += 1;
                debug!("[{}] Sent {}", robot, payload);
            }
            Err(e) => warn!("[{}] Could not queue message: {}", robot, e),
        }
        wait_or_stop(config.publisher.interval(), &stop);
    }

    info!("[{}] Stopping after {} messages.", robot, sent);
    finished.store(true, Ordering::SeqCst);
    if let Err(e) = client.disconnect() {
        debug!("[{}] Disconnect request failed: {}", robot, e);
    }
    if handle.join().is_err() {
        warn!("[{}] Connection thread panicked.", robot);
    }
    Ok(sent)
}

fn wait_or_stop(interval: Duration, stop: &InterruptFlag) {
    let deadline = Instant::now() + interval;
    while !stop.is_raised() {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        std::thread::sleep(STOP_POLL.min(deadline - now));
    }
}

fn drive_connection(robot: RobotId, mut connection: Connection, finished: &AtomicBool) {
    for notification in connection.iter() {
        if finished.load(Ordering::SeqCst) {
            break;
        }
        if let Err(e) = notification {
            warn!("[{}] Connection error: {}", robot, e);
            std::thread::sleep(Duration::from_secs(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use venus_core::codec::decode_payload;

    fn seeded(seed: u64) -> RecordGenerator {
        RecordGenerator::new(PublisherConfig {
            seed: Some(seed),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn records_stay_within_the_configured_limits() {
        let mut generator = seeded(7);
        for _ in 0..500 {
            let record = generator.next_record();
            assert!((-2..=2).contains(&record.x));
            assert!((-2..=2).contains(&record.y));
            assert!((3..=9).contains(&record.size));
            assert_eq!(record.colour, Colour::Flag(false));
            assert!(!record.cliff && !record.mountain);
        }
    }

    #[test]
    fn same_seed_gives_the_same_stream() {
        let mut first = seeded(42);
        let mut second = seeded(42);
        for _ in 0..20 {
            assert_eq!(first.next_record(), second.next_record());
        }
    }

    #[test]
    fn generated_records_survive_the_wire_format() {
        let mut generator = seeded(3);
        let record = generator.next_record();
        let decoded = decode_payload(encode_record(&record).as_bytes()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn optional_features_follow_their_probabilities() {
        let mut generator = RecordGenerator::new(PublisherConfig {
            seed: Some(1),
            rock_probability: 0.0,
            cliff_probability: 1.0,
            ..Default::default()
        })
        .unwrap();
        let record = generator.next_record();
        assert!(!record.rock);
        assert!(record.cliff);
    }

    #[test]
    fn unvalidated_negative_step_stands_still() {
        let mut generator = RecordGenerator::new(PublisherConfig {
            seed: Some(5),
            max_step: i64::MIN,
            ..Default::default()
        })
        .unwrap();
        let record = generator.next_record();
        assert_eq!((record.x, record.y), (0, 0));
    }

    #[test]
    fn waiting_returns_early_once_stopped() {
        let stop = InterruptFlag::default();
        stop.raise();
        let started = Instant::now();
        wait_or_stop(Duration::from_secs(30), &stop);
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
