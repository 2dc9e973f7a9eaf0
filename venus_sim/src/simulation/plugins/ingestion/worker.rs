// venus_sim/src/simulation/plugins/ingestion/worker.rs

//! One MQTT subscriber per robot.
//!
//! Each worker owns its own broker connection and runs on a dedicated
//! thread, blocking inside the connection's event loop until a message
//! arrives. Decoded records are pushed onto the shared ingestion queue.

use bevy::log::{debug, error, info, warn};
use rumqttc::{Client, ClientError, Connection, Event, MqttOptions, Packet, QoS};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use thiserror::Error;
use venus_core::codec::decode_payload;
use venus_core::error::DecodeError;
use venus_core::messages::TaggedRecord;
use venus_core::types::RobotId;

use super::queue::{IngestSender, OfferError};
use crate::simulation::config::{BrokerConfig, RobotLink};

/// Pause after a failed connection attempt before polling again.
const RECONNECT_DELAY: Duration = Duration::from_secs(1);
/// Capacity of the client's outgoing request channel.
const REQUEST_CAPACITY: usize = 10;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("could not start worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("MQTT client error: {0}")]
    Client(#[from] ClientError),
}

/// What happened to one incoming payload.
#[derive(Debug)]
pub enum IngestOutcome {
    Queued,
    /// Decoded fine but the queue had no room. The record was dropped.
    QueueFull,
    /// The payload could not be decoded. Nothing was queued.
    Rejected(DecodeError),
    /// The consumer is gone. The record was dropped.
    Disconnected,
}

/// Decodes one payload from `source` and offers it to the queue.
///
/// Every failure is logged and swallowed; a bad message never takes the
/// worker down.
pub fn handle_payload(source: RobotId, payload: &[u8], queue: &IngestSender) -> IngestOutcome {
    debug!(
        "[{}] Raw payload received: {:?}",
        source,
        String::from_utf8_lossy(payload)
    );

    let record = match decode_payload(payload) {
        Ok(record) => record,
        Err(e) => {
            warn!("[{}] Dropping payload: {}", source, e);
            return IngestOutcome::Rejected(e);
        }
    };
    debug!("[{}] Parsed record: {:?}", source, record);

    match queue.offer(TaggedRecord::new(source, record)) {
        Ok(()) => IngestOutcome::Queued,
        Err(OfferError::Full(_)) => {
            warn!("[{}] Ingestion queue is full, dropping record.", source);
            IngestOutcome::QueueFull
        }
        Err(OfferError::Disconnected(_)) => {
            warn!("[{}] Ingestion queue is closed, dropping record.", source);
            IngestOutcome::Disconnected
        }
    }
}

/// Builds the client options for one robot's connection.
pub fn mqtt_options(broker: &BrokerConfig, client_id: &str) -> MqttOptions {
    let mut options = MqttOptions::new(client_id, broker.host.clone(), broker.port);
    options.set_keep_alive(broker.keep_alive());
    if let Some(username) = &broker.username {
        options.set_credentials(
            username.clone(),
            broker.password.clone().unwrap_or_default(),
        );
    }
    options
}

/// A running subscriber thread for one robot.
pub struct MqttWorker {
    robot: RobotId,
    client: Client,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl MqttWorker {
    pub fn spawn(
        robot: RobotId,
        broker: &BrokerConfig,
        link: &RobotLink,
        queue: IngestSender,
    ) -> Result<Self, WorkerError> {
        let options = mqtt_options(broker, &link.client_id);
        let (client, connection) = Client::new(options, REQUEST_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));

        let thread_client = client.clone();
        let thread_stop = stop.clone();
        let topic = link.topic.clone();
        let handle = std::thread::Builder::new()
            .name(format!("ingest-{}", robot.tag().to_lowercase()))
            .spawn(move || {
                subscription_loop(robot, thread_client, connection, &topic, &queue, &thread_stop)
            })?;

        info!(
            "[{}] Ingestion worker started for topic '{}' on {}:{}",
            robot, link.topic, broker.host, broker.port
        );
        Ok(Self {
            robot,
            client,
            stop,
            handle: Some(handle),
        })
    }

    /// Disconnects from the broker and waits for the thread to exit.
    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        self.stop.store(true, Ordering::SeqCst);
        if let Err(e) = self.client.disconnect() {
            debug!("[{}] Disconnect request failed: {}", self.robot, e);
        }
        if handle.join().is_err() {
            error!("[{}] Ingestion worker panicked.", self.robot);
        }
        info!("[{}] Ingestion worker stopped.", self.robot);
    }
}

impl Drop for MqttWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn subscription_loop(
    robot: RobotId,
    client: Client,
    mut connection: Connection,
    topic: &str,
    queue: &IngestSender,
    stop: &AtomicBool,
) {
    for notification in connection.iter() {
        if stop.load(Ordering::SeqCst) {
            break;
        }
        match notification {
            // Subscriptions do not survive a reconnect, so renew them on every ConnAck.
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                info!("[{}] Connected to broker.", robot);
                if let Err(e) = client.subscribe(topic, QoS::AtMostOnce) {
                    error!("[{}] Error subscribing to topic {}: {}", robot, topic, e);
                }
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                handle_payload(robot, &publish.payload, queue);
            }
            Ok(_) => {}
            Err(e) => {
                if stop.load(Ordering::SeqCst) {
                    break;
                }
                warn!("[{}] Connection error: {}", robot, e);
                std::thread::sleep(RECONNECT_DELAY);
            }
        }
    }
}
