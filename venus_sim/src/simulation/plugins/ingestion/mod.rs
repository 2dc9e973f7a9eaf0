// venus_sim/src/simulation/plugins/ingestion/mod.rs

use bevy::prelude::*;
use venus_core::types::RobotId;

// --- Sub-modules for organization ---
pub mod queue;
pub mod worker;

pub use queue::{ingest_queue, IngestReceiver, IngestSender};
pub use worker::{handle_payload, IngestOutcome, MqttWorker};

use crate::prelude::{AppState, MissionConfig};

/// Creates the ingestion queue and starts one MQTT worker per robot.
pub struct IngestionPlugin {
    pub queue_capacity: usize,
}

impl Plugin for IngestionPlugin {
    fn build(&self, app: &mut App) {
        let (sender, receiver) = ingest_queue(self.queue_capacity);
        app.insert_resource(sender)
            .insert_resource(receiver)
            .init_resource::<IngestWorkers>()
            .add_systems(Startup, start_ingestion_workers)
            .add_systems(OnEnter(AppState::Dumping), stop_ingestion_workers)
            .add_systems(Last, stop_workers_on_exit);
    }
}

/// The running workers. Dropping them disconnects from the broker.
#[derive(Resource, Default)]
pub struct IngestWorkers(pub Vec<MqttWorker>);

impl IngestWorkers {
    pub fn stop_all(&mut self) {
        for mut worker in self.0.drain(..) {
            worker.stop();
        }
    }
}

fn start_ingestion_workers(
    config: Res<MissionConfig>,
    sender: Res<IngestSender>,
    mut workers: ResMut<IngestWorkers>,
) {
    for robot in RobotId::ALL {
        let link = config.robots.get(robot);
        match MqttWorker::spawn(robot, &config.broker, link, sender.clone()) {
            Ok(worker) => workers.0.push(worker),
            // Without this robot no pair can complete, but the other side keeps running.
            Err(e) => error!("[{}] Failed to start ingestion worker: {}", robot, e),
        }
    }
}

fn stop_ingestion_workers(mut workers: ResMut<IngestWorkers>) {
    info!("Stopping ingestion workers.");
    workers.stop_all();
}

fn stop_workers_on_exit(mut exit: EventReader<AppExit>, mut workers: ResMut<IngestWorkers>) {
    if exit.is_empty() {
        return;
    }
    exit.clear();
    workers.stop_all();
}
