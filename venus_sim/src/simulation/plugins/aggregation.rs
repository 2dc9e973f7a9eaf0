// venus_sim/src/simulation/plugins/aggregation.rs

//! Joins the two robot streams.
//!
//! The queue is polled on a fixed interval rather than waited on. Records are
//! taken in arrival order until one from each robot is in hand; whatever is
//! still queued at that point is discarded, so every pair is built from fresh
//! reports.

use bevy::prelude::*;
use bevy::time::common_conditions::on_timer;
use std::time::Duration;
use venus_core::aggregation::PairAggregator;

use crate::prelude::{AppState, MissionSet, PairCompleted};
use crate::simulation::plugins::ingestion::IngestReceiver;

pub struct AggregationPlugin {
    pub poll_interval: Duration,
}

impl Plugin for AggregationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingPair>()
            .add_event::<PairCompleted>()
            .add_systems(
                Update,
                poll_ingest_queue
                    .in_set(MissionSet::Aggregation)
                    .run_if(in_state(AppState::Running))
                    .run_if(on_timer(self.poll_interval)),
            );
    }
}

/// The half-built pair carried between polls.
#[derive(Resource, Default, Debug)]
pub struct PendingPair(pub PairAggregator);

pub fn poll_ingest_queue(
    receiver: Res<IngestReceiver>,
    mut pending: ResMut<PendingPair>,
    mut completed: EventWriter<PairCompleted>,
) {
    while let Some(tagged) = receiver.try_next() {
        let source = tagged.source;
        let Some(pair) = pending.0.offer(tagged) else {
            debug!("[{}] Record received, waiting for its partner.", source);
            continue;
        };

        let discarded = receiver.drain();
        if discarded > 0 {
            debug!("Discarded {} queued records after completing a pair.", discarded);
        }
        info!("Received one record from each robot.");
        completed.write(PairCompleted(pair));
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::plugins::ingestion::{ingest_queue, IngestSender};
    use venus_core::messages::{RobotRecord, TaggedRecord};
    use venus_core::types::RobotId;

    fn test_app() -> (App, IngestSender) {
        let (sender, receiver) = ingest_queue(16);
        let mut app = App::new();
        app.insert_resource(receiver)
            .init_resource::<PendingPair>()
            .add_event::<PairCompleted>()
            .add_systems(Update, poll_ingest_queue);
        (app, sender)
    }

    fn send(sender: &IngestSender, source: RobotId, x: i64) {
        let record = RobotRecord {
            x,
            ..Default::default()
        };
        sender.offer(TaggedRecord::new(source, record)).unwrap();
    }

    fn completed_pairs(app: &mut App) -> Vec<PairCompleted> {
        app.world_mut()
            .resource_mut::<Events<PairCompleted>>()
            .drain()
            .collect()
    }

    #[test]
    fn one_robot_alone_never_completes() {
        let (mut app, sender) = test_app();
        send(&sender, RobotId::A, 1);
        send(&sender, RobotId::A, 2);
        app.update();

        assert!(completed_pairs(&mut app).is_empty());
        assert!(app.world().resource::<PendingPair>().0.has(RobotId::A));
    }

    #[test]
    fn pairs_use_the_latest_record_and_discard_the_rest() {
        let (mut app, sender) = test_app();
        send(&sender, RobotId::A, 1);
        send(&sender, RobotId::A, 2);
        send(&sender, RobotId::B, 10);
        // Queued after the pair closes; must not leak into the next pair.
        send(&sender, RobotId::A, 3);
        app.update();

        let pairs = completed_pairs(&mut app);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0.a.x, 2);
        assert_eq!(pairs[0].0.b.x, 10);
        assert!(app.world().resource::<IngestReceiver>().is_empty());
        assert!(app.world().resource::<PendingPair>().0.is_empty());
    }

    #[test]
    fn records_split_across_polls_still_pair_up() {
        let (mut app, sender) = test_app();
        send(&sender, RobotId::B, 4);
        app.update();
        assert!(completed_pairs(&mut app).is_empty());

        send(&sender, RobotId::A, 5);
        app.update();
        let pairs = completed_pairs(&mut app);
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].0.a.x, pairs[0].0.b.x), (5, 4));
    }
}
