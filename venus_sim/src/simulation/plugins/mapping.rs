// venus_sim/src/simulation/plugins/mapping.rs

use bevy::prelude::*;
use std::path::PathBuf;
use venus_core::mapping::ExplorationMapper;
use venus_core::report::{format_rock_table, save_snapshot, RockEntry};
use venus_core::types::GridPosition;

use crate::prelude::{MapUpdated, MissionSet, PairCompleted};

/// Owns the mission's `ExplorationMapper` and feeds it every completed pair.
pub struct MappingPlugin {
    pub origin_a: GridPosition,
    pub origin_b: GridPosition,
    pub table_path: PathBuf,
}

impl Plugin for MappingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ExplorationMapper::new(self.origin_a, self.origin_b))
            .insert_resource(SnapshotOutput(self.table_path.clone()))
            .init_resource::<LatestSnapshot>()
            .add_event::<PairCompleted>()
            .add_event::<MapUpdated>()
            .add_systems(Update, apply_completed_pairs.in_set(MissionSet::Mapping));
    }
}

/// The most recent rock snapshot, `None` until the first pair was mapped.
#[derive(Resource, Default, Debug, Clone)]
pub struct LatestSnapshot(pub Option<Vec<RockEntry>>);

/// Where each new snapshot is persisted.
#[derive(Resource, Debug, Clone)]
pub struct SnapshotOutput(pub PathBuf);

pub fn apply_completed_pairs(
    mut pairs: EventReader<PairCompleted>,
    mut mapper: ResMut<ExplorationMapper>,
    mut latest: ResMut<LatestSnapshot>,
    output: Res<SnapshotOutput>,
    mut updated: EventWriter<MapUpdated>,
) {
    for PairCompleted(pair) in pairs.read() {
        let snapshot = match mapper.update_pair(pair) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Mapping failed, abandoning this pair: {}", e);
                continue;
            }
        };

        info!("Map updated.\n{}", format_rock_table(&snapshot));
        if let Err(e) = save_snapshot(&output.0, &snapshot) {
            error!("Could not write rock snapshot: {}", e);
        }
        latest.0 = Some(snapshot);
        updated.write(MapUpdated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use venus_core::messages::{Colour, RecordPair, RobotRecord};
    use venus_core::report::load_snapshot;
    use venus_core::types::RobotId;

    fn test_app(table_path: PathBuf) -> App {
        let mut app = App::new();
        app.add_plugins(MappingPlugin {
            origin_a: RobotId::A.default_origin(),
            origin_b: RobotId::B.default_origin(),
            table_path,
        });
        app
    }

    fn send_pair(app: &mut App, a: RobotRecord, b: RobotRecord) {
        app.world_mut()
            .send_event(PairCompleted(RecordPair { a, b }));
        app.update();
    }

    #[test]
    fn completed_pair_updates_map_snapshot_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        let mut app = test_app(path.clone());

        let a = RobotRecord {
            x: 1,
            rock: true,
            colour: Colour::Name("red".into()),
            size: 5,
            ..Default::default()
        };
        let b = RobotRecord {
            y: 1,
            cliff: true,
            ..Default::default()
        };
        send_pair(&mut app, a, b);

        let mapper = app.world().resource::<ExplorationMapper>();
        assert_eq!(mapper.position(RobotId::A), GridPosition::new(2, 0));
        assert_eq!(mapper.position(RobotId::B), GridPosition::new(-1, -1));

        let latest = app.world().resource::<LatestSnapshot>().0.clone().unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].coordinates, [2, 0]);
        assert_eq!(load_snapshot(&path).unwrap(), latest);

        let updates = app.world().resource::<Events<MapUpdated>>().len();
        assert_eq!(updates, 1);
    }

    #[test]
    fn failed_update_keeps_the_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        let mut app = test_app(path.clone());

        let overflowing = RobotRecord {
            x: i64::MIN,
            ..Default::default()
        };
        send_pair(&mut app, RobotRecord::default(), overflowing);

        assert!(app.world().resource::<LatestSnapshot>().0.is_none());
        assert!(!path.exists());
        assert_eq!(
            app.world().resource::<ExplorationMapper>(),
            &ExplorationMapper::default()
        );
    }
}
