// venus_sim/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::plugins::aggregation::AggregationPlugin;
use crate::simulation::plugins::dump::DumpPlugin;
use crate::simulation::plugins::ingestion::IngestionPlugin;
use crate::simulation::plugins::map_view::{ConsoleViewPlugin, MapViewPlugin, MapViewSettings};
use crate::simulation::plugins::mapping::MappingPlugin;

use crate::prelude::{AppState, MissionConfig, MissionSet};

// This prelude is for convenience for other files WITHIN the venus_sim crate.
pub mod prelude;

pub mod cli;
pub mod publisher;
pub mod simulation;

/// The main plugin that brings together all the mission parts.
/// `main.rs` only picks the base plugins (windowed or headless) and adds this.
pub struct VenusMissionPlugin {
    pub config: MissionConfig,
    pub headless: bool,
}

impl Plugin for VenusMissionPlugin {
    fn build(&self, app: &mut App) {
        let config = &self.config;
        app.insert_resource(config.clone())
            .init_state::<AppState>()
            .configure_sets(
                Update,
                (
                    MissionSet::Aggregation,
                    MissionSet::Mapping,
                    MissionSet::Presentation,
                )
                    .chain(),
            );

        app.add_plugins((
            // Broker workers feeding the bounded queue.
            IngestionPlugin {
                queue_capacity: config.pipeline.queue_capacity,
            },
            // Joins one record from each robot into a pair.
            AggregationPlugin {
                poll_interval: config.pipeline.poll_interval(),
            },
            MappingPlugin {
                origin_a: config.map.origin_a,
                origin_b: config.map.origin_b,
                table_path: config.output.table_path.clone(),
            },
            DumpPlugin {
                headless: self.headless,
            },
        ));

        if self.headless {
            app.add_plugins(ConsoleViewPlugin);
        } else {
            app.add_plugins(MapViewPlugin {
                settings: MapViewSettings::from(&config.map),
            });
        }
    }
}
