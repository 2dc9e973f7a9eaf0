// venus_sim/src/simulation/core/app_state.rs

use bevy::{ecs::schedule::SystemSet, prelude::States};

/// Defines the major phases of the application's lifecycle.
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// The initial state. Workers are feeding the queue and every completed
    /// pair updates the map.
    #[default]
    Running,

    /// The mission was interrupted. Ingestion is stopped and the final rock
    /// table is shown (or logged when headless) before exiting.
    Dumping,
}

// =========================================================================
// == Main Mission Sets (The "Data Flow Graph") ==
// =========================================================================

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MissionSet {
    /// Systems that drain the ingestion queue and join records into pairs.
    Aggregation,
    /// Systems that feed completed pairs into the mapper and persist the result.
    Mapping,
    /// Systems that draw or log the accumulated map. Runs last.
    Presentation,
}
