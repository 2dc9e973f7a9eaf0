// venus_sim/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the entire venus_core prelude so pure types like `RobotId`,
// `RobotRecord` and `ExplorationMapper` are always at hand.
pub use venus_core::prelude::*;

// Re-export common simulation-specific types for easy access in other plugins.
pub use crate::simulation::config::structs::*;
pub use crate::simulation::core::app_state::{AppState, MissionSet};
pub use crate::simulation::core::events::{MapUpdated, PairCompleted};
pub use crate::simulation::core::interrupt::InterruptFlag;
pub use crate::simulation::plugins::mapping::LatestSnapshot;
