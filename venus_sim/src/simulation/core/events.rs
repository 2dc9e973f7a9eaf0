// venus_sim/src/simulation/core/events.rs
use bevy::prelude::Event;
// Import the pure data struct from the core library
use venus_core::messages::RecordPair;

/// One record from each robot, ready for the mapper.
#[derive(Event, Clone, Debug)]
pub struct PairCompleted(pub RecordPair);

/// Sent after the mapper accepted a pair, so renderers can refresh.
#[derive(Event, Clone, Copy, Debug, Default)]
pub struct MapUpdated;
