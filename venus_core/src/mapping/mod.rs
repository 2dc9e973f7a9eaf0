// venus_core/src/mapping/mod.rs

use crate::messages::Colour;
use crate::types::{GridPosition, RobotId};

// --- Map Data Structures ---

/// The terrain features a robot can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Rock,
    Cliff,
    Mountain,
}

/// A rock logged at the position of the robot that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RockFeature {
    /// Global discovery number, shared by both robots and starting at 1.
    pub id: u64,
    pub owner: RobotId,
    pub position: GridPosition,
    pub colour: Colour,
    pub size: i64,
}

/// A cliff or mountain logged at the position of the robot that found it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landmark {
    pub owner: RobotId,
    pub position: GridPosition,
}

/// Everything one robot has done so far: where it is and what it found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotTrack {
    pub position: GridPosition,
    pub rocks: Vec<RockFeature>,
    pub cliffs: Vec<Landmark>,
    pub mountains: Vec<Landmark>,
}

impl RobotTrack {
    pub fn starting_at(position: GridPosition) -> Self {
        Self {
            position,
            rocks: Vec::new(),
            cliffs: Vec::new(),
            mountains: Vec::new(),
        }
    }
}

/// One drawable item of the accumulated map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMarker {
    Robot { robot: RobotId, position: GridPosition },
    Rock { owner: RobotId, id: u64, position: GridPosition },
    Cliff { owner: RobotId, position: GridPosition },
    Mountain { owner: RobotId, position: GridPosition },
}

impl MapMarker {
    pub fn position(&self) -> GridPosition {
        match *self {
            MapMarker::Robot { position, .. }
            | MapMarker::Rock { position, .. }
            | MapMarker::Cliff { position, .. }
            | MapMarker::Mountain { position, .. } => position,
        }
    }
}

// --- The Renderer Trait ("Contract") ---
/// The contract for anything that draws the exploration map.
/// Every call is a full redraw of the mapper's accumulated state.
pub trait MapRenderer {
    fn render(&mut self, map: &ExplorationMapper);
}

// --- Declare the implementation sub-modules ---
mod classify;
mod exploration;

// --- Re-export the public items for a clean API ---
pub use classify::classify;
pub use exploration::ExplorationMapper;
