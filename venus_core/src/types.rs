// venus_core/src/types.rs

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Core Type Aliases ---
/// A cell on the exploration grid. Robots only ever move in whole cells.
pub type GridPosition = Vector2<i64>;

// --- Core Identifier ---
/// One of the two rovers taking part in the mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RobotId {
    A,
    B,
}

impl RobotId {
    pub const ALL: [RobotId; 2] = [RobotId::A, RobotId::B];

    /// The tag used in reports and on the map, e.g. `"A"`.
    pub fn tag(self) -> &'static str {
        match self {
            RobotId::A => "A",
            RobotId::B => "B",
        }
    }

    /// Sign applied to the deltas this robot reports.
    ///
    /// Robot B reports its motion in a mirrored frame, so its deltas are
    /// subtracted instead of added.
    pub fn delta_sign(self) -> i64 {
        match self {
            RobotId::A => 1,
            RobotId::B => -1,
        }
    }

    /// Position both robots start from when no origin is configured.
    pub fn default_origin(self) -> GridPosition {
        match self {
            RobotId::A => GridPosition::new(1, 0),
            RobotId::B => GridPosition::new(-1, 0),
        }
    }
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for RobotId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" | "A" => Ok(RobotId::A),
            "b" | "B" => Ok(RobotId::B),
            other => Err(format!("unknown robot '{other}', expected 'a' or 'b'")),
        }
    }
}
