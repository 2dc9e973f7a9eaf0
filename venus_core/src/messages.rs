// venus_core/src/messages.rs

use crate::types::RobotId;
use serde::{Deserialize, Serialize};
use std::fmt;

// =========================================================================
// == Record Payload ==
// =========================================================================

/// The colour reported alongside a rock.
///
/// Robots are not consistent about this field: the vision pipeline sends a
/// palette index or a colour name, the simulated publisher sends `false`, and
/// records without a rock usually carry `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Colour {
    Code(i64),
    Name(String),
    Flag(bool),
    #[default]
    Unset,
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::Code(code) => write!(f, "{code}"),
            Colour::Name(name) => f.write_str(name),
            Colour::Flag(flag) => write!(f, "{flag}"),
            Colour::Unset => f.write_str("none"),
        }
    }
}

/// One decoded sensor/status update from a robot.
///
/// `x` and `y` are deltas relative to the robot's previous report, not
/// absolute coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RobotRecord {
    pub x: i64,
    pub y: i64,
    pub rock: bool,
    pub colour: Colour,
    pub size: i64,
    pub cliff: bool,
    pub mountain: bool,
}

// =========================================================================
// == Pipeline Messages ==
// =========================================================================

/// A record stamped with the robot it came from. This is what travels
/// through the ingestion queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedRecord {
    pub source: RobotId,
    pub record: RobotRecord,
}

impl TaggedRecord {
    pub fn new(source: RobotId, record: RobotRecord) -> Self {
        Self { source, record }
    }
}

/// One record from each robot, joined by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPair {
    pub a: RobotRecord,
    pub b: RobotRecord,
}

impl RecordPair {
    pub fn get(&self, robot: RobotId) -> &RobotRecord {
        match robot {
            RobotId::A => &self.a,
            RobotId::B => &self.b,
        }
    }
}
