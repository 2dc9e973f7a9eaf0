// venus_core/src/aggregation.rs

use crate::messages::{RecordPair, RobotRecord, TaggedRecord};
use crate::types::RobotId;
use std::collections::HashMap;

/// Joins the two robot streams into pairs.
///
/// Holds the latest record per robot. A newer record from the same robot
/// overwrites the older one. As soon as both robots are present the pair is
/// handed out and the aggregator starts over empty.
#[derive(Debug, Default, Clone)]
pub struct PairAggregator {
    latest: HashMap<RobotId, RobotRecord>,
}

impl PairAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `tagged` and returns a completed pair if both robots have reported.
    pub fn offer(&mut self, tagged: TaggedRecord) -> Option<RecordPair> {
        self.latest.insert(tagged.source, tagged.record);
        self.try_complete()
    }

    fn try_complete(&mut self) -> Option<RecordPair> {
        if !RobotId::ALL.iter().all(|id| self.latest.contains_key(id)) {
            return None;
        }
        let a = self.latest.remove(&RobotId::A)?;
        let b = self.latest.remove(&RobotId::B)?;
        Some(RecordPair { a, b })
    }

    /// Whether a record from `robot` is waiting for its partner.
    pub fn has(&self, robot: RobotId) -> bool {
        self.latest.contains_key(&robot)
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}
