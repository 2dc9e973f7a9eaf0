// venus_core/src/mapping/exploration.rs

use super::{classify, FeatureKind, Landmark, MapMarker, RobotTrack, RockFeature};
use crate::error::MappingError;
use crate::messages::{RecordPair, RobotRecord};
use crate::report::RockEntry;
use crate::types::{GridPosition, RobotId};

/// Accumulates both robots' positions and everything they discover.
///
/// The state lives for as long as the mapper does. Construct a new one (or
/// call [`ExplorationMapper::reset`]) to start a fresh mission.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "bevy", derive(bevy_ecs::prelude::Resource))]
pub struct ExplorationMapper {
    origin_a: GridPosition,
    origin_b: GridPosition,
    track_a: RobotTrack,
    track_b: RobotTrack,
    /// Id handed to the most recent rock. Shared by both robots.
    last_rock_id: u64,
}

impl Default for ExplorationMapper {
    fn default() -> Self {
        Self::new(RobotId::A.default_origin(), RobotId::B.default_origin())
    }
}

impl ExplorationMapper {
    pub fn new(origin_a: GridPosition, origin_b: GridPosition) -> Self {
        Self {
            origin_a,
            origin_b,
            track_a: RobotTrack::starting_at(origin_a),
            track_b: RobotTrack::starting_at(origin_b),
            last_rock_id: 0,
        }
    }

    /// Forgets every position update and feature, keeping the origins.
    pub fn reset(&mut self) {
        *self = Self::new(self.origin_a, self.origin_b);
    }

    /// Applies one record from each robot and returns every rock found so far,
    /// in discovery order.
    ///
    /// Robot A's deltas are added to its position, robot B's are subtracted.
    /// Features are then logged for A before B, so if both report a rock in the
    /// same update A's gets the lower id.
    pub fn update(
        &mut self,
        a: &RobotRecord,
        b: &RobotRecord,
    ) -> Result<Vec<RockEntry>, MappingError> {
        // Both moves are checked before either is applied.
        let next_a = Self::moved(RobotId::A, self.track_a.position, a)?;
        let next_b = Self::moved(RobotId::B, self.track_b.position, b)?;
        self.track_a.position = next_a;
        self.track_b.position = next_b;

        self.log_feature(RobotId::A, a);
        self.log_feature(RobotId::B, b);

        Ok(self.rock_snapshot())
    }

    pub fn update_pair(&mut self, pair: &RecordPair) -> Result<Vec<RockEntry>, MappingError> {
        self.update(&pair.a, &pair.b)
    }

    fn moved(
        robot: RobotId,
        position: GridPosition,
        record: &RobotRecord,
    ) -> Result<GridPosition, MappingError> {
        let sign = robot.delta_sign();
        let overflow = || MappingError::CoordinateOverflow {
            robot,
            dx: record.x,
            dy: record.y,
        };
        let dx = record.x.checked_mul(sign).ok_or_else(overflow)?;
        let dy = record.y.checked_mul(sign).ok_or_else(overflow)?;
        Ok(GridPosition::new(
            position.x.checked_add(dx).ok_or_else(overflow)?,
            position.y.checked_add(dy).ok_or_else(overflow)?,
        ))
    }

    fn log_feature(&mut self, robot: RobotId, record: &RobotRecord) {
        let Some(kind) = classify(record) else {
            return;
        };
        match kind {
            FeatureKind::Rock => {
                self.last_rock_id += 1;
                let id = self.last_rock_id;
                let track = self.track_mut(robot);
                let position = track.position;
                track.rocks.push(RockFeature {
                    id,
                    owner: robot,
                    position,
                    colour: record.colour.clone(),
                    size: record.size,
                });
            }
            FeatureKind::Cliff => {
                let track = self.track_mut(robot);
                let landmark = Landmark {
                    owner: robot,
                    position: track.position,
                };
                track.cliffs.push(landmark);
            }
            FeatureKind::Mountain => {
                let track = self.track_mut(robot);
                let landmark = Landmark {
                    owner: robot,
                    position: track.position,
                };
                track.mountains.push(landmark);
            }
        }
    }

    // --- Accessors ---

    pub fn track(&self, robot: RobotId) -> &RobotTrack {
        match robot {
            RobotId::A => &self.track_a,
            RobotId::B => &self.track_b,
        }
    }

    fn track_mut(&mut self, robot: RobotId) -> &mut RobotTrack {
        match robot {
            RobotId::A => &mut self.track_a,
            RobotId::B => &mut self.track_b,
        }
    }

    pub fn position(&self, robot: RobotId) -> GridPosition {
        self.track(robot).position
    }

    pub fn origin(&self, robot: RobotId) -> GridPosition {
        match robot {
            RobotId::A => self.origin_a,
            RobotId::B => self.origin_b,
        }
    }

    pub fn rocks(&self, robot: RobotId) -> &[RockFeature] {
        &self.track(robot).rocks
    }

    pub fn cliffs(&self, robot: RobotId) -> &[Landmark] {
        &self.track(robot).cliffs
    }

    pub fn mountains(&self, robot: RobotId) -> &[Landmark] {
        &self.track(robot).mountains
    }

    /// Number of rocks discovered by both robots together.
    pub fn rock_count(&self) -> u64 {
        self.last_rock_id
    }

    /// All rocks from both robots, sorted by id.
    pub fn rock_snapshot(&self) -> Vec<RockEntry> {
        let mut rocks: Vec<&RockFeature> = self
            .track_a
            .rocks
            .iter()
            .chain(self.track_b.rocks.iter())
            .collect();
        rocks.sort_by_key(|rock| rock.id);
        rocks.into_iter().map(RockEntry::from).collect()
    }

    /// Every robot and feature as a flat list of markers.
    ///
    /// Robots come first, then rocks, cliffs and mountains, each grouped by
    /// owner (A before B) in the order they were logged.
    pub fn markers(&self) -> Vec<MapMarker> {
        let mut markers: Vec<MapMarker> = RobotId::ALL
            .iter()
            .map(|&robot| MapMarker::Robot {
                robot,
                position: self.position(robot),
            })
            .collect();
        for robot in RobotId::ALL {
            markers.extend(self.rocks(robot).iter().map(|rock| MapMarker::Rock {
                owner: rock.owner,
                id: rock.id,
                position: rock.position,
            }));
        }
        for robot in RobotId::ALL {
            markers.extend(self.cliffs(robot).iter().map(|cliff| MapMarker::Cliff {
                owner: cliff.owner,
                position: cliff.position,
            }));
        }
        for robot in RobotId::ALL {
            markers.extend(
                self.mountains(robot)
                    .iter()
                    .map(|mountain| MapMarker::Mountain {
                        owner: mountain.owner,
                        position: mountain.position,
                    }),
            );
        }
        markers
    }

    /// Half-width of a square view, centred on the origin, that keeps both
    /// robots in sight with `padding` cells to spare.
    pub fn fit_extent(&self, padding: i64) -> i64 {
        RobotId::ALL
            .iter()
            .map(|&robot| {
                let p = self.position(robot);
                p.x.saturating_abs().max(p.y.saturating_abs())
            })
            .max()
            .unwrap_or(0)
            .saturating_add(padding)
    }
}
