// venus_sim/src/simulation/plugins/map_view/console.rs

use bevy::log::info;
use venus_core::mapping::{ExplorationMapper, MapRenderer};
use venus_core::types::RobotId;

/// Renders the map as log lines for runs without a window.
#[derive(Debug, Default)]
pub struct ConsoleMapRenderer {
    /// Number of frames rendered so far.
    pub frames: u64,
}

impl ConsoleMapRenderer {
    /// One line per robot: position plus how many features it has logged.
    pub fn summary(map: &ExplorationMapper, robot: RobotId) -> String {
        let position = map.position(robot);
        format!(
            "Robot {} at ({}, {}): {} rocks, {} cliffs, {} mountains",
            robot,
            position.x,
            position.y,
            map.rocks(robot).len(),
            map.cliffs(robot).len(),
            map.mountains(robot).len()
        )
    }
}

impl MapRenderer for ConsoleMapRenderer {
    fn render(&mut self, map: &ExplorationMapper) {
        self.frames += 1;
        for robot in RobotId::ALL {
            info!("{}", Self::summary(map, robot));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use venus_core::messages::RobotRecord;

    #[test]
    fn summary_reports_position_and_feature_counts() {
        let mut map = ExplorationMapper::default();
        let a = RobotRecord {
            x: 2,
            rock: true,
            ..Default::default()
        };
        let b = RobotRecord {
            y: 3,
            mountain: true,
            ..Default::default()
        };
        map.update(&a, &b).unwrap();

        assert_eq!(
            ConsoleMapRenderer::summary(&map, RobotId::A),
            "Robot A at (3, 0): 1 rocks, 0 cliffs, 0 mountains"
        );
        assert_eq!(
            ConsoleMapRenderer::summary(&map, RobotId::B),
            "Robot B at (-1, -3): 0 rocks, 0 cliffs, 1 mountains"
        );

        let mut renderer = ConsoleMapRenderer::default();
        renderer.render(&map);
        assert_eq!(renderer.frames, 1);
    }
}
