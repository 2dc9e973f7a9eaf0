// venus_sim/src/simulation/plugins/map_view/mod.rs

use bevy::prelude::*;
use venus_core::mapping::{ExplorationMapper, MapRenderer};

// --- Sub-modules for organization ---
pub mod components;
pub mod console;
pub mod systems;

pub use components::{MapProjection, MapViewSettings, RockLabel};
pub use console::ConsoleMapRenderer;

use crate::prelude::{AppState, MapConfig, MapUpdated, MissionSet};
use systems::{
    clear_map_view, draw_map, place_rock_labels, refresh_rock_labels, setup_map_view,
    MAP_BACKGROUND,
};

impl From<&MapConfig> for MapViewSettings {
    fn from(config: &MapConfig) -> Self {
        Self {
            zoom_range: config.zoom_range,
            auto_zoom: config.auto_zoom,
            auto_zoom_padding: config.auto_zoom_padding,
        }
    }
}

/// Draws the live map in the window: robots, features, rock labels and legend.
pub struct MapViewPlugin {
    pub settings: MapViewSettings,
}

impl Plugin for MapViewPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.settings)
            .insert_resource(ClearColor(MAP_BACKGROUND))
            .add_systems(Startup, setup_map_view)
            .add_systems(
                Update,
                (refresh_rock_labels, place_rock_labels, draw_map)
                    .chain()
                    .in_set(MissionSet::Presentation)
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(OnEnter(AppState::Dumping), clear_map_view);
    }
}

/// Headless stand-in for `MapViewPlugin`: logs the map after each update.
pub struct ConsoleViewPlugin;

impl Plugin for ConsoleViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConsoleRenderer>().add_systems(
            Update,
            log_map_updates.in_set(MissionSet::Presentation),
        );
    }
}

#[derive(Resource, Default, Debug)]
pub struct ConsoleRenderer(pub ConsoleMapRenderer);

fn log_map_updates(
    mut updates: EventReader<MapUpdated>,
    mapper: Res<ExplorationMapper>,
    mut renderer: ResMut<ConsoleRenderer>,
) {
    if updates.is_empty() {
        return;
    }
    updates.clear();
    renderer.0.render(&mapper);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_view_renders_once_per_frame_with_updates() {
        let mut app = App::new();
        app.add_event::<MapUpdated>()
            .insert_resource(ExplorationMapper::default())
            .add_plugins(ConsoleViewPlugin);

        app.update();
        assert_eq!(app.world().resource::<ConsoleRenderer>().0.frames, 0);

        app.world_mut().send_event(MapUpdated);
        app.world_mut().send_event(MapUpdated);
        app.update();
        assert_eq!(app.world().resource::<ConsoleRenderer>().0.frames, 1);

        app.update();
        assert_eq!(app.world().resource::<ConsoleRenderer>().0.frames, 1);
    }

    #[test]
    fn settings_follow_the_map_config() {
        let config = MapConfig {
            zoom_range: 20,
            auto_zoom: true,
            ..Default::default()
        };
        let settings = MapViewSettings::from(&config);
        assert_eq!(settings.zoom_range, 20);
        assert!(settings.auto_zoom);
        assert_eq!(settings.auto_zoom_padding, 10);
    }
}
