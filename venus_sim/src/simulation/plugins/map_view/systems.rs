// venus_sim/src/simulation/plugins/map_view/systems.rs

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use venus_core::mapping::{ExplorationMapper, MapMarker, MapRenderer};
use venus_core::types::RobotId;

use super::components::{MapOverlay, MapProjection, MapViewSettings, RockLabel};
use crate::prelude::MapUpdated;

// =========================================================================
// == Palette ==
// =========================================================================

const ROBOT_A_COLOUR: Color = Color::srgb(0.0, 0.0, 1.0);
const ROBOT_B_COLOUR: Color = Color::srgb(1.0, 0.0, 0.0);
const CLIFF_COLOUR: Color = Color::srgb(0.0, 0.0, 0.0);
const MOUNTAIN_COLOUR: Color = Color::srgb(0.0, 0.5, 0.0);
const GRID_COLOUR: Color = Color::srgba(0.5, 0.5, 0.5, 0.6);
const AXIS_COLOUR: Color = Color::srgb(0.2, 0.2, 0.2);
const TEXT_COLOUR: Color = Color::srgb(0.1, 0.1, 0.1);

/// The "peru" background the map is drawn on.
pub const MAP_BACKGROUND: Color = Color::srgb(0.804, 0.522, 0.247);

fn owner_colour(robot: RobotId) -> Color {
    match robot {
        RobotId::A => ROBOT_A_COLOUR,
        RobotId::B => ROBOT_B_COLOUR,
    }
}

// =========================================================================
// == Gizmo Renderer ==
// =========================================================================

/// Draws the whole map with immediate-mode gizmos. Gizmos only live for one
/// frame, so this runs every frame and always redraws everything.
pub struct GizmoMapRenderer<'a, 'w, 's> {
    pub gizmos: &'a mut Gizmos<'w, 's>,
    pub projection: MapProjection,
}

impl GizmoMapRenderer<'_, '_, '_> {
    fn draw_frame(&mut self) {
        let side = self.projection.plot_side();
        if let Some(cells) = self.projection.grid_cells() {
            self.gizmos.grid_2d(
                Isometry2d::IDENTITY,
                UVec2::splat(cells),
                Vec2::splat(self.projection.cell_px),
                GRID_COLOUR,
            );
        }
        self.gizmos
            .rect_2d(Isometry2d::IDENTITY, Vec2::splat(side), AXIS_COLOUR);
    }

    fn draw_marker(&mut self, marker: &MapMarker) {
        let centre = self.projection.to_world(marker.position());
        let half = self.projection.cell_px * 0.4;
        match *marker {
            MapMarker::Robot { robot, .. } => {
                let colour = owner_colour(robot);
                let at = Isometry2d::from_translation(centre);
                self.gizmos.rect_2d(at, Vec2::splat(half * 2.0), colour);
                self.gizmos.rect_2d(at, Vec2::splat(half), colour);
            }
            MapMarker::Rock { owner, .. } => {
                let colour = owner_colour(owner);
                self.gizmos.line_2d(
                    centre + Vec2::new(-half, -half),
                    centre + Vec2::new(half, half),
                    colour,
                );
                self.gizmos.line_2d(
                    centre + Vec2::new(-half, half),
                    centre + Vec2::new(half, -half),
                    colour,
                );
            }
            MapMarker::Cliff { owner, .. } => {
                // Downward-pointing triangle with an outline in the owner's colour.
                self.triangle(centre, half, -1.0, CLIFF_COLOUR);
                self.triangle(centre, half * 1.25, -1.0, owner_colour(owner));
            }
            MapMarker::Mountain { owner, .. } => {
                self.triangle(centre, half, 1.0, MOUNTAIN_COLOUR);
                self.triangle(centre, half * 1.25, 1.0, owner_colour(owner));
            }
        }
    }

    /// `direction` is `1.0` for an upward apex, `-1.0` for a downward one.
    fn triangle(&mut self, centre: Vec2, half: f32, direction: f32, colour: Color) {
        let base = -half * direction;
        let apex = centre + Vec2::new(0.0, half * direction);
        self.gizmos.linestrip_2d(
            [
                centre + Vec2::new(-half, base),
                centre + Vec2::new(half, base),
                apex,
                centre + Vec2::new(-half, base),
            ],
            colour,
        );
    }
}

impl MapRenderer for GizmoMapRenderer<'_, '_, '_> {
    fn render(&mut self, map: &ExplorationMapper) {
        self.draw_frame();
        for marker in map.markers() {
            self.draw_marker(&marker);
        }
    }
}

fn current_projection(
    settings: &MapViewSettings,
    mapper: &ExplorationMapper,
    window: Option<&Window>,
) -> MapProjection {
    let viewport = window
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(Vec2::new(1200.0, 600.0));
    MapProjection::fit(settings.extent(mapper), viewport)
}

/// Legend lines, each in the colour its marker is outlined with. Cliffs and
/// mountains are listed per robot since only the outline tells them apart.
pub fn legend_entries() -> [(&'static str, Color); 8] {
    [
        ("[] Robot A", ROBOT_A_COLOUR),
        ("[] Robot B", ROBOT_B_COLOUR),
        ("x  Rock A", ROBOT_A_COLOUR),
        ("x  Rock B", ROBOT_B_COLOUR),
        ("v  Cliff A (black)", ROBOT_A_COLOUR),
        ("v  Cliff B (black)", ROBOT_B_COLOUR),
        ("^  Mountain A (green)", ROBOT_A_COLOUR),
        ("^  Mountain B (green)", ROBOT_B_COLOUR),
    ]
}

// =========================================================================
// == Setup ==
// =========================================================================

/// Spawns the camera plus the title and legend overlay.
pub fn setup_map_view(mut commands: Commands) {
    commands.spawn(Camera2d);

    // Title block, centred along the top edge.
    commands
        .spawn((
            MapOverlay,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("RLSPCM"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(TEXT_COLOUR),
            ));
            parent.spawn((
                Text::new("Robot Localisation Scope Plot Configuration Map"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(TEXT_COLOUR),
            ));
        });

    // Legend in the top-right corner.
    commands
        .spawn((
            MapOverlay,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                right: Val::Px(12.0),
                padding: UiRect::all(Val::Px(6.0)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.6)),
        ))
        .with_children(|parent| {
            for (text, colour) in legend_entries() {
                parent.spawn((
                    Text::new(text),
                    TextFont {
                        font_size: 13.0,
                        ..default()
                    },
                    TextColor(colour),
                ));
            }
        });

    // Axis captions.
    for (text, node) in [
        (
            "X-axis",
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(8.0),
                left: Val::Percent(48.0),
                ..default()
            },
        ),
        (
            "Y-axis",
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(12.0),
                top: Val::Percent(50.0),
                ..default()
            },
        ),
    ] {
        commands.spawn((
            MapOverlay,
            node,
            Text::new(text),
            TextFont {
                font_size: 13.0,
                ..default()
            },
            TextColor(TEXT_COLOUR),
        ));
    }
}

// =========================================================================
// == Drawing Systems ==
// =========================================================================

/// Redraws every robot and feature the mapper knows about.
pub fn draw_map(
    mut gizmos: Gizmos,
    mapper: Res<ExplorationMapper>,
    settings: Res<MapViewSettings>,
    window: Query<&Window, With<PrimaryWindow>>,
) {
    let projection = current_projection(&settings, &mapper, window.single().ok());
    let mut renderer = GizmoMapRenderer {
        gizmos: &mut gizmos,
        projection,
    };
    renderer.render(&mapper);
}

/// Rebuilds the rock labels whenever the map changed.
pub fn refresh_rock_labels(
    mut commands: Commands,
    mut updates: EventReader<MapUpdated>,
    mapper: Res<ExplorationMapper>,
    labels: Query<Entity, With<RockLabel>>,
) {
    if updates.is_empty() {
        return;
    }
    updates.clear();

    for entity in &labels {
        commands.entity(entity).despawn();
    }
    for robot in RobotId::ALL {
        for rock in mapper.rocks(robot) {
            commands.spawn((
                RockLabel {
                    anchor: rock.position,
                },
                Text2d::new(format!("{}{}", rock.owner, rock.id)),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(owner_colour(rock.owner)),
                Transform::default(),
            ));
        }
    }
}

/// Keeps labels one cell up and right of their rock at the current zoom.
pub fn place_rock_labels(
    mapper: Res<ExplorationMapper>,
    settings: Res<MapViewSettings>,
    window: Query<&Window, With<PrimaryWindow>>,
    mut labels: Query<(&RockLabel, &mut Transform)>,
) {
    let projection = current_projection(&settings, &mapper, window.single().ok());
    for (label, mut transform) in &mut labels {
        transform.translation = projection.label_position(label.anchor).extend(1.0);
    }
}

/// Clears the map's entities once the final table takes over the window.
pub fn clear_map_view(
    mut commands: Commands,
    entities: Query<Entity, Or<(With<RockLabel>, With<MapOverlay>)>>,
) {
    for entity in &entities {
        commands.entity(entity).despawn();
    }
}
