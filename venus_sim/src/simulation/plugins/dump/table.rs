// venus_sim/src/simulation/plugins/dump/table.rs

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use venus_core::report::{RockEntry, ROCK_COLUMNS};

/// Root node of the final rock table.
#[derive(Component, Debug, Default)]
pub struct RockTable;

/// The scrolling body of the table.
#[derive(Component, Debug, Default)]
pub struct RockTableBody;

const HEADER_BACKGROUND: Color = Color::srgb(0.85, 0.85, 0.85);
const ROW_BACKGROUND: Color = Color::srgb(1.0, 1.0, 1.0);
const TABLE_TEXT: Color = Color::srgb(0.05, 0.05, 0.05);
/// Pixels scrolled per wheel line.
const LINE_HEIGHT: f32 = 24.0;

fn cell(parent: &mut ChildSpawnerCommands, text: String, background: Color) {
    parent
        .spawn((
            Node {
                padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(background),
        ))
        .with_children(|cell| {
            cell.spawn((
                Text::new(text),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(TABLE_TEXT),
            ));
        });
}

fn columns() -> Vec<RepeatedGridTrack> {
    vec![RepeatedGridTrack::flex(ROCK_COLUMNS.len() as u16, 1.0)]
}

/// Fills the window with a read-only table of `rocks`, one row per rock.
pub fn spawn_rock_table(commands: &mut Commands, rocks: &[RockEntry]) -> Entity {
    commands
        .spawn((
            RockTable,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(12.0)),
                row_gap: Val::Px(1.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.6, 0.6, 0.6)),
            GlobalZIndex(10),
        ))
        .with_children(|table| {
            // Header row stays put while the body scrolls.
            table
                .spawn(Node {
                    display: Display::Grid,
                    grid_template_columns: columns(),
                    column_gap: Val::Px(1.0),
                    ..default()
                })
                .with_children(|header| {
                    for title in ROCK_COLUMNS {
                        cell(header, title.to_string(), HEADER_BACKGROUND);
                    }
                });

            table
                .spawn((
                    RockTableBody,
                    Node {
                        display: Display::Grid,
                        grid_template_columns: columns(),
                        column_gap: Val::Px(1.0),
                        row_gap: Val::Px(1.0),
                        overflow: Overflow::scroll_y(),
                        flex_grow: 1.0,
                        ..default()
                    },
                    ScrollPosition::default(),
                ))
                .with_children(|body| {
                    for rock in rocks {
                        for text in rock.cells() {
                            cell(body, text, ROW_BACKGROUND);
                        }
                    }
                });
        })
        .id()
}

/// Scrolls the table body with the mouse wheel.
pub fn scroll_rock_table(
    mut wheel: EventReader<MouseWheel>,
    mut bodies: Query<&mut ScrollPosition, With<RockTableBody>>,
) {
    for event in wheel.read() {
        let dy = match event.unit {
            MouseScrollUnit::Line => event.y * LINE_HEIGHT,
            MouseScrollUnit::Pixel => event.y,
        };
        for mut scroll in &mut bodies {
            scroll.offset_y = (scroll.offset_y - dy).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use venus_core::messages::Colour;
    use venus_core::types::RobotId;

    fn rock(id: u64) -> RockEntry {
        RockEntry {
            robot: RobotId::A,
            id,
            colour: Colour::Name("red".into()),
            size: 5,
            coordinates: [2, 0],
        }
    }

    fn spawn(app: &mut App, rocks: Vec<RockEntry>) {
        app.add_systems(Startup, move |mut commands: Commands| {
            spawn_rock_table(&mut commands, &rocks);
        });
        app.update();
    }

    #[test]
    fn table_has_one_cell_per_column_and_rock() {
        let mut app = App::new();
        spawn(&mut app, vec![rock(1), rock(2), rock(3)]);

        let texts: Vec<String> = app
            .world_mut()
            .query::<&Text>()
            .iter(app.world())
            .map(|t| t.0.clone())
            .collect();
        assert_eq!(texts.len(), ROCK_COLUMNS.len() * 4);
        assert!(texts.iter().any(|t| t == "Coordinates"));
        assert_eq!(texts.iter().filter(|t| t.as_str() == "(2, 0)").count(), 3);
    }

    #[test]
    fn wheel_scrolls_down_and_stops_at_the_top() {
        let mut app = App::new();
        app.add_event::<MouseWheel>()
            .add_systems(Update, scroll_rock_table);
        spawn(&mut app, vec![rock(1)]);

        let wheel = |y: f32| MouseWheel {
            unit: MouseScrollUnit::Line,
            x: 0.0,
            y,
            window: Entity::PLACEHOLDER,
        };

        app.world_mut().send_event(wheel(-2.0));
        app.update();
        let offset = app
            .world_mut()
            .query_filtered::<&ScrollPosition, With<RockTableBody>>()
            .single(app.world())
            .unwrap()
            .offset_y;
        assert_eq!(offset, 2.0 * LINE_HEIGHT);

        app.world_mut().send_event(wheel(5.0));
        app.update();
        let offset = app
            .world_mut()
            .query_filtered::<&ScrollPosition, With<RockTableBody>>()
            .single(app.world())
            .unwrap()
            .offset_y;
        assert_eq!(offset, 0.0);
    }
}
