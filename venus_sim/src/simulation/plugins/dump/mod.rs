// venus_sim/src/simulation/plugins/dump/mod.rs

//! Ending a mission: catches the interrupt, stops ingestion (see the
//! ingestion plugin) and shows the last rock snapshot once.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use venus_core::report::format_rock_table;

pub mod table;

pub use table::{spawn_rock_table, RockTable, RockTableBody};

use crate::prelude::{AppState, InterruptFlag, LatestSnapshot, MissionSet};

/// Window title while the final table is shown.
pub const DUMP_WINDOW_TITLE: &str = "To Venus and Beyond";

pub struct DumpPlugin {
    /// Log the table and exit instead of drawing it.
    pub headless: bool,
}

impl Plugin for DumpPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LatestSnapshot>().add_systems(
            Update,
            watch_for_interrupt
                .after(MissionSet::Presentation)
                .run_if(in_state(AppState::Running)),
        );

        if self.headless {
            app.add_systems(OnEnter(AppState::Dumping), log_final_snapshot);
        } else {
            app.add_systems(OnEnter(AppState::Dumping), show_final_snapshot)
                .add_systems(
                    Update,
                    (table::scroll_rock_table, exit_on_escape)
                        .run_if(in_state(AppState::Dumping)),
                );
        }
    }
}

/// Moves to `Dumping` on Ctrl-C, or on Escape when a window is open.
pub fn watch_for_interrupt(
    flag: Option<Res<InterruptFlag>>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let interrupted = flag.is_some_and(|f| f.is_raised());
    let escaped = keys.is_some_and(|k| k.just_pressed(KeyCode::Escape));
    if interrupted || escaped {
        info!("Interrupt received, ending the mission.");
        next_state.set(AppState::Dumping);
    }
}

/// The snapshot worth dumping, if any.
fn final_snapshot(latest: &LatestSnapshot) -> Option<&[venus_core::report::RockEntry]> {
    latest.0.as_deref().filter(|rocks| !rocks.is_empty())
}

pub fn log_final_snapshot(latest: Res<LatestSnapshot>, mut exit: EventWriter<AppExit>) {
    match final_snapshot(&latest) {
        Some(rocks) => info!("Final rock data:\n{}", format_rock_table(rocks)),
        None => info!("No rocks were found, nothing to dump."),
    }
    exit.write(AppExit::Success);
}

pub fn show_final_snapshot(
    mut commands: Commands,
    latest: Res<LatestSnapshot>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(rocks) = final_snapshot(&latest) else {
        info!("No rocks were found, nothing to dump.");
        exit.write(AppExit::Success);
        return;
    };

    if let Ok(mut window) = windows.single_mut() {
        window.title = DUMP_WINDOW_TITLE.to_string();
    }
    spawn_rock_table(&mut commands, rocks);
    info!("Showing {} rocks. Press Escape or close the window to exit.", rocks.len());
}

fn exit_on_escape(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
