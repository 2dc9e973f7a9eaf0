// venus_sim/src/main.rs

//! Entry point for the Venus mission tools.
//!
//! `run` starts the live mission (windowed by default, `--headless` for a
//! terminal-only run), `publish` stands in for one robot and `dump` prints a
//! rock snapshot left behind by an earlier run.
//!
//! To run the mission:
//! `cargo run -p venus_sim -- run --config assets/missions/default.toml`

// --- Bevy Imports ---
use bevy::app::{ScheduleRunnerPlugin, TerminalCtrlCHandlerPlugin};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::window::WindowResolution;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing_subscriber::EnvFilter;

// --- Project-Specific Imports ---
use venus_core::report::{format_rock_table, load_snapshot};
use venus_sim::cli::{Cli, Command};
use venus_sim::prelude::MissionConfig;
use venus_sim::publisher::run_publisher;
use venus_sim::simulation::config::load_mission_config;
use venus_sim::simulation::core::interrupt::install_ctrl_c_handler;
use venus_sim::VenusMissionPlugin;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            config,
            headless,
            log_filter,
        } => {
            let config = load_mission_config(&config)?;
            run_mission(config, headless, log_filter)
        }
        Command::Publish { robot, config } => {
            init_plain_logging();
            let config = load_mission_config(&config)?;
            let stop = install_ctrl_c_handler()?;
            run_publisher(robot, &config, stop)?;
            Ok(())
        }
        Command::Dump { table } => {
            init_plain_logging();
            dump_table(&table)
        }
    }
}

fn init_plain_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_mission(
    config: MissionConfig,
    headless: bool,
    log_filter: String,
) -> Result<(), Box<dyn Error>> {
    let log = LogPlugin {
        level: bevy::log::Level::INFO,
        filter: log_filter,
        ..default()
    };

    let mut app = App::new();

    // --- 1. Base plugins: a window, or a bare loop paced by the poll interval ---
    if headless {
        app.add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
                config.pipeline.poll_interval(),
            )),
            log,
            StatesPlugin,
        ));
    } else {
        let [width, height] = config.map.window_size;
        app.add_plugins(
            DefaultPlugins
                .build()
                // Ctrl-C must end in the final dump, not a bare exit.
                .disable::<TerminalCtrlCHandlerPlugin>()
                .set(log)
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "RLSPCM".to_string(),
                        resolution: WindowResolution::new(width, height),
                        ..default()
                    }),
                    ..default()
                }),
        );
    }
    app.insert_resource(install_ctrl_c_handler()?);

    // --- 2. The mission itself ---
    app.add_plugins(VenusMissionPlugin { config, headless });

    info!("Starting Venus mission...");
    app.run();
    Ok(())
}

fn dump_table(path: &Path) -> Result<(), Box<dyn Error>> {
    let rocks = load_snapshot(path)?;
    if rocks.is_empty() {
        info!("{} holds no rocks.", path.display());
    } else {
        println!("{}", format_rock_table(&rocks));
    }
    Ok(())
}
