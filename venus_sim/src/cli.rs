// venus_sim/src/cli.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use venus_core::types::RobotId;

/// Default location of the mission configuration.
pub const DEFAULT_CONFIG_PATH: &str = "assets/missions/default.toml";

/// Default log filter for the mission app.
pub const DEFAULT_LOG_FILTER: &str =
    "info,wgpu_core=error,wgpu_hal=error,venus_sim=debug,venus_core=debug";

/// Venus: live map and rock log for a two-robot exploration mission.
///
/// This struct defines the command-line arguments accepted by the `venus_sim`
/// binary.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Subscribe to both robots, draw the map and keep the rock log.
    Run {
        /// The path to the mission TOML file.
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Run without a window; the map is logged instead of drawn.
        #[arg(long, default_value_t = false)]
        headless: bool,

        /// Overrides the default log filter (same syntax as `RUST_LOG`).
        #[arg(long, default_value = DEFAULT_LOG_FILTER)]
        log_filter: String,
    },

    /// Pretend to be one robot and publish random records.
    Publish {
        /// Which robot's topic to publish on (`a` or `b`).
        #[arg(short, long)]
        robot: RobotId,

        /// The path to the mission TOML file.
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Print a rock snapshot written by an earlier run.
    Dump {
        /// The snapshot file to read.
        #[arg(short, long, default_value = "table.json")]
        table: PathBuf,
    },
}
