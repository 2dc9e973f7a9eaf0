// venus_sim/src/simulation/config/structs.rs

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use venus_core::types::{GridPosition, RobotId};

use crate::simulation::utils::serde_helpers;

// =========================================================================
// == Top-Level Configuration Resource ==
// =========================================================================

/// # MissionConfig
/// The primary Bevy resource holding all configuration for a mission run.
/// This struct is the root of the data parsed from a mission TOML file.
#[derive(Resource, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct MissionConfig {
    #[serde(default)]
    pub broker: BrokerConfig,

    #[serde(default)]
    pub robots: RobotLinks,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub publisher: PublisherConfig,
}

// =========================================================================
// == Configuration Sub-Structs ==
// These map directly to the sections in the mission file.
// =========================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    /// MQTT keep-alive interval in seconds.
    pub keep_alive_secs: u64,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "broker.hivemq.com".to_string(),
            port: 1883,
            keep_alive_secs: 50,
            username: None,
            password: None,
        }
    }
}

impl BrokerConfig {
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }
}

/// The topic and client identity used for one robot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RobotLink {
    pub topic: String,
    pub client_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct RobotLinks {
    pub a: RobotLink,
    pub b: RobotLink,
}

impl Default for RobotLinks {
    fn default() -> Self {
        Self {
            a: RobotLink {
                topic: "pynqbridge/1".to_string(),
                client_id: "venus_robot_a".to_string(),
            },
            b: RobotLink {
                topic: "pynqbridge/2".to_string(),
                client_id: "venus_robot_b".to_string(),
            },
        }
    }
}

impl RobotLinks {
    pub fn get(&self, robot: RobotId) -> &RobotLink {
        match robot {
            RobotId::A => &self.a,
            RobotId::B => &self.b,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct PipelineConfig {
    /// How many decoded records may wait in the ingestion queue.
    pub queue_capacity: usize,
    /// How often the queue is polled, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 64,
            poll_interval_ms: 100,
        }
    }
}

impl PipelineConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct MapConfig {
    #[serde(with = "serde_helpers::grid_position_from_array")]
    pub origin_a: GridPosition,
    #[serde(with = "serde_helpers::grid_position_from_array")]
    pub origin_b: GridPosition,
    /// Half-width of the fixed view, in cells.
    pub zoom_range: i64,
    /// Grow the view so both robots stay visible instead of using `zoom_range`.
    pub auto_zoom: bool,
    /// Spare cells around the furthest robot when `auto_zoom` is on.
    pub auto_zoom_padding: i64,
    /// Initial window size in logical pixels.
    pub window_size: [f32; 2],
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            origin_a: RobotId::A.default_origin(),
            origin_b: RobotId::B.default_origin(),
            zoom_range: 15,
            auto_zoom: false,
            auto_zoom_padding: 10,
            window_size: [1200.0, 600.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct OutputConfig {
    /// Where the rock snapshot is written after every completed pair.
    pub table_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            table_path: "table.json".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct PublisherConfig {
    /// Delay between two published records, in milliseconds.
    pub interval_ms: u64,
    /// Optional seed for the record generator, for repeatable runs.
    pub seed: Option<u64>,
    /// Largest absolute x/y delta per record.
    pub max_step: i64,
    /// Inclusive range of rock sizes.
    pub size_range: [i64; 2],
    pub rock_probability: f64,
    pub cliff_probability: f64,
    pub mountain_probability: f64,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            seed: None,
            max_step: 2,
            size_range: [3, 9],
            rock_probability: 0.5,
            cliff_probability: 0.0,
            mountain_probability: 0.0,
        }
    }
}

impl PublisherConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
