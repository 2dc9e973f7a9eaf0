// venus_sim/src/simulation/config/mod.rs

//! This module handles loading and validating the mission configuration.
//!
//! Values are layered: built-in defaults, then the mission TOML file, then
//! `VENUS_`-prefixed environment variables (`__` separates nested keys, e.g.
//! `VENUS_BROKER__HOST=localhost`).

pub mod structs;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;
use thiserror::Error;

pub use structs::{
    BrokerConfig, MapConfig, MissionConfig, OutputConfig, PipelineConfig, PublisherConfig,
    RobotLink, RobotLinks,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load mission configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid mission configuration: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Load(Box::new(e))
    }
}

/// The figment every mission configuration is extracted from.
/// A missing file is not an error; the defaults are used instead.
pub fn mission_figment(path: &Path) -> Figment {
    Figment::from(Serialized::defaults(MissionConfig::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("VENUS_").split("__"))
}

/// Loads and validates the mission configuration at `path`.
pub fn load_mission_config(path: &Path) -> Result<MissionConfig, ConfigError> {
    MissionConfig::from_figment(mission_figment(path))
}

impl MissionConfig {
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: MissionConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.queue_capacity must be at least 1".into(),
            ));
        }
        if self.pipeline.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.poll_interval_ms must be at least 1".into(),
            ));
        }
        if self.robots.a.topic == self.robots.b.topic {
            return Err(ConfigError::Invalid(format!(
                "robots a and b must use different topics, both use '{}'",
                self.robots.a.topic
            )));
        }
        if self.map.zoom_range <= 0 {
            return Err(ConfigError::Invalid("map.zoom_range must be positive".into()));
        }
        if self.map.auto_zoom_padding < 0 {
            return Err(ConfigError::Invalid(
                "map.auto_zoom_padding must not be negative".into(),
            ));
        }
        if self.publisher.max_step < 0 {
            return Err(ConfigError::Invalid(
                "publisher.max_step must not be negative".into(),
            ));
        }
        let [min_size, max_size] = self.publisher.size_range;
        if min_size > max_size {
            return Err(ConfigError::Invalid(format!(
                "publisher.size_range [{min_size}, {max_size}] is empty"
            )));
        }
        let probabilities = [
            ("rock_probability", self.publisher.rock_probability),
            ("cliff_probability", self.publisher.cliff_probability),
            ("mountain_probability", self.publisher.mountain_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!(
                    "publisher.{name} must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}
