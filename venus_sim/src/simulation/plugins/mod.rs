// venus_sim/src/simulation/plugins/mod.rs

pub mod aggregation;
pub mod dump;
pub mod ingestion;
pub mod map_view;
pub mod mapping;
