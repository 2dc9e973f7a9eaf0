// venus_core/src/lib.rs

// This file defines the public modules of the library.
pub mod aggregation;
pub mod codec;
pub mod error;
pub mod mapping;
pub mod messages;
pub mod prelude;
pub mod report;
pub mod types;
