// venus_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::mapping::MapRenderer;

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::messages::{Colour, RecordPair, RobotRecord, TaggedRecord};
pub use crate::report::RockEntry;
pub use crate::types::{GridPosition, RobotId};

// --- Pipeline Stages ---
pub use crate::aggregation::PairAggregator;
pub use crate::codec::{decode_payload, encode_record, RECORD_KEYS};
pub use crate::mapping::{classify, ExplorationMapper, FeatureKind};

// --- Errors ---
pub use crate::error::{DecodeError, MappingError, ReportError};
