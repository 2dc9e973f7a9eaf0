// venus_sim/src/simulation/plugins/ingestion/queue.rs

//! The bounded queue between the ingestion workers and the main schedule.
//!
//! Workers never block on it: when it is full the record is handed back and
//! the caller drops it.

use bevy::prelude::Resource;
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use venus_core::messages::TaggedRecord;

/// Creates a queue holding at most `capacity` records.
pub fn ingest_queue(capacity: usize) -> (IngestSender, IngestReceiver) {
    let (tx, rx) = bounded(capacity);
    (IngestSender(tx), IngestReceiver(rx))
}

/// Why a record could not be queued.
#[derive(Debug)]
pub enum OfferError {
    Full(TaggedRecord),
    Disconnected(TaggedRecord),
}

/// Producer half, cloned into every worker.
#[derive(Resource, Clone, Debug)]
pub struct IngestSender(Sender<TaggedRecord>);

impl IngestSender {
    pub fn offer(&self, record: TaggedRecord) -> Result<(), OfferError> {
        self.0.try_send(record).map_err(|e| match e {
            TrySendError::Full(r) => OfferError::Full(r),
            TrySendError::Disconnected(r) => OfferError::Disconnected(r),
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.is_full()
    }
}

/// Consumer half, owned by the main schedule.
#[derive(Resource, Debug)]
pub struct IngestReceiver(Receiver<TaggedRecord>);

impl IngestReceiver {
    /// Takes the next queued record without waiting.
    pub fn try_next(&self) -> Option<TaggedRecord> {
        match self.0.try_recv() {
            Ok(record) => Some(record),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Throws away everything currently queued and returns how much that was.
    pub fn drain(&self) -> usize {
        self.0.try_iter().count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
