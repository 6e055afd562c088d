//! Bounded, thread-safe log of observation records.
//!
//! [`EventLog`] keeps the most recent `capacity` records in append order and
//! evicts from the head once full. It is designed to be shared via
//! `Arc<EventLog>` between the poll scheduler (the only writer) and any
//! number of HTTP handlers reading snapshots.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::types::Timestamp;

/// One logged observation: a transition description and when it was seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub description: String,
    pub timestamp: Timestamp,
}

impl EventRecord {
    pub fn new(description: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            description: description.into(),
            timestamp,
        }
    }
}

/// Fixed-capacity FIFO of [`EventRecord`]s.
///
/// All reads and writes go through one mutex. Reads return owned copies so
/// a snapshot handed to a caller never changes after the fact.
pub struct EventLog {
    capacity: NonZeroUsize,
    records: Mutex<VecDeque<EventRecord>>,
}

impl EventLog {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity.get())),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Append at the tail, evicting the oldest records beyond capacity.
    pub async fn append(&self, record: EventRecord) {
        let mut records = self.records.lock().await;
        records.push_back(record);
        while records.len() > self.capacity.get() {
            records.pop_front();
        }
    }

    /// The last `min(n, len)` records, oldest first.
    pub async fn recent(&self, n: usize) -> Vec<EventRecord> {
        let records = self.records.lock().await;
        let skip = records.len().saturating_sub(n);
        records.iter().skip(skip).cloned().collect()
    }

    /// The oldest record still held, if any.
    pub async fn peek(&self) -> Option<EventRecord> {
        self.records.lock().await.front().cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
