//! Testing utilities.
//!
//! [`RecordingSink`] captures every emission so tests can assert on exactly
//! what an engine sent, channel by channel.

use std::sync::{Arc, Mutex};

use crate::sink::{Channel, Sink};
use crate::value::LogValue;

/// One captured `emit`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub channel: Channel,
    pub parts: Vec<LogValue>,
}

impl Record {
    /// Parts rendered with `Display`.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.parts.iter().map(ToString::to_string).collect()
    }
}

/// A sink that records instead of writing.
///
/// Clones share the same buffer: hand one clone to the engine and keep
/// another for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<Record>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every captured emission, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Emissions on one channel.
    #[must_use]
    pub fn on(&self, channel: Channel) -> Vec<Record> {
        self.records()
            .into_iter()
            .filter(|record| record.channel == channel)
            .collect()
    }

    /// Every emission's parts rendered as strings.
    #[must_use]
    pub fn texts(&self) -> Vec<Vec<String>> {
        self.records().iter().map(Record::texts).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

impl Sink for RecordingSink {
    fn emit(&self, channel: Channel, parts: &[LogValue]) {
        if let Ok(mut records) = self.records.lock() {
            records.push(Record {
                channel,
                parts: parts.to_vec(),
            });
        }
    }
}
