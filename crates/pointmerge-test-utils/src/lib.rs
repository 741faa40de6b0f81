//! Test utilities and fixtures for pointmerge development.
//!
//! Provides a [`RecordingSink`] that captures data-changed
//! notifications, and [`fixtures`] for populating a [`DatasetStore`]
//! with inputs of known shape and content.
//!
//! [`DatasetStore`]: pointmerge_store::DatasetStore

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::Mutex;

use pointmerge_core::{DataChangeSink, DatasetId};

pub use fixtures::{dimension_names, random_payload, sequential_payload, store_with_inputs, InputSpec};

/// A [`DataChangeSink`] that records every notification in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DatasetId>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every dataset notified so far, oldest first.
    pub fn events(&self) -> Vec<DatasetId> {
        self.events.lock().unwrap().clone()
    }

    /// How many times `id` was notified.
    pub fn count(&self, id: DatasetId) -> usize {
        self.events.lock().unwrap().iter().filter(|&&e| e == id).count()
    }
}

impl DataChangeSink for RecordingSink {
    fn notify_data_changed(&self, id: DatasetId) {
        self.events.lock().unwrap().push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.notify_data_changed(DatasetId(3));
        sink.notify_data_changed(DatasetId(1));
        sink.notify_data_changed(DatasetId(3));
        assert_eq!(sink.events(), vec![DatasetId(3), DatasetId(1), DatasetId(3)]);
        assert_eq!(sink.count(DatasetId(3)), 2);
        assert_eq!(sink.count(DatasetId(9)), 0);
    }
}
