//! Data-changed notification over a crossbeam channel.

use crossbeam_channel::{Receiver, Sender};
use pointmerge_core::{DataChangeSink, DatasetId};
use tracing::debug;

/// An event published by a [`ChannelSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataEvent {
    /// The payload and properties of the dataset were finalised.
    DataChanged(DatasetId),
}

/// A [`DataChangeSink`] that forwards notifications to a channel.
///
/// The channel is unbounded, so notifying never blocks. If every
/// receiver has been dropped the notification is discarded.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: Sender<DataEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiving end of its channel.
    pub fn new() -> (Self, Receiver<DataEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }
}

impl DataChangeSink for ChannelSink {
    fn notify_data_changed(&self, id: DatasetId) {
        if self.tx.send(DataEvent::DataChanged(id)).is_err() {
            debug!(dataset = %id, "data-changed notification dropped, no receiver");
        }
    }
}
