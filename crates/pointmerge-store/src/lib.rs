//! In-memory dataset repository and notification sinks.
//!
//! [`DatasetStore`] is a complete [`DatasetRepository`] implementation:
//! it allocates point datasets, stores payloads, dimension names,
//! properties and linked data, and runs removal hooks when a dataset is
//! destroyed. [`ChannelSink`] forwards data-changed notifications over a
//! crossbeam channel.
//!
//! # Removal order
//!
//! ```text
//! remove_dataset(id)
//! ├── fire hooks subscribed on `id` (subscription order)
//! ├── revoke hooks owned by `id` (never fired)
//! └── drop the dataset record and the links it owns
//! ```
//!
//! [`DatasetRepository`]: pointmerge_core::DatasetRepository

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dataset;
pub mod observer;
pub mod sink;
pub mod store;

pub use dataset::PointDataset;
pub use observer::RemovalRegistry;
pub use sink::{ChannelSink, DataEvent};
pub use store::DatasetStore;
