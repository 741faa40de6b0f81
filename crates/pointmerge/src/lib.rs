//! Pointmerge: merge point datasets into one combined dataset with
//! linked, translatable selections.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all pointmerge sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use pointmerge::prelude::*;
//!
//! let mut store: DatasetStore = DatasetStore::new();
//! let a = store
//!     .insert_points("a", vec![1.0, 2.0, 3.0, 4.0], 2, vec!["x".into(), "y".into()])
//!     .unwrap();
//! let b = store
//!     .insert_points("b", vec![5.0, 6.0], 2, vec!["x".into(), "y".into()])
//!     .unwrap();
//!
//! let (sink, events) = ChannelSink::new();
//! let outcome = combine_datasets(&mut store, &sink, &[a, b], &CombineConfig::default()).unwrap();
//! let combined = outcome.combined().unwrap();
//!
//! assert_eq!(combined.offsets, vec![0, 2]);
//! assert_eq!(store.payload(combined.id).unwrap(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//! assert_eq!(store.translate_selection(combined.id, b, &[2]), Some(vec![0]));
//! assert_eq!(events.try_recv().unwrap(), DataEvent::DataChanged(combined.id));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `pointmerge-core` | IDs, selection maps, properties, collaborator traits |
//! | [`store`] | `pointmerge-store` | In-memory repository and notification sinks |
//! | [`combine`] | `pointmerge-combine` | Planner, merge builder, `combine_datasets` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`pointmerge-core`).
pub use pointmerge_core as types;

/// In-memory dataset repository and notification sinks (`pointmerge-store`).
pub use pointmerge_store as store;

/// The combine operation (`pointmerge-combine`).
pub use pointmerge_combine as combine;

/// Common imports for typical usage.
///
/// ```rust
/// use pointmerge::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use pointmerge_core::{
        DataChangeSink, DatasetId, DatasetRepository, LinkRegistry, PropertyValue,
        RepositoryError, SelectionMap, COMBINED_DATASET_IDS, COMBINED_DATASET_OFFSETS,
    };

    // Store
    pub use pointmerge_store::{ChannelSink, DataEvent, DatasetStore};

    // Combine
    pub use pointmerge_combine::{
        combine_datasets, CombineConfig, CombineError, CombineOutcome, CombinedDataset,
        Rejection,
    };
}
