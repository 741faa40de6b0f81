//! Core types and traits for merging linked point datasets.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the abstractions shared by the rest of the workspace: dataset and
//! subscription IDs, [`SelectionMap`] index correspondences, dataset
//! properties, repository errors, and the collaborator traits the
//! combine operation is written against.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod property;
pub mod selection;
pub mod traits;

pub use error::RepositoryError;
pub use id::{DatasetId, SubscriptionId};
pub use property::{PropertyValue, COMBINED_DATASET_IDS, COMBINED_DATASET_OFFSETS};
pub use selection::{SelectionMap, TargetSet};
pub use traits::{DataChangeSink, DatasetRepository, LinkRegistry, RemovalHook};
