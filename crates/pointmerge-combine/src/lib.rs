//! Concatenate point datasets into one combined dataset with linked selections.
//!
//! The combine operation runs in two stages:
//!
//! ```text
//! combine_datasets(repo, sink, inputs, config)
//! ├── planner::plan         dimension check + per-input start offsets
//! ├── builder::build_merge  read payloads, build forward/reverse maps (no writes)
//! ├── builder::commit       create dataset, link, hook, set properties + payload
//! └── sink.notify_data_changed(combined)
//! ```
//!
//! Fewer than two inputs, or inputs with differing dimension counts, are
//! declined as a no-op ([`CombineOutcome::Declined`]). Anything else that
//! goes wrong is a [`CombineError`], and the repository is left as it was.
//!
//! For each input `i` starting at combined offset `o_i`, the combined
//! dataset owns a forward map `o_i + p -> {p}` and input `i` owns a
//! reverse map `p -> {o_i + p}`. Removing input `i` later drops only the
//! combined dataset's link to it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod combine;
pub mod config;
pub mod error;
pub mod planner;

pub use builder::{build_merge, commit, InputLinks, MergeBuild};
pub use combine::{combine_datasets, CombineOutcome, CombinedDataset};
pub use config::{CombineConfig, ConfigError};
pub use error::CombineError;
pub use planner::{plan, CombinePlan, InputShape, PlanError, Rejection, MIN_INPUTS};
