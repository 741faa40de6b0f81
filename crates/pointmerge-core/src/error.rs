//! Errors reported by a dataset repository.

use std::error::Error;
use std::fmt;

use crate::id::DatasetId;

/// Errors from [`DatasetRepository`](crate::DatasetRepository) operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RepositoryError {
    /// The dataset ID does not refer to a live dataset.
    UnknownDataset {
        /// The unrecognised dataset.
        id: DatasetId,
    },
    /// A payload length is not a whole number of points.
    PayloadShape {
        /// The dataset the payload was assigned to.
        id: DatasetId,
        /// Number of elements supplied.
        len: usize,
        /// Declared number of dimensions per point.
        num_dimensions: u32,
    },
    /// A payload holds more points than a `u32` index can address.
    TooManyPoints {
        /// The dataset the payload was assigned to.
        id: DatasetId,
        /// Number of points in the payload.
        points: usize,
    },
    /// The repository could not allocate a new dataset.
    CreationFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDataset { id } => write!(f, "unknown dataset: {id}"),
            Self::PayloadShape {
                id,
                len,
                num_dimensions,
            } => write!(
                f,
                "payload of {len} elements is not a whole number of {num_dimensions}-dimensional points (dataset {id})"
            ),
            Self::TooManyPoints { id, points } => {
                write!(f, "payload of {points} points exceeds u32 index space (dataset {id})")
            }
            Self::CreationFailed { reason } => write!(f, "dataset creation failed: {reason}"),
        }
    }
}

impl Error for RepositoryError {}
