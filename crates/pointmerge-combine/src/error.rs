//! Fatal errors from the combine operation.
//!
//! Declined inputs are not errors; see
//! [`CombineOutcome::Declined`](crate::CombineOutcome::Declined).

use std::error::Error;
use std::fmt;

use pointmerge_core::{DatasetId, RepositoryError};

use crate::config::ConfigError;

/// Errors that abort a combine operation.
///
/// When one of these is returned the repository holds no combined
/// dataset and no links or hooks from this operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombineError {
    /// The configuration failed validation.
    InvalidConfig(ConfigError),
    /// A repository call failed (unknown input, creation failure, ...).
    Repository(RepositoryError),
    /// The combined buffer could not be allocated.
    AllocationFailed {
        /// Number of elements requested.
        elements: usize,
    },
    /// The combined point count, or buffer length, does not fit the
    /// index space.
    IndexOverflow {
        /// Total number of points across all inputs.
        points: u64,
        /// Shared number of dimensions.
        num_dimensions: u32,
    },
    /// An input's range `offset..offset + num_points` does not fit in `u32`.
    RangeOverflow {
        /// First combined index of the range.
        offset: u32,
        /// Number of points in the range.
        num_points: u32,
    },
    /// A plan's per-input vectors are empty or of different lengths.
    MalformedPlan {
        /// Length of `sources`.
        sources: usize,
        /// Length of `point_counts`.
        point_counts: usize,
        /// Length of `offsets`.
        offsets: usize,
    },
    /// An input's payload length disagrees with its declared shape.
    PayloadLength {
        /// The offending input.
        dataset: DatasetId,
        /// `num_points * num_dimensions`.
        expected: usize,
        /// Elements actually visited.
        found: usize,
    },
}

impl fmt::Display for CombineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(e) => write!(f, "invalid config: {e}"),
            Self::Repository(e) => write!(f, "repository: {e}"),
            Self::AllocationFailed { elements } => {
                write!(f, "failed to allocate combined buffer of {elements} elements")
            }
            Self::IndexOverflow {
                points,
                num_dimensions,
            } => write!(
                f,
                "{points} combined points of {num_dimensions} dimensions exceed the index space"
            ),
            Self::RangeOverflow { offset, num_points } => write!(
                f,
                "{num_points} points starting at {offset} exceed the index space"
            ),
            Self::MalformedPlan {
                sources,
                point_counts,
                offsets,
            } => write!(
                f,
                "malformed plan: {sources} sources, {point_counts} point counts, {offsets} offsets"
            ),
            Self::PayloadLength {
                dataset,
                expected,
                found,
            } => write!(
                f,
                "dataset {dataset} payload has {found} elements, expected {expected}"
            ),
        }
    }
}

impl Error for CombineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidConfig(e) => Some(e),
            Self::Repository(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for CombineError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidConfig(e)
    }
}

impl From<RepositoryError> for CombineError {
    fn from(e: RepositoryError) -> Self {
        Self::Repository(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_error_is_source() {
        let e = CombineError::from(RepositoryError::UnknownDataset { id: DatasetId(4) });
        assert_eq!(e.to_string(), "repository: unknown dataset: 4");
        assert!(e.source().is_some());
    }

    #[test]
    fn overflow_display() {
        let e = CombineError::IndexOverflow {
            points: 5_000_000_000,
            num_dimensions: 3,
        };
        assert!(e.to_string().contains("5000000000"));
        assert!(e.source().is_none());
    }

    #[test]
    fn malformed_plan_display() {
        let e = CombineError::MalformedPlan {
            sources: 2,
            point_counts: 1,
            offsets: 2,
        };
        assert_eq!(
            e.to_string(),
            "malformed plan: 2 sources, 1 point counts, 2 offsets"
        );
    }
}
