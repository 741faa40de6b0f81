//! Compatibility check and offset planning.
//!
//! [`plan()`] is pure: it looks only at the shapes of the inputs and
//! decides whether they can be combined, and where each input's points
//! start in the combined index space.

use std::error::Error;
use std::fmt;

use pointmerge_core::{DatasetId, DatasetRepository, RepositoryError};

/// Smallest number of inputs a combine operation accepts.
pub const MIN_INPUTS: usize = 2;

/// The shape of one input dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputShape {
    /// The input dataset.
    pub id: DatasetId,
    /// Values per point.
    pub num_dimensions: u32,
    /// Number of points.
    pub num_points: u32,
}

impl InputShape {
    /// Read the shape of `id` from a repository.
    pub fn read<R: DatasetRepository + ?Sized>(
        repo: &R,
        id: DatasetId,
    ) -> Result<Self, RepositoryError> {
        Ok(Self {
            id,
            num_dimensions: repo.num_dimensions(id)?,
            num_points: repo.num_points(id)?,
        })
    }
}

/// Why a set of inputs was declined.
///
/// Declining is not a failure: nothing was created and the caller is
/// told why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Fewer than [`MIN_INPUTS`] datasets were supplied.
    TooFewDatasets {
        /// Number of datasets supplied.
        supplied: usize,
    },
    /// An input's dimension count differs from the first input's.
    DimensionMismatch {
        /// The first input whose count differs.
        dataset: DatasetId,
        /// Its position in the input list.
        position: usize,
        /// The first input's dimension count.
        expected: u32,
        /// The mismatching count.
        found: u32,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewDatasets { supplied } => write!(
                f,
                "select at least {MIN_INPUTS} datasets to combine, got {supplied}"
            ),
            Self::DimensionMismatch {
                dataset,
                position,
                expected,
                found,
            } => write!(
                f,
                "all datasets need the same number of dimensions: dataset {dataset} \
                 (input {position}) has {found}, expected {expected}"
            ),
        }
    }
}

/// Outcome of [`plan()`] when no plan could be produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanError {
    /// The inputs were declined.
    Rejected(Rejection),
    /// The combined index space would overflow.
    IndexOverflow {
        /// Total number of points across all inputs.
        points: u64,
        /// Shared number of dimensions.
        num_dimensions: u32,
    },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(r) => write!(f, "declined: {r}"),
            Self::IndexOverflow {
                points,
                num_dimensions,
            } => write!(
                f,
                "{points} combined points of {num_dimensions} dimensions exceed the index space"
            ),
        }
    }
}

impl Error for PlanError {}

impl From<Rejection> for PlanError {
    fn from(r: Rejection) -> Self {
        Self::Rejected(r)
    }
}

/// A validated layout for the combined dataset.
///
/// `offsets[i]` is the first combined index of input `i`; the vectors
/// are aligned positionally with the inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinePlan {
    /// Input IDs in combination order.
    pub sources: Vec<DatasetId>,
    /// Shared number of dimensions.
    pub num_dimensions: u32,
    /// Per-input point counts.
    pub point_counts: Vec<u32>,
    /// Per-input start offsets in the combined index space.
    pub offsets: Vec<u32>,
    /// Total number of combined points.
    pub total_points: u32,
    /// Combined buffer length: `total_points * num_dimensions`.
    pub buffer_len: usize,
}

impl CombinePlan {
    /// Number of inputs.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the plan has no inputs. Never true for a plan from [`plan()`].
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Whether the per-input vectors are non-empty and aligned.
    ///
    /// Always true for a plan from [`plan()`]; a hand-built plan may not be.
    pub fn is_well_formed(&self) -> bool {
        !self.sources.is_empty()
            && self.point_counts.len() == self.sources.len()
            && self.offsets.len() == self.sources.len()
    }

    /// Combined index range `[start, end)` covered by input `i`.
    pub fn range(&self, i: usize) -> Option<std::ops::Range<u32>> {
        let start = *self.offsets.get(i)?;
        let count = *self.point_counts.get(i)?;
        Some(start..start.checked_add(count)?)
    }

    /// Position of the input that owns combined index `index`.
    ///
    /// Empty inputs own no indices and are never returned.
    pub fn source_of(&self, index: u32) -> Option<usize> {
        if index >= self.total_points {
            return None;
        }
        // Last input whose offset is <= index and which is non-empty.
        let upper = self.offsets.partition_point(|&o| o <= index);
        (0..upper)
            .rev()
            .find(|&i| self.point_counts.get(i).is_some_and(|&n| n > 0))
    }
}

/// Check that `inputs` can be combined and compute their offsets.
///
/// The first input's dimension count is the reference. Offsets are a
/// left-to-right running total of point counts, recorded before each
/// input is added, so `offsets[0] == 0` and exactly one offset is
/// produced per input.
pub fn plan(inputs: &[InputShape]) -> Result<CombinePlan, PlanError> {
    if inputs.len() < MIN_INPUTS {
        return Err(Rejection::TooFewDatasets {
            supplied: inputs.len(),
        }
        .into());
    }

    let num_dimensions = inputs[0].num_dimensions;
    if let Some((position, bad)) = inputs
        .iter()
        .enumerate()
        .find(|(_, s)| s.num_dimensions != num_dimensions)
    {
        return Err(Rejection::DimensionMismatch {
            dataset: bad.id,
            position,
            expected: num_dimensions,
            found: bad.num_dimensions,
        }
        .into());
    }

    let mut offsets = Vec::with_capacity(inputs.len());
    let mut running: u64 = 0;
    for shape in inputs {
        offsets.push(running);
        running += u64::from(shape.num_points);
    }

    let overflow = PlanError::IndexOverflow {
        points: running,
        num_dimensions,
    };
    let total_points = u32::try_from(running).map_err(|_| overflow.clone())?;
    let buffer_len = usize::try_from(running)
        .ok()
        .and_then(|n| n.checked_mul(num_dimensions as usize))
        .ok_or(overflow)?;

    Ok(CombinePlan {
        sources: inputs.iter().map(|s| s.id).collect(),
        num_dimensions,
        point_counts: inputs.iter().map(|s| s.num_points).collect(),
        // Every offset is <= total_points, which fits in u32.
        offsets: offsets.into_iter().map(|o| o as u32).collect(),
        total_points,
        buffer_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn shape(id: u64, num_dimensions: u32, num_points: u32) -> InputShape {
        InputShape {
            id: DatasetId(id),
            num_dimensions,
            num_points,
        }
    }

    #[test]
    fn zero_and_one_inputs_declined() {
        assert_eq!(
            plan(&[]),
            Err(PlanError::Rejected(Rejection::TooFewDatasets { supplied: 0 }))
        );
        assert_eq!(
            plan(&[shape(0, 2, 3)]),
            Err(PlanError::Rejected(Rejection::TooFewDatasets { supplied: 1 }))
        );
    }

    #[test]
    fn dimension_mismatch_declined() {
        let err = plan(&[shape(0, 3, 1), shape(1, 3, 1), shape(2, 4, 1)]).unwrap_err();
        assert_eq!(
            err,
            PlanError::Rejected(Rejection::DimensionMismatch {
                dataset: DatasetId(2),
                position: 2,
                expected: 3,
                found: 4,
            })
        );
    }

    #[test]
    fn offsets_with_empty_input() {
        let p = plan(&[shape(0, 2, 5), shape(1, 2, 0), shape(2, 2, 3)]).unwrap();
        assert_eq!(p.offsets, vec![0, 5, 5]);
        assert_eq!(p.total_points, 8);
        assert_eq!(p.buffer_len, 16);
        assert_eq!(p.num_dimensions, 2);
        assert_eq!(p.sources, vec![DatasetId(0), DatasetId(1), DatasetId(2)]);
    }

    #[test]
    fn ranges_and_source_lookup() {
        let p = plan(&[shape(0, 2, 5), shape(1, 2, 0), shape(2, 2, 3)]).unwrap();
        assert_eq!(p.range(0), Some(0..5));
        assert_eq!(p.range(1), Some(5..5));
        assert_eq!(p.range(2), Some(5..8));
        assert_eq!(p.range(3), None);

        assert_eq!(p.source_of(0), Some(0));
        assert_eq!(p.source_of(4), Some(0));
        assert_eq!(p.source_of(5), Some(2));
        assert_eq!(p.source_of(7), Some(2));
        assert_eq!(p.source_of(8), None);
    }

    #[test]
    fn hand_built_plan_with_short_vectors() {
        let mut p = plan(&[shape(0, 1, 2), shape(1, 1, 3)]).unwrap();
        assert!(p.is_well_formed());
        p.point_counts.clear();
        assert!(!p.is_well_formed());
        assert_eq!(p.range(0), None);
        assert_eq!(p.source_of(1), None);
        assert_eq!(p.source_of(4), None);

        p.point_counts = vec![1];
        p.offsets = vec![u32::MAX];
        assert_eq!(p.range(0), None);
    }

    #[test]
    fn zero_dimensions_are_compatible() {
        let p = plan(&[shape(0, 0, 4), shape(1, 0, 2)]).unwrap();
        assert_eq!(p.offsets, vec![0, 4]);
        assert_eq!(p.buffer_len, 0);
    }

    #[test]
    fn point_count_overflow_detected() {
        let err = plan(&[shape(0, 1, u32::MAX), shape(1, 1, 1)]).unwrap_err();
        assert_eq!(
            err,
            PlanError::IndexOverflow {
                points: u64::from(u32::MAX) + 1,
                num_dimensions: 1,
            }
        );
    }

    #[test]
    fn rejection_messages() {
        let r = Rejection::TooFewDatasets { supplied: 1 };
        assert!(r.to_string().contains("at least 2"));
    }

    proptest! {
        #[test]
        fn offsets_are_running_totals(
            counts in proptest::collection::vec(0u32..1000, 2..12),
            dims in 1u32..8,
        ) {
            let shapes: Vec<InputShape> = counts
                .iter()
                .enumerate()
                .map(|(i, &n)| shape(i as u64, dims, n))
                .collect();
            let p = plan(&shapes).unwrap();

            prop_assert_eq!(p.offsets.len(), counts.len());
            prop_assert_eq!(p.offsets[0], 0);
            for i in 1..counts.len() {
                prop_assert_eq!(p.offsets[i], p.offsets[i - 1] + counts[i - 1]);
            }
            let total: u32 = counts.iter().sum();
            prop_assert_eq!(p.total_points, total);
            prop_assert_eq!(p.buffer_len, total as usize * dims as usize);
        }
    }
}
