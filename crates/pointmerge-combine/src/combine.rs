//! The combine entry point.

use pointmerge_core::{DataChangeSink, DatasetId, DatasetRepository};
use tracing::info;

use crate::builder::{build_merge, commit};
use crate::config::CombineConfig;
use crate::error::CombineError;
use crate::planner::{plan, InputShape, PlanError, Rejection, MIN_INPUTS};

/// Summary of a combined dataset created by [`combine_datasets`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinedDataset {
    /// The new dataset.
    pub id: DatasetId,
    /// Shared number of dimensions.
    pub num_dimensions: u32,
    /// Total number of points.
    pub num_points: u32,
    /// Source dataset IDs in combination order.
    pub source_ids: Vec<DatasetId>,
    /// Per-source start offsets, aligned with `source_ids`.
    pub offsets: Vec<u32>,
}

/// Non-fatal result of [`combine_datasets`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombineOutcome {
    /// The inputs were combined.
    Combined(CombinedDataset),
    /// The inputs were declined; nothing was created.
    Declined(Rejection),
}

impl CombineOutcome {
    /// The combined dataset, if one was created.
    pub fn combined(&self) -> Option<&CombinedDataset> {
        match self {
            Self::Combined(c) => Some(c),
            Self::Declined(_) => None,
        }
    }

    /// The rejection, if the inputs were declined.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Combined(_) => None,
            Self::Declined(r) => Some(r),
        }
    }
}

/// Concatenate `inputs`, in order, into a new dataset in `repo`.
///
/// On success the new dataset holds every input's payload back to back,
/// the first input's dimension names, and the source IDs and start
/// offsets as properties; each input is linked to it in both
/// directions; and `sink` is notified exactly once.
///
/// Fewer than [`MIN_INPUTS`] inputs, or differing dimension counts,
/// yield [`CombineOutcome::Declined`] and leave `repo` untouched. The
/// input count is checked before `config` is validated.
/// Any [`CombineError`] also leaves `repo` as it was.
pub fn combine_datasets<R, S>(
    repo: &mut R,
    sink: &S,
    inputs: &[DatasetId],
    config: &CombineConfig,
) -> Result<CombineOutcome, CombineError>
where
    R: DatasetRepository + ?Sized,
    S: DataChangeSink + ?Sized,
{
    if inputs.len() < MIN_INPUTS {
        return Ok(decline(Rejection::TooFewDatasets {
            supplied: inputs.len(),
        }));
    }

    config.validate()?;

    let shapes = inputs
        .iter()
        .map(|&id| InputShape::read(&*repo, id))
        .collect::<Result<Vec<_>, _>>()?;

    let plan = match plan(&shapes) {
        Ok(plan) => plan,
        Err(PlanError::Rejected(rejection)) => return Ok(decline(rejection)),
        Err(PlanError::IndexOverflow {
            points,
            num_dimensions,
        }) => {
            return Err(CombineError::IndexOverflow {
                points,
                num_dimensions,
            })
        }
    };

    let build = build_merge(&*repo, plan)?;
    let combined = commit(repo, build, config)?;
    sink.notify_data_changed(combined.id);

    info!(
        dataset = %combined.id,
        inputs = combined.source_ids.len(),
        points = combined.num_points,
        dimensions = combined.num_dimensions,
        "combined datasets"
    );
    Ok(CombineOutcome::Combined(combined))
}

fn decline(rejection: Rejection) -> CombineOutcome {
    info!(%rejection, "combine declined, doing nothing");
    CombineOutcome::Declined(rejection)
}
