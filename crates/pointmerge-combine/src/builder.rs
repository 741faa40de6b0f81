//! Payload concatenation and linked-data construction.
//!
//! [`build_merge`] only reads from the repository: it assembles the
//! combined buffer and both selection maps for every input in memory.
//! [`commit`] then writes everything in one pass and, if any write
//! fails, removes the half-built combined dataset again so nothing is
//! left behind.

use pointmerge_core::{
    DatasetId, DatasetRepository, LinkRegistry, PropertyValue, RemovalHook, SelectionMap,
};
use tracing::{debug, warn};

use crate::combine::CombinedDataset;
use crate::config::CombineConfig;
use crate::error::CombineError;
use crate::planner::CombinePlan;

/// The two selection maps linking one input to the combined dataset.
///
/// An input listed more than once holds one range per occurrence: the
/// forward map covers every range and the reverse map sends each input
/// point to all of its combined copies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputLinks {
    /// The input dataset.
    pub source: DatasetId,
    /// Combined index `offset + p` -> `{p}`. Owned by the combined dataset.
    pub forward: SelectionMap,
    /// Input index `p` -> `{offset + p, ...}`. Owned by the input.
    pub reverse: SelectionMap,
}

impl InputLinks {
    /// Build both maps for an input of `num_points` points starting at `offset`.
    pub fn new(source: DatasetId, offset: u32, num_points: u32) -> Result<Self, CombineError> {
        let mut links = Self {
            source,
            forward: SelectionMap::with_capacity(num_points as usize),
            reverse: SelectionMap::with_capacity(num_points as usize),
        };
        links.add_range(offset, num_points)?;
        Ok(links)
    }

    /// Add another range of `num_points` points starting at `offset`.
    ///
    /// Fails without touching the maps if the range leaves the `u32`
    /// index space.
    pub fn add_range(&mut self, offset: u32, num_points: u32) -> Result<(), CombineError> {
        if offset.checked_add(num_points).is_none() {
            return Err(CombineError::RangeOverflow { offset, num_points });
        }
        for p in 0..num_points {
            self.forward.insert_single(offset + p, p);
            self.reverse.add_target(p, offset + p);
        }
        Ok(())
    }
}

/// Everything needed to publish a combined dataset, staged in memory.
#[derive(Clone, Debug)]
pub struct MergeBuild<T> {
    /// The validated layout.
    pub plan: CombinePlan,
    /// Concatenated payload, input order, point-major.
    pub buffer: Vec<T>,
    /// Dimension names, taken from the first input.
    pub dimension_names: Vec<String>,
    /// Selection maps per distinct input, first-seen order.
    pub links: Vec<InputLinks>,
}

/// Read every input and stage the combined payload and selection maps.
///
/// Performs no writes. Payloads are appended verbatim in input order;
/// each input must deliver exactly `num_points * num_dimensions`
/// elements. `links` holds one entry per distinct input, in first-seen
/// order.
pub fn build_merge<R>(repo: &R, plan: CombinePlan) -> Result<MergeBuild<R::Elem>, CombineError>
where
    R: DatasetRepository + ?Sized,
{
    let first = match plan.sources.first() {
        Some(&first) if plan.is_well_formed() => first,
        _ => {
            return Err(CombineError::MalformedPlan {
                sources: plan.sources.len(),
                point_counts: plan.point_counts.len(),
                offsets: plan.offsets.len(),
            })
        }
    };

    let mut buffer: Vec<R::Elem> = Vec::new();
    buffer
        .try_reserve_exact(plan.buffer_len)
        .map_err(|_| CombineError::AllocationFailed {
            elements: plan.buffer_len,
        })?;

    let mut links: Vec<InputLinks> = Vec::with_capacity(plan.len());
    let inputs = plan
        .sources
        .iter()
        .zip(&plan.point_counts)
        .zip(&plan.offsets);
    for ((&source, &num_points), &offset) in inputs {
        let expected = num_points as usize * plan.num_dimensions as usize;

        let before = buffer.len();
        repo.visit_payload(source, &mut |chunk: &[R::Elem]| {
            buffer.extend_from_slice(chunk)
        })?;
        let found = buffer.len() - before;
        if found != expected {
            return Err(CombineError::PayloadLength {
                dataset: source,
                expected,
                found,
            });
        }

        match links.iter_mut().find(|l| l.source == source) {
            Some(existing) => existing.add_range(offset, num_points)?,
            None => links.push(InputLinks::new(source, offset, num_points)?),
        }
    }

    let dimension_names = repo.dimension_names(first)?.to_vec();

    Ok(MergeBuild {
        plan,
        buffer,
        dimension_names,
        links,
    })
}

/// Create the combined dataset and publish a staged merge into it.
///
/// Registers, per input: the forward map on the combined dataset, the
/// reverse map on the input, and a removal hook on the input that drops
/// the combined dataset's link to it. A hook on the combined dataset
/// drops the inputs' reverse links if it is removed first. Properties,
/// payload and dimension names are set last.
///
/// Does not notify; the caller does that once this returns `Ok`.
pub fn commit<R>(
    repo: &mut R,
    build: MergeBuild<R::Elem>,
    config: &CombineConfig,
) -> Result<CombinedDataset, CombineError>
where
    R: DatasetRepository + ?Sized,
{
    let combined = repo.create_point_dataset(&config.name)?;
    match publish(&mut *repo, combined, build, config) {
        Ok(dataset) => Ok(dataset),
        Err(e) => {
            warn!(dataset = %combined, error = %e, "combine failed, removing partial dataset");
            if let Err(cleanup) = repo.remove_dataset(combined) {
                warn!(dataset = %combined, error = %cleanup, "partial dataset already gone");
            }
            Err(e)
        }
    }
}

fn publish<R>(
    repo: &mut R,
    combined: DatasetId,
    build: MergeBuild<R::Elem>,
    config: &CombineConfig,
) -> Result<CombinedDataset, CombineError>
where
    R: DatasetRepository + ?Sized,
{
    let MergeBuild {
        plan,
        buffer,
        dimension_names,
        links,
    } = build;

    let sources = plan.sources.clone();
    repo.subscribe_removal(
        combined,
        combined,
        Box::new(move |registry: &mut dyn LinkRegistry| {
            for &source in &sources {
                registry.remove_linked_dataset(source, combined);
            }
        }),
    )?;

    for InputLinks {
        source,
        forward,
        reverse,
    } in links
    {
        repo.add_linked_data(combined, source, forward)?;
        repo.add_linked_data(source, combined, reverse)?;
        repo.subscribe_removal(source, combined, unlink_hook(combined, source))?;
        debug!(combined = %combined, source = %source, "linked input");
    }

    repo.set_property(
        combined,
        &config.ids_property,
        PropertyValue::IdList(plan.sources.clone()),
    )?;
    repo.set_property(
        combined,
        &config.offsets_property,
        PropertyValue::UIntList(plan.offsets.clone()),
    )?;
    repo.set_payload(combined, buffer, plan.num_dimensions)?;
    repo.set_dimension_names(combined, dimension_names)?;

    Ok(CombinedDataset {
        id: combined,
        num_dimensions: plan.num_dimensions,
        num_points: plan.total_points,
        source_ids: plan.sources,
        offsets: plan.offsets,
    })
}

/// Hook run when `source` is removed: drop the combined dataset's link to it.
///
/// Safe to run when the link is already gone.
fn unlink_hook(combined: DatasetId, source: DatasetId) -> RemovalHook {
    Box::new(move |registry: &mut dyn LinkRegistry| {
        if registry.remove_linked_dataset(combined, source) {
            debug!(combined = %combined, source = %source, "source removed, unlinked");
        } else {
            debug!(combined = %combined, source = %source, "source removed, link already absent");
        }
    })
}
