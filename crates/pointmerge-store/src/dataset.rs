//! The per-dataset record held by [`DatasetStore`](crate::DatasetStore).

use indexmap::IndexMap;
use pointmerge_core::{DatasetId, PropertyValue, SelectionMap};

/// A point dataset: a flat, point-major payload plus metadata.
///
/// The payload holds `num_points * num_dimensions` values. Links are
/// keyed by target dataset and kept in registration order.
#[derive(Clone, Debug)]
pub struct PointDataset<T> {
    /// Human-readable name.
    pub name: String,
    /// Number of values per point.
    pub num_dimensions: u32,
    /// Flat payload, point-major.
    pub data: Vec<T>,
    /// One name per dimension.
    pub dimension_names: Vec<String>,
    /// Named properties.
    pub properties: IndexMap<String, PropertyValue>,
    /// Linked data owned by this dataset, keyed by target.
    pub links: IndexMap<DatasetId, SelectionMap>,
}

impl<T> PointDataset<T> {
    /// An empty dataset with no dimensions.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_dimensions: 0,
            data: Vec::new(),
            dimension_names: Vec::new(),
            properties: IndexMap::new(),
            links: IndexMap::new(),
        }
    }

    /// Number of points in the payload.
    ///
    /// A dataset without dimensions has no points.
    pub fn num_points(&self) -> usize {
        match self.num_dimensions {
            0 => 0,
            d => self.data.len() / d as usize,
        }
    }
}
