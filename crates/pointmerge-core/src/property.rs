//! Named dataset properties.

use crate::id::DatasetId;

/// Property key holding the ordered source dataset IDs of a combined dataset.
pub const COMBINED_DATASET_IDS: &str = "Combined Dataset IDs";

/// Property key holding the ordered per-source start offsets of a combined dataset.
pub const COMBINED_DATASET_OFFSETS: &str = "Combined Dataset Offsets";

/// A value stored under a named property on a dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyValue {
    /// Free-form text.
    Text(String),
    /// An ordered sequence of dataset IDs.
    IdList(Vec<DatasetId>),
    /// An ordered sequence of unsigned integers.
    UIntList(Vec<u32>),
}

impl PropertyValue {
    /// The ID list, if this is an [`IdList`](Self::IdList).
    pub fn as_id_list(&self) -> Option<&[DatasetId]> {
        match self {
            Self::IdList(ids) => Some(ids),
            _ => None,
        }
    }

    /// The integer list, if this is a [`UIntList`](Self::UIntList).
    pub fn as_uint_list(&self) -> Option<&[u32]> {
        match self {
            Self::UIntList(values) => Some(values),
            _ => None,
        }
    }

    /// The text, if this is [`Text`](Self::Text).
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Vec<DatasetId>> for PropertyValue {
    fn from(ids: Vec<DatasetId>) -> Self {
        Self::IdList(ids)
    }
}

impl From<Vec<u32>> for PropertyValue {
    fn from(values: Vec<u32>) -> Self {
        Self::UIntList(values)
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
