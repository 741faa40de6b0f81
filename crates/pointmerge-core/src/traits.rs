//! Collaborator traits consumed by the combine operation.
//!
//! The combine operation never owns datasets. It works through a
//! [`DatasetRepository`] that allocates datasets, stores payloads,
//! properties and linked data, and delivers removal notifications, and
//! it publishes through a [`DataChangeSink`].

use crate::error::RepositoryError;
use crate::id::{DatasetId, SubscriptionId};
use crate::property::PropertyValue;
use crate::selection::SelectionMap;

/// Callback fired once when a subscribed dataset begins removal.
///
/// Receives the repository's link table so it can drop linked data
/// that would otherwise point at the departing dataset.
pub type RemovalHook = Box<dyn FnOnce(&mut dyn LinkRegistry) + Send>;

/// Linked-data storage: one [`SelectionMap`] per (owner, target) pair.
///
/// Object safe, so removal hooks can operate on it without knowing the
/// concrete repository or its element type.
pub trait LinkRegistry {
    /// Register `map` as linked data from `owner` to `target`.
    ///
    /// Both datasets must exist. An existing link from `owner` to
    /// `target` is replaced.
    fn add_linked_data(
        &mut self,
        owner: DatasetId,
        target: DatasetId,
        map: SelectionMap,
    ) -> Result<(), RepositoryError>;

    /// Remove the link from `owner` to `target`.
    ///
    /// Returns `false` when there was nothing to remove, including when
    /// `owner` no longer exists. Never an error.
    fn remove_linked_dataset(&mut self, owner: DatasetId, target: DatasetId) -> bool;

    /// The map registered from `owner` to `target`, if any.
    fn linked_data(&self, owner: DatasetId, target: DatasetId) -> Option<&SelectionMap>;
}

/// A store of point datasets.
///
/// Every dataset in one repository shares the element type
/// [`Elem`](Self::Elem); mixing numeric formats is not supported.
pub trait DatasetRepository: LinkRegistry {
    /// Numeric element type of every payload in this repository.
    type Elem: Copy;

    /// Allocate an empty point dataset and return its ID.
    fn create_point_dataset(&mut self, name: &str) -> Result<DatasetId, RepositoryError>;

    /// Whether `id` refers to a live dataset.
    fn contains(&self, id: DatasetId) -> bool;

    /// Number of values per point.
    fn num_dimensions(&self, id: DatasetId) -> Result<u32, RepositoryError>;

    /// Number of points in the payload.
    fn num_points(&self, id: DatasetId) -> Result<u32, RepositoryError>;

    /// Dimension names, in dimension order.
    fn dimension_names(&self, id: DatasetId) -> Result<&[String], RepositoryError>;

    /// Call `visitor` with the payload as contiguous, point-major slices,
    /// in storage order.
    fn visit_payload(
        &self,
        id: DatasetId,
        visitor: &mut dyn FnMut(&[Self::Elem]),
    ) -> Result<(), RepositoryError>;

    /// Replace the payload of `id`.
    ///
    /// `data.len()` must be a multiple of `num_dimensions`.
    fn set_payload(
        &mut self,
        id: DatasetId,
        data: Vec<Self::Elem>,
        num_dimensions: u32,
    ) -> Result<(), RepositoryError>;

    /// Replace the dimension names of `id`.
    fn set_dimension_names(
        &mut self,
        id: DatasetId,
        names: Vec<String>,
    ) -> Result<(), RepositoryError>;

    /// Set a named property on `id`, replacing any previous value.
    fn set_property(
        &mut self,
        id: DatasetId,
        key: &str,
        value: PropertyValue,
    ) -> Result<(), RepositoryError>;

    /// Read a named property.
    fn property(
        &self,
        id: DatasetId,
        key: &str,
    ) -> Result<Option<&PropertyValue>, RepositoryError>;

    /// Run `hook` once when `subject` begins removal.
    ///
    /// The subscription is owned by `owner`: removing `owner` first
    /// revokes it without running the hook.
    fn subscribe_removal(
        &mut self,
        subject: DatasetId,
        owner: DatasetId,
        hook: RemovalHook,
    ) -> Result<SubscriptionId, RepositoryError>;

    /// Revoke a subscription. Returns `false` if it already fired or was revoked.
    fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool;

    /// Remove a dataset, running its removal hooks first.
    fn remove_dataset(&mut self, id: DatasetId) -> Result<(), RepositoryError>;
}

/// Receives a notification when a dataset's payload has been finalised.
pub trait DataChangeSink {
    /// Called once the payload and properties of `id` are fully set.
    fn notify_data_changed(&self, id: DatasetId);
}
