//! [`DatasetStore`]: the in-memory dataset repository.

use indexmap::IndexMap;
use pointmerge_core::{
    DatasetId, DatasetRepository, LinkRegistry, PropertyValue, RemovalHook, RepositoryError,
    SelectionMap, SubscriptionId,
};
use tracing::debug;

use crate::dataset::PointDataset;
use crate::observer::RemovalRegistry;

/// An in-memory repository of point datasets with element type `T`.
///
/// Dataset IDs are allocated from a monotonic counter and never reused,
/// so a removed dataset's ID stays dead.
#[derive(Debug)]
pub struct DatasetStore<T = f32> {
    datasets: IndexMap<DatasetId, PointDataset<T>>,
    observers: RemovalRegistry,
    next_id: u64,
}

impl<T> Default for DatasetStore<T> {
    fn default() -> Self {
        Self {
            datasets: IndexMap::new(),
            observers: RemovalRegistry::new(),
            next_id: 0,
        }
    }
}

impl<T: Copy> DatasetStore<T> {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dataset and fill it in one call.
    pub fn insert_points(
        &mut self,
        name: &str,
        data: Vec<T>,
        num_dimensions: u32,
        dimension_names: Vec<String>,
    ) -> Result<DatasetId, RepositoryError> {
        let id = self.create_point_dataset(name)?;
        self.set_payload(id, data, num_dimensions)?;
        self.set_dimension_names(id, dimension_names)?;
        Ok(id)
    }

    /// The dataset record for `id`.
    pub fn get(&self, id: DatasetId) -> Option<&PointDataset<T>> {
        self.datasets.get(&id)
    }

    /// The payload of `id` as one contiguous slice.
    pub fn payload(&self, id: DatasetId) -> Result<&[T], RepositoryError> {
        Ok(&self.dataset(id)?.data)
    }

    /// The name of `id`.
    pub fn name(&self, id: DatasetId) -> Result<&str, RepositoryError> {
        Ok(&self.dataset(id)?.name)
    }

    /// Number of live datasets.
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Whether the store holds no datasets.
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Live dataset IDs in creation order.
    pub fn ids(&self) -> impl Iterator<Item = DatasetId> + '_ {
        self.datasets.keys().copied()
    }

    /// Targets that `owner` holds linked data for, in registration order.
    pub fn linked_targets(&self, owner: DatasetId) -> Vec<DatasetId> {
        self.datasets
            .get(&owner)
            .map(|ds| ds.links.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Total number of linked-data entries across all datasets.
    pub fn link_count(&self) -> usize {
        self.datasets.values().map(|ds| ds.links.len()).sum()
    }

    /// Translate a selection in `from` into the matching selection in `to`.
    ///
    /// Returns `None` if `from` holds no linked data for `to`.
    pub fn translate_selection(
        &self,
        from: DatasetId,
        to: DatasetId,
        selection: &[u32],
    ) -> Option<Vec<u32>> {
        self.linked_data(from, to).map(|map| map.translate(selection))
    }

    /// The removal subscription table.
    pub fn observers(&self) -> &RemovalRegistry {
        &self.observers
    }

    fn dataset(&self, id: DatasetId) -> Result<&PointDataset<T>, RepositoryError> {
        self.datasets
            .get(&id)
            .ok_or(RepositoryError::UnknownDataset { id })
    }

    fn dataset_mut(&mut self, id: DatasetId) -> Result<&mut PointDataset<T>, RepositoryError> {
        self.datasets
            .get_mut(&id)
            .ok_or(RepositoryError::UnknownDataset { id })
    }
}

impl<T> LinkRegistry for DatasetStore<T> {
    fn add_linked_data(
        &mut self,
        owner: DatasetId,
        target: DatasetId,
        map: SelectionMap,
    ) -> Result<(), RepositoryError> {
        if !self.datasets.contains_key(&target) {
            return Err(RepositoryError::UnknownDataset { id: target });
        }
        let ds = self
            .datasets
            .get_mut(&owner)
            .ok_or(RepositoryError::UnknownDataset { id: owner })?;
        ds.links.insert(target, map);
        Ok(())
    }

    fn remove_linked_dataset(&mut self, owner: DatasetId, target: DatasetId) -> bool {
        self.datasets
            .get_mut(&owner)
            .is_some_and(|ds| ds.links.shift_remove(&target).is_some())
    }

    fn linked_data(&self, owner: DatasetId, target: DatasetId) -> Option<&SelectionMap> {
        self.datasets.get(&owner)?.links.get(&target)
    }
}

impl<T: Copy> DatasetRepository for DatasetStore<T> {
    type Elem = T;

    fn create_point_dataset(&mut self, name: &str) -> Result<DatasetId, RepositoryError> {
        let id = DatasetId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| RepositoryError::CreationFailed {
                reason: "dataset id space exhausted".to_string(),
            })?;
        self.datasets.insert(id, PointDataset::empty(name));
        debug!(dataset = %id, name, "created point dataset");
        Ok(id)
    }

    fn contains(&self, id: DatasetId) -> bool {
        self.datasets.contains_key(&id)
    }

    fn num_dimensions(&self, id: DatasetId) -> Result<u32, RepositoryError> {
        Ok(self.dataset(id)?.num_dimensions)
    }

    fn num_points(&self, id: DatasetId) -> Result<u32, RepositoryError> {
        let points = self.dataset(id)?.num_points();
        u32::try_from(points).map_err(|_| RepositoryError::TooManyPoints { id, points })
    }

    fn dimension_names(&self, id: DatasetId) -> Result<&[String], RepositoryError> {
        Ok(&self.dataset(id)?.dimension_names)
    }

    fn visit_payload(
        &self,
        id: DatasetId,
        visitor: &mut dyn FnMut(&[T]),
    ) -> Result<(), RepositoryError> {
        visitor(self.dataset(id)?.data.as_slice());
        Ok(())
    }

    fn set_payload(
        &mut self,
        id: DatasetId,
        data: Vec<T>,
        num_dimensions: u32,
    ) -> Result<(), RepositoryError> {
        let ds = self.dataset_mut(id)?;
        let whole = match num_dimensions {
            0 => data.is_empty(),
            d => data.len() % d as usize == 0,
        };
        if !whole {
            return Err(RepositoryError::PayloadShape {
                id,
                len: data.len(),
                num_dimensions,
            });
        }
        if num_dimensions > 0 {
            let points = data.len() / num_dimensions as usize;
            if u32::try_from(points).is_err() {
                return Err(RepositoryError::TooManyPoints { id, points });
            }
        }
        ds.data = data;
        ds.num_dimensions = num_dimensions;
        Ok(())
    }

    fn set_dimension_names(
        &mut self,
        id: DatasetId,
        names: Vec<String>,
    ) -> Result<(), RepositoryError> {
        self.dataset_mut(id)?.dimension_names = names;
        Ok(())
    }

    fn set_property(
        &mut self,
        id: DatasetId,
        key: &str,
        value: PropertyValue,
    ) -> Result<(), RepositoryError> {
        self.dataset_mut(id)?
            .properties
            .insert(key.to_string(), value);
        Ok(())
    }

    fn property(
        &self,
        id: DatasetId,
        key: &str,
    ) -> Result<Option<&PropertyValue>, RepositoryError> {
        Ok(self.dataset(id)?.properties.get(key))
    }

    fn subscribe_removal(
        &mut self,
        subject: DatasetId,
        owner: DatasetId,
        hook: RemovalHook,
    ) -> Result<SubscriptionId, RepositoryError> {
        for id in [subject, owner] {
            if !self.datasets.contains_key(&id) {
                return Err(RepositoryError::UnknownDataset { id });
            }
        }
        Ok(self.observers.subscribe(subject, owner, hook))
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        self.observers.unsubscribe(subscription)
    }

    fn remove_dataset(&mut self, id: DatasetId) -> Result<(), RepositoryError> {
        if !self.datasets.contains_key(&id) {
            return Err(RepositoryError::UnknownDataset { id });
        }
        let hooks = self.observers.take_subject(id);
        let fired = hooks.len();
        for hook in hooks {
            hook(&mut *self as &mut dyn LinkRegistry);
        }
        let revoked = self.observers.revoke_owned(id);
        self.datasets.shift_remove(&id);
        debug!(dataset = %id, fired, revoked, "removed dataset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("d{i}")).collect()
    }

    fn two_points(store: &mut DatasetStore) -> DatasetId {
        store
            .insert_points("a", vec![1.0, 2.0, 3.0, 4.0], 2, names(2))
            .unwrap()
    }

    #[test]
    fn ids_are_never_reused() {
        let mut store = DatasetStore::<f32>::new();
        let a = store.create_point_dataset("a").unwrap();
        store.remove_dataset(a).unwrap();
        let b = store.create_point_dataset("b").unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn payload_shape_reported() {
        let mut store = DatasetStore::new();
        let a = two_points(&mut store);
        assert_eq!(store.num_points(a).unwrap(), 2);
        assert_eq!(store.num_dimensions(a).unwrap(), 2);
        assert_eq!(store.dimension_names(a).unwrap(), &names(2)[..]);
        assert_eq!(store.payload(a).unwrap(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn ragged_payload_rejected() {
        let mut store = DatasetStore::new();
        let a = store.create_point_dataset("a").unwrap();
        let err = store.set_payload(a, vec![1.0f32, 2.0, 3.0], 2).unwrap_err();
        assert_eq!(
            err,
            RepositoryError::PayloadShape {
                id: a,
                len: 3,
                num_dimensions: 2
            }
        );
        assert!(store.set_payload(a, vec![1.0], 0).is_err());
        assert!(store.set_payload(a, vec![], 0).is_ok());
    }

    #[test]
    fn visit_payload_sees_storage_order() {
        let mut store = DatasetStore::new();
        let a = two_points(&mut store);
        let mut seen = Vec::new();
        store
            .visit_payload(a, &mut |chunk: &[f32]| seen.extend_from_slice(chunk))
            .unwrap();
        assert_eq!(seen, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn unknown_dataset_errors() {
        let store = DatasetStore::<f32>::new();
        let ghost = DatasetId(99);
        assert_eq!(
            store.num_points(ghost),
            Err(RepositoryError::UnknownDataset { id: ghost })
        );
        assert!(store.property(ghost, "k").is_err());
    }

    #[test]
    fn link_add_replace_remove() {
        let mut store = DatasetStore::new();
        let a = two_points(&mut store);
        let b = two_points(&mut store);

        let mut m = SelectionMap::new();
        m.insert_single(0, 1);
        store.add_linked_data(a, b, m).unwrap();
        assert_eq!(store.translate_selection(a, b, &[0]), Some(vec![1]));

        let mut m2 = SelectionMap::new();
        m2.insert_single(0, 0);
        store.add_linked_data(a, b, m2).unwrap();
        assert_eq!(store.translate_selection(a, b, &[0]), Some(vec![0]));
        assert_eq!(store.link_count(), 1);

        assert!(store.remove_linked_dataset(a, b));
        assert!(!store.remove_linked_dataset(a, b));
        assert_eq!(store.translate_selection(a, b, &[0]), None);
    }

    #[test]
    fn link_to_missing_target_rejected() {
        let mut store = DatasetStore::new();
        let a = two_points(&mut store);
        let err = store
            .add_linked_data(a, DatasetId(50), SelectionMap::new())
            .unwrap_err();
        assert_eq!(err, RepositoryError::UnknownDataset { id: DatasetId(50) });
    }

    #[test]
    fn remove_fires_subject_hooks_once() {
        let mut store = DatasetStore::new();
        let a = two_points(&mut store);
        let b = two_points(&mut store);
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        store
            .subscribe_removal(
                a,
                b,
                Box::new(move |_: &mut dyn LinkRegistry| {
                    c.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();

        store.remove_dataset(a).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(store.observers().is_empty());
        assert!(store.remove_dataset(a).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn removing_owner_revokes_hooks() {
        let mut store = DatasetStore::new();
        let a = two_points(&mut store);
        let b = two_points(&mut store);
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        store
            .subscribe_removal(
                a,
                b,
                Box::new(move |_: &mut dyn LinkRegistry| {
                    c.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();

        store.remove_dataset(b).unwrap();
        assert!(store.observers().is_empty());
        store.remove_dataset(a).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn hook_can_unlink_through_registry() {
        let mut store = DatasetStore::new();
        let a = two_points(&mut store);
        let b = two_points(&mut store);
        store.add_linked_data(b, a, SelectionMap::new()).unwrap();
        store
            .subscribe_removal(
                a,
                b,
                Box::new(move |links: &mut dyn LinkRegistry| {
                    links.remove_linked_dataset(b, a);
                }),
            )
            .unwrap();

        store.remove_dataset(a).unwrap();
        assert!(store.linked_targets(b).is_empty());
    }

    #[test]
    fn unsubscribe_prevents_hook() {
        let mut store = DatasetStore::new();
        let a = two_points(&mut store);
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        let sub = store
            .subscribe_removal(
                a,
                a,
                Box::new(move |_: &mut dyn LinkRegistry| {
                    c.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();
        assert!(store.unsubscribe(sub));
        store.remove_dataset(a).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn subscribe_requires_live_datasets() {
        let mut store = DatasetStore::new();
        let a = two_points(&mut store);
        let err = store
            .subscribe_removal(a, DatasetId(77), Box::new(|_: &mut dyn LinkRegistry| {}))
            .unwrap_err();
        assert_eq!(err, RepositoryError::UnknownDataset { id: DatasetId(77) });
    }

    #[test]
    fn properties_round_trip() {
        let mut store = DatasetStore::new();
        let a = two_points(&mut store);
        store
            .set_property(a, "offsets", PropertyValue::UIntList(vec![0, 2]))
            .unwrap();
        assert_eq!(
            store.property(a, "offsets").unwrap(),
            Some(&PropertyValue::UIntList(vec![0, 2]))
        );
        assert_eq!(store.property(a, "missing").unwrap(), None);
    }
}
