//! Removal subscriptions.
//!
//! Each subscription pairs a *subject* (the dataset being watched) with
//! an *owner* (the dataset whose lifetime bounds the hook). A hook fires
//! at most once: either its subject is removed and it runs, or its owner
//! is removed first and it is dropped unrun.

use std::fmt;

use indexmap::IndexMap;
use pointmerge_core::{DatasetId, RemovalHook, SubscriptionId};

struct Subscription {
    subject: DatasetId,
    owner: DatasetId,
    hook: RemovalHook,
}

/// Table of pending removal hooks, in subscription order.
#[derive(Default)]
pub struct RemovalRegistry {
    subscriptions: IndexMap<SubscriptionId, Subscription>,
    next_id: u64,
}

impl fmt::Debug for RemovalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemovalRegistry")
            .field("pending", &self.subscriptions.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl RemovalRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` to run when `subject` is removed, owned by `owner`.
    pub fn subscribe(
        &mut self,
        subject: DatasetId,
        owner: DatasetId,
        hook: RemovalHook,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.insert(
            id,
            Subscription {
                subject,
                owner,
                hook,
            },
        );
        id
    }

    /// Drop a subscription without running it.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.shift_remove(&id).is_some()
    }

    /// Detach every hook watching `subject`, in subscription order.
    ///
    /// The caller is responsible for running them.
    pub fn take_subject(&mut self, subject: DatasetId) -> Vec<RemovalHook> {
        let ids: Vec<SubscriptionId> = self
            .subscriptions
            .iter()
            .filter(|(_, s)| s.subject == subject)
            .map(|(&id, _)| id)
            .collect();
        ids.into_iter()
            .filter_map(|id| self.subscriptions.shift_remove(&id))
            .map(|s| s.hook)
            .collect()
    }

    /// Drop every subscription owned by `owner`. Returns how many were dropped.
    pub fn revoke_owned(&mut self, owner: DatasetId) -> usize {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|_, s| s.owner != owner);
        before - self.subscriptions.len()
    }

    /// Number of subscriptions still pending.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether no subscriptions are pending.
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Number of pending subscriptions watching `subject`.
    pub fn watching(&self, subject: DatasetId) -> usize {
        self.subscriptions
            .values()
            .filter(|s| s.subject == subject)
            .count()
    }

    /// Number of pending subscriptions owned by `owner`.
    pub fn owned_by(&self, owner: DatasetId) -> usize {
        self.subscriptions
            .values()
            .filter(|s| s.owner == owner)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointmerge_core::LinkRegistry;

    fn noop() -> RemovalHook {
        Box::new(|_: &mut dyn LinkRegistry| {})
    }

    #[test]
    fn subscription_ids_are_sequential() {
        let mut reg = RemovalRegistry::new();
        let a = reg.subscribe(DatasetId(1), DatasetId(0), noop());
        let b = reg.subscribe(DatasetId(2), DatasetId(0), noop());
        assert_eq!(a, SubscriptionId(0));
        assert_eq!(b, SubscriptionId(1));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn take_subject_detaches_only_matching() {
        let mut reg = RemovalRegistry::new();
        reg.subscribe(DatasetId(1), DatasetId(0), noop());
        reg.subscribe(DatasetId(2), DatasetId(0), noop());
        reg.subscribe(DatasetId(1), DatasetId(3), noop());

        let hooks = reg.take_subject(DatasetId(1));
        assert_eq!(hooks.len(), 2);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.watching(DatasetId(2)), 1);
        assert!(reg.take_subject(DatasetId(1)).is_empty());
    }

    #[test]
    fn revoke_owned_drops_as_a_unit() {
        let mut reg = RemovalRegistry::new();
        reg.subscribe(DatasetId(1), DatasetId(9), noop());
        reg.subscribe(DatasetId(2), DatasetId(9), noop());
        reg.subscribe(DatasetId(2), DatasetId(8), noop());

        assert_eq!(reg.owned_by(DatasetId(9)), 2);
        assert_eq!(reg.revoke_owned(DatasetId(9)), 2);
        assert_eq!(reg.owned_by(DatasetId(9)), 0);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.revoke_owned(DatasetId(9)), 0);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let mut reg = RemovalRegistry::new();
        let id = reg.subscribe(DatasetId(1), DatasetId(0), noop());
        assert!(reg.unsubscribe(id));
        assert!(!reg.unsubscribe(id));
        assert!(reg.is_empty());
    }
}
