//! Index correspondences between two datasets' point spaces.
//!
//! A [`SelectionMap`] maps a point index in a "from" dataset to the set
//! of point indices it corresponds to in a "to" dataset. It is the unit
//! of linked data: a repository stores one map per (owner, target) pair
//! and uses it to translate a selection made in the owner into the
//! matching selection in the target.

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;

/// The target indices of a single [`SelectionMap`] entry.
///
/// Inline storage for one element: concatenation links are always
/// one-to-one, so the common case never touches the heap.
pub type TargetSet = SmallVec<[u32; 1]>;

/// A one-to-many mapping from point indices in one dataset to point
/// indices in another.
///
/// Entries keep insertion order (`IndexMap`), so iteration is
/// deterministic and follows the order the map was built in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionMap {
    entries: IndexMap<u32, TargetSet>,
}

impl SelectionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Set the targets for `from`, replacing any previous entry.
    pub fn insert(&mut self, from: u32, targets: TargetSet) {
        self.entries.insert(from, targets);
    }

    /// Set a single target for `from`, replacing any previous entry.
    pub fn insert_single(&mut self, from: u32, to: u32) {
        let mut targets = TargetSet::new();
        targets.push(to);
        self.entries.insert(from, targets);
    }

    /// Add `to` to the targets of `from`, creating the entry if needed.
    ///
    /// A target already present is not repeated.
    pub fn add_target(&mut self, from: u32, to: u32) {
        let targets = self.entries.entry(from).or_default();
        if !targets.contains(&to) {
            targets.push(to);
        }
    }

    /// The targets mapped from `from`, if any.
    pub fn get(&self, from: u32) -> Option<&[u32]> {
        self.entries.get(&from).map(|t| t.as_slice())
    }

    /// Number of source indices with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(from, targets)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[u32])> {
        self.entries.iter().map(|(&from, t)| (from, t.as_slice()))
    }

    /// Translate a selection through the map.
    ///
    /// Returns the union of the targets of every selected index, in
    /// first-seen order with duplicates removed. Indices without an
    /// entry contribute nothing.
    pub fn translate(&self, selection: &[u32]) -> Vec<u32> {
        let mut out: IndexSet<u32> = IndexSet::with_capacity(selection.len());
        for from in selection {
            if let Some(targets) = self.entries.get(from) {
                out.extend(targets.iter().copied());
            }
        }
        out.into_iter().collect()
    }

    /// Whether every entry maps to exactly one target and no two entries
    /// share a target.
    pub fn is_one_to_one(&self) -> bool {
        let mut seen = IndexSet::with_capacity(self.entries.len());
        self.entries
            .values()
            .all(|targets| targets.len() == 1 && seen.insert(targets[0]))
    }
}
