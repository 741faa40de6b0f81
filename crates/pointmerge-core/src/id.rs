//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a dataset within a repository.
///
/// IDs are opaque to the combine operation. The repository that created
/// a dataset is the only authority on what an ID refers to; an ID whose
/// dataset has been removed is never reissued by the reference store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatasetId(pub u64);

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for DatasetId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies one removal subscription registered with a repository.
///
/// Returned by
/// [`DatasetRepository::subscribe_removal`](crate::DatasetRepository::subscribe_removal)
/// and accepted by
/// [`DatasetRepository::unsubscribe`](crate::DatasetRepository::unsubscribe).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SubscriptionId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_bare_number() {
        assert_eq!(DatasetId(7).to_string(), "7");
        assert_eq!(SubscriptionId(42).to_string(), "42");
    }

    #[test]
    fn ids_order_numerically() {
        assert!(DatasetId(2) < DatasetId(10));
        assert_eq!(DatasetId::from(3), DatasetId(3));
    }
}
