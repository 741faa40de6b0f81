//! Reusable dataset fixtures.
//!
//! - [`store_with_inputs`]: a store holding one dataset per [`InputSpec`].
//! - [`sequential_payload`]: values that encode their own position.
//! - [`random_payload`]: seeded, reproducible values.

use pointmerge_core::DatasetId;
use pointmerge_store::DatasetStore;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shape of one fixture input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputSpec {
    pub num_dimensions: u32,
    pub num_points: u32,
}

impl InputSpec {
    pub fn new(num_dimensions: u32, num_points: u32) -> Self {
        Self {
            num_dimensions,
            num_points,
        }
    }

    pub fn len(&self) -> usize {
        self.num_dimensions as usize * self.num_points as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `len` values starting at `start`, counting up by one.
///
/// Gives every element in a fixture a distinct value, so misplaced
/// copies show up in assertions.
pub fn sequential_payload(start: f32, len: usize) -> Vec<f32> {
    (0..len).map(|i| start + i as f32).collect()
}

/// `len` reproducible values in `[0, 1)` from a ChaCha8 stream.
pub fn random_payload(seed: u64, len: usize) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32)
        .collect()
}

/// Dimension names `"{prefix}{d}"` for `d` in `0..n`.
pub fn dimension_names(prefix: &str, n: u32) -> Vec<String> {
    (0..n).map(|d| format!("{prefix}{d}")).collect()
}

/// A store with one dataset per spec, in order.
///
/// Input `i` is named `"input {i}"`, has dimension names `"in{i}_"`-prefixed,
/// and a sequential payload whose values continue where the previous
/// input's left off. Concatenating the payloads in order therefore
/// yields `0.0, 1.0, 2.0, ...`.
pub fn store_with_inputs(specs: &[InputSpec]) -> (DatasetStore, Vec<DatasetId>) {
    let mut store = DatasetStore::new();
    let mut next = 0.0f32;
    let ids = specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let data = sequential_payload(next, spec.len());
            next += spec.len() as f32;
            store
                .insert_points(
                    &format!("input {i}"),
                    data,
                    spec.num_dimensions,
                    dimension_names(&format!("in{i}_"), spec.num_dimensions),
                )
                .unwrap()
        })
        .collect();
    (store, ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointmerge_core::DatasetRepository;

    #[test]
    fn inputs_continue_numbering() {
        let (store, ids) = store_with_inputs(&[InputSpec::new(2, 2), InputSpec::new(2, 1)]);
        assert_eq!(store.payload(ids[0]).unwrap(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(store.payload(ids[1]).unwrap(), &[4.0, 5.0]);
        assert_eq!(store.dimension_names(ids[1]).unwrap(), &["in1_0", "in1_1"]);
    }

    #[test]
    fn random_payload_is_reproducible() {
        let a = random_payload(7, 64);
        let b = random_payload(7, 64);
        let c = random_payload(8, 64);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|v| (0.0..1.0).contains(v)));
    }
}
