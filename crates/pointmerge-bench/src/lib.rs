//! Benchmark profiles for pointmerge.
//!
//! Provides pre-built input stores for benchmarks and examples:
//!
//! - [`reference_profile`]: 8 inputs x 10K points x 16 dimensions
//! - [`stress_profile`]: 32 inputs x 100K points x 8 dimensions
//! - [`ragged_profile`]: many small inputs of varying size, some empty

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use pointmerge_core::{DatasetId, RepositoryError};
use pointmerge_store::DatasetStore;
use pointmerge_test_utils::{dimension_names, random_payload};

/// A store of `inputs` datasets of `points` x `dims` seeded random values.
pub fn uniform_profile(
    inputs: usize,
    points: u32,
    dims: u32,
    seed: u64,
) -> Result<(DatasetStore, Vec<DatasetId>), RepositoryError> {
    let mut store = DatasetStore::new();
    let mut ids = Vec::with_capacity(inputs);
    for i in 0..inputs {
        let len = points as usize * dims as usize;
        let id = store.insert_points(
            &format!("input {i}"),
            random_payload(seed.wrapping_add(i as u64), len),
            dims,
            dimension_names("dim", dims),
        )?;
        ids.push(id);
    }
    Ok((store, ids))
}

/// 8 inputs x 10K points x 16 dimensions (1.28M values).
pub fn reference_profile(seed: u64) -> Result<(DatasetStore, Vec<DatasetId>), RepositoryError> {
    uniform_profile(8, 10_000, 16, seed)
}

/// 32 inputs x 100K points x 8 dimensions (25.6M values).
pub fn stress_profile(seed: u64) -> Result<(DatasetStore, Vec<DatasetId>), RepositoryError> {
    uniform_profile(32, 100_000, 8, seed)
}

/// 256 inputs of 0..=500 points x 4 dimensions; every 16th input is empty.
pub fn ragged_profile(seed: u64) -> Result<(DatasetStore, Vec<DatasetId>), RepositoryError> {
    let mut store = DatasetStore::new();
    let mut ids = Vec::with_capacity(256);
    for i in 0..256u64 {
        let points = if i % 16 == 0 {
            0
        } else {
            (seed.wrapping_mul(6364136223846793005).wrapping_add(i * 1442695040888963407) % 501)
                as u32
        };
        let len = points as usize * 4;
        let id = store.insert_points(
            &format!("input {i}"),
            random_payload(seed ^ i, len),
            4,
            dimension_names("dim", 4),
        )?;
        ids.push(id);
    }
    Ok((store, ids))
}
