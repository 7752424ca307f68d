//! Seeded train/test partitioning.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{DatasetError, EncodedDataset};

/// Number of rows that go to the test partition
pub fn test_count(n: usize, test_size: f64) -> usize {
    (n as f64 * test_size).ceil() as usize
}

/// Shuffle row indices with `seed` and cut them into `(train, test)`
pub fn split_indices(n: usize, test_size: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = test_count(n, test_size).min(n);
    let train = indices.split_off(n_test);
    (train, indices)
}

/// Split a dataset into `(train, test)` partitions
pub fn train_test_split(
    dataset: &EncodedDataset,
    test_size: f64,
    seed: u64,
) -> Result<(EncodedDataset, EncodedDataset), DatasetError> {
    if !(0.0..1.0).contains(&test_size) || test_size == 0.0 {
        return Err(DatasetError::InvalidSplit(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }

    let (train_idx, test_idx) = split_indices(dataset.len(), test_size, seed);
    if train_idx.is_empty() || test_idx.is_empty() {
        return Err(DatasetError::InvalidSplit(format!(
            "{} rows cannot be split into non-empty partitions",
            dataset.len()
        )));
    }

    Ok((dataset.select(&train_idx), dataset.select(&test_idx)))
}
