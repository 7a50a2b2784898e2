// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles row indices with a seeded RNG and partitions them:
//
//   n_test  = ceil(test_size * n)
//   n_train = n - n_test
//
//   permutation = shuffle(0..n)
//   test  rows  = permutation[..n_test]
//   train rows  = permutation[n_test..]
//
// Determinism:
//   The RNG is ChaCha8 seeded from a u64. ChaCha's output stream
//   is fixed by its algorithm, not by the platform or the rand
//   version, so the same table + seed always gives the same rows.
//
// No stratification: class balance is not checked.
//
// Reference: Rust Book §8 (Vectors)
//            rand / rand_chacha crate documentation

use anyhow::{bail, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::matrix::{FeatureMatrix, TargetVector};

/// The four artifacts of a single split.
#[derive(Debug, Clone)]
pub struct SplitPartitions {
    pub x_train: FeatureMatrix,
    pub x_test:  FeatureMatrix,
    pub y_train: TargetVector,
    pub y_test:  TargetVector,
}

/// Train/test row indices, in permutation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test:  Vec<usize>,
}

/// Compute the seeded train/test index partition for `n` rows.
///
/// # Errors
/// If `test_size` is outside (0, 1) or either side would be empty.
pub fn split_indices(n: usize, test_size: f64, seed: u64) -> Result<SplitIndices> {
    if !(test_size > 0.0 && test_size < 1.0) {
        bail!("test_size must be in (0, 1), got {}", test_size);
    }

    let n_test  = ((n as f64) * test_size).ceil() as usize;
    let n_train = n.saturating_sub(n_test);

    if n_test == 0 || n_train == 0 {
        bail!(
            "With {} samples and test_size={}, one partition would be empty ({} train / {} test)",
            n,
            test_size,
            n_train,
            n_test
        );
    }

    let mut perm: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    perm.shuffle(&mut rng);

    let train = perm.split_off(n_test);
    Ok(SplitIndices { train, test: perm })
}

/// Split X and y into train/test partitions.
pub fn train_test_split(
    x:         &FeatureMatrix,
    y:         &TargetVector,
    test_size: f64,
    seed:      u64,
) -> Result<SplitPartitions> {
    if x.n_rows() != y.len() {
        bail!("X has {} rows but y has {} labels", x.n_rows(), y.len());
    }

    let idx = split_indices(x.n_rows(), test_size, seed)?;

    tracing::debug!(
        "Dataset split: {} train, {} test (test_size={}, seed={})",
        idx.train.len(),
        idx.test.len(),
        test_size,
        seed,
    );

    Ok(SplitPartitions {
        x_train: x.select(&idx.train),
        x_test:  x.select(&idx.test),
        y_train: y.select(&idx.train),
        y_test:  y.select(&idx.test),
    })
}
