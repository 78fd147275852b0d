//! Seeded train/held-out partition. No stratification: tiny tables may hold out a label
//! entirely.

use super::EncodedDataset;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Returns `(train, test)`. The test set holds `round(held_out_fraction * n)` rows drawn
/// from a permutation seeded by `seed`; the rest train. `held_out_fraction` is clamped to
/// `[0, 1]`; NaN holds nothing out.
pub fn split(
    dataset: &EncodedDataset,
    held_out_fraction: f64,
    seed: u64,
) -> (EncodedDataset, EncodedDataset) {
    let n = dataset.len();
    let fraction = if held_out_fraction.is_nan() {
        0.0
    } else {
        held_out_fraction.clamp(0.0, 1.0)
    };
    let n_test = ((fraction * n as f64).round() as usize).min(n);

    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let (test_idx, train_idx) = order.split_at(n_test);
    tracing::debug!(n, n_train = train_idx.len(), n_test, seed, "split dataset");
    (dataset.select(train_idx), dataset.select(test_idx))
}
