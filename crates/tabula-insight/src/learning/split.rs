//! Train/test partitioning.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};

/// Shuffle `items` with `rng` and split at `floor(len * train_fraction)`.
///
/// Returns `(train, test)`. Either side may be empty for tiny inputs.
pub fn train_test_split<T: Clone, R: Rng + ?Sized>(
    items: &[T],
    train_fraction: f64,
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    split_at_fraction(shuffled, train_fraction)
}

fn split_at_fraction<T>(mut items: Vec<T>, train_fraction: f64) -> (Vec<T>, Vec<T>) {
    let split_index = ((items.len() as f64 * train_fraction).floor() as usize).min(items.len());
    let test = items.split_off(split_index);
    (items, test)
}

/// How rows are ordered before splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SplitStrategy {
    /// Fresh thread-local entropy on every split.
    #[default]
    Shuffled,
    /// Reproducible shuffle.
    Seeded(u64),
    /// Keep input order.
    Ordered,
}

impl SplitStrategy {
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(SplitStrategy::Seeded).unwrap_or_default()
    }

    pub fn split<T: Clone>(&self, items: &[T], train_fraction: f64) -> (Vec<T>, Vec<T>) {
        match self {
            SplitStrategy::Shuffled => train_test_split(items, train_fraction, &mut thread_rng()),
            SplitStrategy::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(*seed);
                train_test_split(items, train_fraction, &mut rng)
            }
            SplitStrategy::Ordered => split_at_fraction(items.to_vec(), train_fraction),
        }
    }
}
