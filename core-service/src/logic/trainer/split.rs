//! Seeded train/test split

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffled row indices split into (train, test).
///
/// Test size is `ceil(test_fraction · n)`, kept within `1..n` so both sides
/// are non-empty when `n >= 2`.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    if n < 2 {
        return (indices, Vec::new());
    }

    let fraction = if test_fraction.is_finite() { test_fraction.clamp(0.0, 1.0) } else { 0.0 };
    let test_size = ((fraction * n as f64).ceil() as usize).clamp(1, n - 1);

    let test = indices.split_off(n - test_size);
    (indices, test)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        let (train, test) = train_test_split(10, 0.2, 42);
        assert_eq!((train.len(), test.len()), (8, 2));

        let (train, test) = train_test_split(11, 0.2, 42);
        assert_eq!((train.len(), test.len()), (8, 3));
    }

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let (train, test) = train_test_split(25, 0.2, 7);
        let mut all: Vec<usize> = train.iter().chain(&test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_seeded_is_deterministic() {
        assert_eq!(train_test_split(30, 0.2, 42), train_test_split(30, 0.2, 42));
    }

    #[test]
    fn test_degenerate_fractions() {
        assert_eq!(train_test_split(5, 0.0, 1).1.len(), 1);
        assert_eq!(train_test_split(5, 1.0, 1).1.len(), 4);
        assert_eq!(train_test_split(1, 0.2, 1).1.len(), 0);
    }
}
